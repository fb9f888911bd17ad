//! Process-wide settings the launcher pushes out before running a script.

use serde::Serialize;

/// Receives socket, TLS and compiler settings for the runtime process.
pub trait ProcessSink {
    fn set_deterministic(&mut self, on: bool);
    fn set_short_socket_read(&mut self, on: bool);
    fn set_short_socket_write(&mut self, on: bool);
    fn set_root_certs_file(&mut self, path: Option<&str>);
    fn set_root_certs_cache(&mut self, path: Option<&str>);
    fn set_use_incremental_compiler(&mut self, on: bool);
}

/// Plain record of everything pushed to the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessConfig {
    pub deterministic: bool,
    pub short_socket_read: bool,
    pub short_socket_write: bool,
    pub root_certs_file: Option<String>,
    pub root_certs_cache: Option<String>,
    pub use_incremental_compiler: bool,
}

impl ProcessSink for ProcessConfig {
    fn set_deterministic(&mut self, on: bool) {
        self.deterministic = on;
    }

    fn set_short_socket_read(&mut self, on: bool) {
        self.short_socket_read = on;
    }

    fn set_short_socket_write(&mut self, on: bool) {
        self.short_socket_write = on;
    }

    fn set_root_certs_file(&mut self, path: Option<&str>) {
        self.root_certs_file = path.map(String::from);
    }

    fn set_root_certs_cache(&mut self, path: Option<&str>) {
        self.root_certs_cache = path.map(String::from);
    }

    fn set_use_incremental_compiler(&mut self, on: bool) {
        self.use_incremental_compiler = on;
    }
}
