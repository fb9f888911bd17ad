//! Launcher settings filled in by flag effects during the scan.

use serde::Serialize;

use crate::args::experiments::Experiments;
use crate::args::port::ServiceEndpoint;
use crate::args::registry::{BoolSetting, StringSetting};

pub const DEFAULT_VM_SERVICE_PORT: i32 = 8181;
pub const DEFAULT_VM_SERVICE_ADDRESS: &str = "localhost";

pub const OLDEST_SUPPORTED_ABI_VERSION: u32 = 23;
pub const CURRENT_ABI_VERSION: u32 = 24;

/// Kind of snapshot to generate after loading the script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKind {
    #[default]
    None,
    Kernel,
    AppJit,
}

impl SnapshotKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "none" => Some(SnapshotKind::None),
            "kernel" => Some(SnapshotKind::Kernel),
            "app-jit" => Some(SnapshotKind::AppJit),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotKind::None => "none",
            SnapshotKind::Kernel => "kernel",
            SnapshotKind::AppJit => "app-jit",
        }
    }
}

/// Inclusive range of ABI versions `--use_abi_version` may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbiRange {
    pub oldest: u32,
    pub current: u32,
}

impl AbiRange {
    pub fn contains(self, version: u32) -> bool {
        (self.oldest..=self.current).contains(&version)
    }
}

impl Default for AbiRange {
    fn default() -> Self {
        Self {
            oldest: OLDEST_SUPPORTED_ABI_VERSION,
            current: CURRENT_ABI_VERSION,
        }
    }
}

/// Everything the registered flags can configure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaunchOptions {
    pub packages_file: Option<String>,
    pub namespace: Option<String>,
    pub snapshot_filename: Option<String>,
    pub depfile: Option<String>,
    pub depfile_output_filename: Option<String>,
    pub snapshot_depfile: Option<String>,
    pub root_certs_file: Option<String>,
    pub root_certs_cache: Option<String>,
    pub write_service_info: Option<String>,
    pub save_compilation_trace: Option<String>,
    pub load_compilation_trace: Option<String>,
    pub save_type_feedback: Option<String>,
    pub load_type_feedback: Option<String>,
    pub dfe: Option<String>,

    pub version: bool,
    pub help: bool,
    pub verbose: bool,
    pub dependencies_only: bool,
    pub print_dependencies: bool,
    pub trace_loading: bool,
    pub deterministic: bool,
    pub short_socket_read: bool,
    pub short_socket_write: bool,
    pub disable_exit: bool,
    pub enable_service_port_fallback: bool,
    pub disable_service_auth_codes: bool,
    pub suppress_core_dump: bool,

    pub snapshot_kind: SnapshotKind,
    /// Set once `--enable-vm-service` or `--observe` is accepted.
    pub vm_service: Option<ServiceEndpoint>,
    pub target_abi_version: Option<u32>,
    pub experiments: Experiments,
    pub dev_tool_disabled: bool,
    /// `-D` definitions in first-definition order.
    pub environment: Vec<(String, String)>,
    pub use_incremental_compiler: bool,
}

impl LaunchOptions {
    pub fn vm_service_requested(&self) -> bool {
        self.vm_service.is_some()
    }

    /// Settings observed elsewhere (side channels, engine flags) are ignored.
    pub(crate) fn set_bool(&mut self, setting: BoolSetting, value: bool) {
        let field = match setting {
            BoolSetting::Version => &mut self.version,
            BoolSetting::Help => &mut self.help,
            BoolSetting::Verbose => &mut self.verbose,
            BoolSetting::DependenciesOnly => &mut self.dependencies_only,
            BoolSetting::PrintDependencies => &mut self.print_dependencies,
            BoolSetting::TraceLoading => &mut self.trace_loading,
            BoolSetting::Deterministic => &mut self.deterministic,
            BoolSetting::ShortSocketRead => &mut self.short_socket_read,
            BoolSetting::ShortSocketWrite => &mut self.short_socket_write,
            BoolSetting::DisableExit => &mut self.disable_exit,
            BoolSetting::EnableServicePortFallback => &mut self.enable_service_port_fallback,
            BoolSetting::DisableServiceAuthCodes => &mut self.disable_service_auth_codes,
            BoolSetting::SuppressCoreDump => &mut self.suppress_core_dump,
            BoolSetting::PrintFlags
            | BoolSetting::VerboseDebug
            | BoolSetting::EnableAnalytics
            | BoolSetting::DisableAnalytics
            | BoolSetting::Engine => return,
        };
        *field = value;
    }

    pub(crate) fn set_string(&mut self, setting: StringSetting, value: String) {
        let field = match setting {
            StringSetting::Packages => &mut self.packages_file,
            StringSetting::Namespace => &mut self.namespace,
            StringSetting::Snapshot => &mut self.snapshot_filename,
            StringSetting::Depfile => &mut self.depfile,
            StringSetting::DepfileOutputFilename => &mut self.depfile_output_filename,
            StringSetting::SnapshotDepfile => &mut self.snapshot_depfile,
            StringSetting::RootCertsFile => &mut self.root_certs_file,
            StringSetting::RootCertsCache => &mut self.root_certs_cache,
            StringSetting::WriteServiceInfo => &mut self.write_service_info,
            StringSetting::SaveCompilationTrace => &mut self.save_compilation_trace,
            StringSetting::LoadCompilationTrace => &mut self.load_compilation_trace,
            StringSetting::SaveTypeFeedback => &mut self.save_type_feedback,
            StringSetting::LoadTypeFeedback => &mut self.load_type_feedback,
            StringSetting::Dfe => &mut self.dfe,
        };
        *field = Some(value);
    }

    /// Record `name=value`, replacing an earlier definition of `name` in place.
    pub(crate) fn define(&mut self, name: &str, value: &str) {
        match self.environment.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.environment.push((name.to_string(), value.to_string())),
        }
    }
}
