//! Command-line front-end of a script-running VM launcher.
//!
//! Splits the process arguments into runtime flags, dev-tool arguments and
//! the script or command to run. See [`args::parse_arguments`].

pub mod args;
pub mod config;
pub mod devtool;
pub mod error;
pub mod logging;
