//! Error types for argument processing.
//!
//! Two tiers: [`FlagError`] and [`ConsistencyError`] are recoverable and end
//! up as one diagnostic line plus a usage-error status. [`LaunchError`] is
//! fatal and is only turned into a process exit by the binary.

use thiserror::Error;

/// Exit code used for usage errors and fatal launch failures.
pub const ERROR_EXIT_CODE: i32 = 255;

/// A flag matched the table but its value was rejected by the flag's effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("unrecognized --enable-vm-service option syntax. Use --enable-vm-service[=<port number>[/<bind address>]]")]
    VmServiceSyntax,

    #[error("unrecognized --observe option syntax. Use --observe[=<port number>[/<bind address>]]")]
    ObserveSyntax,

    #[error("--use_abi_version must be an int")]
    AbiVersionNotInt,

    #[error("--use_abi_version must be between {oldest} and {current} inclusive")]
    AbiVersionOutOfRange { oldest: u32, current: u32 },

    #[error("invalid environment definition '{0}'. Use -D<name>=<value>")]
    Define(String),

    #[error("unknown snapshot kind '{0}'. Use one of: none, kernel, app-jit")]
    SnapshotKind(String),
}

/// Post-scan validation failures over snapshot and depfile options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("Specify only one of --depfile and --snapshot_depfile")]
    DuplicateDepfile,

    #[error("Empty package file name specified.")]
    EmptyPackagesFile,

    #[error("Generating a snapshot requires a filename (--snapshot).")]
    SnapshotWithoutFilename,

    #[error("Generating a depfile requires an output filename (--depfile-output-filename or --snapshot).")]
    DepfileWithoutOutput,

    #[error("Specifying an option to generate a snapshot and run using a snapshot is invalid.")]
    SnapshotAndRunFromSnapshot,
}

/// Failures that end the launch immediately; there is nothing to fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("Could not find DartDev snapshot and '{requested}' is not a valid script.")]
    DevToolNotFound { requested: String },
}

impl LaunchError {
    /// Process exit code the binary uses for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::DevToolNotFound { .. } => ERROR_EXIT_CODE,
        }
    }
}
