//! Argument handling pipeline for the launcher.
//!
//! ```text
//! argv → Scan → Dispatch → Forward → Validate → ParseResult
//! ```
//!
//! Each stage is a plain function over explicit state, so the whole parse can
//! be repeated in tests without touching process-wide configuration.

mod classifier;
mod dispatch;
mod experiments;
mod forwarding;
mod matcher;
mod options;
mod pipeline;
mod port;
mod registry;
mod sink;
mod validate;

pub use classifier::{scan, ScanState};
pub use dispatch::{resolve_dispatch, AnalyticsToggle, DispatchOutcome};
pub use experiments::{is_experiment_flag, Experiments, ENABLE_EXPERIMENT};
pub use forwarding::{forward, ArgAssembler, Forwarded};
pub use matcher::{match_flag, try_process, Processed, OBSERVE_FLAGS};
pub use options::{
    AbiRange, LaunchOptions, SnapshotKind, CURRENT_ABI_VERSION, DEFAULT_VM_SERVICE_ADDRESS,
    DEFAULT_VM_SERVICE_PORT, OLDEST_SUPPORTED_ABI_VERSION,
};
pub use pipeline::{parse_arguments, LaunchContext, ParseResult, ParseStatus};
pub use port::{parse_port_and_address, PortSyntaxError, ServiceEndpoint};
pub use registry::{
    flag_registry, BoolSetting, Callback, EnumSetting, FlagDef, FlagKind, FlagRole, Matched,
    StringSetting,
};
pub use sink::{ProcessConfig, ProcessSink};
pub use validate::check_consistency;
