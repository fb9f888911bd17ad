//! Flag matcher — finds the registry row for a token and applies its effect.

use crate::args::classifier::ScanState;
use crate::args::experiments::ENABLE_EXPERIMENT;
use crate::args::options::{
    AbiRange, SnapshotKind, DEFAULT_VM_SERVICE_ADDRESS, DEFAULT_VM_SERVICE_PORT,
};
use crate::args::port::parse_port_and_address;
use crate::args::registry::{Callback, EnumSetting, FlagDef, Matched};
use crate::error::FlagError;

/// Debugging conveniences `--observe` adds to the runtime arguments.
pub const OBSERVE_FLAGS: &[&str] = &[
    "--pause-isolates-on-exit",
    "--pause-isolates-on-unhandled-exceptions",
    "--profiler",
    "--warn-on-pause-with-no-debugger",
];

const HOT_RELOAD_FLAGS: &[&str] = &[
    "--identity_reload",
    "--reload_every=4",
    "--reload_every_optimized=false",
    "--reload_every_back_off",
    "--check_reloaded",
];

const HOT_RELOAD_ROLLBACK_FLAGS: &[&str] = &[
    "--identity_reload",
    "--reload_every=4",
    "--reload_every_optimized=false",
    "--reload_every_back_off",
    "--check_reloaded",
    "--reload_force_rollback",
];

/// Result of offering one token to the registry.
#[derive(Debug)]
pub enum Processed<'r> {
    /// No row matched.
    Unmatched,
    /// A row matched and its effect succeeded. `extra` are runtime arguments
    /// the effect wants placed after the token.
    Applied {
        def: &'r FlagDef,
        extra: &'static [&'static str],
    },
    /// A row matched but its effect rejected the value.
    Rejected(FlagError),
}

/// First registry row matching `token`, in registration order.
pub fn match_flag<'r>(token: &str, registry: &'r [FlagDef]) -> Option<(&'r FlagDef, Matched)> {
    registry
        .iter()
        .find_map(|def| def.match_token(token).map(|m| (def, m)))
}

/// Match `token` and, on a hit, apply the row's effect to `state`.
pub fn try_process<'r>(
    token: &str,
    registry: &'r [FlagDef],
    state: &mut ScanState,
    abi: AbiRange,
) -> Processed<'r> {
    let Some((def, matched)) = match_flag(token, registry) else {
        return Processed::Unmatched;
    };

    match apply(matched, state, abi) {
        Ok(extra) => Processed::Applied { def, extra },
        Err(e) => Processed::Rejected(e),
    }
}

fn apply(
    matched: Matched,
    state: &mut ScanState,
    abi: AbiRange,
) -> Result<&'static [&'static str], FlagError> {
    match matched {
        Matched::Bool(setting, value) => {
            state.set_bool(setting, value);
            Ok(&[])
        }
        Matched::String(setting, value) => {
            state.options.set_string(setting, value);
            Ok(&[])
        }
        Matched::Enum(EnumSetting::SnapshotKind, value) => {
            state.options.snapshot_kind =
                SnapshotKind::parse(&value).ok_or(FlagError::SnapshotKind(value))?;
            Ok(&[])
        }
        Matched::Callback(callback, suffix) => run_callback(callback, &suffix, state, abi),
    }
}

fn run_callback(
    callback: Callback,
    suffix: &str,
    state: &mut ScanState,
    abi: AbiRange,
) -> Result<&'static [&'static str], FlagError> {
    let options = &mut state.options;
    match callback {
        Callback::VmService | Callback::Observe => {
            let endpoint = parse_port_and_address(
                suffix,
                DEFAULT_VM_SERVICE_PORT,
                DEFAULT_VM_SERVICE_ADDRESS,
            )
            .map_err(|_| match callback {
                Callback::Observe => FlagError::ObserveSyntax,
                _ => FlagError::VmServiceSyntax,
            })?;
            options.vm_service = Some(endpoint);
            options.use_incremental_compiler = true;
            if callback == Callback::Observe {
                return Ok(OBSERVE_FLAGS);
            }
            Ok(&[])
        }
        Callback::AbiVersion => {
            let version = parse_abi_version(value_of(suffix))?;
            if !abi.contains(version) {
                return Err(FlagError::AbiVersionOutOfRange {
                    oldest: abi.oldest,
                    current: abi.current,
                });
            }
            options.target_abi_version = Some(version);
            Ok(&[])
        }
        Callback::EnableExperiment => {
            options.experiments.add(value_of(suffix));
            tracing::trace!(experiments = ?options.experiments.names(), "{} accumulated", ENABLE_EXPERIMENT);
            Ok(&[])
        }
        Callback::EnableDevTool => {
            options.dev_tool_disabled = false;
            Ok(&[])
        }
        Callback::DisableDevTool => {
            options.dev_tool_disabled = true;
            Ok(&[])
        }
        Callback::Define => {
            let definition = value_of(suffix);
            match definition.split_once('=') {
                Some((name, value)) if !name.is_empty() => {
                    options.define(name, value);
                    Ok(&[])
                }
                _ => Err(FlagError::Define(definition.to_string())),
            }
        }
        Callback::HotReloadTestMode => {
            options.use_incremental_compiler = true;
            Ok(HOT_RELOAD_FLAGS)
        }
        Callback::HotReloadRollbackTestMode => {
            options.use_incremental_compiler = true;
            Ok(HOT_RELOAD_ROLLBACK_FLAGS)
        }
    }
}

/// Suffix without its leading `=`.
fn value_of(suffix: &str) -> &str {
    suffix.strip_prefix('=').unwrap_or(suffix)
}

/// Digits only; an empty value reads as 0 and fails the range check.
fn parse_abi_version(value: &str) -> Result<u32, FlagError> {
    value.bytes().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
        } else {
            Err(FlagError::AbiVersionNotInt)
        }
    })
}
