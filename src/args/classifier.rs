//! Argument classifier — the left-to-right flag scan over argv.
//!
//! Starting after the program name, every token that matches a registered
//! flag is consumed. The scan stops, without consuming it, at the first token
//! that matches nothing (or whose value is rejected). Its index is the scan
//! boundary: the script or command candidate, if any, sits there.

use crate::args::matcher::{try_process, Processed};
use crate::args::options::{AbiRange, LaunchOptions};
use crate::args::registry::{BoolSetting, FlagDef, FlagRole};
use crate::error::FlagError;

/// Everything the scan learned. Frozen once [`scan`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Scan boundary: index of the first unconsumed token.
    pub index: usize,
    /// Tokens staged for the runtime, in order.
    pub staging: Vec<String>,
    pub options: LaunchOptions,
    pub print_flags_seen: bool,
    pub verbose_debug_seen: bool,
    pub enable_analytics: bool,
    pub disable_analytics: bool,
    /// Rejected flag values. Any entry turns the final status into a usage error.
    pub errors: Vec<FlagError>,
}

impl ScanState {
    /// Number of argv tokens the scan consumed (program name excluded).
    pub fn consumed(&self) -> usize {
        self.index.saturating_sub(1)
    }

    pub fn analytics_requested(&self) -> bool {
        self.enable_analytics || self.disable_analytics
    }

    pub(crate) fn set_bool(&mut self, setting: BoolSetting, value: bool) {
        match setting {
            BoolSetting::PrintFlags => self.print_flags_seen = value,
            BoolSetting::VerboseDebug => self.verbose_debug_seen = value,
            BoolSetting::EnableAnalytics => self.enable_analytics = value,
            BoolSetting::DisableAnalytics => self.disable_analytics = value,
            BoolSetting::Engine => {}
            other => self.options.set_bool(other, value),
        }
    }
}

/// Scan `argv` (index 0 is the program name) against the registry.
pub fn scan(argv: &[String], registry: &[FlagDef], abi: AbiRange) -> ScanState {
    let mut state = ScanState {
        index: 1.min(argv.len()),
        ..ScanState::default()
    };

    while let Some(token) = argv.get(state.index) {
        match try_process(token, registry, &mut state, abi) {
            Processed::Applied { def, extra } => {
                tracing::trace!(token = %token, flag = def.long, role = ?def.role, "consumed flag");
                if def.role != FlagRole::DevToolOnly {
                    state.staging.push(token.clone());
                    state.staging.extend(extra.iter().map(|s| s.to_string()));
                }
                state.index += 1;
            }
            Processed::Rejected(err) => {
                tracing::debug!(token = %token, error = %err, "flag value rejected");
                state.errors.push(err);
                break;
            }
            Processed::Unmatched => break,
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::registry::flag_registry;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("vmlaunch")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    fn scan_args(args: &[&str]) -> ScanState {
        scan(&argv(args), &flag_registry(), AbiRange::default())
    }

    #[test]
    fn stops_at_first_non_flag() {
        let state = scan_args(&["--deterministic", "main.dart", "--verbose"]);
        assert_eq!(state.index, 2);
        assert_eq!(state.staging, vec!["--deterministic"]);
        assert!(state.options.deterministic);
        assert!(!state.options.verbose);
    }

    #[test]
    fn stops_at_unknown_flag() {
        let state = scan_args(&["--trace-loading", "--frobnicate", "--verbose"]);
        assert_eq!(state.index, 2);
        assert_eq!(state.staging, vec!["--trace-loading"]);
    }

    #[test]
    fn consumes_everything_when_all_flags() {
        let state = scan_args(&["--help", "-v"]);
        assert_eq!(state.index, 3);
        assert!(state.options.help);
        assert!(state.options.verbose);
    }

    #[test]
    fn program_name_only() {
        let state = scan_args(&[]);
        assert_eq!(state.index, 1);
        assert_eq!(state.consumed(), 0);
        assert!(state.staging.is_empty());
    }

    #[test]
    fn analytics_flags_are_not_staged() {
        let state = scan_args(&["--enable-analytics", "--disable_analytics"]);
        assert_eq!(state.index, 3);
        assert!(state.enable_analytics);
        assert!(state.disable_analytics);
        assert!(state.staging.is_empty());
    }

    #[test]
    fn dual_purpose_flags_are_staged_and_seen() {
        let state = scan_args(&["--print_flags", "--verbose-debug", "run"]);
        assert!(state.print_flags_seen);
        assert!(state.verbose_debug_seen);
        assert_eq!(state.staging, vec!["--print_flags", "--verbose-debug"]);
    }

    #[test]
    fn observe_stages_token_then_extras() {
        let state = scan_args(&["--observe", "main.dart"]);
        assert_eq!(state.staging.len(), 5);
        assert_eq!(state.staging[0], "--observe");
        assert_eq!(state.staging[1], "--pause-isolates-on-exit");
    }

    #[test]
    fn rejected_value_stops_scan_and_records_error() {
        let state = scan_args(&["--deterministic", "--enable-vm-service8181", "main.dart"]);
        assert_eq!(state.index, 2);
        assert_eq!(state.errors, vec![FlagError::VmServiceSyntax]);
        assert_eq!(state.staging, vec!["--deterministic"]);
    }

    #[test]
    fn index_stays_within_bounds() {
        let cases: [&[&str]; 4] = [
            &[],
            &["--help"],
            &["x"],
            &["--observe", "--observe=1", "a", "b"],
        ];
        for args in cases {
            let all = argv(args);
            let state = scan(&all, &flag_registry(), AbiRange::default());
            assert!(state.index >= 1 && state.index <= all.len());
        }
    }
}
