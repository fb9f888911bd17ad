//! Pipeline — runs scan, dispatch, forwarding and validation over one argv.

use std::borrow::Cow;

use serde::Serialize;

use crate::args::classifier::scan;
use crate::args::dispatch::{resolve_dispatch, DispatchOutcome};
use crate::args::forwarding::forward;
use crate::args::options::{AbiRange, LaunchOptions};
use crate::args::registry::flag_registry;
use crate::args::sink::ProcessSink;
use crate::args::validate::check_consistency;
use crate::devtool::{CommandRecognizer, DevToolLocator};
use crate::error::LaunchError;

/// Program name assumed when argv arrives completely empty.
const FALLBACK_PROGRAM_NAME: &str = "vmlaunch";

/// Inputs that do not come from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchContext {
    /// The runtime itself is an app snapshot being run.
    pub run_from_app_snapshot: bool,
    pub abi: AbiRange,
}

/// Overall result of the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseStatus {
    /// Something will run.
    Success,
    /// The dev-tool handles help or analytics; nothing else to do.
    ShortCircuited,
    UsageError,
}

impl ParseStatus {
    /// Status code handed back to the caller; negative means usage error.
    pub fn code(self) -> i32 {
        match self {
            ParseStatus::Success | ParseStatus::ShortCircuited => 0,
            ParseStatus::UsageError => -1,
        }
    }
}

/// Everything the launcher decided for this invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub status: ParseStatus,
    pub outcome: DispatchOutcome,
    /// Script path for a direct run, dev-tool path otherwise.
    pub script_name: Option<String>,
    pub runtime_args: Vec<String>,
    pub program_args: Vec<String>,
    pub options: LaunchOptions,
    pub print_flags_seen: bool,
    pub verbose_debug_seen: bool,
    /// Index of the first argv token the flag scan did not consume.
    pub scan_index: usize,
    /// Non-fatal advice (ignored flags).
    pub warnings: Vec<String>,
    /// One line per error; non-empty implies [`ParseStatus::UsageError`].
    pub diagnostics: Vec<String>,
}

/// Parse the raw process arguments (index 0 is the program name).
///
/// This is the main entry point for the argument pipeline. The only `Err` is
/// the fatal dev-tool lookup failure; everything else is reported through
/// [`ParseResult::status`].
pub fn parse_arguments(
    argv: &[String],
    ctx: &LaunchContext,
    locator: &dyn DevToolLocator,
    recognizer: &dyn CommandRecognizer,
    sink: &mut dyn ProcessSink,
) -> Result<ParseResult, LaunchError> {
    let argv: Cow<'_, [String]> = if argv.is_empty() {
        Cow::Owned(vec![FALLBACK_PROGRAM_NAME.to_string()])
    } else {
        Cow::Borrowed(argv)
    };
    let registry = flag_registry();

    // Stage 1: Classify leading flags
    let mut scanned = scan(&argv, &registry, ctx.abi);

    // Stage 2: Pick the dispatch mode
    let outcome = resolve_dispatch(&argv, &scanned, locator, recognizer)?;

    // Stage 3: Split tokens between runtime and program
    let forwarded = forward(&argv, &scanned, &outcome, sink);

    let mut diagnostics: Vec<String> = scanned.errors.iter().map(ToString::to_string).collect();

    // Stage 4: Validate option combinations for anything that will run
    let usage_error = outcome == DispatchOutcome::UsageError;
    if !usage_error && !outcome.is_short_circuit() {
        if let Err(e) = check_consistency(&mut scanned.options, ctx.run_from_app_snapshot) {
            diagnostics.push(e.to_string());
        }
    }

    let status = if usage_error || !diagnostics.is_empty() {
        ParseStatus::UsageError
    } else if outcome.is_short_circuit() {
        ParseStatus::ShortCircuited
    } else {
        ParseStatus::Success
    };
    tracing::debug!(?status, index = scanned.index, "argument parse finished");

    Ok(ParseResult {
        status,
        script_name: outcome.script_name(),
        outcome,
        runtime_args: forwarded.runtime_args,
        program_args: forwarded.program_args,
        options: scanned.options,
        print_flags_seen: scanned.print_flags_seen,
        verbose_debug_seen: scanned.verbose_debug_seen,
        scan_index: scanned.index,
        warnings: forwarded.warnings,
        diagnostics,
    })
}
