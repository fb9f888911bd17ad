//! Dispatch resolver — decides what the scan boundary token means.

use std::path::PathBuf;

use serde::Serialize;

use crate::args::classifier::ScanState;
use crate::devtool::{CommandRecognizer, DevToolLocator};
use crate::error::LaunchError;

/// Which analytics commands to hand to the dev-tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsToggle {
    pub enable: bool,
    pub disable: bool,
}

impl AnalyticsToggle {
    /// Dev-tool arguments for this toggle, enable first.
    pub fn commands(self) -> Vec<&'static str> {
        let mut commands = Vec::new();
        if self.enable {
            commands.push("--enable-analytics");
        }
        if self.disable {
            commands.push("--disable-analytics");
        }
        commands
    }
}

/// What the launcher is going to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DispatchOutcome {
    /// Run the script directly in the runtime.
    DirectRun {
        script: String,
        script_args: Vec<String>,
    },
    /// Hand a command and its arguments to the dev-tool.
    ExplicitDevTool {
        dev_tool: PathBuf,
        command: String,
        command_args: Vec<String>,
    },
    /// Run a script through the dev-tool's `run` command because a service
    /// flag was given. The scanned flags go to the dev-tool verbatim.
    ImplicitDevTool {
        dev_tool: PathBuf,
        flag_tokens: Vec<String>,
        trailing_args: Vec<String>,
    },
    /// Let the dev-tool print the default help.
    DevToolHelp { dev_tool: PathBuf },
    /// Let the dev-tool toggle analytics.
    DevToolAnalytics {
        dev_tool: PathBuf,
        toggle: AnalyticsToggle,
    },
    /// Nothing to run.
    UsageError,
}

impl DispatchOutcome {
    /// Help and analytics complete the parse without running anything.
    pub fn is_short_circuit(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::DevToolHelp { .. } | DispatchOutcome::DevToolAnalytics { .. }
        )
    }

    /// Path or command the launcher hands control to, if any.
    pub fn script_name(&self) -> Option<String> {
        match self {
            DispatchOutcome::DirectRun { script, .. } => Some(script.clone()),
            DispatchOutcome::ExplicitDevTool { dev_tool, .. }
            | DispatchOutcome::ImplicitDevTool { dev_tool, .. }
            | DispatchOutcome::DevToolHelp { dev_tool }
            | DispatchOutcome::DevToolAnalytics { dev_tool, .. } => {
                Some(dev_tool.display().to_string())
            }
            DispatchOutcome::UsageError => None,
        }
    }
}

/// Decide the dispatch mode from the scan result.
///
/// Fails only when a dev-tool mode is required and the dev-tool cannot be
/// found: a command has no direct-run fallback.
pub fn resolve_dispatch(
    argv: &[String],
    scan: &ScanState,
    locator: &dyn DevToolLocator,
    recognizer: &dyn CommandRecognizer,
) -> Result<DispatchOutcome, LaunchError> {
    let options = &scan.options;
    let dev_tool_enabled = !options.dev_tool_disabled;
    let i = scan.index;

    let Some(candidate) = argv.get(i) else {
        return resolve_without_candidate(argv.len(), scan, locator);
    };

    let file_like = !recognizer.looks_like_command(candidate);
    let vm_service = options.vm_service_requested();
    tracing::debug!(candidate = %candidate, file_like, vm_service, dev_tool_enabled, "dispatching");

    if !dev_tool_enabled || (file_like && !vm_service) {
        return Ok(DispatchOutcome::DirectRun {
            script: candidate.clone(),
            script_args: argv[i + 1..].to_vec(),
        });
    }

    let dev_tool = require_dev_tool(locator, candidate)?;

    if file_like {
        // Service flags on a plain script: run it through the dev-tool.
        return Ok(DispatchOutcome::ImplicitDevTool {
            dev_tool,
            flag_tokens: argv[1..i].to_vec(),
            trailing_args: argv[i..].to_vec(),
        });
    }

    Ok(DispatchOutcome::ExplicitDevTool {
        dev_tool,
        command: candidate.clone(),
        command_args: argv[i + 1..].to_vec(),
    })
}

fn resolve_without_candidate(
    argc: usize,
    scan: &ScanState,
    locator: &dyn DevToolLocator,
) -> Result<DispatchOutcome, LaunchError> {
    let options = &scan.options;
    if options.dev_tool_disabled {
        return Ok(DispatchOutcome::UsageError);
    }

    if (options.help && !options.verbose) || argc <= 1 {
        if let Some(dev_tool) = locator.resolve_for_help() {
            tracing::debug!(dev_tool = %dev_tool.display(), "delegating help to dev-tool");
            return Ok(DispatchOutcome::DevToolHelp { dev_tool });
        }
    }

    if scan.analytics_requested() {
        let toggle = AnalyticsToggle {
            enable: scan.enable_analytics,
            disable: scan.disable_analytics,
        };
        let requested = toggle.commands().join(" ");
        let dev_tool = require_dev_tool(locator, &requested)?;
        return Ok(DispatchOutcome::DevToolAnalytics { dev_tool, toggle });
    }

    Ok(DispatchOutcome::UsageError)
}

fn require_dev_tool(locator: &dyn DevToolLocator, requested: &str) -> Result<PathBuf, LaunchError> {
    locator
        .resolve(requested)
        .ok_or_else(|| LaunchError::DevToolNotFound {
            requested: requested.to_string(),
        })
}
