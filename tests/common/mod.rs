//! Shared test utilities: stub dev-tool collaborators and parse helpers.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;

use vmlaunch::args::{parse_arguments, LaunchContext, ParseResult, ProcessConfig};
use vmlaunch::devtool::{CommandRecognizer, DevToolLocator};
use vmlaunch::error::LaunchError;

pub const DEV_TOOL_PATH: &str = "/sdk/bin/snapshots/dartdev.dart.snapshot";

/// Dev-tool commands the stub recognizer knows about.
pub const COMMANDS: &[&str] = &["run", "test", "pub", "compile", "help", "create"];

/// Locator that either always finds the dev-tool or never does.
pub struct StubLocator {
    found: Option<PathBuf>,
}

impl StubLocator {
    pub fn found() -> Self {
        Self {
            found: Some(PathBuf::from(DEV_TOOL_PATH)),
        }
    }

    pub fn missing() -> Self {
        Self { found: None }
    }
}

impl DevToolLocator for StubLocator {
    fn resolve(&self, _candidate: &str) -> Option<PathBuf> {
        self.found.clone()
    }

    fn resolve_for_help(&self) -> Option<PathBuf> {
        self.found.clone()
    }
}

/// Recognizes exactly the tokens in [`COMMANDS`].
pub struct CommandList;

impl CommandRecognizer for CommandList {
    fn looks_like_command(&self, token: &str) -> bool {
        COMMANDS.contains(&token)
    }
}

/// argv with a program name in front.
pub fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("vmlaunch")
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}

pub fn try_parse_with(
    args: &[&str],
    locator: &StubLocator,
    ctx: &LaunchContext,
) -> Result<(ParseResult, ProcessConfig), LaunchError> {
    let mut process = ProcessConfig::default();
    let result = parse_arguments(&argv(args), ctx, locator, &CommandList, &mut process)?;
    Ok((result, process))
}

/// Parse with a resolvable dev-tool and default context.
pub fn parse(args: &[&str]) -> ParseResult {
    try_parse_with(args, &StubLocator::found(), &LaunchContext::default())
        .expect("dev-tool resolves")
        .0
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
