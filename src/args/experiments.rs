//! Accumulates `--enable-experiment` values across repeated occurrences.

use serde::Serialize;

/// Canonical spelling of the experiment flag.
pub const ENABLE_EXPERIMENT: &str = "--enable-experiment";
/// Underscore synonym of [`ENABLE_EXPERIMENT`].
pub const ENABLE_EXPERIMENT_UNDERSCORE: &str = "--enable_experiment";

/// Ordered list of experiment names. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Experiments {
    names: Vec<String>,
}

impl Experiments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every non-empty name from a comma-separated list.
    pub fn add(&mut self, comma_separated: &str) {
        self.names.extend(
            comma_separated
                .split(',')
                .filter(|name| !name.is_empty())
                .map(String::from),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The single composite flag carrying every accumulated name, if any.
    pub fn synthesize(&self) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        Some(format!("{}={}", ENABLE_EXPERIMENT, self.names.join(",")))
    }
}

/// Whether a raw token is an experiment flag in either spelling.
pub fn is_experiment_flag(token: &str) -> bool {
    token.contains(ENABLE_EXPERIMENT) || token.contains(ENABLE_EXPERIMENT_UNDERSCORE)
}
