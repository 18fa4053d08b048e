//! Construction policy configuration.
//!
//! The only tunable is which calls get an implicit failure edge to the
//! exception anchor. Asserting primitives always do; whether *every*
//! external call also does is a policy question downstream analyses answer
//! differently, so it is configurable rather than hard-coded.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::ast::CallKind;
use crate::constants::CONFIG_FILENAME;

/// Policy deciding which calls fan out to the exception anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallFailurePolicy {
    /// Only `require`/`assert` contribute a failure edge.
    #[default]
    AssertingPrimitives,
    /// Every external call contributes a failure edge as well.
    AllExternalCalls,
}

/// Flow-construction configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FlowConfig {
    /// Which calls get an implicit failure edge.
    #[serde(default)]
    pub call_failure: CallFailurePolicy,
}

/// On-disk configuration file shape: a `[flow]` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    flow: FlowConfig,
}

impl FlowConfig {
    /// The predicate over call expressions: whether a call of this kind may
    /// abort the current execution and therefore needs a failure edge.
    ///
    /// `Revert` is *not* a failure edge case; it aborts unconditionally
    /// and is handled as divergence by the builder.
    #[must_use]
    pub fn may_fail(self, kind: CallKind) -> bool {
        match kind {
            CallKind::Require | CallKind::Assert => true,
            CallKind::External => self.call_failure == CallFailurePolicy::AllExternalCalls,
            CallKind::Internal | CallKind::Revert => false,
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).context("invalid flow configuration file")?;
        Ok(file.flow)
    }

    /// Loads configuration from the current directory upwards.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Any missing or malformed candidate file falls back to the next
    /// directory up, and ultimately to the defaults.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(config) = Self::from_toml_str(&content) {
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Self::default()
    }
}
