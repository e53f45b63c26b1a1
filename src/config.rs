//! Configuration constants and types for compaction runs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Glyph used for Free units when rendering a layout.
pub const FREE_GLYPH: char = '.';

/// Compaction policy applied to a disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactionPolicy {
    /// Move trailing file units into the earliest free space, splitting files.
    Fragmenting,
    /// Move each file whole into the leftmost free run that fits it, or not at all.
    WholeFile,
}

impl CompactionPolicy {
    /// Every policy, in reporting order.
    pub const ALL: [CompactionPolicy; 2] =
        [CompactionPolicy::Fragmenting, CompactionPolicy::WholeFile];

    /// Stable name used on the command line and in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            CompactionPolicy::Fragmenting => "fragmenting",
            CompactionPolicy::WholeFile => "whole-file",
        }
    }
}

impl fmt::Display for CompactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompactionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fragmenting" => Ok(CompactionPolicy::Fragmenting),
            "whole-file" => Ok(CompactionPolicy::WholeFile),
            other => Err(Error::InvalidConfig(format!(
                "Unknown policy '{}': expected 'fragmenting' or 'whole-file'",
                other
            ))),
        }
    }
}

/// Configuration for an end-to-end run over one disk map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Policies to apply, each to its own freshly decoded disk.
    pub policies: Vec<CompactionPolicy>,

    /// Whether to render the final layout of each disk.
    pub render_layout: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            policies: CompactionPolicy::ALL.to_vec(),
            render_layout: false,
        }
    }
}

impl RunConfig {
    /// Create a configuration for the given policies.
    pub fn new(policies: Vec<CompactionPolicy>, render_layout: bool) -> Self {
        Self {
            policies,
            render_layout,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.policies.is_empty() {
            return Err(Error::InvalidConfig(
                "At least one policy must be selected".to_string(),
            ));
        }
        for (i, policy) in self.policies.iter().enumerate() {
            if self.policies[..i].contains(policy) {
                return Err(Error::InvalidConfig(format!(
                    "Policy '{}' selected more than once",
                    policy
                )));
            }
        }
        Ok(())
    }
}
