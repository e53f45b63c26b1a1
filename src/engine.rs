//! End-to-end runs: decode, compact, checksum.

use crate::checksum::checksum;
use crate::compact::{compactor_for, CompactionStats, Compactor};
use crate::config::{CompactionPolicy, RunConfig};
use crate::disk::Disk;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of compacting one disk under one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOutcome {
    /// Policy applied.
    pub policy: CompactionPolicy,
    /// Checksum of the final layout.
    pub checksum: u64,
    /// Counters from the compaction run.
    pub stats: CompactionStats,
    /// Rendered final layout, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

/// Compact `disk` under `policy` and checksum the result.
pub fn compact_disk(disk: Disk, policy: CompactionPolicy, render_layout: bool) -> PolicyOutcome {
    let mut compactor = compactor_for(policy, disk);
    let stats = compactor.compact();
    let disk = compactor.into_disk();
    let checksum = checksum(&disk);

    info!(%policy, checksum, moves = stats.moves, "compaction complete");

    PolicyOutcome {
        policy,
        checksum,
        stats,
        layout: render_layout.then(|| disk.to_string()),
    }
}

/// Run every configured policy over `input`.
///
/// Each policy gets its own freshly decoded disk, so policies never
/// interleave on one disk. Decoding errors abort before any compaction.
pub fn run(input: &str, config: &RunConfig) -> Result<Vec<PolicyOutcome>> {
    config.validate()?;
    let disk = Disk::decode(input)?;
    run_disk(&disk, config)
}

/// Run every configured policy over a copy of an already decoded disk.
pub fn run_disk(disk: &Disk, config: &RunConfig) -> Result<Vec<PolicyOutcome>> {
    config.validate()?;

    let outcomes = config
        .policies
        .iter()
        .map(|&policy| compact_disk(disk.clone(), policy, config.render_layout))
        .collect();
    Ok(outcomes)
}

/// Check an outcome against a known-correct checksum.
pub fn verify(outcome: &PolicyOutcome, expected: u64) -> Result<()> {
    if outcome.checksum != expected {
        return Err(Error::ChecksumMismatch {
            policy: outcome.policy,
            expected,
            actual: outcome.checksum,
        });
    }
    Ok(())
}

/// Render outcomes as pretty-printed JSON.
pub fn outcomes_to_json(outcomes: &[PolicyOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}
