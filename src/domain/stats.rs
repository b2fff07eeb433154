//! System-level statistics, derived from the leader collection

use serde::{Deserialize, Serialize};

use crate::domain::leader::Leader;

/// Snapshot of overall progress; recomputed, never authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_leaders: usize,
    pub completed_leaders: usize,
}

impl SystemStats {
    pub fn from_leaders(leaders: &[Leader]) -> Self {
        Self {
            total_leaders: leaders.len(),
            completed_leaders: leaders.iter().filter(|l| l.completed()).count(),
        }
    }
}
