//! Hour clustering of passages

use chrono::Duration;

use crate::domain::fare::{FareTable, Price};
use crate::domain::passage::PassageTime;

/// Passages less than this many minutes after a cluster's anchor join it.
pub const CLUSTER_WINDOW_MINUTES: i64 = 60;

/// Non-empty run of passages that are charged once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageCluster {
    passages: Vec<PassageTime>,
}

impl PassageCluster {
    fn starting_at(anchor: PassageTime) -> Self {
        Self {
            passages: vec![anchor],
        }
    }

    /// Earliest passage of the cluster
    pub fn anchor(&self) -> PassageTime {
        self.passages[0]
    }

    pub fn passages(&self) -> &[PassageTime] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Highest fare among the cluster's passages
    pub fn price(&self, fares: &FareTable) -> Price {
        self.passages
            .iter()
            .map(|p| fares.price_at(p))
            .max()
            .unwrap_or(0)
    }
}

/// Partition passages into time-ordered clusters.
///
/// The window is anchored at each cluster's first passage and does not slide:
/// a passage 59 minutes after the previous member still opens a new cluster
/// when it is 60 minutes or more after the anchor.
pub fn cluster_passages(passages: &[PassageTime]) -> Vec<PassageCluster> {
    let window = Duration::minutes(CLUSTER_WINDOW_MINUTES);

    let mut sorted = passages.to_vec();
    sorted.sort();

    let mut clusters: Vec<PassageCluster> = Vec::new();
    for passage in sorted {
        match clusters.last_mut() {
            Some(current) if passage - current.anchor() < window => {
                current.passages.push(passage)
            }
            _ => clusters.push(PassageCluster::starting_at(passage)),
        }
    }
    clusters
}
