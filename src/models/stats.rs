use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::application::ApplicationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ApplicationStats {
    pub total: usize,
    pub active: usize,
    pub interview: usize,
    pub offer: usize,
}

/// Progress indicator widths, each relative to the largest of the four counts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct StatsProgress {
    pub total: f64,
    pub active: f64,
    pub interview: f64,
    pub offer: f64,
}

impl ApplicationStats {
    pub fn progress(&self) -> StatsProgress {
        let max = [self.total, self.active, self.interview, self.offer]
            .into_iter()
            .max()
            .unwrap_or(0)
            .max(1) as f64;
        let pct = |count: usize| count as f64 / max * 100.0;

        StatsProgress {
            total: pct(self.total),
            active: pct(self.active),
            interview: pct(self.interview),
            offer: pct(self.offer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}
