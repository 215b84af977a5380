//! Job record domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named evaluation job tracked in the local record store
///
/// Structure shared between the store (persists) and the CLI flows (resume).
/// The remote identifiers populate monotonically as each provider step
/// completes; they are never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub name: String,
    pub eval_id: Option<String>,
    pub data_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Derived readiness of a job record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    Ready,
    Incomplete,
}

impl JobRecord {
    /// A job is ready once both remote identifiers are recorded.
    pub fn readiness(&self) -> Readiness {
        if self.eval_id.is_some() && self.data_id.is_some() {
            Readiness::Ready
        } else {
            Readiness::Incomplete
        }
    }
}
