use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Upper bound on a single bulk-import batch.
pub const MAX_BULK_BATCH_SIZE: usize = 100;

/// One (team member, team lead, project, project manager) association row.
/// Serialized with raw column names, which is what the API has always
/// returned for stored rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Mapping {
    pub id: i64,
    pub team_member_id: String,
    pub team_lead_id: String,
    pub project_name: String,
    pub project_manager_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A candidate row for insertion. Optional identifiers default to the
/// empty string rather than NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMapping {
    pub team_member_id: String,
    pub team_lead_id: String,
    pub project_name: String,
    pub project_manager_id: String,
}

/// The restricted update set. Only the lead and manager columns are
/// mutable after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingUpdate {
    pub team_lead_id: Option<String>,
    pub project_manager_id: Option<String>,
}

impl MappingUpdate {
    pub fn is_empty(&self) -> bool {
        self.team_lead_id.is_none() && self.project_manager_id.is_none()
    }
}
