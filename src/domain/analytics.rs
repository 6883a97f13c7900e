use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-project head counts, ordered by member count descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProjectDistribution {
    pub project_name: String,
    pub member_count: i64,
    pub lead_count: i64,
    pub pm_count: i64,
}

/// Per-lead team sizes, excluding rows with no lead assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LeadPerformance {
    pub team_lead_id: String,
    pub team_size: i64,
    pub project_count: i64,
    pub pm_count: i64,
}

/// Per-manager totals, excluding rows with no manager assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ManagerOverview {
    pub project_manager_id: String,
    pub total_members: i64,
    pub project_count: i64,
    pub lead_count: i64,
}

/// Whole-table summary. `recent_mappings` counts rows created within the
/// trailing seven days of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MappingStatistics {
    #[serde(rename = "totalMappings")]
    pub total_mappings: i64,
    #[serde(rename = "uniqueProjects")]
    pub unique_projects: i64,
    #[serde(rename = "uniqueLeads")]
    pub unique_leads: i64,
    #[serde(rename = "uniqueMembers")]
    pub unique_members: i64,
    #[serde(rename = "uniquePMs")]
    pub unique_pms: i64,
    #[serde(rename = "recentMappings")]
    pub recent_mappings: i64,
}
