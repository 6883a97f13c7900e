use serde::{Deserialize, Serialize};

use super::Mapping;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Sortable columns for the listing endpoint. The set is closed so the
/// ORDER BY clause never carries caller-controlled text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    TeamMemberId,
    TeamLeadId,
    ProjectName,
    ProjectManagerId,
    #[default]
    CreatedAt,
}

impl SortColumn {
    /// Anything outside the allow-list silently falls back to `created_at`.
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "id" => Self::Id,
            "team_member_id" => Self::TeamMemberId,
            "team_lead_id" => Self::TeamLeadId,
            "project_name" => Self::ProjectName,
            "project_manager_id" => Self::ProjectManagerId,
            _ => Self::CreatedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::TeamMemberId => "team_member_id",
            Self::TeamLeadId => "team_lead_id",
            Self::ProjectName => "project_name",
            Self::ProjectManagerId => "project_manager_id",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("ASC") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Equality filters plus the cross-column substring search. Empty values
/// mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingFilter {
    pub project_name: Option<String>,
    pub team_lead_id: Option<String>,
    pub team_member_id: Option<String>,
    pub project_manager_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub filter: MappingFilter,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort_by: SortColumn::default(),
            sort_order: SortOrder::default(),
            filter: MappingFilter::default(),
        }
    }
}

impl ListOptions {
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// `total` is the row count of the filter snapshot taken before
    /// LIMIT/OFFSET was applied.
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let limit_wide = i64::from(limit);
        let total_pages = if limit_wide == 0 {
            0
        } else {
            (total + limit_wide - 1) / limit_wide
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: i64::from(page) * limit_wide < total,
            has_prev: page > 1,
        }
    }
}

/// One page of listing results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingPage {
    pub data: Vec<Mapping>,
    pub pagination: Pagination,
}
