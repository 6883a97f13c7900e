use color_eyre::eyre::Report;
use thiserror::Error;

use super::{
    LeadPerformance, ListOptions, ManagerOverview, Mapping, MappingPage,
    MappingStatistics, MappingUpdate, NewMapping, ProjectDistribution,
};

/// The repository owning every query against the store. Stateless: each
/// operation is a self-contained request.
#[async_trait::async_trait]
pub trait MappingStore {
    async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<MappingPage, MappingStoreError>;
    async fn list_all(&self) -> Result<Vec<Mapping>, MappingStoreError>;
    async fn exists(
        &self,
        team_member_id: &str,
        project_name: &str,
    ) -> Result<bool, MappingStoreError>;
    async fn create(
        &self,
        mapping: &NewMapping,
    ) -> Result<Mapping, MappingStoreError>;
    /// Inserts the batch inside one transaction, skipping rows whose
    /// (team_member_id, project_name) pair already exists. Returns only the
    /// rows actually inserted; any failure rolls the whole batch back.
    async fn bulk_create(
        &self,
        mappings: &[NewMapping],
    ) -> Result<Vec<Mapping>, MappingStoreError>;
    async fn update(
        &self,
        id: i64,
        updates: &MappingUpdate,
    ) -> Result<Option<Mapping>, MappingStoreError>;
    async fn delete(
        &self,
        id: i64,
    ) -> Result<Option<Mapping>, MappingStoreError>;
    async fn members_by_project(
        &self,
        project_name: &str,
    ) -> Result<Vec<Mapping>, MappingStoreError>;
    async fn projects_by_member(
        &self,
        team_member_id: &str,
    ) -> Result<Vec<Mapping>, MappingStoreError>;
    async fn project_distribution(
        &self,
    ) -> Result<Vec<ProjectDistribution>, MappingStoreError>;
    async fn lead_performance(
        &self,
    ) -> Result<Vec<LeadPerformance>, MappingStoreError>;
    async fn manager_overview(
        &self,
    ) -> Result<Vec<ManagerOverview>, MappingStoreError>;
    async fn statistics(&self) -> Result<MappingStatistics, MappingStoreError>;
    async fn ping(&self) -> Result<(), MappingStoreError>;
}

#[derive(Debug, Error)]
pub enum MappingStoreError {
    #[error("Duplicate entry")]
    DuplicateEntry,
    #[error("Referenced record does not exist")]
    InvalidReference,
    #[error("Missing required field")]
    MissingField,
    #[error("No valid fields to update")]
    NoValidFields,
    #[error("Row not found")]
    RowNotFound,
    #[error("Database table not found")]
    TableNotFound,
    #[error("Timed out acquiring a database connection")]
    ConnectionTimeout,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MappingStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateEntry, Self::DuplicateEntry)
                | (Self::InvalidReference, Self::InvalidReference)
                | (Self::MissingField, Self::MissingField)
                | (Self::NoValidFields, Self::NoValidFields)
                | (Self::RowNotFound, Self::RowNotFound)
                | (Self::TableNotFound, Self::TableNotFound)
                | (Self::ConnectionTimeout, Self::ConnectionTimeout)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
