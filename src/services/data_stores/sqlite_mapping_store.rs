use chrono::{Duration, Utc};
use sqlx::{error::ErrorKind, QueryBuilder, Sqlite, SqlitePool};

use crate::domain::{
    LeadPerformance, ListOptions, ManagerOverview, Mapping, MappingFilter,
    MappingPage, MappingStatistics, MappingStore, MappingStoreError,
    MappingUpdate, NewMapping, Pagination, ProjectDistribution,
};

const MAPPING_COLUMNS: &str = "id, team_member_id, team_lead_id, \
     project_name, project_manager_id, created_at, updated_at";

const INSERT_MAPPING: &str = "INSERT INTO user_team_mappings \
     (team_member_id, team_lead_id, project_name, project_manager_id, \
      created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?) \
     RETURNING id, team_member_id, team_lead_id, project_name, \
      project_manager_id, created_at, updated_at";

const EXISTS_MAPPING: &str = "SELECT EXISTS( \
     SELECT 1 FROM user_team_mappings \
     WHERE team_member_id = ? AND project_name = ?)";

/// Creates the mappings table and its secondary indexes if they are not
/// present yet. Safe to run on every startup.
pub async fn init_mapping_schema(
    pool: &SqlitePool,
) -> Result<(), MappingStoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_team_mappings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            team_member_id TEXT NOT NULL
                CHECK (length(team_member_id) > 0),
            team_lead_id TEXT NOT NULL DEFAULT '',
            project_name TEXT NOT NULL
                CHECK (length(project_name) > 0),
            project_manager_id TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (team_member_id, project_name)
        );

        CREATE INDEX IF NOT EXISTS idx_mappings_project_name
            ON user_team_mappings (project_name);
        CREATE INDEX IF NOT EXISTS idx_mappings_team_member_id
            ON user_team_mappings (team_member_id);
        CREATE INDEX IF NOT EXISTS idx_mappings_created_at
            ON user_team_mappings (created_at);
        "#,
    )
    .execute(pool)
    .await
    .map_err(classify)?;

    Ok(())
}

pub struct SqliteMappingStore {
    pool: SqlitePool,
}

impl SqliteMappingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Appends the shared filter predicate. Both the COUNT query and the page
/// query go through here so pagination metadata is consistent with the rows
/// it describes.
fn push_filters(
    query: &mut QueryBuilder<'_, Sqlite>,
    filter: &MappingFilter,
) {
    if let Some(project_name) = &filter.project_name {
        query.push(" AND project_name = ");
        query.push_bind(project_name.clone());
    }

    if let Some(team_lead_id) = &filter.team_lead_id {
        query.push(" AND team_lead_id = ");
        query.push_bind(team_lead_id.clone());
    }

    if let Some(team_member_id) = &filter.team_member_id {
        query.push(" AND team_member_id = ");
        query.push_bind(team_member_id.clone());
    }

    if let Some(project_manager_id) = &filter.project_manager_id {
        query.push(" AND project_manager_id = ");
        query.push_bind(project_manager_id.clone());
    }

    if let Some(search) = &filter.search {
        // LIKE is case-insensitive for ASCII in SQLite.
        let pattern = format!("%{}%", search);
        query.push(" AND (team_member_id LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR team_lead_id LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR project_name LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR project_manager_id LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}

fn classify(error: sqlx::Error) -> MappingStoreError {
    match &error {
        sqlx::Error::Database(db_error) => match db_error.kind() {
            ErrorKind::UniqueViolation => MappingStoreError::DuplicateEntry,
            ErrorKind::ForeignKeyViolation => {
                MappingStoreError::InvalidReference
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                MappingStoreError::MissingField
            }
            _ if db_error.message().contains("no such table") => {
                MappingStoreError::TableNotFound
            }
            _ => MappingStoreError::UnexpectedError(error.into()),
        },
        sqlx::Error::PoolTimedOut => MappingStoreError::ConnectionTimeout,
        _ => MappingStoreError::UnexpectedError(error.into()),
    }
}

#[async_trait::async_trait]
impl MappingStore for SqliteMappingStore {
    #[tracing::instrument(name = "Listing mappings from SQLite", skip_all)]
    async fn list(
        &self,
        options: &ListOptions,
    ) -> Result<MappingPage, MappingStoreError> {
        // Total for the same filter snapshot, before LIMIT/OFFSET.
        let mut count_query = QueryBuilder::new(
            "SELECT COUNT(*) FROM user_team_mappings WHERE 1=1",
        );
        push_filters(&mut count_query, &options.filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {MAPPING_COLUMNS} FROM user_team_mappings WHERE 1=1"
        ));
        push_filters(&mut query, &options.filter);
        // sort_by/sort_order come from closed enums, never caller text.
        query.push(" ORDER BY ");
        query.push(options.sort_by.as_str());
        query.push(" ");
        query.push(options.sort_order.as_str());
        query.push(" LIMIT ");
        query.push_bind(i64::from(options.limit));
        query.push(" OFFSET ");
        query.push_bind(options.offset());

        let data = query
            .build_query_as::<Mapping>()
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        Ok(MappingPage {
            data,
            pagination: Pagination::new(options.page, options.limit, total),
        })
    }

    #[tracing::instrument(name = "Listing all mappings from SQLite", skip_all)]
    async fn list_all(&self) -> Result<Vec<Mapping>, MappingStoreError> {
        sqlx::query_as::<_, Mapping>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM user_team_mappings \
             ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Checking mapping existence", skip_all)]
    async fn exists(
        &self,
        team_member_id: &str,
        project_name: &str,
    ) -> Result<bool, MappingStoreError> {
        sqlx::query_scalar::<_, bool>(EXISTS_MAPPING)
            .bind(team_member_id)
            .bind(project_name)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    #[tracing::instrument(name = "Inserting mapping into SQLite", skip_all)]
    async fn create(
        &self,
        mapping: &NewMapping,
    ) -> Result<Mapping, MappingStoreError> {
        let now = Utc::now();
        sqlx::query_as::<_, Mapping>(INSERT_MAPPING)
            .bind(&mapping.team_member_id)
            .bind(&mapping.team_lead_id)
            .bind(&mapping.project_name)
            .bind(&mapping.project_manager_id)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    #[tracing::instrument(
        name = "Bulk inserting mappings into SQLite",
        skip_all,
        fields(batch_size = mappings.len())
    )]
    async fn bulk_create(
        &self,
        mappings: &[NewMapping],
    ) -> Result<Vec<Mapping>, MappingStoreError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;
        let mut created = Vec::new();

        for mapping in mappings {
            let exists: bool = sqlx::query_scalar(EXISTS_MAPPING)
                .bind(&mapping.team_member_id)
                .bind(&mapping.project_name)
                .fetch_one(&mut *tx)
                .await
                .map_err(classify)?;

            // Duplicates are skipped silently; they show up only as a
            // created-count shortfall.
            if exists {
                continue;
            }

            let now = Utc::now();
            let row = sqlx::query_as::<_, Mapping>(INSERT_MAPPING)
                .bind(&mapping.team_member_id)
                .bind(&mapping.team_lead_id)
                .bind(&mapping.project_name)
                .bind(&mapping.project_manager_id)
                .bind(now)
                .bind(now)
                .fetch_one(&mut *tx)
                .await
                .map_err(classify)?;
            created.push(row);
        }

        // An early return above drops the transaction, rolling back every
        // insert made so far.
        tx.commit().await.map_err(classify)?;

        Ok(created)
    }

    #[tracing::instrument(name = "Updating mapping in SQLite", skip_all)]
    async fn update(
        &self,
        id: i64,
        updates: &MappingUpdate,
    ) -> Result<Option<Mapping>, MappingStoreError> {
        if updates.is_empty() {
            return Err(MappingStoreError::NoValidFields);
        }

        let mut query =
            QueryBuilder::new("UPDATE user_team_mappings SET ");

        if let Some(team_lead_id) = &updates.team_lead_id {
            query.push("team_lead_id = ");
            query.push_bind(team_lead_id.clone());
            query.push(", ");
        }

        if let Some(project_manager_id) = &updates.project_manager_id {
            query.push("project_manager_id = ");
            query.push_bind(project_manager_id.clone());
            query.push(", ");
        }

        query.push("updated_at = ");
        query.push_bind(Utc::now());
        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(format!(" RETURNING {MAPPING_COLUMNS}"));

        query
            .build_query_as::<Mapping>()
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    #[tracing::instrument(name = "Deleting mapping from SQLite", skip_all)]
    async fn delete(
        &self,
        id: i64,
    ) -> Result<Option<Mapping>, MappingStoreError> {
        sqlx::query_as::<_, Mapping>(&format!(
            "DELETE FROM user_team_mappings WHERE id = ? \
             RETURNING {MAPPING_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Fetching project members", skip_all)]
    async fn members_by_project(
        &self,
        project_name: &str,
    ) -> Result<Vec<Mapping>, MappingStoreError> {
        sqlx::query_as::<_, Mapping>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM user_team_mappings \
             WHERE project_name = ? ORDER BY created_at DESC"
        ))
        .bind(project_name)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Fetching member projects", skip_all)]
    async fn projects_by_member(
        &self,
        team_member_id: &str,
    ) -> Result<Vec<Mapping>, MappingStoreError> {
        sqlx::query_as::<_, Mapping>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM user_team_mappings \
             WHERE team_member_id = ? ORDER BY created_at DESC"
        ))
        .bind(team_member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Computing project distribution", skip_all)]
    async fn project_distribution(
        &self,
    ) -> Result<Vec<ProjectDistribution>, MappingStoreError> {
        sqlx::query_as::<_, ProjectDistribution>(
            "SELECT \
                project_name, \
                COUNT(*) AS member_count, \
                COUNT(DISTINCT team_lead_id) AS lead_count, \
                COUNT(DISTINCT project_manager_id) AS pm_count \
             FROM user_team_mappings \
             GROUP BY project_name \
             ORDER BY member_count DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Computing lead performance", skip_all)]
    async fn lead_performance(
        &self,
    ) -> Result<Vec<LeadPerformance>, MappingStoreError> {
        sqlx::query_as::<_, LeadPerformance>(
            "SELECT \
                team_lead_id, \
                COUNT(*) AS team_size, \
                COUNT(DISTINCT project_name) AS project_count, \
                COUNT(DISTINCT project_manager_id) AS pm_count \
             FROM user_team_mappings \
             WHERE team_lead_id != '' \
             GROUP BY team_lead_id \
             ORDER BY team_size DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Computing manager overview", skip_all)]
    async fn manager_overview(
        &self,
    ) -> Result<Vec<ManagerOverview>, MappingStoreError> {
        sqlx::query_as::<_, ManagerOverview>(
            "SELECT \
                project_manager_id, \
                COUNT(*) AS total_members, \
                COUNT(DISTINCT project_name) AS project_count, \
                COUNT(DISTINCT team_lead_id) AS lead_count \
             FROM user_team_mappings \
             WHERE project_manager_id != '' \
             GROUP BY project_manager_id \
             ORDER BY total_members DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Computing mapping statistics", skip_all)]
    async fn statistics(
        &self,
    ) -> Result<MappingStatistics, MappingStoreError> {
        let recent_cutoff = Utc::now() - Duration::days(7);

        sqlx::query_as::<_, MappingStatistics>(
            "SELECT \
                (SELECT COUNT(*) FROM user_team_mappings) \
                    AS total_mappings, \
                (SELECT COUNT(DISTINCT project_name) \
                    FROM user_team_mappings) AS unique_projects, \
                (SELECT COUNT(DISTINCT team_lead_id) \
                    FROM user_team_mappings \
                    WHERE team_lead_id != '') AS unique_leads, \
                (SELECT COUNT(DISTINCT team_member_id) \
                    FROM user_team_mappings) AS unique_members, \
                (SELECT COUNT(DISTINCT project_manager_id) \
                    FROM user_team_mappings \
                    WHERE project_manager_id != '') AS unique_pms, \
                (SELECT COUNT(*) FROM user_team_mappings \
                    WHERE created_at > ?) AS recent_mappings",
        )
        .bind(recent_cutoff)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    #[tracing::instrument(name = "Pinging SQLite", skip_all)]
    async fn ping(&self) -> Result<(), MappingStoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(())
    }
}
