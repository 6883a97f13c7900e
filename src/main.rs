use std::{error::Error, sync::Arc};

use team_mapper::{
    app_state::AppState,
    get_sqlite_pool,
    services::data_stores::{init_mapping_schema, SqliteMappingStore},
    utils::{
        constants::{prod, DATABASE_URL},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;
    init_tracing()?;

    let pool = get_sqlite_pool(&DATABASE_URL).await?;
    init_mapping_schema(&pool).await?;

    let mapping_store = Arc::new(SqliteMappingStore::new(pool));
    let app_state = AppState::new(mapping_store);

    let app = Application::build(app_state, prod::APP_ADDRESS).await?;
    app.run().await?;

    Ok(())
}
