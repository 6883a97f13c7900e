mod analytics;
mod bulk_create;
mod by_member;
mod by_project;
mod create;
mod delete;
mod export;
mod list;
mod simple;
mod stats;
mod update;

pub use analytics::{
    get_lead_performance, get_manager_overview, get_project_distribution,
};
pub use bulk_create::bulk_create_mappings;
pub use by_member::get_projects_by_member;
pub use by_project::get_members_by_project;
pub use create::create_mapping;
pub use delete::delete_mapping;
pub use export::{export_csv, export_json};
pub use list::list_mappings;
pub use simple::list_mappings_simple;
pub use stats::get_statistics;
pub use update::update_mapping;
