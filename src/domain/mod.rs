mod analytics;
mod data_stores;
mod error;
mod list_query;
mod mapping;

pub use analytics::*;
pub use data_stores::*;
pub use error::*;
pub use list_query::*;
pub use mapping::*;
