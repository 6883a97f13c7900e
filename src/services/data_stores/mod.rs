mod sqlite_mapping_store;

pub use sqlite_mapping_store::*;
