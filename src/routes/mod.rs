pub mod health;
pub mod mappings;

pub use health::health_check;
