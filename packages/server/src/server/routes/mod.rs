// HTTP routes
pub mod health;
pub mod jobs_import;

pub use health::*;
pub use jobs_import::*;
