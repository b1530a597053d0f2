pub mod api;
pub mod core;
pub mod error;
pub mod model;

// Re-exports
pub use crate::api::{Catalog, CurseClient};
pub use crate::core::{run, ScratchDir};
pub use crate::error::UpdaterError;
pub use crate::model::{Config, ResolvedRelease};
