pub mod loader;
pub mod models;
pub mod store;

pub use loader::{load_catalog, parse_catalog, CatalogError, CatalogSource};
pub use models::{Episode, EpisodeId};
pub use store::{Catalog, CatalogEntry, SeasonSummary};
