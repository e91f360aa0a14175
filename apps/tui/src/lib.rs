// Export our modules for use in binaries and tests
pub mod catalog;
pub mod config;
pub mod domain;

pub use catalog::{Catalog, CatalogEntry, CatalogSource, Episode, EpisodeId};
