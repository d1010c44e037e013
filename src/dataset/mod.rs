//! Tabular source data and its conversion into graph nodes and links.

mod builder;
mod error;
mod loader;
mod row;

pub use error::LoadError;
pub use loader::{DEFAULT_DATA_URL, load_graph};
