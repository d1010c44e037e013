mod component;
mod config;
mod layout;
mod render;
pub mod scale;
mod state;
mod tooltip;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode, NodeKind};

#[cfg(test)]
pub(crate) use config::GraphConfig;
#[cfg(test)]
pub(crate) use state::ForceGraphState;
