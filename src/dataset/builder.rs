use std::collections::HashSet;

use log::debug;

use super::row::{CATEGORY, DESCRIPTION, FIRST_NAME, GROUPS, LAST_NAME, Row};
use crate::components::force_graph::{GraphData, GraphLink, GraphNode, NodeKind};

const CATEGORY_LABEL: &str = "Category Type";
const GROUP_LABEL: &str = "Group/Organization";
const GROUP_DESCRIPTION: &str = "Associated with various individuals.";

/// Accumulates rows into a deduplicated node set and a link list.
///
/// Node ids share one namespace across kinds: the first row to mention an id
/// decides its kind, label and description, and later mentions only add links.
#[derive(Debug, Default)]
pub struct GraphBuilder {
	seen: HashSet<String>,
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	rows: usize,
	skipped: usize,
}

impl GraphBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one row. Returns `false` if the row lacks a first name, last name
	/// or category and was dropped without touching the graph.
	pub fn push_row(&mut self, row: &Row) -> bool {
		self.rows += 1;
		let (Some(first), Some(last), Some(category)) = (
			row.non_empty(FIRST_NAME),
			row.non_empty(LAST_NAME),
			row.non_empty(CATEGORY),
		) else {
			self.skipped += 1;
			return false;
		};

		let person = format!("{first} {last}").trim().to_owned();
		self.insert(GraphNode {
			id: person.clone(),
			kind: NodeKind::Person,
			category: category.to_owned(),
			description: row.non_empty(DESCRIPTION).map(str::to_owned),
		});
		self.insert(GraphNode {
			id: category.to_owned(),
			kind: NodeKind::Category,
			category: CATEGORY_LABEL.to_owned(),
			description: Some(format!("The \"{category}\" category.")),
		});
		self.link(&person, category);

		let groups = row.non_empty(GROUPS).unwrap_or_default();
		for group in groups.split('\n').map(str::trim).filter(|g| !g.is_empty()) {
			self.insert(GraphNode {
				id: group.to_owned(),
				kind: NodeKind::Group,
				category: GROUP_LABEL.to_owned(),
				description: Some(GROUP_DESCRIPTION.to_owned()),
			});
			self.link(&person, group);
		}
		true
	}

	pub fn finish(self) -> GraphData {
		debug!(
			"built graph from {} rows ({} skipped): {} nodes, {} links",
			self.rows,
			self.skipped,
			self.nodes.len(),
			self.links.len()
		);
		GraphData {
			nodes: self.nodes,
			links: self.links,
		}
	}

	fn insert(&mut self, node: GraphNode) {
		if self.seen.insert(node.id.clone()) {
			self.nodes.push(node);
		}
	}

	fn link(&mut self, source: &str, target: &str) {
		self.links.push(GraphLink {
			source: source.to_owned(),
			target: target.to_owned(),
		});
	}
}

/// Builds the graph for a whole table in one pass.
pub fn build_graph<'a>(rows: impl IntoIterator<Item = &'a Row>) -> GraphData {
	let mut builder = GraphBuilder::new();
	for row in rows {
		builder.push_row(row);
	}
	builder.finish()
}
