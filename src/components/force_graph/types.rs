/// What a node stands for. Drives its size, colour and link lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
	#[default]
	Person,
	Category,
	Group,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub kind: NodeKind,
	/// A person's category, or a fixed label for category and group nodes.
	pub category: String,
	pub description: Option<String>,
}

/// Always points from a person to their category or group.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}
