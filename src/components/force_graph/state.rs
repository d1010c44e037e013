use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, warn};

use super::config::{GraphConfig, SimulationConfig};
use super::layout::{self, Alpha, Body, Spring};
use super::scale::OrdinalScale;
use super::types::{GraphData, NodeKind};

/// Extra world-space slack around a node's circle that still counts as a hit.
pub const HIT_PADDING: f64 = 4.0;
const INITIAL_RING: f64 = 100.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub kind: NodeKind,
	pub category: String,
	pub description: Option<String>,
	pub color: String,
	pub radius: f64,
	pub collide_radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

impl HoverState {
	/// Points the highlight at `node`. Leaving a node keeps it as `prev_*`
	/// until the fade-out finishes.
	fn focus(&mut self, node: Option<DefaultNodeIdx>, neighbors: HashSet<DefaultNodeIdx>) {
		let leaving = self.node.is_some() && node.is_none();
		if leaving {
			self.prev_node = self.node.take();
			self.prev_neighbors = std::mem::take(&mut self.neighbors);
		} else {
			self.prev_node = None;
			self.prev_neighbors.clear();
		}
		if self.node.is_none() {
			self.delay_t = 0.0;
		}
		self.node = node;
		self.neighbors = neighbors;
	}

	fn contains(&self, idx: DefaultNodeIdx) -> bool {
		self.is_target(idx) || self.neighbors.contains(&idx) || self.prev_neighbors.contains(&idx)
	}

	fn is_target(&self, idx: DefaultNodeIdx) -> bool {
		self.node == Some(idx) || self.prev_node == Some(idx)
	}

	fn is_active(&self) -> bool {
		self.node.is_some() || self.prev_node.is_some()
	}

	/// Eases `highlight_t` in (after a short delay) or out, dropping the
	/// faded-out node once it is invisible.
	fn step(&mut self, dt: f64) {
		const IN_DELAY: f64 = 0.08;
		const IN_SPEED: f64 = 1.8;
		const OUT_SPEED: f64 = 1.26;

		if self.node.is_some() {
			self.delay_t = (self.delay_t + dt).min(IN_DELAY);
			if self.delay_t >= IN_DELAY {
				self.highlight_t += (1.0 - self.highlight_t) * IN_SPEED * dt;
			}
			return;
		}
		self.highlight_t -= self.highlight_t * OUT_SPEED * dt;
		if self.highlight_t < 0.01 {
			self.highlight_t = 0.0;
			self.prev_node = None;
			self.prev_neighbors.clear();
		}
	}
}

/// The one stateful object behind the canvas: simulation, view transform
/// and pointer interaction. Event handlers only translate coordinates and
/// call into it; rendering reads it after each tick.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub alpha: Alpha,
	springs: Vec<Spring<DefaultNodeIdx>>,
	simulation: SimulationConfig,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, config: &GraphConfig, width: f64, height: f64) -> Self {
		let sim = &config.simulation;
		let mut graph = ForceGraph::new(sim.parameters());
		let mut ids = HashMap::new();
		let mut kinds = HashMap::new();
		let mut colors = OrdinalScale::default();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (INITIAL_RING * angle.cos()) as f32,
				y: (INITIAL_RING * angle.sin()) as f32,
				mass: sim.mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					kind: node.kind,
					category: node.category.clone(),
					description: node.description.clone(),
					color: colors.color(&node.category).to_owned(),
					radius: config.node_radius.get(node.kind),
					collide_radius: config.collide_radius.get(node.kind),
				},
			});
			ids.insert(node.id.clone(), idx);
			kinds.insert(idx, node.kind);
		}

		let mut springs = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (ids.get(&link.source), ids.get(&link.target)) else {
				warn!("dropping link {} -> {}: unknown endpoint", link.source, link.target);
				continue;
			};
			// The engine cannot step a self-loop; the link stays in the data.
			if src == tgt {
				debug!("not simulating self-link on {}", link.source);
				continue;
			}
			graph.add_edge(src, tgt, EdgeData::default());
			springs.push(Spring {
				source: src,
				target: tgt,
				distance: config.link_distance(kinds[&src], kinds[&tgt]),
			});
		}

		Self {
			graph,
			springs,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			alpha: Alpha::new(sim.alpha_decay, sim.alpha_min),
			simulation: sim.clone(),
		}
	}

	#[cfg(test)]
	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	#[cfg(test)]
	pub fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.is_anchor;
			}
		});
		pinned
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	#[cfg(test)]
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		let neighbors = node
			.map(|idx| {
				self.springs
					.iter()
					.filter_map(|s| match (s.source == idx, s.target == idx) {
						(true, _) => Some(s.target),
						(_, true) => Some(s.source),
						_ => None,
					})
					.collect()
			})
			.unwrap_or_default();
		self.hover.focus(node, neighbors);
		true
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.contains(idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.is_target(idx)
	}

	/// A link is highlighted when it touches the hovered node.
	pub fn is_link_highlighted(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> bool {
		self.is_hovered(a) || self.is_hovered(b)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.is_active()
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		match self.node_at_position(x, y) {
			Some(idx) => self.begin_drag(idx, x, y),
			None => {
				self.pan = PanState {
					active: true,
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	/// Returns whether the hovered node changed.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		let mut hover_changed = false;
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			hover_changed = self.set_hover(hovered);
		}

		if self.drag.active {
			self.drag_to(x, y);
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
		hover_changed
	}

	pub fn pointer_up(&mut self) {
		self.end_drag();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Pins `idx` under the pointer and keeps the layout warm while dragging.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, x: f64, y: f64) {
		let Some((nx, ny)) = self.position(idx) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			node_start_x: nx,
			node_start_y: ny,
		};
		self.set_pinned(idx, true);
		self.alpha.target = self.simulation.drag_alpha_target;
		self.alpha.reheat(self.alpha.min);
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(x - self.drag.start_x) / self.transform.k,
			(y - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take().filter(|_| self.drag.active) {
			self.set_pinned(idx, false);
			self.alpha.target = 0.0;
		}
		self.drag.active = false;
	}

	fn set_pinned(&mut self, idx: DefaultNodeIdx, pinned: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = pinned;
			}
		});
	}

	/// Zooms by one wheel notch around a screen point.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Adopts a new surface size, keeps the graph centred and restarts the
	/// layout at the reduced resize energy, whatever the current energy.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
		self.alpha.value = self.simulation.resize_alpha;
		debug!("resized to {width}x{height}, alpha {:.3}", self.alpha.value);
	}

	pub fn tick(&mut self, dt: f32) {
		self.alpha.step();
		if self.alpha.is_hot() {
			self.graph.update(dt);
			self.apply_layout();
		}

		self.hover.step(dt as f64);
	}

	fn apply_layout(&mut self) {
		let mut bodies = HashMap::new();
		self.graph.visit_nodes(|node| {
			bodies.insert(
				node.index(),
				Body {
					x: node.x() as f64,
					y: node.y() as f64,
					radius: node.data.user_data.collide_radius,
					pinned: node.data.is_anchor,
				},
			);
		});

		layout::relax_springs(&mut bodies, &self.springs, self.alpha.value);
		layout::resolve_collisions(&mut bodies, self.simulation.collide_strength);
		layout::center(&mut bodies);

		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(body) = bodies.get(&node.index()) {
				node.data.x = body.x as f32;
				node.data.y = body.y as f32;
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: &str, kind: NodeKind, category: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			kind,
			category: category.into(),
			description: None,
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}

	fn sample() -> ForceGraphState {
		let data = GraphData {
			nodes: vec![
				node("Jane Doe", NodeKind::Person, "Artists"),
				node("Artists", NodeKind::Category, "Category Type"),
				node("Band A", NodeKind::Group, "Group/Organization"),
				node("John Roe", NodeKind::Person, "Artists"),
			],
			links: vec![
				link("Jane Doe", "Artists"),
				link("Jane Doe", "Band A"),
				link("John Roe", "Artists"),
				link("John Roe", "Nowhere"),
			],
		};
		ForceGraphState::new(&data, &GraphConfig::default(), 800.0, 600.0)
	}

	fn idx(state: &ForceGraphState, id: &str) -> DefaultNodeIdx {
		state.index_of(id).unwrap()
	}

	fn screen_pos(state: &ForceGraphState, id: &str) -> (f64, f64) {
		let (x, y) = state.position(idx(state, id)).unwrap();
		state.graph_to_screen(x as f64, y as f64)
	}

	#[test]
	fn builds_nodes_and_known_links() {
		let state = sample();
		assert_eq!(state.springs.len(), 3);
		let jane = idx(&state, "Jane Doe");
		let artists = idx(&state, "Artists");
		let spring = state.springs[0];
		assert_eq!((spring.source, spring.target), (jane, artists));
		assert_eq!(spring.distance, 12.0);
		assert_eq!(state.springs[1].distance, 6.0);
	}

	#[test]
	fn styles_follow_kind_and_category() {
		let state = sample();
		let jane = state.node(idx(&state, "Jane Doe")).unwrap();
		let john = state.node(idx(&state, "John Roe")).unwrap();
		let artists = state.node(idx(&state, "Artists")).unwrap();
		assert_eq!(jane.radius, 6.0);
		assert_eq!(artists.radius, 9.0);
		assert_eq!(artists.collide_radius, 20.0);
		assert_eq!(jane.color, john.color);
		assert_ne!(jane.color, artists.color);
	}

	#[test]
	fn hover_collects_neighbors() {
		let mut state = sample();
		let jane = idx(&state, "Jane Doe");
		assert!(state.set_hover(Some(jane)));
		assert!(!state.set_hover(Some(jane)));

		assert!(state.is_highlighted(idx(&state, "Artists")));
		assert!(state.is_highlighted(idx(&state, "Band A")));
		assert!(!state.is_highlighted(idx(&state, "John Roe")));
		assert!(state.is_link_highlighted(jane, idx(&state, "Band A")));
		assert!(!state.is_link_highlighted(idx(&state, "John Roe"), idx(&state, "Artists")));
	}

	#[test]
	fn hover_fades_out_after_leaving() {
		let mut state = sample();
		let jane = idx(&state, "Jane Doe");
		state.set_hover(Some(jane));
		for _ in 0..200 {
			state.tick(0.016);
		}
		assert!(state.hover.highlight_t > 0.9);

		state.set_hover(None);
		assert!(state.has_active_highlight());
		for _ in 0..400 {
			state.tick(0.016);
		}
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn pointer_over_node_hits_it() {
		let mut state = sample();
		let (x, y) = screen_pos(&state, "Band A");
		assert_eq!(state.node_at_position(x, y), Some(idx(&state, "Band A")));
		assert!(state.pointer_move(x, y));
		assert_eq!(state.hover.node, Some(idx(&state, "Band A")));
		assert_eq!(state.node_at_position(0.0, 0.0), None);
	}

	#[test]
	fn drag_pins_then_releases() {
		let mut state = sample();
		let band = idx(&state, "Band A");
		let (x, y) = screen_pos(&state, "Band A");

		state.pointer_down(x, y);
		assert!(state.drag.active);
		assert!(state.is_pinned(band));
		assert_eq!(state.alpha.target, 0.3);

		state.pointer_move(x + 20.0, y - 10.0);
		let (gx, gy) = state.screen_to_graph(x + 20.0, y - 10.0);
		let (nx, ny) = state.position(band).unwrap();
		assert!((nx as f64 - gx).abs() < 1e-3);
		assert!((ny as f64 - gy).abs() < 1e-3);

		state.tick(0.016);
		assert_eq!(state.position(band), Some((nx, ny)));

		state.pointer_up();
		assert!(!state.drag.active);
		assert!(!state.is_pinned(band));
		assert_eq!(state.alpha.target, 0.0);
	}

	#[test]
	fn background_drag_pans() {
		let mut state = sample();
		state.pointer_down(5.0, 5.0);
		assert!(state.pan.active);
		state.pointer_move(25.0, 15.0);
		assert_eq!((state.transform.x, state.transform.y), (420.0, 310.0));
		state.pointer_leave();
		assert!(!state.pan.active);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut state = sample();
		let before = state.screen_to_graph(100.0, 100.0);
		state.zoom_at(100.0, 100.0, -1.0);
		let after = state.screen_to_graph(100.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(state.transform.k, 0.1);
	}

	#[test]
	fn resize_recenters_and_reheats() {
		let mut state = sample();
		state.alpha.value = 0.0;
		state.resize(1000.0, 400.0);
		assert_eq!((state.width, state.height), (1000.0, 400.0));
		assert_eq!((state.transform.x, state.transform.y), (500.0, 200.0));
		assert_eq!(state.alpha.value, 0.3);
	}

	#[test]
	fn resize_during_warm_up_lowers_energy() {
		let mut state = sample();
		state.tick(0.016);
		assert!(state.alpha.value > 0.9);
		state.resize(800.0, 600.0);
		assert_eq!(state.alpha.value, 0.3);
	}

	#[test]
	fn self_link_is_kept_out_of_the_engine() {
		let data = GraphData {
			nodes: vec![node("Jane Doe", NodeKind::Person, "Jane Doe")],
			links: vec![link("Jane Doe", "Jane Doe")],
		};
		let mut state = ForceGraphState::new(&data, &GraphConfig::default(), 800.0, 600.0);
		assert!(state.springs.is_empty());
		for _ in 0..10 {
			state.tick(0.016);
		}
		let jane = idx(&state, "Jane Doe");
		assert!(state.set_hover(Some(jane)));
		assert!(state.hover.neighbors.is_empty());
	}

	#[test]
	fn simulation_comes_to_rest() {
		let mut state = sample();
		for _ in 0..400 {
			state.tick(0.016);
		}
		assert!(!state.alpha.is_hot());
		let before = state.position(idx(&state, "Jane Doe"));
		state.tick(0.016);
		assert_eq!(state.position(idx(&state, "Jane Doe")), before);
	}
}
