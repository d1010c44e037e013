//! Per-kind lookup tables and simulation constants.

use force_graph::SimulationParameters;

use super::types::NodeKind;

/// One value per node kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindTable<T> {
	pub person: T,
	pub category: T,
	pub group: T,
}

impl<T: Copy> KindTable<T> {
	pub fn get(&self, kind: NodeKind) -> T {
		match kind {
			NodeKind::Person => self.person,
			NodeKind::Category => self.category,
			NodeKind::Group => self.group,
		}
	}
}

/// Parameters handed to the physics engine, plus the energy schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	pub charge: f32,
	pub spring: f32,
	pub max_force: f32,
	pub node_speed: f32,
	pub damping: f32,
	pub mass: f32,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Energy the layout is reheated to on resize.
	pub resize_alpha: f64,
	/// Energy target held while a node is dragged.
	pub drag_alpha_target: f64,
	pub collide_strength: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			mass: 10.0,
			alpha_min,
			alpha_decay: 1.0 - f64::powf(alpha_min, 1.0 / 300.0),
			resize_alpha: 0.3,
			drag_alpha_target: 0.3,
			collide_strength: 0.7,
		}
	}
}

impl SimulationConfig {
	pub fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

/// Everything the graph view can be tuned with.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub node_radius: KindTable<f64>,
	pub collide_radius: KindTable<f64>,
	/// Rest length of a person-to-category link.
	pub category_link_distance: f64,
	/// Rest length of every other link.
	pub link_distance: f64,
	pub simulation: SimulationConfig,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			node_radius: KindTable {
				person: 6.0,
				category: 9.0,
				group: 4.0,
			},
			collide_radius: KindTable {
				person: 14.0,
				category: 20.0,
				group: 1.0,
			},
			category_link_distance: 12.0,
			link_distance: 6.0,
			simulation: SimulationConfig::default(),
		}
	}
}

impl GraphConfig {
	pub fn link_distance(&self, source: NodeKind, target: NodeKind) -> f64 {
		match (source, target) {
			(NodeKind::Person, NodeKind::Category) => self.category_link_distance,
			_ => self.link_distance,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn category_links_are_longer() {
		let config = GraphConfig::default();
		assert_eq!(config.link_distance(NodeKind::Person, NodeKind::Category), 12.0);
		assert_eq!(config.link_distance(NodeKind::Person, NodeKind::Group), 6.0);
		// Only the person-to-category direction counts.
		assert_eq!(config.link_distance(NodeKind::Category, NodeKind::Person), 6.0);
	}

	#[test]
	fn kind_tables() {
		let config = GraphConfig::default();
		assert_eq!(config.collide_radius.get(NodeKind::Category), 20.0);
		assert_eq!(config.collide_radius.get(NodeKind::Person), 14.0);
		assert_eq!(config.collide_radius.get(NodeKind::Group), 1.0);
		assert_eq!(config.node_radius.get(NodeKind::Category), 9.0);
		assert_eq!(config.node_radius.get(NodeKind::Person), 6.0);
		assert_eq!(config.node_radius.get(NodeKind::Group), 4.0);
	}

	#[test]
	fn energy_decays_to_rest_in_about_300_steps() {
		let sim = SimulationConfig::default();
		let mut alpha = 1.0;
		for _ in 0..300 {
			alpha += (0.0 - alpha) * sim.alpha_decay;
		}
		assert!((alpha - sim.alpha_min).abs() < 1e-9);
	}
}
