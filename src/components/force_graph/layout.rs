//! Position passes run after each physics step: link rest lengths,
//! collision separation and centering. All of them leave pinned bodies alone.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub pinned: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring<K> {
	pub source: K,
	pub target: K,
	pub distance: f64,
}

/// Simulation energy. Passes are scaled by it and stepping stops once it
/// falls below `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alpha {
	pub value: f64,
	pub target: f64,
	pub decay: f64,
	pub min: f64,
}

impl Alpha {
	pub fn new(decay: f64, min: f64) -> Self {
		Self {
			value: 1.0,
			target: 0.0,
			decay,
			min,
		}
	}

	pub fn is_hot(&self) -> bool {
		self.value >= self.min
	}

	pub fn step(&mut self) {
		self.value += (self.target - self.value) * self.decay;
	}

	/// Raises the energy to at least `value`.
	pub fn reheat(&mut self, value: f64) {
		self.value = self.value.max(value);
	}
}

fn degree<K: Copy + Eq + Hash>(springs: &[Spring<K>]) -> HashMap<K, usize> {
	let mut count = HashMap::new();
	for s in springs {
		*count.entry(s.source).or_insert(0) += 1;
		*count.entry(s.target).or_insert(0) += 1;
	}
	count
}

/// Pulls or pushes each linked pair toward its rest distance. The lighter
/// connected end moves more, as with a classic link force.
pub fn relax_springs<K: Copy + Eq + Hash>(
	bodies: &mut HashMap<K, Body>,
	springs: &[Spring<K>],
	alpha: f64,
) {
	let count = degree(springs);
	for spring in springs {
		let (Some(&a), Some(&b)) = (bodies.get(&spring.source), bodies.get(&spring.target)) else {
			continue;
		};
		let (ca, cb) = (
			count.get(&spring.source).copied().unwrap_or(1) as f64,
			count.get(&spring.target).copied().unwrap_or(1) as f64,
		);
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 1e-6 {
			continue;
		}
		let strength = 1.0 / ca.min(cb);
		let l = (dist - spring.distance) / dist * alpha * strength;
		let (fx, fy) = (dx * l, dy * l);
		let bias = ca / (ca + cb);

		let (wa, wb) = match (a.pinned, b.pinned) {
			(true, true) => continue,
			(true, false) => (0.0, 1.0),
			(false, true) => (1.0, 0.0),
			(false, false) => (1.0 - bias, bias),
		};
		if let Some(t) = bodies.get_mut(&spring.target) {
			t.x -= fx * wb;
			t.y -= fy * wb;
		}
		if let Some(s) = bodies.get_mut(&spring.source) {
			s.x += fx * wa;
			s.y += fy * wa;
		}
	}
}

/// Separates overlapping bodies by `strength` of their overlap.
pub fn resolve_collisions<K: Copy + Eq + Hash + Ord>(
	bodies: &mut HashMap<K, Body>,
	strength: f64,
) {
	let mut keys: Vec<K> = bodies.keys().copied().collect();
	keys.sort();

	for (i, &ka) in keys.iter().enumerate() {
		for &kb in &keys[i + 1..] {
			let (Some(&a), Some(&b)) = (bodies.get(&ka), bodies.get(&kb)) else {
				continue;
			};
			if a.pinned && b.pinned {
				continue;
			}
			let reach = a.radius + b.radius;
			let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
			let mut dist = (dx * dx + dy * dy).sqrt();
			if dist >= reach {
				continue;
			}
			// Coincident bodies get separated along a fixed axis.
			if dist < 1e-6 {
				(dx, dy, dist) = (1e-6, 0.0, 1e-6);
			}
			let push = (reach - dist) / dist * strength;
			let (wa, wb) = match (a.pinned, b.pinned) {
				(true, _) => (0.0, 1.0),
				(_, true) => (1.0, 0.0),
				_ => (0.5, 0.5),
			};
			if let Some(a) = bodies.get_mut(&ka) {
				a.x -= dx * push * wa;
				a.y -= dy * push * wa;
			}
			if let Some(b) = bodies.get_mut(&kb) {
				b.x += dx * push * wb;
				b.y += dy * push * wb;
			}
		}
	}
}

/// Shifts free bodies so the centroid of all bodies sits on the origin.
pub fn center<K>(bodies: &mut HashMap<K, Body>) {
	let n = bodies.len();
	if n == 0 {
		return;
	}
	let (sx, sy) = bodies
		.values()
		.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
	let (cx, cy) = (sx / n as f64, sy / n as f64);
	for body in bodies.values_mut().filter(|b| !b.pinned) {
		body.x -= cx;
		body.y -= cy;
	}
}
