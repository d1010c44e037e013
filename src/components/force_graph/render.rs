use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};
use super::types::NodeKind;

const BACKGROUND: &str = "#ffffff";
/// Grey levels of a resting (#999) and a highlighted (#333) link.
const LINK_SHADE: f64 = 153.0;
const LINK_SHADE_LIT: f64 = 51.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Draws the current frame. Reads the state only; the tick has already run.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let has_highlight = state.has_active_highlight();
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);

		// t=0: every link at 0.6; t=1: incident links at 1.0, the rest at 0.1
		let (alpha, shade) = if !has_highlight {
			(0.6, LINK_SHADE)
		} else if state.is_link_highlighted(n1.index(), n2.index()) {
			(0.6 + 0.4 * t, LINK_SHADE + (LINK_SHADE_LIT - LINK_SHADE) * t)
		} else {
			(0.6 - 0.5 * t, LINK_SHADE)
		};
		let shade = shade.round() as u8;

		let to_group = n1.data.user_data.kind == NodeKind::Group
			|| n2.data.user_data.kind == NodeKind::Group;
		set_dash(ctx, to_group.then_some((4.0 / k, 3.0 / k)));

		ctx.set_stroke_style_str(&format!("rgba({shade}, {shade}, {shade}, {alpha})"));
		ctx.set_line_width(1.0 / k);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
	set_dash(ctx, None);
}

fn draw_label(ctx: &CanvasRenderingContext2d, info: &NodeInfo, at: (f64, f64), alpha: f64, k: f64) {
	if info.kind != NodeKind::Category {
		return;
	}
	ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {alpha})"));
	ctx.set_font(&format!("bold {}px sans-serif", 11.0 / k.max(0.5)));
	let _ = ctx.fill_text(&info.id, at.0, at.1);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	// Unrelated nodes first so highlighted ones end up on top
	state.graph.visit_nodes(|node| {
		if has_highlight && state.is_highlighted(node.index()) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let alpha = if has_highlight { 1.0 - 0.8 * t } else { 1.0 };

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		draw_label(ctx, info, (x + info.radius + 3.0, y + 4.0), alpha, k);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let radius = if is_hovered {
			info.radius * (1.0 + 0.35 * t)
		} else {
			info.radius
		};

		if is_hovered && t > 0.01 {
			let glow_radius = info.radius * (1.8 + 1.2 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(0, 0, 0, {})", 0.2 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(51, 51, 51, {})", 0.8 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, info, (x + radius + 3.0, y + 4.0), 1.0, k);
	});
}
