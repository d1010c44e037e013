use leptos::prelude::*;

use super::state::NodeInfo;

/// Offset from the pointer's page position to the tooltip's corner.
const OFFSET_X: f64 = 15.0;
const OFFSET_Y: f64 = -28.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
	pub title: String,
	pub category: String,
	pub description: String,
	pub left: f64,
	pub top: f64,
}

impl TooltipContent {
	pub fn at_pointer(node: &NodeInfo, page_x: f64, page_y: f64) -> Self {
		Self {
			title: node.id.clone(),
			category: node.category.clone(),
			description: node.description.clone().unwrap_or_default(),
			left: page_x + OFFSET_X,
			top: page_y + OFFSET_Y,
		}
	}
}

/// Floating node details. Stays in the DOM at opacity 0 while nothing is
/// hovered so it can fade.
#[component]
pub fn NodeTooltip(#[prop(into)] content: Signal<Option<TooltipContent>>) -> impl IntoView {
	let shown = move || content.with(Option::is_some);
	let px = |v: f64| format!("{v}px");

	view! {
		<div
			class="tooltip"
			style:opacity=move || if shown() { "1" } else { "0" }
			style:left=move || content.with(|c| c.as_ref().map(|c| px(c.left)).unwrap_or_default())
			style:top=move || content.with(|c| c.as_ref().map(|c| px(c.top)).unwrap_or_default())
		>
			{move || {
				content
					.get()
					.map(|c| {
						view! {
							<h3>{c.title}</h3>
							<p>
								<strong>"Category:"</strong>
								" "
								{c.category}
							</p>
							<p>{c.description}</p>
						}
					})
			}}
		</div>
	}
}
