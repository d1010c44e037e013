use leptos::prelude::*;
use log::error;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::dataset::{DEFAULT_DATA_URL, LoadError, load_graph};

/// Replaces the graph when the data file cannot be loaded.
#[component]
fn LoadErrorPanel(url: String) -> impl IntoView {
	view! {
		<div class="error-panel">
			<p>
				"Error loading data. Please check the console and ensure '"
				{url}
				"' is accessible."
			</p>
		</div>
	}
}

/// Default Home Page: loads the people table once and shows it as a graph.
#[component]
pub fn Home(#[prop(into, default = DEFAULT_DATA_URL.to_owned())] src: String) -> impl IntoView {
	let url = src.clone();
	let graph = LocalResource::new(move || {
		let url = url.clone();
		async move {
			load_graph(&url).await.inspect_err(|e: &LoadError| {
				error!("Error loading or parsing data: {e}");
			})
		}
	});

	view! {
		<div id="graph-container" class="fullscreen-graph">
			<Suspense fallback=|| view! { <p class="loading">"Loading data…"</p> }>
				{move || {
					graph
						.get()
						.map(|result| match result {
							Ok(data) => {
								let data: Signal<GraphData> = Signal::derive(move || data.clone());
								view! { <ForceGraphCanvas data=data fullscreen=true /> }.into_any()
							}
							Err(_) => view! { <LoadErrorPanel url=src.clone() /> }.into_any(),
						})
				}}
			</Suspense>
			<div class="graph-overlay">
				<h1>"People & Affiliations"</h1>
				<p class="subtitle">
					"Hover a node for details. Drag nodes to move them. Scroll to zoom. Drag background to pan."
				</p>
			</div>
		</div>
	}
}
