use csv::ReaderBuilder;
use log::info;

use super::builder::build_graph;
use super::error::LoadError;
use super::row::Row;
use crate::components::force_graph::GraphData;

/// Data file fetched when no other source is given.
pub const DEFAULT_DATA_URL: &str = "temporaryData.csv";

/// Parses comma-separated text with a header row into rows keyed by header.
///
/// Quoted cells may span lines. Short rows are accepted; their missing
/// trailing cells are simply absent from the row.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, LoadError> {
	let mut reader = ReaderBuilder::new()
		.flexible(true)
		.from_reader(text.as_bytes());
	let headers = reader.headers()?.clone();

	reader
		.records()
		.map(|record| -> Result<Row, LoadError> {
			let record = record?;
			Ok(headers.iter().zip(record.iter()).collect())
		})
		.collect()
}

/// Fetches `url`, parses it and builds the graph.
pub async fn load_graph(url: &str) -> Result<GraphData, LoadError> {
	let text = fetch_text(url).await?;
	let rows = parse_rows(&text)?;
	info!("loaded {} rows from {url}", rows.len());
	Ok(build_graph(&rows))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, LoadError> {
	use gloo_net::http::Request;

	let fetch_err = |e: gloo_net::Error| LoadError::Fetch {
		url: url.to_owned(),
		reason: e.to_string(),
	};
	let response = Request::get(url).send().await.map_err(fetch_err)?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	response.text().await.map_err(fetch_err)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(url: &str) -> Result<String, LoadError> {
	Err(LoadError::Fetch {
		url: url.to_owned(),
		reason: "fetching is only available in the browser".to_owned(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::row::{CATEGORY, DESCRIPTION, FIRST_NAME, GROUPS, LAST_NAME};

	const SAMPLE: &str = ",Nom,Catégorie,Description,Association avec un groupe?\n\
		Jane,Doe,Artists,Painter,\"Band A\nBand B\"\n\
		John,Roe,Artists,,\n\
		,Nobody,Writers,,\n";

	#[test]
	fn reads_headers_and_quoted_newlines() {
		let rows = parse_rows(SAMPLE).unwrap();
		assert_eq!(rows.len(), 3);

		let jane = &rows[0];
		assert_eq!(jane.get(FIRST_NAME), Some("Jane"));
		assert_eq!(jane.get(LAST_NAME), Some("Doe"));
		assert_eq!(jane.get(CATEGORY), Some("Artists"));
		assert_eq!(jane.get(DESCRIPTION), Some("Painter"));
		assert_eq!(jane.get(GROUPS), Some("Band A\nBand B"));

		assert_eq!(rows[2].non_empty(FIRST_NAME), None);
	}

	#[test]
	fn short_rows_are_tolerated() {
		let rows = parse_rows(",Nom,Catégorie,Description\nJane,Doe\n").unwrap();
		assert_eq!(rows[0].get(LAST_NAME), Some("Doe"));
		assert_eq!(rows[0].get(CATEGORY), None);
	}

	#[test]
	fn cells_are_not_trimmed() {
		let rows = parse_rows(",Nom,Catégorie\n Jane , Doe ,Artists\n").unwrap();
		assert_eq!(rows[0].get(FIRST_NAME), Some(" Jane "));
	}

	#[test]
	fn sample_builds_expected_graph() {
		let rows = parse_rows(SAMPLE).unwrap();
		let data = build_graph(&rows);
		let ids: Vec<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["Jane Doe", "Artists", "Band A", "Band B", "John Roe"]);
		assert_eq!(data.links.len(), 4);
	}

	#[test]
	fn unterminated_quote_runs_to_end_of_input() {
		let rows = parse_rows(",Nom,Catégorie\nJane,\"Doe,Artists\nJohn,Roe,Writers\n").unwrap();
		assert_eq!(rows.len(), 1);
		assert!(rows[0].get(LAST_NAME).unwrap().starts_with("Doe,Artists\nJohn"));
		assert_eq!(rows[0].get(CATEGORY), None);
	}

	#[test]
	fn csv_errors_become_parse_errors() {
		let err = csv::Reader::from_reader(&b",Nom\n\xff\xfe,Doe\n"[..])
			.records()
			.find_map(Result::err)
			.map(LoadError::from);
		assert!(matches!(err, Some(LoadError::Parse(_))));
	}
}
