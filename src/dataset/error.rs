use thiserror::Error;

/// Failure to fetch or parse the source data. Every variant ends up in the
/// same error panel; the distinction only matters for the console log.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
	/// The request never produced a response.
	#[error("request for {url} failed: {reason}")]
	Fetch { url: String, reason: String },
	/// The server answered with a non-success status.
	#[error("request for {url} returned HTTP {status}")]
	Status { url: String, status: u16 },
	/// The body is not well-formed CSV.
	#[error("malformed CSV: {0}")]
	Parse(String),
}

impl From<csv::Error> for LoadError {
	fn from(err: csv::Error) -> Self {
		Self::Parse(err.to_string())
	}
}
