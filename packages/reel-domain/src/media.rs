use serde::{Deserialize, Serialize};

/// Requested media kind. Older catalog revisions emitted `"TV"` for
/// shows, so that spelling is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
	Movie,
	#[serde(rename = "TV Show", alias = "TV")]
	TvShow,
	#[serde(rename = "ALL")]
	All,
}
