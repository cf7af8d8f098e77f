use serde::Deserialize;

use crate::{GenreSelector, MediaType};

/// Structured intent extracted from one user request. `semantic_search`
/// carries the topic only; genre and media live in their own fields so
/// they can become filter clauses instead of polluting the embedding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConstraints {
	pub semantic_search: String,
	pub media: MediaType,
	pub genre: GenreSelector,
}
