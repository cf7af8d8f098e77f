use std::collections::HashSet;

use qdrant_client::qdrant::Filter;
use tracing::{info, warn};

use reel_store::CandidateMovie;

use crate::{ReelService, Result};

impl ReelService {
	/// One similarity query for at most `search.max_candidates`
	/// neighbors. The store returns them best-first and that order is
	/// kept; reconciliation requires unique ids, so later duplicates
	/// (farther matches) are dropped here.
	pub async fn retrieve(&self, vector: &[f32], filter: Filter) -> Result<Vec<CandidateMovie>> {
		let limit = self.cfg.search.max_candidates;
		let retrieved = self.providers.index.search(vector, filter, limit).await?;
		let mut seen = HashSet::new();
		let mut pool = Vec::with_capacity(retrieved.len());

		for movie in retrieved {
			if !seen.insert(movie.id) {
				warn!(id = movie.id, "Dropping duplicate candidate id from the store response.");

				continue;
			}

			pool.push(movie);
		}

		info!(count = pool.len(), "Retrieved candidate pool.");

		Ok(pool)
	}
}
