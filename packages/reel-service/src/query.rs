use qdrant_client::qdrant::{Condition, Filter, Range};

use reel_domain::{GenreSelector, SearchConstraints, StreamingProvider};

use crate::{Error, ReelService, Result};

impl ReelService {
	/// Embeds the topic and builds the store filter. Deterministic given
	/// identical inputs; the embedding call is the only network hop.
	/// Callers guarantee a non-empty provider selection.
	pub async fn build_query(
		&self,
		constraints: &SearchConstraints,
		providers: &[StreamingProvider],
	) -> Result<(Filter, Vec<f32>)> {
		let filter = build_filter(constraints, providers, self.cfg.search.min_vote_count);
		let texts = vec![constraints.semantic_search.clone()];
		let mut vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;

		if vectors.len() != 1 {
			return Err(Error::Provider {
				message: format!(
					"Embedding provider returned {} vectors for one text.",
					vectors.len()
				),
			});
		}

		Ok((filter, vectors.remove(0)))
	}
}

/// Conjunction evaluated by the store next to similarity ranking. The
/// provider and vote-count clauses are always present; the genre clause
/// only when a genre was requested.
pub(crate) fn build_filter(
	constraints: &SearchConstraints,
	providers: &[StreamingProvider],
	min_vote_count: i64,
) -> Filter {
	let provider_ids: Vec<i64> = providers.iter().map(|provider| provider.id() as i64).collect();
	let mut must = vec![
		Condition::matches("providers", provider_ids),
		Condition::range("vote_count", Range { gt: Some(min_vote_count as f64), ..Default::default() }),
	];

	if let GenreSelector::Listed(genres) = &constraints.genre {
		let names: Vec<String> = genres.iter().map(|genre| genre.as_str().to_string()).collect();

		must.push(Condition::matches("genres", names));
	}

	Filter { must, ..Default::default() }
}
