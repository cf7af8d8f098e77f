use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use reel_store::CandidateMovie;

use crate::{Error, ReelService, Result};

impl ReelService {
	/// Asks the completion service to pick the most affine candidates
	/// and reorders the pool by its answer. Individual hallucinated ids
	/// are tolerated and dropped; an answer with no valid id at all is
	/// `EmptySelection`.
	pub async fn reconcile(
		&self,
		pool: Vec<CandidateMovie>,
		user_text: &str,
	) -> Result<Vec<CandidateMovie>> {
		let messages = build_ranking_messages(&pool, user_text, self.cfg.search.max_selection);
		let raw = self.providers.chat.complete(&self.cfg.providers.chat, &messages).await?;

		debug!(reply = %raw, "Ranking reply.");

		select_candidates(pool, &raw)
	}
}

/// Candidates are reduced to id, title, description, and genres; the
/// rest of the record is noise to the ranking model.
fn build_ranking_messages(pool: &[CandidateMovie], user_text: &str, max_selection: u32) -> Vec<Value> {
	let list: Vec<Value> = pool
		.iter()
		.map(|movie| {
			serde_json::json!({
				"id": movie.id,
				"title": movie.title,
				"description": movie.description,
				"genres": movie.genres,
			})
		})
		.collect();
	let payload = serde_json::json!({ "list": list, "user_prompt": user_text });
	let system_prompt = format!(
		"You are an expert movie recommender system. Your task is to return at most \
		 {max_selection} movies from the list of passed movies. Return only the most affine to \
		 the user's prompt. \
		 You will only respond with the sorted ids separated by '|', and nothing else. You must \
		 not add anything else to your answer."
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": payload.to_string() }),
	]
}

/// Emits exactly the selected candidates, in the model-given order.
pub(crate) fn select_candidates(
	pool: Vec<CandidateMovie>,
	reply: &str,
) -> Result<Vec<CandidateMovie>> {
	let ids = parse_selection(reply)?;
	let mut by_id: HashMap<i64, CandidateMovie> =
		pool.into_iter().map(|movie| (movie.id, movie)).collect();
	let mut seen = HashSet::new();
	let mut selected = Vec::new();

	for id in ids {
		if !seen.insert(id) {
			continue;
		}

		match by_id.remove(&id) {
			Some(movie) => selected.push(movie),
			None => warn!(id, "Dropping id that matches no candidate in the pool."),
		}
	}

	if selected.is_empty() {
		return Err(Error::EmptySelection);
	}

	Ok(selected)
}

/// The ranking prompt demands ids separated by `|`. Empty tokens are
/// skipped; any other token that is not an integer means the model
/// ignored the format.
pub(crate) fn parse_selection(reply: &str) -> Result<Vec<i64>> {
	let mut ids = Vec::new();

	for token in reply.split('|') {
		let token = token.trim();

		if token.is_empty() {
			continue;
		}

		let id = token
			.parse::<i64>()
			.map_err(|_| Error::MalformedModelOutput { raw: reply.to_string() })?;

		ids.push(id);
	}

	Ok(ids)
}
