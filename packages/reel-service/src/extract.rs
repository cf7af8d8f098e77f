use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use reel_domain::{Genre, SearchConstraints};

use crate::{Error, ReelService, Result};

/// Result of one extraction call. `Conversation` carries the assistant
/// text verbatim when it is not structured output, e.g. a refusal for
/// off-topic requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
	Constraints(SearchConstraints),
	Conversation(String),
}

impl ReelService {
	/// Exactly one completion call per request; malformed output is
	/// never retried.
	pub async fn extract(&self, user_text: &str) -> Result<Extraction> {
		let messages = build_extraction_messages(user_text);
		let raw = self.providers.chat.complete(&self.cfg.providers.chat, &messages).await?;

		debug!(reply = %raw, "Constraint extraction reply.");

		match parse_constraints(&raw) {
			Ok(constraints) => {
				info!(
					topic = %constraints.semantic_search,
					media = ?constraints.media,
					genre = ?constraints.genre,
					"Extracted search constraints."
				);

				Ok(Extraction::Constraints(constraints))
			},
			Err(Error::MalformedModelOutput { raw }) => Ok(Extraction::Conversation(raw)),
			Err(err) => Err(err),
		}
	}
}

fn build_extraction_messages(user_text: &str) -> Vec<Value> {
	let system_prompt = format!(
		"Given a user request, extract the search topic, genre, and media type as a JSON object \
		 with the keys \"semantic_search\", \"genre\", and \"media\". \
		 \"semantic_search\" is the topic for semantic search and must not mention the genre or \
		 the media type. \
		 \"genre\" MUST be one of the following categories, or a list of them: {genres}. \
		 If no genre is requested, return \"ALL\". \
		 \"media\" MUST be one of: TV Show, Movie, ALL. \
		 Respond with the JSON object only and nothing else. \
		 If the user asks for anything other than movies or TV shows, respectfully decline in \
		 plain text instead.",
		genres = Genre::vocabulary(),
	);

	vec![
		serde_json::json!({ "role": "system", "content": system_prompt }),
		serde_json::json!({ "role": "user", "content": user_text }),
	]
}

/// A reply that yields no JSON is `MalformedModelOutput` carrying the
/// raw text; a decoded object that breaks the schema is `Validation`.
/// The two propagate differently: the first may be shown verbatim.
pub(crate) fn parse_constraints(raw: &str) -> Result<SearchConstraints> {
	let value = decode_json_reply(raw)?;
	let constraints: SearchConstraints = serde_json::from_value(value).map_err(|err| {
		Error::Validation { message: format!("Extracted constraints failed validation: {err}.") }
	})?;

	if constraints.semantic_search.trim().is_empty() {
		return Err(Error::Validation {
			message: "Extracted semantic_search must be non-empty.".to_string(),
		});
	}

	Ok(constraints)
}

// Direct decode first, then an embedded object; anything else is the
// model talking, not data.
fn decode_json_reply(raw: &str) -> Result<Value> {
	if let Ok(value) = serde_json::from_str::<Value>(raw.trim())
		&& value.is_object()
	{
		return Ok(value);
	}
	if let Some(block) = embedded_json_object(raw)
		&& let Ok(value) = serde_json::from_str::<Value>(&block)
		&& value.is_object()
	{
		return Ok(value);
	}

	Err(Error::MalformedModelOutput { raw: raw.to_string() })
}

fn embedded_json_object(raw: &str) -> Option<String> {
	let fenced = Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").ok()?;

	if let Some(caps) = fenced.captures(raw) {
		return Some(caps[1].to_string());
	}

	let start = raw.find('{')?;
	let end = raw.rfind('}')?;

	(end > start).then(|| raw[start..=end].to_string())
}

#[cfg(test)]
mod tests {
	use reel_domain::{GenreSelector, MediaType};

	use super::*;

	#[test]
	fn parses_a_bare_json_reply() {
		let constraints =
			parse_constraints(r#"{"semantic_search": "friendship", "media": "Movie", "genre": "ALL"}"#)
				.expect("parse failed");

		assert_eq!(constraints.semantic_search, "friendship");
		assert_eq!(constraints.media, MediaType::Movie);
		assert_eq!(constraints.genre, GenreSelector::All);
	}

	#[test]
	fn parses_a_fenced_json_reply() {
		let raw = "Here you go:\n```json\n{\"semantic_search\": \"heists\", \"media\": \"ALL\", \
		           \"genre\": \"Crime\"}\n```";
		let constraints = parse_constraints(raw).expect("parse failed");

		assert_eq!(constraints.semantic_search, "heists");
		assert_eq!(constraints.genre, GenreSelector::Listed(vec![Genre::Crime]));
	}

	#[test]
	fn parses_an_embedded_object_without_fences() {
		let raw = "Sure! {\"semantic_search\": \"space travel\", \"media\": \"Movie\", \
		           \"genre\": \"ALL\"} Hope that helps.";
		let constraints = parse_constraints(raw).expect("parse failed");

		assert_eq!(constraints.semantic_search, "space travel");
	}

	#[test]
	fn prose_is_malformed_output_carrying_the_text() {
		let raw = "Sorry, I can only help with movies and TV shows.";

		match parse_constraints(raw) {
			Err(Error::MalformedModelOutput { raw: carried }) => assert_eq!(carried, raw),
			other => panic!("Expected MalformedModelOutput, got {other:?}."),
		}
	}

	#[test]
	fn unknown_genre_is_a_validation_failure() {
		let raw = r#"{"semantic_search": "space", "media": "Movie", "genre": "Sci-Fi Romance"}"#;

		assert!(matches!(parse_constraints(raw), Err(Error::Validation { .. })));
	}

	#[test]
	fn bad_media_value_is_a_validation_failure() {
		let raw = r#"{"semantic_search": "space", "media": "Radio", "genre": "ALL"}"#;

		assert!(matches!(parse_constraints(raw), Err(Error::Validation { .. })));
	}

	#[test]
	fn empty_topic_is_a_validation_failure() {
		let raw = r#"{"semantic_search": "  ", "media": "Movie", "genre": "ALL"}"#;

		assert!(matches!(parse_constraints(raw), Err(Error::Validation { .. })));
	}

	#[test]
	fn single_genre_string_normalizes_to_a_list() {
		let single =
			parse_constraints(r#"{"semantic_search": "laughs", "media": "Movie", "genre": "Comedy"}"#)
				.expect("parse failed");
		let listed =
			parse_constraints(r#"{"semantic_search": "laughs", "media": "Movie", "genre": ["Comedy"]}"#)
				.expect("parse failed");

		assert_eq!(single.genre, listed.genre);
	}

	#[test]
	fn extraction_prompt_names_the_vocabulary() {
		let messages = build_extraction_messages("a movie about friendship");
		let system = messages[0]["content"].as_str().expect("system prompt must be text");

		assert!(system.contains("Science Fiction"));
		assert!(system.contains("TV Show, Movie, ALL"));
		assert_eq!(messages[1]["content"], "a movie about friendship");
	}
}
