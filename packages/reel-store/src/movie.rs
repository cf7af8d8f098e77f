use std::collections::HashMap;

use qdrant_client::qdrant::{ScoredPoint, Value, value::Kind};
use serde::Serialize;

use crate::{Error, Result};

/// One retrieved catalog record. Built fresh per request from a store
/// result point and never persisted by this pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMovie {
	pub id: i64,
	pub title: String,
	pub description: String,
	pub genres: Vec<String>,
	pub release_date: String,
	/// Minutes; absent for titles the catalog has no runtime for.
	pub runtime: Option<i64>,
	pub vote_average: f64,
	pub vote_count: i64,
	pub trailer_url: Option<String>,
	pub watch: String,
	pub providers: Vec<u64>,
	/// Cosine distance to the query vector; smaller is closer.
	pub distance: f32,
}
impl CandidateMovie {
	/// The trailer payload stores a bare YouTube video key.
	pub fn trailer_watch_url(&self) -> Option<String> {
		self.trailer_url.as_ref().map(|key| format!("https://www.youtube.com/watch?v={key}"))
	}
}

/// A point missing a required payload field is a malformed store
/// response; the pipeline reports it instead of patching defaults in.
pub fn movie_from_point(point: &ScoredPoint) -> Result<CandidateMovie> {
	let payload = &point.payload;

	Ok(CandidateMovie {
		id: payload_i64(payload, "show_id")?,
		title: payload_str(payload, "title")?,
		description: payload_str(payload, "description")?,
		genres: payload_str_list(payload, "genres")?,
		release_date: payload_str(payload, "release_date")?,
		runtime: payload_opt_i64(payload, "runtime")?,
		vote_average: payload_f64(payload, "vote_average")?,
		vote_count: payload_i64(payload, "vote_count")?,
		trailer_url: payload_opt_str(payload, "trailer_url")?,
		watch: payload_str(payload, "watch")?,
		providers: payload_u64_list(payload, "providers")?,
		// Cosine collections score by similarity; candidates carry the
		// distance form.
		distance: 1.0 - point.score,
	})
}

fn field_error(field: &str, expected: &str) -> Error {
	Error::MalformedPoint { message: format!("Payload field '{field}' must be {expected}.") }
}

fn payload_value<'a>(payload: &'a HashMap<String, Value>, field: &str) -> Result<&'a Value> {
	payload
		.get(field)
		.ok_or_else(|| Error::MalformedPoint { message: format!("Payload is missing '{field}'.") })
}

fn payload_str(payload: &HashMap<String, Value>, field: &str) -> Result<String> {
	match &payload_value(payload, field)?.kind {
		Some(Kind::StringValue(value)) => Ok(value.clone()),
		_ => Err(field_error(field, "a string")),
	}
}

fn payload_opt_str(payload: &HashMap<String, Value>, field: &str) -> Result<Option<String>> {
	let Some(value) = payload.get(field) else {
		return Ok(None);
	};

	match &value.kind {
		Some(Kind::StringValue(value)) => Ok(Some(value.clone())),
		Some(Kind::NullValue(_)) | None => Ok(None),
		_ => Err(field_error(field, "a string or null")),
	}
}

// Ingestion writes plain JSON numbers, so integral fields may arrive as
// either wire type.
fn payload_i64(payload: &HashMap<String, Value>, field: &str) -> Result<i64> {
	match payload_value(payload, field)?.kind {
		Some(Kind::IntegerValue(value)) => Ok(value),
		Some(Kind::DoubleValue(value)) => Ok(value as i64),
		_ => Err(field_error(field, "an integer")),
	}
}

fn payload_opt_i64(payload: &HashMap<String, Value>, field: &str) -> Result<Option<i64>> {
	let Some(value) = payload.get(field) else {
		return Ok(None);
	};

	match value.kind {
		Some(Kind::IntegerValue(value)) => Ok(Some(value)),
		Some(Kind::DoubleValue(value)) => Ok(Some(value as i64)),
		Some(Kind::NullValue(_)) | None => Ok(None),
		_ => Err(field_error(field, "an integer or null")),
	}
}

fn payload_f64(payload: &HashMap<String, Value>, field: &str) -> Result<f64> {
	match payload_value(payload, field)?.kind {
		Some(Kind::DoubleValue(value)) => Ok(value),
		Some(Kind::IntegerValue(value)) => Ok(value as f64),
		_ => Err(field_error(field, "a number")),
	}
}

fn payload_str_list(payload: &HashMap<String, Value>, field: &str) -> Result<Vec<String>> {
	let Some(Kind::ListValue(list)) = &payload_value(payload, field)?.kind else {
		return Err(field_error(field, "a list of strings"));
	};

	list.values
		.iter()
		.map(|value| match &value.kind {
			Some(Kind::StringValue(item)) => Ok(item.clone()),
			_ => Err(field_error(field, "a list of strings")),
		})
		.collect()
}

fn payload_u64_list(payload: &HashMap<String, Value>, field: &str) -> Result<Vec<u64>> {
	let Some(Kind::ListValue(list)) = &payload_value(payload, field)?.kind else {
		return Err(field_error(field, "a list of integers"));
	};

	list.values
		.iter()
		.map(|value| match value.kind {
			Some(Kind::IntegerValue(item)) if item >= 0 => Ok(item as u64),
			_ => Err(field_error(field, "a list of non-negative integers")),
		})
		.collect()
}
