use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub search: Search,
	pub storage: Storage,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Nearest-neighbor pool size requested from the store.
	#[serde(default = "default_max_candidates")]
	pub max_candidates: u32,
	/// Upper bound the ranking prompt imposes on the final selection.
	#[serde(default = "default_max_selection")]
	pub max_selection: u32,
	/// Candidates must have strictly more reviews than this.
	#[serde(default = "default_min_vote_count")]
	pub min_vote_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub chat: ChatProviderConfig,
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ChatProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_max_candidates() -> u32 {
	10
}

fn default_max_selection() -> u32 {
	3
}

fn default_min_vote_count() -> i64 {
	500
}
