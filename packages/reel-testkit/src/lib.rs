use std::{
	collections::VecDeque,
	sync::{Mutex, MutexGuard},
};

use qdrant_client::qdrant::Filter;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use reel_config::{
	ChatProviderConfig, Config, EmbeddingProviderConfig, Qdrant, Search, Storage,
};
use reel_service::{BoxFuture, ChatProvider, EmbeddingProvider, MovieIndex};
use reel_store::CandidateMovie;

/// Best-effort tracing for tests; repeated calls are no-ops.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

/// A config wired to unreachable local endpoints; tests drive the fakes
/// below, never the network.
pub fn test_config() -> Config {
	Config {
		search: Search { max_candidates: 10, max_selection: 3, min_vote_count: 500 },
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:6334".to_string(),
				collection: "movies".to_string(),
				vector_dim: 4,
			},
		},
		providers: reel_config::Providers {
			chat: ChatProviderConfig {
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test-key".to_string(),
				path: "/chat/completions".to_string(),
				model: "test-chat".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			embedding: EmbeddingProviderConfig {
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test-key".to_string(),
				path: "/embeddings".to_string(),
				model: "test-embedding".to_string(),
				dimensions: 4,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
	}
}

/// A plausible candidate record for pool fixtures.
pub fn movie(id: i64, title: &str) -> CandidateMovie {
	CandidateMovie {
		id,
		title: title.to_string(),
		description: format!("About {title}."),
		genres: vec!["Drama".to_string()],
		release_date: "2020-01-01".to_string(),
		runtime: Some(110),
		vote_average: 7.0,
		vote_count: 1_000,
		trailer_url: None,
		watch: format!("https://example.org/watch/{id}"),
		providers: vec![8],
		distance: 0.2,
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}

/// Chat seam that pops scripted replies front-to-back and records every
/// message list it was sent.
pub struct ScriptedChat {
	replies: Mutex<VecDeque<reel_providers::Result<String>>>,
	calls: Mutex<Vec<Vec<Value>>>,
}
impl ScriptedChat {
	pub fn new<I, S>(replies: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			replies: Mutex::new(replies.into_iter().map(|reply| Ok(reply.into())).collect()),
			calls: Mutex::new(Vec::new()),
		}
	}

	pub fn failing(err: reel_providers::Error) -> Self {
		Self { replies: Mutex::new(VecDeque::from([Err(err)])), calls: Mutex::new(Vec::new()) }
	}

	pub fn calls(&self) -> Vec<Vec<Value>> {
		lock(&self.calls).clone()
	}

	pub fn call_count(&self) -> usize {
		lock(&self.calls).len()
	}
}
impl ChatProvider for ScriptedChat {
	fn complete<'a>(
		&'a self,
		_cfg: &'a ChatProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, reel_providers::Result<String>> {
		lock(&self.calls).push(messages.to_vec());

		let next = lock(&self.replies).pop_front().unwrap_or_else(|| {
			Err(reel_providers::Error::InvalidResponse {
				message: "Scripted chat has no reply left.".to_string(),
			})
		});

		Box::pin(async move { next })
	}
}

/// Embedding seam that returns the same vector for every text.
pub struct FixedEmbedding {
	pub vector: Vec<f32>,
}
impl FixedEmbedding {
	pub fn new(vector: Vec<f32>) -> Self {
		Self { vector }
	}
}
impl EmbeddingProvider for FixedEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, reel_providers::Result<Vec<Vec<f32>>>> {
		let vectors = vec![self.vector.clone(); texts.len()];

		Box::pin(async move { Ok(vectors) })
	}
}

#[derive(Debug, Clone)]
pub struct RecordedSearch {
	pub vector: Vec<f32>,
	pub filter: Filter,
	pub limit: u32,
}

/// Index seam backed by a fixed candidate list; it records each search
/// so tests can assert on the predicate and limit that reached the
/// store boundary.
pub struct StaticIndex {
	movies: Vec<CandidateMovie>,
	searches: Mutex<Vec<RecordedSearch>>,
}
impl StaticIndex {
	pub fn new(movies: Vec<CandidateMovie>) -> Self {
		Self { movies, searches: Mutex::new(Vec::new()) }
	}

	pub fn searches(&self) -> Vec<RecordedSearch> {
		lock(&self.searches).clone()
	}
}
impl MovieIndex for StaticIndex {
	fn search<'a>(
		&'a self,
		vector: &'a [f32],
		filter: Filter,
		limit: u32,
	) -> BoxFuture<'a, reel_store::Result<Vec<CandidateMovie>>> {
		lock(&self.searches).push(RecordedSearch {
			vector: vector.to_vec(),
			filter,
			limit,
		});

		let pool: Vec<CandidateMovie> =
			self.movies.iter().take(limit as usize).cloned().collect();

		Box::pin(async move { Ok(pool) })
	}
}

/// Index seam whose every search fails, for retrieval-error paths.
pub struct FailingIndex {
	pub message: String,
}
impl MovieIndex for FailingIndex {
	fn search<'a>(
		&'a self,
		_vector: &'a [f32],
		_filter: Filter,
		_limit: u32,
	) -> BoxFuture<'a, reel_store::Result<Vec<CandidateMovie>>> {
		let err = reel_store::Error::MalformedPoint { message: self.message.clone() };

		Box::pin(async move { Err(err) })
	}
}
