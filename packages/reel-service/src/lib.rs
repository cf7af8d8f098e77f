pub mod extract;
pub mod query;
pub mod reconcile;
pub mod retrieve;

mod error;

pub use error::{Error, Result};
pub use extract::Extraction;

use std::{future::Future, pin::Pin, sync::Arc};

use qdrant_client::qdrant::Filter;
use serde_json::Value;
use tracing::info;

use reel_config::{ChatProviderConfig, Config, EmbeddingProviderConfig};
use reel_domain::StreamingProvider;
use reel_store::{CandidateMovie, MovieStore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait ChatProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a ChatProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, reel_providers::Result<String>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, reel_providers::Result<Vec<Vec<f32>>>>;
}

pub trait MovieIndex
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		vector: &'a [f32],
		filter: Filter,
		limit: u32,
	) -> BoxFuture<'a, reel_store::Result<Vec<CandidateMovie>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub chat: Arc<dyn ChatProvider>,
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub index: Arc<dyn MovieIndex>,
}

/// The recommendation pipeline. Holds the long-lived provider and store
/// seams; every request builds its own constraints and candidate pool,
/// so the service is shared freely across requests.
pub struct ReelService {
	pub cfg: Config,
	pub providers: Providers,
}

#[derive(Debug, Clone)]
pub struct RecommendationRequest {
	pub user_text: String,
	pub providers: Vec<StreamingProvider>,
}

/// Outcome of one request. A conversational reply is the extractor
/// declining off-topic input; it is a normal branch the caller shows
/// verbatim, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
	Movies(Vec<CandidateMovie>),
	Conversation(String),
}

struct DefaultChat;
impl ChatProvider for DefaultChat {
	fn complete<'a>(
		&'a self,
		cfg: &'a ChatProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, reel_providers::Result<String>> {
		Box::pin(reel_providers::chat::complete(cfg, messages))
	}
}

struct DefaultEmbedding;
impl EmbeddingProvider for DefaultEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, reel_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(reel_providers::embedding::embed(cfg, texts))
	}
}

impl MovieIndex for MovieStore {
	fn search<'a>(
		&'a self,
		vector: &'a [f32],
		filter: Filter,
		limit: u32,
	) -> BoxFuture<'a, reel_store::Result<Vec<CandidateMovie>>> {
		Box::pin(self.nearest(vector, filter, limit))
	}
}

impl ReelService {
	/// Wires the default HTTP providers and the Qdrant store from
	/// config. Fails fast when the store endpoint is unusable.
	pub fn new(cfg: Config) -> Result<Self> {
		let store = MovieStore::new(&cfg.storage.qdrant)?;
		let providers = Providers {
			chat: Arc::new(DefaultChat),
			embedding: Arc::new(DefaultEmbedding),
			index: Arc::new(store),
		};

		Ok(Self::with_providers(cfg, providers))
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}

	/// Runs the full pipeline: extraction, query building, retrieval,
	/// reconciliation. Stages are strictly sequential and every stage's
	/// output is the next stage's only input.
	pub async fn recommend(&self, req: RecommendationRequest) -> Result<Recommendation> {
		let user_text = req.user_text.trim();

		if user_text.is_empty() {
			return Err(Error::InvalidRequest { message: "user_text is required.".to_string() });
		}
		if req.providers.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one streaming provider must be selected.".to_string(),
			});
		}

		let constraints = match self.extract(user_text).await? {
			Extraction::Constraints(constraints) => constraints,
			Extraction::Conversation(text) => return Ok(Recommendation::Conversation(text)),
		};
		let (filter, vector) = self.build_query(&constraints, &req.providers).await?;
		let pool = self.retrieve(&vector, filter).await?;

		if pool.is_empty() {
			info!("Similarity search returned no candidates.");

			return Err(Error::EmptySelection);
		}

		let movies = self.reconcile(pool, user_text).await?;

		Ok(Recommendation::Movies(movies))
	}
}
