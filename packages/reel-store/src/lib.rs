pub mod movie;

mod error;

pub use error::{Error, Result};
pub use movie::CandidateMovie;

use qdrant_client::qdrant::{Filter, Query, QueryPointsBuilder};

/// Long-lived handle to the movie collection. Built once at startup and
/// shared read-only by every request; this pipeline never writes to the
/// store.
pub struct MovieStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl MovieStore {
	pub fn new(cfg: &reel_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// One filtered nearest-neighbor query. Results come back in the
	/// store's best-first order and are converted as-is.
	pub async fn nearest(
		&self,
		vector: &[f32],
		filter: Filter,
		limit: u32,
	) -> Result<Vec<CandidateMovie>> {
		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector.to_vec()))
			.filter(filter)
			.with_payload(true)
			.limit(limit as u64);
		let response = self.client.query(search).await?;

		response.result.iter().map(movie::movie_from_point).collect()
	}
}
