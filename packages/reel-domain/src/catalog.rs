use crate::{Error, Result};

/// Closed catalog of supported streaming services, keyed by their TMDB
/// watch-provider ids. Presentation layers render `name()`; filter
/// predicates carry `id()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingProvider {
	Netflix,
	AmazonPrimeVideo,
	Hulu,
	DisneyPlus,
	Max,
}
impl StreamingProvider {
	pub const ALL: [Self; 5] =
		[Self::Netflix, Self::AmazonPrimeVideo, Self::Hulu, Self::DisneyPlus, Self::Max];

	pub fn id(self) -> u64 {
		match self {
			Self::Netflix => 8,
			Self::AmazonPrimeVideo => 9,
			Self::Hulu => 15,
			Self::DisneyPlus => 337,
			Self::Max => 1899,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Netflix => "Netflix",
			Self::AmazonPrimeVideo => "Amazon Prime Video",
			Self::Hulu => "Hulu",
			Self::DisneyPlus => "Disney+",
			Self::Max => "Max",
		}
	}

	/// An id outside the table is a configuration or data bug, never a
	/// user-input problem.
	pub fn from_id(id: u64) -> Result<Self> {
		Self::ALL.into_iter().find(|provider| provider.id() == id).ok_or(Error::UnknownProvider { id })
	}

	/// Display name for a raw provider id.
	pub fn name_for(id: u64) -> Result<&'static str> {
		Ok(Self::from_id(id)?.name())
	}

	/// Ordered (id, display name) pairs for presentation menus.
	pub fn all() -> impl Iterator<Item = (u64, &'static str)> {
		Self::ALL.into_iter().map(|provider| (provider.id(), provider.name()))
	}
}
