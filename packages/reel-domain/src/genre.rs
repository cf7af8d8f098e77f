use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{Error, Result};

/// Closed genre vocabulary of the movie catalog. Extraction output is
/// validated against it; a name outside the list is an error, never a
/// pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
	Action,
	Adventure,
	Animation,
	Comedy,
	Crime,
	Documentary,
	Drama,
	Family,
	Fantasy,
	History,
	Horror,
	Music,
	Mystery,
	Romance,
	#[serde(rename = "Science Fiction")]
	ScienceFiction,
	#[serde(rename = "TV Movie")]
	TvMovie,
	Thriller,
	War,
	Western,
}
impl Genre {
	pub const ALL: [Self; 19] = [
		Self::Action,
		Self::Adventure,
		Self::Animation,
		Self::Comedy,
		Self::Crime,
		Self::Documentary,
		Self::Drama,
		Self::Family,
		Self::Fantasy,
		Self::History,
		Self::Horror,
		Self::Music,
		Self::Mystery,
		Self::Romance,
		Self::ScienceFiction,
		Self::TvMovie,
		Self::Thriller,
		Self::War,
		Self::Western,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Action => "Action",
			Self::Adventure => "Adventure",
			Self::Animation => "Animation",
			Self::Comedy => "Comedy",
			Self::Crime => "Crime",
			Self::Documentary => "Documentary",
			Self::Drama => "Drama",
			Self::Family => "Family",
			Self::Fantasy => "Fantasy",
			Self::History => "History",
			Self::Horror => "Horror",
			Self::Music => "Music",
			Self::Mystery => "Mystery",
			Self::Romance => "Romance",
			Self::ScienceFiction => "Science Fiction",
			Self::TvMovie => "TV Movie",
			Self::Thriller => "Thriller",
			Self::War => "War",
			Self::Western => "Western",
		}
	}

	pub fn from_name(name: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|genre| genre.as_str() == name)
			.ok_or_else(|| Error::UnknownGenre { name: name.to_string() })
	}

	/// Comma-separated vocabulary, as the extraction prompt spells it.
	pub fn vocabulary() -> String {
		Self::ALL.iter().map(|genre| genre.as_str()).collect::<Vec<_>>().join(", ")
	}
}

/// Either the `"ALL"` sentinel or a non-empty genre list. A bare genre
/// string normalizes to a one-element list on deserialization, so both
/// spellings build identical filter predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreSelector {
	All,
	Listed(Vec<Genre>),
}
impl GenreSelector {
	pub fn genres(&self) -> Option<&[Genre]> {
		match self {
			Self::All => None,
			Self::Listed(genres) => Some(genres),
		}
	}
}
impl<'de> Deserialize<'de> for GenreSelector {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			One(String),
			Many(Vec<String>),
		}

		match Raw::deserialize(deserializer)? {
			Raw::One(name) if name == "ALL" => Ok(Self::All),
			Raw::One(name) => {
				let genre = Genre::from_name(&name).map_err(de::Error::custom)?;

				Ok(Self::Listed(vec![genre]))
			},
			Raw::Many(names) => {
				if names.is_empty() {
					return Err(de::Error::custom("Genre list must be non-empty."));
				}

				let genres = names
					.iter()
					.map(|name| Genre::from_name(name))
					.collect::<Result<Vec<_>>>()
					.map_err(de::Error::custom)?;

				Ok(Self::Listed(genres))
			},
		}
	}
}
impl Serialize for GenreSelector {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Self::All => serializer.serialize_str("ALL"),
			Self::Listed(genres) => genres.serialize(serializer),
		}
	}
}
