pub mod catalog;
pub mod constraints;
pub mod genre;
pub mod media;

mod error;

pub use catalog::StreamingProvider;
pub use constraints::SearchConstraints;
pub use error::{Error, Result};
pub use genre::{Genre, GenreSelector};
pub use media::MediaType;
