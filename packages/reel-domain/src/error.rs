pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Unknown streaming provider id {id}.")]
	UnknownProvider { id: u64 },
	#[error("Unknown genre '{name}'.")]
	UnknownGenre { name: String },
}
