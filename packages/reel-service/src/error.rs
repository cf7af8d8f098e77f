pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("The completion service rejected the credentials.")]
	Authentication,
	#[error("Model output did not match the expected shape.")]
	MalformedModelOutput { raw: String },
	#[error("{message}")]
	Validation { message: String },
	#[error("No candidate matched the recommendation response.")]
	EmptySelection,
	#[error("Vector store request failed: {message}")]
	Retrieval { message: String },
	#[error("Unknown streaming provider id {id}.")]
	UnknownProvider { id: u64 },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider request failed: {message}")]
	Provider { message: String },
}
impl From<reel_providers::Error> for Error {
	fn from(err: reel_providers::Error) -> Self {
		match err {
			reel_providers::Error::Authentication { .. } => Self::Authentication,
			other => Self::Provider { message: other.to_string() },
		}
	}
}
impl From<reel_store::Error> for Error {
	fn from(err: reel_store::Error) -> Self {
		Self::Retrieval { message: err.to_string() }
	}
}
impl From<reel_domain::Error> for Error {
	fn from(err: reel_domain::Error) -> Self {
		match err {
			reel_domain::Error::UnknownProvider { id } => Self::UnknownProvider { id },
			other => Self::Validation { message: other.to_string() },
		}
	}
}
