mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	ChatProviderConfig, Config, EmbeddingProviderConfig, Providers, Qdrant, Search, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.max_candidates == 0 {
		return Err(Error::Validation {
			message: "search.max_candidates must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_selection == 0 {
		return Err(Error::Validation {
			message: "search.max_selection must be greater than zero.".to_string(),
		});
	}
	if cfg.search.min_vote_count < 0 {
		return Err(Error::Validation {
			message: "search.min_vote_count must be zero or greater.".to_string(),
		});
	}
	if cfg.storage.qdrant.url.is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.chat.api_base.is_empty() {
		return Err(Error::Validation {
			message: "providers.chat.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.chat.model.is_empty() {
		return Err(Error::Validation {
			message: "providers.chat.model must be non-empty.".to_string(),
		});
	}
	if cfg.providers.chat.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.chat.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.api_base.is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.model.is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.model must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	trim_trailing_slash(&mut cfg.storage.qdrant.url);
	trim_trailing_slash(&mut cfg.providers.chat.api_base);
	trim_trailing_slash(&mut cfg.providers.embedding.api_base);
}

fn trim_trailing_slash(value: &mut String) {
	while value.ends_with('/') {
		value.pop();
	}
}
