pub mod chat;
pub mod embedding;

mod error;

pub use error::{Error, Result};

use reqwest::{
	Response, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Credential rejections are a distinguished failure; everything else
/// defers to the regular status check.
pub(crate) fn check_auth(res: Response) -> Result<Response> {
	if matches!(res.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
		return Err(Error::Authentication { status: res.status().as_u16() });
	}

	Ok(res.error_for_status()?)
}
