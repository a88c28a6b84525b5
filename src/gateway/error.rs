use thiserror::Error;

/// Errors that can occur while talking to the hosted search function.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// Network-level error during HTTP communication.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("request timed out")]
	Timeout,

	/// Anonymous login was rejected or returned no credentials.
	#[error("anonymous login failed: {0}")]
	Authentication(String),

	/// The session token was rejected and could not be refreshed.
	#[error("session is no longer authorized")]
	Unauthorized,

	/// The service answered with a non-success status.
	#[error("search service error: {status} - {message}")]
	Api { status: u16, message: String },

	/// The response body did not have the expected shape.
	#[error("invalid response from search service: {0}")]
	InvalidResponse(String),

	/// The gateway was misconfigured before any request was sent.
	#[error("invalid gateway configuration: {0}")]
	Config(String),
}

impl GatewayError {
	pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			Self::Timeout
		} else {
			Self::Network(err)
		}
	}
}
