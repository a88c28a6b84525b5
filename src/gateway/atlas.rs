//! Atlas App Services client for the hosted search function.
//!
//! The client logs in anonymously once, then invokes a named server-side
//! function through the functions endpoint with a bearer token. A rejected
//! access token is refreshed once before the call is retried.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, trace, warn};

use super::{GatewayError, SearchGateway};
use crate::types::SearchResult;

pub const DEFAULT_BASE_URL: &str = "https://realm.mongodb.com";
pub const DEFAULT_FUNCTION: &str = "searchPageContents";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for an App Services application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasConfig {
	pub app_id: String,
	pub base_url: String,
	pub function: String,
	pub timeout: Duration,
}

impl AtlasConfig {
	#[must_use]
	pub fn new(app_id: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			base_url: DEFAULT_BASE_URL.to_string(),
			function: DEFAULT_FUNCTION.to_string(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	#[must_use]
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	#[must_use]
	pub fn with_function(mut self, function: impl Into<String>) -> Self {
		self.function = function.into();
		self
	}

	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	fn client_root(&self) -> String {
		format!("{}/api/client/v2.0", self.base_url.trim_end_matches('/'))
	}

	/// Endpoint that exchanges an anonymous credential for tokens.
	#[must_use]
	pub fn login_url(&self) -> String {
		format!(
			"{}/app/{}/auth/providers/anon-user/login",
			self.client_root(),
			self.app_id
		)
	}

	/// Endpoint that invokes a server-side function.
	#[must_use]
	pub fn function_url(&self) -> String {
		format!("{}/app/{}/functions/call", self.client_root(), self.app_id)
	}

	/// Endpoint that trades a refresh token for a new access token.
	#[must_use]
	pub fn session_url(&self) -> String {
		format!("{}/auth/session", self.client_root())
	}

	fn validate(&self) -> Result<(), GatewayError> {
		if self.app_id.trim().is_empty() {
			return Err(GatewayError::Config("app id must not be empty".into()));
		}
		if self.function.trim().is_empty() {
			return Err(GatewayError::Config("function name must not be empty".into()));
		}
		if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
			return Err(GatewayError::Config(format!(
				"base url '{}' must start with http:// or https://",
				self.base_url
			)));
		}
		Ok(())
	}
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
	access_token: Option<String>,
	refresh_token: Option<String>,
	user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
	access_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct FunctionCall<'a> {
	name: &'a str,
	arguments: [Value; 1],
}

#[derive(Debug, Clone)]
struct Session {
	access_token: String,
	refresh_token: String,
}

/// Gateway backed by an anonymous App Services session.
#[derive(Debug)]
pub struct AtlasGateway {
	http: Client,
	config: AtlasConfig,
	session: Session,
}

impl AtlasGateway {
	/// Build an HTTP client and establish the anonymous session.
	#[instrument(skip_all, fields(app_id = %config.app_id))]
	pub fn connect(config: AtlasConfig) -> Result<Self, GatewayError> {
		config.validate()?;
		let http = Client::builder()
			.timeout(config.timeout)
			.user_agent(concat!("docseek/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(GatewayError::from_reqwest)?;

		let session = login(&http, &config)?;
		info!("established anonymous search session");
		Ok(Self {
			http,
			config,
			session,
		})
	}

	#[must_use]
	pub fn config(&self) -> &AtlasConfig {
		&self.config
	}

	fn call_function(&self, query: &str) -> Result<Response, GatewayError> {
		let body = FunctionCall {
			name: &self.config.function,
			arguments: [json!({ "query": query })],
		};
		trace!(function = %self.config.function, "invoking search function");
		self.http
			.post(self.config.function_url())
			.bearer_auth(&self.session.access_token)
			.json(&body)
			.send()
			.map_err(GatewayError::from_reqwest)
	}

	fn refresh_session(&mut self) -> Result<(), GatewayError> {
		match refresh(&self.http, &self.config, &self.session.refresh_token) {
			Ok(access_token) => {
				self.session.access_token = access_token;
				debug!("refreshed search session");
				Ok(())
			}
			Err(err) => {
				warn!(error = %err, "session refresh failed, logging in again");
				self.session = login(&self.http, &self.config)?;
				Ok(())
			}
		}
	}
}

impl SearchGateway for AtlasGateway {
	#[instrument(skip(self), fields(function = %self.config.function))]
	fn search(&mut self, query: &str) -> Result<Vec<SearchResult>, GatewayError> {
		let mut response = self.call_function(query)?;
		if response.status() == StatusCode::UNAUTHORIZED {
			self.refresh_session()?;
			response = self.call_function(query)?;
			if response.status() == StatusCode::UNAUTHORIZED {
				error!("search call rejected after session refresh");
				return Err(GatewayError::Unauthorized);
			}
		}

		let body = success_body(response)?;
		let results = parse_search_response(&body)?;
		debug!(result_count = results.len(), "search completed");
		Ok(results)
	}
}

fn login(http: &Client, config: &AtlasConfig) -> Result<Session, GatewayError> {
	let body = json!({
		"options": {
			"device": {
				"sdkName": "docseek",
				"sdkVersion": env!("CARGO_PKG_VERSION"),
			}
		}
	});
	let response = http
		.post(config.login_url())
		.json(&body)
		.send()
		.map_err(GatewayError::from_reqwest)?;

	let status = response.status();
	if !status.is_success() {
		let message = response.text().unwrap_or_default();
		error!(status = status.as_u16(), "anonymous login rejected");
		return Err(GatewayError::Authentication(format!(
			"{} - {}",
			status.as_u16(),
			message
		)));
	}

	let text = response.text().map_err(GatewayError::from_reqwest)?;
	parse_login_response(&text)
}

fn refresh(http: &Client, config: &AtlasConfig, refresh_token: &str) -> Result<String, GatewayError> {
	let response = http
		.post(config.session_url())
		.bearer_auth(refresh_token)
		.send()
		.map_err(GatewayError::from_reqwest)?;
	let body = success_body(response)?;
	let session: SessionResponse = serde_json::from_str(&body)
		.map_err(|err| GatewayError::InvalidResponse(format!("session response: {err}")))?;
	session
		.access_token
		.filter(|token| !token.is_empty())
		.ok_or_else(|| GatewayError::InvalidResponse("session response had no access token".into()))
}

fn success_body(response: Response) -> Result<String, GatewayError> {
	let status = response.status();
	if status == StatusCode::UNAUTHORIZED {
		return Err(GatewayError::Unauthorized);
	}
	if !status.is_success() {
		let message = response.text().unwrap_or_default();
		error!(status = status.as_u16(), body = %message, "search service error");
		return Err(GatewayError::Api {
			status: status.as_u16(),
			message,
		});
	}
	response.text().map_err(GatewayError::from_reqwest)
}

fn parse_login_response(body: &str) -> Result<Session, GatewayError> {
	let login: LoginResponse = serde_json::from_str(body)
		.map_err(|err| GatewayError::Authentication(format!("unreadable login response: {err}")))?;
	match (login.access_token, login.refresh_token) {
		(Some(access_token), Some(refresh_token)) if !access_token.is_empty() => {
			debug!(user_id = login.user_id.as_deref().unwrap_or("?"), "anonymous user logged in");
			Ok(Session {
				access_token,
				refresh_token,
			})
		}
		_ => Err(GatewayError::Authentication(
			"login response did not include tokens".into(),
		)),
	}
}

/// Decode the function's return value. A `null` result means no matches.
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResult>, GatewayError> {
	let value: Value = serde_json::from_str(body)
		.map_err(|err| GatewayError::InvalidResponse(format!("JSON parse error: {err}")))?;
	match value {
		Value::Null => Ok(Vec::new()),
		Value::Array(_) => serde_json::from_value(value)
			.map_err(|err| GatewayError::InvalidResponse(format!("unexpected result shape: {err}"))),
		other => Err(GatewayError::InvalidResponse(format!(
			"expected an array of results, got {}",
			kind_of(&other)
		))),
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_follow_client_api_layout() {
		let config = AtlasConfig::new("docs-abcde").with_base_url("https://example.test/");
		assert_eq!(
			config.login_url(),
			"https://example.test/api/client/v2.0/app/docs-abcde/auth/providers/anon-user/login"
		);
		assert_eq!(
			config.function_url(),
			"https://example.test/api/client/v2.0/app/docs-abcde/functions/call"
		);
		assert_eq!(
			config.session_url(),
			"https://example.test/api/client/v2.0/auth/session"
		);
	}

	#[test]
	fn function_call_body_wraps_query_argument() {
		let body = FunctionCall {
			name: DEFAULT_FUNCTION,
			arguments: [json!({ "query": "install" })],
		};
		let value = serde_json::to_value(&body).unwrap();
		assert_eq!(
			value,
			json!({ "name": "searchPageContents", "arguments": [{ "query": "install" }] })
		);
	}

	#[test]
	fn null_response_means_no_results() {
		assert!(parse_search_response("null").unwrap().is_empty());
		assert!(parse_search_response("[]").unwrap().is_empty());
	}

	#[test]
	fn array_response_is_decoded() {
		let results =
			parse_search_response(r#"[{"_id":"https://x/a","title":"A","highlights":[]}]"#).unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].title, "A");
	}

	#[test]
	fn non_array_response_is_rejected() {
		let err = parse_search_response(r#"{"error":"boom"}"#).unwrap_err();
		assert!(matches!(err, GatewayError::InvalidResponse(ref msg) if msg.contains("an object")));
		assert!(matches!(
			parse_search_response("not json"),
			Err(GatewayError::InvalidResponse(_))
		));
	}

	#[test]
	fn login_response_requires_tokens() {
		let session =
			parse_login_response(r#"{"access_token":"a","refresh_token":"r","user_id":"u"}"#)
				.unwrap();
		assert_eq!(session.access_token, "a");
		assert_eq!(session.refresh_token, "r");
		assert!(matches!(
			parse_login_response(r#"{"user_id":"u"}"#),
			Err(GatewayError::Authentication(_))
		));
	}

	#[test]
	fn config_validation_rejects_blank_values() {
		assert!(matches!(
			AtlasConfig::new("  ").validate(),
			Err(GatewayError::Config(_))
		));
		assert!(matches!(
			AtlasConfig::new("app").with_base_url("ftp://x").validate(),
			Err(GatewayError::Config(_))
		));
		assert!(AtlasConfig::new("app").validate().is_ok());
	}
}
