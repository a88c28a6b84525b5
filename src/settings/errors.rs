use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value for {key}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid<V, R>(key: &'static str, value: V, reason: R) -> Self
	where
		V: Into<String>,
		R: Into<String>,
	{
		Self {
			key,
			value: value.into(),
			reason: reason.into(),
		}
	}
}
