use thiserror::Error;

/// Errors raised while wiring forms up to async submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
	#[error("browser window is not available")]
	NoWindow,

	#[error("document is not available")]
	NoDocument,

	#[error("failed to attach submit listener: {0}")]
	Listener(String),

	#[error("failed to inject response markup: {0}")]
	Inject(String),
}

/// Errors raised while performing the async request itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	#[error("request could not be sent: {0}")]
	Send(String),

	#[error("response body could not be read: {0}")]
	Body(String),

	#[error("scripted transport ran out of responses")]
	Exhausted,
}
