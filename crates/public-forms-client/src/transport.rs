//! The HTTP seam between the binder and the network.
//!
//! Binding logic only ever talks to [`Transport`], so tests drive the
//! whole submission flow with a scripted double instead of a server.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::submit::FormSubmission;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: String,
}

impl TransportResponse {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Sends a captured submission and returns the server's answer.
#[async_trait(?Send)]
pub trait Transport {
	async fn send(&self, submission: &FormSubmission)
	-> Result<TransportResponse, TransportError>;
}

/// Browser fetch transport.
///
/// GET submissions carry their fields in the query string; POST
/// submissions send a urlencoded body.
#[cfg(target_arch = "wasm32")]
pub struct FetchTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for FetchTransport {
	async fn send(
		&self,
		submission: &FormSubmission,
	) -> Result<TransportResponse, TransportError> {
		use crate::submit::SubmitMethod;

		let response = match submission.method {
			SubmitMethod::Get => {
				let url = submission
					.url_with_query()
					.map_err(|error| TransportError::Send(error.to_string()))?;
				gloo_net::http::Request::get(&url).send().await
			}
			SubmitMethod::Post => {
				let body = submission
					.encoded_body()
					.map_err(|error| TransportError::Send(error.to_string()))?;
				gloo_net::http::Request::post(&submission.url)
					.header("Content-Type", "application/x-www-form-urlencoded")
					.body(body)
					.map_err(|error| TransportError::Send(error.to_string()))?
					.send()
					.await
			}
		}
		.map_err(|error| TransportError::Send(error.to_string()))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|error| TransportError::Body(error.to_string()))?;
		Ok(TransportResponse { status, body })
	}
}

/// Scripted transport replaying queued responses.
///
/// Every call pops the next queued response and records the submission
/// it was asked to send; an empty queue answers
/// [`TransportError::Exhausted`].
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct ScriptedTransport {
	responses: std::cell::RefCell<std::collections::VecDeque<Result<TransportResponse, TransportError>>>,
	seen: std::cell::RefCell<Vec<FormSubmission>>,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a response with the given status and body.
	pub fn respond_with(&self, status: u16, body: &str) {
		self.responses.borrow_mut().push_back(Ok(TransportResponse {
			status,
			body: body.to_string(),
		}));
	}

	/// Queues a transport-level failure.
	pub fn fail_with(&self, message: &str) {
		self.responses
			.borrow_mut()
			.push_back(Err(TransportError::Send(message.to_string())));
	}

	/// Submissions sent so far, in order.
	pub fn seen(&self) -> Vec<FormSubmission> {
		self.seen.borrow().clone()
	}

	pub fn calls(&self) -> usize {
		self.seen.borrow().len()
	}
}

#[cfg(any(test, feature = "testing"))]
#[async_trait(?Send)]
impl Transport for ScriptedTransport {
	async fn send(
		&self,
		submission: &FormSubmission,
	) -> Result<TransportResponse, TransportError> {
		self.seen.borrow_mut().push(submission.clone());
		self.responses
			.borrow_mut()
			.pop_front()
			.unwrap_or(Err(TransportError::Exhausted))
	}
}
