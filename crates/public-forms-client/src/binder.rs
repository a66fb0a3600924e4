//! Binding forms to in-place async submission.
//!
//! `initialize` looks up the wrapper element for a container id and
//! binds every form below it. A bound form no longer navigates on
//! submit: its values travel through the transport, the wrapper's
//! classes track the round-trip, and a successful response replaces
//! the wrapper's content. Freshly injected forms are bound again, so a
//! server answering with a new form keeps the block submittable.

use public_forms_core::{ClassOps, SubmitPhase, apply_phase};

use crate::submit::FormSubmission;
use crate::transport::Transport;
use crate::{error_log, warn_log};

#[cfg(target_arch = "wasm32")]
use std::cell::Cell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use public_forms_core::wrapper_id;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;

#[cfg(target_arch = "wasm32")]
use crate::debug_log;
#[cfg(target_arch = "wasm32")]
use crate::dom::{self, DomClassList};
#[cfg(target_arch = "wasm32")]
use crate::error::BindError;
#[cfg(target_arch = "wasm32")]
use crate::inject::{self, InjectPolicy, plan_injection};
#[cfg(target_arch = "wasm32")]
use crate::transport::FetchTransport;

/// Final state of one submission round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
	pub phase: SubmitPhase,
	/// Response markup to inject; present only on success.
	pub body: Option<String>,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Drives one submission through the wrapper's state classes.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Sending: submit
///     Sending --> Success: 2xx response
///     Sending --> Failure: error or non-2xx
///     Success --> Sending: resubmit
///     Failure --> Sending: resubmit
/// ```
///
/// A failed round-trip leaves the existing content in place so the
/// visitor can correct and resubmit.
pub async fn run_submit<C: ClassOps + ?Sized>(
	transport: &dyn Transport,
	submission: &FormSubmission,
	classes: &mut C,
) -> SubmitOutcome {
	apply_phase(classes, SubmitPhase::Sending);
	match transport.send(submission).await {
		Ok(response) if response.is_success() => {
			apply_phase(classes, SubmitPhase::Success);
			SubmitOutcome {
				phase: SubmitPhase::Success,
				body: Some(response.body),
			}
		}
		Ok(response) => {
			warn_log!("form submission answered with status {}", response.status);
			apply_phase(classes, SubmitPhase::Failure);
			SubmitOutcome {
				phase: SubmitPhase::Failure,
				body: None,
			}
		}
		Err(error) => {
			error_log!("form submission failed: {error}");
			apply_phase(classes, SubmitPhase::Failure);
			SubmitOutcome {
				phase: SubmitPhase::Failure,
				body: None,
			}
		}
	}
}

/// How forms under one wrapper are bound.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct BindOptions {
	pub policy: InjectPolicy,
	pub transport: Rc<dyn Transport>,
}

#[cfg(target_arch = "wasm32")]
impl Default for BindOptions {
	fn default() -> Self {
		Self {
			policy: InjectPolicy::default(),
			transport: Rc::new(FetchTransport),
		}
	}
}

/// Handle to one bound form.
#[cfg(target_arch = "wasm32")]
pub struct FormBinding {
	busy: Rc<Cell<bool>>,
}

#[cfg(target_arch = "wasm32")]
impl FormBinding {
	/// Whether a submission is currently in flight.
	pub fn is_busy(&self) -> bool {
		self.busy.get()
	}
}

/// Binds every form under the container's wrapper element.
///
/// A page without the wrapper is not an error: the block simply is
/// not on it, and no bindings are made.
#[cfg(target_arch = "wasm32")]
pub fn initialize(
	document: &web_sys::Document,
	container_id: &str,
	options: &BindOptions,
) -> Result<Vec<FormBinding>, BindError> {
	let Some(wrapper) = document.get_element_by_id(&wrapper_id(container_id)) else {
		debug_log!("no public form wrapper for container {container_id}");
		return Ok(Vec::new());
	};
	bind_forms_within(&wrapper, options)
}

#[cfg(target_arch = "wasm32")]
fn bind_forms_within(
	wrapper: &web_sys::Element,
	options: &BindOptions,
) -> Result<Vec<FormBinding>, BindError> {
	dom::forms_within(wrapper)
		.iter()
		.map(|form| bind_form(form, wrapper, options))
		.collect()
}

/// Intercepts a form's submit and routes it through the transport.
///
/// Submits arriving while one is in flight are ignored. On success
/// the response markup replaces the wrapper's content under the
/// configured policy and any forms it contains are bound again.
#[cfg(target_arch = "wasm32")]
pub fn bind_form(
	form: &web_sys::HtmlFormElement,
	wrapper: &web_sys::Element,
	options: &BindOptions,
) -> Result<FormBinding, BindError> {
	let busy = Rc::new(Cell::new(false));
	let handler_busy = Rc::clone(&busy);
	let form_element = form.clone();
	let wrapper_element = wrapper.clone();
	let handler_options = options.clone();

	let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
		event.prevent_default();
		if handler_busy.get() {
			debug_log!("submission already in flight; ignoring");
			return;
		}
		handler_busy.set(true);

		let submission = crate::submit::collect(&form_element);
		let busy = Rc::clone(&handler_busy);
		let wrapper = wrapper_element.clone();
		let options = handler_options.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let mut classes = DomClassList::new(wrapper.class_list());
			let outcome = run_submit(options.transport.as_ref(), &submission, &mut classes).await;
			if let Some(body) = outcome.body {
				let plan = plan_injection(options.policy, &body);
				match inject::inject_into(&wrapper, &plan) {
					Ok(()) => {
						if let Err(error) = bind_forms_within(&wrapper, &options) {
							error_log!("re-binding injected forms failed: {error}");
						}
					}
					Err(error) => error_log!("injecting response markup failed: {error}"),
				}
			}
			busy.set(false);
		});
	}) as Box<dyn FnMut(_)>);

	form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
		.map_err(|value| BindError::Listener(format!("{value:?}")))?;
	closure.forget();
	Ok(FormBinding { busy })
}
