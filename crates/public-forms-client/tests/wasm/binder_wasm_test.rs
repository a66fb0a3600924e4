//! Browser tests for the submit binder.
//!
//! Run with `wasm-pack test --headless --chrome -- --features testing`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;

use public_forms_client::binder::{BindOptions, initialize};
use public_forms_client::dom;
use public_forms_client::error::TransportError;
use public_forms_client::inject::InjectPolicy;
use public_forms_client::submit::{FormSubmission, SubmitMethod};
use public_forms_client::transport::{ScriptedTransport, Transport, TransportResponse};

wasm_bindgen_test_configure!(run_in_browser);

const CONTACT_BLOCK: &str = r#"<div id="contact_public_form"><form method="post" action="/contact/"><input type="text" name="contact-name" value="Ada" /><button type="submit" name="contact_create" value="1">Send</button></form></div>"#;

fn mount(html: &str) -> web_sys::Element {
	let document = dom::document().unwrap();
	let host = document.create_element("div").unwrap();
	host.set_inner_html(html);
	document.body().unwrap().append_child(&host).unwrap();
	host
}

fn unmount(host: &web_sys::Element) {
	host.remove();
}

fn scripted(options_policy: InjectPolicy) -> (Rc<ScriptedTransport>, BindOptions) {
	let transport = Rc::new(ScriptedTransport::new());
	let options = BindOptions {
		policy: options_policy,
		transport: transport.clone(),
	};
	(transport, options)
}

fn dispatch_submit(form: &web_sys::HtmlFormElement) {
	let event = web_sys::Event::new("submit").unwrap();
	form.dispatch_event(&event).unwrap();
}

async fn settle() {
	TimeoutFuture::new(10).await;
}

#[wasm_bindgen_test]
async fn successful_submission_swaps_markup_and_classes() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(200, r#"<form method="post" action="/contact/"><p>Thanks!</p></form>"#);

	let document = dom::document().unwrap();
	let bindings = initialize(&document, "contact", &options).unwrap();
	assert_eq!(bindings.len(), 1);

	let wrapper = document.get_element_by_id("contact_public_form").unwrap();
	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	assert!(wrapper.class_list().contains("ajax-form-success"));
	assert!(!wrapper.class_list().contains("ajax-form-send"));
	assert!(!wrapper.class_list().contains("ajax-form-failure"));
	assert!(wrapper.inner_html().contains("Thanks!"));

	let seen = transport.seen();
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].method, SubmitMethod::Post);
	assert!(seen[0].fields.contains(&("contact-name".to_string(), "Ada".to_string())));
	assert!(seen[0].fields.contains(&("contact_create".to_string(), "1".to_string())));

	unmount(&host);
}

#[wasm_bindgen_test]
async fn missing_wrappers_bind_nothing() {
	let (_, options) = scripted(InjectPolicy::StripScripts);
	let document = dom::document().unwrap();
	let bindings = initialize(&document, "absent", &options).unwrap();
	assert!(bindings.is_empty());
}

#[wasm_bindgen_test]
async fn wrappers_without_forms_bind_nothing() {
	let host = mount(r#"<div id="bare_public_form"><p>nothing to submit</p></div>"#);
	let (_, options) = scripted(InjectPolicy::StripScripts);
	let document = dom::document().unwrap();
	let bindings = initialize(&document, "bare", &options).unwrap();
	assert!(bindings.is_empty());
	unmount(&host);
}

#[wasm_bindgen_test]
async fn every_form_under_the_wrapper_is_bound() {
	let host = mount(
		r#"<div id="multi_public_form"><form action="/a/"></form><section><form action="/b/"></form></section></div>"#,
	);
	let (_, options) = scripted(InjectPolicy::StripScripts);
	let document = dom::document().unwrap();
	let bindings = initialize(&document, "multi", &options).unwrap();
	assert_eq!(bindings.len(), 2);
	unmount(&host);
}

#[wasm_bindgen_test]
async fn failures_keep_the_existing_content() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(500, "<p>server error page</p>");

	let document = dom::document().unwrap();
	initialize(&document, "contact", &options).unwrap();

	let wrapper = document.get_element_by_id("contact_public_form").unwrap();
	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	assert!(wrapper.class_list().contains("ajax-form-failure"));
	assert!(!wrapper.class_list().contains("ajax-form-success"));
	assert!(wrapper.inner_html().contains(r#"name="contact-name""#));
	assert!(!wrapper.inner_html().contains("server error page"));

	unmount(&host);
}

#[wasm_bindgen_test]
async fn a_failed_form_can_be_resubmitted() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.fail_with("connection reset");
	transport.respond_with(200, "<p>second try</p>");

	let document = dom::document().unwrap();
	initialize(&document, "contact", &options).unwrap();
	let wrapper = document.get_element_by_id("contact_public_form").unwrap();
	let form = dom::forms_within(&wrapper)[0].clone();

	dispatch_submit(&form);
	settle().await;
	assert!(wrapper.class_list().contains("ajax-form-failure"));

	dispatch_submit(&form);
	settle().await;
	assert!(wrapper.class_list().contains("ajax-form-success"));
	assert!(!wrapper.class_list().contains("ajax-form-failure"));
	assert!(wrapper.inner_html().contains("second try"));

	unmount(&host);
}

#[wasm_bindgen_test]
async fn injected_forms_are_bound_again() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(
		200,
		r#"<form method="post" action="/contact/"><input type="text" name="contact-name" value="" /><button type="submit" name="contact_create" value="1">Send</button></form>"#,
	);
	transport.respond_with(200, "<p>done</p>");

	let document = dom::document().unwrap();
	initialize(&document, "contact", &options).unwrap();
	let wrapper = document.get_element_by_id("contact_public_form").unwrap();

	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	// The injected replacement form submits through the binder too.
	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	assert_eq!(transport.calls(), 2);
	assert!(wrapper.inner_html().contains("done"));

	unmount(&host);
}

#[wasm_bindgen_test]
async fn scripts_are_stripped_from_responses_by_default() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(200, r#"<p>saved</p><script>window.__pwned = true;</script>"#);

	let document = dom::document().unwrap();
	initialize(&document, "contact", &options).unwrap();
	let wrapper = document.get_element_by_id("contact_public_form").unwrap();

	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	assert!(wrapper.inner_html().contains("saved"));
	assert!(wrapper.query_selector("script").unwrap().is_none());

	unmount(&host);
}

#[wasm_bindgen_test]
async fn opting_in_recreates_script_nodes() {
	let host = mount(CONTACT_BLOCK);
	let (transport, options) = scripted(InjectPolicy::ExecuteScripts);
	transport.respond_with(
		200,
		r#"<p>saved</p><script type="text/javascript">document.title = document.title;</script>"#,
	);

	let document = dom::document().unwrap();
	initialize(&document, "contact", &options).unwrap();
	let wrapper = document.get_element_by_id("contact_public_form").unwrap();

	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	let script = wrapper.query_selector("script").unwrap();
	assert!(script.is_some());
	assert_eq!(
		script.unwrap().get_attribute("type").as_deref(),
		Some("text/javascript")
	);

	unmount(&host);
}

#[wasm_bindgen_test]
async fn get_forms_submit_their_fields_as_a_query() {
	let host = mount(
		r#"<div id="search_public_form"><form method="get" action="/search/"><input type="text" name="q" value="rust" /></form></div>"#,
	);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(200, "<p>results</p>");

	let document = dom::document().unwrap();
	initialize(&document, "search", &options).unwrap();
	let wrapper = document.get_element_by_id("search_public_form").unwrap();

	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	let seen = transport.seen();
	assert_eq!(seen[0].method, SubmitMethod::Get);
	assert_eq!(
		seen[0].fields,
		vec![("q".to_string(), "rust".to_string())]
	);

	unmount(&host);
}

#[wasm_bindgen_test]
async fn unchecked_boxes_and_disabled_fields_stay_home() {
	let host = mount(
		r#"<div id="opts_public_form"><form method="post" action="/opts/"><input type="checkbox" name="subscribe" value="yes" /><input type="checkbox" name="agree" value="yes" checked /><input type="text" name="ignored" value="x" disabled /><input type="text" name="kept" value="y" /></form></div>"#,
	);
	let (transport, options) = scripted(InjectPolicy::StripScripts);
	transport.respond_with(200, "<p>ok</p>");

	let document = dom::document().unwrap();
	initialize(&document, "opts", &options).unwrap();
	let wrapper = document.get_element_by_id("opts_public_form").unwrap();

	dispatch_submit(&dom::forms_within(&wrapper)[0]);
	settle().await;

	let fields = &transport.seen()[0].fields;
	assert!(fields.contains(&("agree".to_string(), "yes".to_string())));
	assert!(fields.contains(&("kept".to_string(), "y".to_string())));
	assert!(!fields.iter().any(|(name, _)| name == "subscribe"));
	assert!(!fields.iter().any(|(name, _)| name == "ignored"));

	unmount(&host);
}

struct PendingTransport {
	calls: Cell<usize>,
}

#[async_trait(?Send)]
impl Transport for PendingTransport {
	async fn send(
		&self,
		_submission: &FormSubmission,
	) -> Result<TransportResponse, TransportError> {
		self.calls.set(self.calls.get() + 1);
		TimeoutFuture::new(30).await;
		Ok(TransportResponse {
			status: 200,
			body: "<p>slow</p>".to_string(),
		})
	}
}

#[wasm_bindgen_test]
async fn overlapping_submissions_are_ignored() {
	let host = mount(CONTACT_BLOCK);
	let transport = Rc::new(PendingTransport {
		calls: Cell::new(0),
	});
	let options = BindOptions {
		policy: InjectPolicy::StripScripts,
		transport: transport.clone(),
	};

	let document = dom::document().unwrap();
	let bindings = initialize(&document, "contact", &options).unwrap();
	let wrapper = document.get_element_by_id("contact_public_form").unwrap();
	let form = dom::forms_within(&wrapper)[0].clone();

	dispatch_submit(&form);
	TimeoutFuture::new(5).await;
	assert!(bindings[0].is_busy());
	assert!(wrapper.class_list().contains("ajax-form-send"));

	// Second submit while the first is still in flight.
	dispatch_submit(&form);
	TimeoutFuture::new(60).await;

	assert_eq!(transport.calls.get(), 1);
	assert!(!bindings[0].is_busy());
	assert!(wrapper.class_list().contains("ajax-form-success"));

	unmount(&host);
}
