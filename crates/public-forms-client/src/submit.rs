//! Turning a form into a submission the transport can carry.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// HTTP method of a form, parsed from its `method` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
	Get,
	Post,
}

impl SubmitMethod {
	/// Forms submit with GET unless the attribute says `post`.
	pub fn from_attr(attr: &str) -> Self {
		if attr.eq_ignore_ascii_case("post") {
			SubmitMethod::Post
		} else {
			SubmitMethod::Get
		}
	}
}

/// One captured submission: where to send which fields, how.
///
/// # Examples
///
/// ```
/// use public_forms_client::submit::{FormSubmission, SubmitMethod};
///
/// let submission = FormSubmission::new(
/// 	SubmitMethod::Get,
/// 	"/contact/".to_string(),
/// 	vec![("contact-name".to_string(), "Ada Lovelace".to_string())],
/// );
/// assert_eq!(
/// 	submission.url_with_query().unwrap(),
/// 	"/contact/?contact-name=Ada+Lovelace"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
	pub method: SubmitMethod,
	pub url: String,
	pub fields: Vec<(String, String)>,
}

impl FormSubmission {
	pub fn new(method: SubmitMethod, url: String, fields: Vec<(String, String)>) -> Self {
		Self {
			method,
			url,
			fields,
		}
	}

	/// Fields as an `application/x-www-form-urlencoded` body.
	pub fn encoded_body(&self) -> Result<String, serde_urlencoded::ser::Error> {
		serde_urlencoded::to_string(&self.fields)
	}

	/// URL with the fields appended to the query string, for GET
	/// submissions.
	pub fn url_with_query(&self) -> Result<String, serde_urlencoded::ser::Error> {
		let query = self.encoded_body()?;
		if query.is_empty() {
			return Ok(self.url.clone());
		}
		let separator = if self.url.contains('?') { '&' } else { '?' };
		Ok(format!("{}{}{}", self.url, separator, query))
	}
}

/// Captures a form's current values the way a browser submit would.
///
/// Walks the form controls in document order: text-like inputs always
/// contribute, checkboxes and radios only when checked, and buttons,
/// file pickers and disabled controls never do. The first named submit
/// control is appended last so the server can tell whose submission
/// this is.
#[cfg(target_arch = "wasm32")]
pub fn collect(form: &web_sys::HtmlFormElement) -> FormSubmission {
	let mut fields = Vec::new();
	let mut submit_control: Option<(String, String)> = None;
	let elements = form.elements();
	for index in 0..elements.length() {
		let Some(element) = elements.item(index) else {
			continue;
		};
		if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
			if input.disabled() || input.name().is_empty() {
				continue;
			}
			match input.type_().to_ascii_lowercase().as_str() {
				"checkbox" | "radio" => {
					if input.checked() {
						fields.push((input.name(), input.value()));
					}
				}
				"submit" => {
					if submit_control.is_none() {
						submit_control = Some((input.name(), input.value()));
					}
				}
				"button" | "reset" | "file" | "image" => {}
				_ => fields.push((input.name(), input.value())),
			}
		} else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
			if !area.disabled() && !area.name().is_empty() {
				fields.push((area.name(), area.value()));
			}
		} else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
			if !select.disabled() && !select.name().is_empty() {
				fields.push((select.name(), select.value()));
			}
		} else if let Some(button) = element.dyn_ref::<web_sys::HtmlButtonElement>() {
			if button.disabled() || button.name().is_empty() {
				continue;
			}
			if button.type_().eq_ignore_ascii_case("submit") && submit_control.is_none() {
				submit_control = Some((button.name(), button.value()));
			}
		}
	}
	if let Some(pair) = submit_control {
		fields.push(pair);
	}
	FormSubmission::new(SubmitMethod::from_attr(&form.method()), form.action(), fields)
}
