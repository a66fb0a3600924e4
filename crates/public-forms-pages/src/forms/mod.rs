//! Form construction, binding and rendering for public form blocks.
//!
//! A [`PublicForm`] carries the fields a content source exposes plus
//! whatever policy fields the renderer appends. Submitted names are
//! prefixed with the owning block's formdata prefix so several blocks
//! can coexist on one page without clashing.

mod fields;
mod media;
mod widgets;

use std::collections::HashMap;

use public_forms_core::prefixed_field_name;
use serde_json::Value;

use crate::error::RenderError;

pub use fields::{AjaxInitField, CharField, FieldError, FormField, TemplateRenderField};
pub use media::FormMedia;
pub use widgets::{TemplateWidget, Widget, escape_attribute};

/// Key under which form-wide errors are collected.
pub const ALL_FIELDS_KEY: &str = "_all";

/// A bindable, renderable form owned by one block.
///
/// A form with no fields is valid as soon as it is bound, which is
/// exactly what a delete confirmation needs.
pub struct PublicForm {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, Value>,
	initial: HashMap<String, Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	prefix: String,
	submit_name: String,
}

impl PublicForm {
	pub fn new(prefix: impl Into<String>, submit_name: impl Into<String>) -> Self {
		Self {
			fields: Vec::new(),
			data: HashMap::new(),
			initial: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			prefix: prefix.into(),
			submit_name: submit_name.into(),
		}
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	pub fn has_field(&self, name: &str) -> bool {
		self.fields.iter().any(|field| field.name() == name)
	}

	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|field| field.name()).collect()
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Name of the submit control marking ownership of a request.
	pub fn submit_name(&self) -> &str {
		&self.submit_name
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	/// Pre-fills unbound rendering, keyed by plain field name.
	pub fn set_initial(&mut self, initial: HashMap<String, Value>) {
		self.initial = initial;
	}

	/// Binds data keyed by plain field name.
	pub fn bind(&mut self, data: HashMap<String, Value>) {
		self.data = data;
		self.is_bound = true;
	}

	/// Binds submitted pairs, resolving each field through its
	/// prefixed submission name. Unmatched pairs are ignored.
	pub fn bind_pairs(&mut self, pairs: &[(String, String)]) {
		let mut data = HashMap::new();
		for field in &self.fields {
			let html_name = prefixed_field_name(&self.prefix, field.name());
			if let Some((_, value)) = pairs.iter().find(|(name, _)| *name == html_name) {
				data.insert(field.name().to_string(), Value::String(value.clone()));
			}
		}
		self.bind(data);
	}

	/// Validates every field. An unbound form is never valid.
	///
	/// On success the raw data is replaced by cleaned values; on
	/// failure the raw data is kept so the form re-renders what the
	/// visitor typed.
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}
		self.errors.clear();
		let mut cleaned = HashMap::new();
		for field in &self.fields {
			match field.clean(self.data.get(field.name())) {
				Ok(value) => {
					cleaned.insert(field.name().to_string(), value);
				}
				Err(error) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(error.to_string());
				}
			}
		}
		if self.errors.is_empty() {
			self.data = cleaned;
			true
		} else {
			false
		}
	}

	/// Cleaned values after a successful [`is_valid`](Self::is_valid).
	pub fn cleaned_data(&self) -> &HashMap<String, Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	/// Records an error, under [`ALL_FIELDS_KEY`] for form-wide ones.
	pub fn add_error(&mut self, field_name: &str, message: impl Into<String>) {
		self.errors
			.entry(field_name.to_string())
			.or_default()
			.push(message.into());
	}

	/// Combined media of every field, first occurrence winning.
	pub fn media(&self) -> FormMedia {
		let mut media = FormMedia::new();
		for field in &self.fields {
			media.extend(&field.media());
		}
		media
	}

	/// Renders fields and the submit control, without the `<form>` tag.
	pub fn as_html(&self) -> Result<String, RenderError> {
		let mut out = String::new();
		if let Some(messages) = self.errors.get(ALL_FIELDS_KEY) {
			out.push_str(&error_list(messages));
			out.push('\n');
		}
		for field in &self.fields {
			let html_name = prefixed_field_name(&self.prefix, field.name());
			let value = self.display_value(field.as_ref());
			let widget = field.render_widget(&html_name, value)?;
			if field.is_hidden() {
				out.push_str(&widget);
				out.push('\n');
				continue;
			}
			out.push_str("<p><label>");
			out.push_str(&escape_attribute(&self.label_text(field.as_ref())));
			out.push_str("</label>");
			if let Some(messages) = self.errors.get(field.name()) {
				out.push_str(&error_list(messages));
			}
			out.push_str(&widget);
			out.push_str("</p>\n");
		}
		out.push_str(&format!(
			r#"<button type="submit" name="{}" value="1">Submit</button>"#,
			escape_attribute(&self.submit_name)
		));
		Ok(out)
	}

	fn display_value<'a>(&'a self, field: &'a dyn FormField) -> Option<&'a Value> {
		if self.is_bound {
			self.data.get(field.name())
		} else {
			self.initial.get(field.name()).or_else(|| field.initial())
		}
	}

	fn label_text(&self, field: &dyn FormField) -> String {
		match field.label() {
			Some(label) => label.to_string(),
			None => {
				let spaced = field.name().replace('_', " ");
				let mut chars = spaced.chars();
				match chars.next() {
					Some(first) => first.to_uppercase().chain(chars).collect(),
					None => spaced,
				}
			}
		}
	}
}

fn error_list(messages: &[String]) -> String {
	let items = messages
		.iter()
		.map(|message| format!("<li>{}</li>", escape_attribute(message)))
		.collect::<String>();
	format!(r#"<ul class="errorlist">{items}</ul>"#)
}
