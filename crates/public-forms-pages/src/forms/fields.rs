//! Field types carried by public forms.

use serde_json::Value;
use thiserror::Error;

use super::media::FormMedia;
use super::widgets::{TemplateWidget, Widget};
use crate::error::RenderError;
use crate::settings::Settings;

/// Validation failure for a single field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
	#[error("This field is required.")]
	Required,

	#[error("Ensure this value has at most {max} characters (it has {len}).")]
	TooLong { max: usize, len: usize },

	#[error("{0}")]
	Invalid(String),
}

/// One field of a public form.
///
/// Implementations validate a submitted value and render their widget;
/// display-only fields accept anything and contribute markup instead.
pub trait FormField {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str> {
		None
	}

	fn required(&self) -> bool {
		true
	}

	/// Hidden fields render without label or error list.
	fn is_hidden(&self) -> bool {
		false
	}

	fn initial(&self) -> Option<&Value> {
		None
	}

	/// Assets this field needs on the page.
	fn media(&self) -> FormMedia {
		FormMedia::new()
	}

	/// Validates a raw submitted value into its cleaned form.
	fn clean(&self, value: Option<&Value>) -> Result<Value, FieldError>;

	/// Renders the field's widget under its prefixed submission name.
	fn render_widget(&self, html_name: &str, value: Option<&Value>)
	-> Result<String, RenderError>;
}

/// Free-text field backed by a text input.
///
/// # Examples
///
/// ```
/// use public_forms_pages::forms::{CharField, FormField};
///
/// let field = CharField::new("name").with_max_length(80);
/// assert!(field.clean(None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CharField {
	name: String,
	label: Option<String>,
	required: bool,
	max_length: Option<usize>,
	initial: Option<Value>,
	widget: Widget,
}

impl CharField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: true,
			max_length: None,
			initial: None,
			widget: Widget::TextInput,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_initial(mut self, value: impl Into<Value>) -> Self {
		self.initial = Some(value.into());
		self
	}

	pub fn hidden(mut self) -> Self {
		self.widget = Widget::HiddenInput;
		self
	}

	fn text_of(value: Option<&Value>) -> Option<String> {
		match value {
			None | Some(Value::Null) => None,
			Some(Value::String(text)) => Some(text.clone()),
			Some(other) => Some(other.to_string()),
		}
	}
}

impl FormField for CharField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn is_hidden(&self) -> bool {
		self.widget.is_hidden()
	}

	fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&Value>) -> Result<Value, FieldError> {
		let text = Self::text_of(value).unwrap_or_default();
		if text.is_empty() {
			if self.required {
				return Err(FieldError::Required);
			}
			return Ok(Value::String(String::new()));
		}
		if let Some(max) = self.max_length {
			let len = text.chars().count();
			if len > max {
				return Err(FieldError::TooLong { max, len });
			}
		}
		Ok(Value::String(text))
	}

	fn render_widget(
		&self,
		html_name: &str,
		value: Option<&Value>,
	) -> Result<String, RenderError> {
		self.widget.render(html_name, value)
	}
}

/// Display-only field rendering a template in place of an input.
///
/// Never required and never contributes to cleaned data; it exists so a
/// form can interleave arbitrary markup with its real fields.
#[derive(Debug, Clone)]
pub struct TemplateRenderField {
	name: String,
	widget: TemplateWidget,
	media: FormMedia,
}

impl TemplateRenderField {
	pub fn new(name: impl Into<String>, widget: TemplateWidget) -> Self {
		Self {
			name: name.into(),
			widget,
			media: FormMedia::new(),
		}
	}

	pub fn with_media(mut self, media: FormMedia) -> Self {
		self.media = media;
		self
	}
}

impl FormField for TemplateRenderField {
	fn name(&self) -> &str {
		&self.name
	}

	fn required(&self) -> bool {
		false
	}

	fn is_hidden(&self) -> bool {
		true
	}

	fn media(&self) -> FormMedia {
		self.media.clone()
	}

	fn clean(&self, _value: Option<&Value>) -> Result<Value, FieldError> {
		Ok(Value::Null)
	}

	fn render_widget(
		&self,
		html_name: &str,
		value: Option<&Value>,
	) -> Result<String, RenderError> {
		Widget::Template(self.widget.clone()).render(html_name, value)
	}
}

/// Bootstrap field for in-place async submission.
///
/// Renders the module script that binds every form inside the block's
/// wrapper, and carries any extra script URLs the deployment configured
/// as media.
#[derive(Debug, Clone)]
pub struct AjaxInitField {
	inner: TemplateRenderField,
}

impl AjaxInitField {
	pub fn new(container_id: impl Into<String>, settings: &Settings) -> Self {
		let widget = TemplateWidget::new(settings.ajax_init_template.clone())
			.with_context("container_id", container_id.into())
			.with_context("module_url", settings.ajax_module_url.clone());
		let mut media = FormMedia::new();
		for url in &settings.ajax_bootstrap_scripts {
			media.add_js(url.clone());
		}
		Self {
			inner: TemplateRenderField::new("ajax_init", widget).with_media(media),
		}
	}
}

impl FormField for AjaxInitField {
	fn name(&self) -> &str {
		self.inner.name()
	}

	fn required(&self) -> bool {
		false
	}

	fn is_hidden(&self) -> bool {
		true
	}

	fn media(&self) -> FormMedia {
		self.inner.media()
	}

	fn clean(&self, value: Option<&Value>) -> Result<Value, FieldError> {
		self.inner.clean(value)
	}

	fn render_widget(
		&self,
		html_name: &str,
		value: Option<&Value>,
	) -> Result<String, RenderError> {
		self.inner.render_widget(html_name, value)
	}
}
