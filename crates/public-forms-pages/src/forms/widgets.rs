//! Widgets turn a field value into markup.

use serde_json::{Map, Value};

use crate::error::RenderError;
use crate::templates;

/// Escapes a string for safe interpolation into HTML.
///
/// # Examples
///
/// ```
/// use public_forms_pages::forms::escape_attribute;
///
/// assert_eq!(
/// 	escape_attribute(r#"<b>"quoted"</b>"#),
/// 	"&lt;b&gt;&quot;quoted&quot;&lt;/b&gt;"
/// );
/// ```
pub fn escape_attribute(value: &str) -> String {
	value
		.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

/// Renders a value through a named template with extra context.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateWidget {
	template: String,
	context: Map<String, Value>,
}

impl TemplateWidget {
	pub fn new(template: impl Into<String>) -> Self {
		Self {
			template: template.into(),
			context: Map::new(),
		}
	}

	pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.context.insert(key.into(), value.into());
		self
	}

	fn render(&self, html_name: &str, value: Option<&Value>) -> Result<String, RenderError> {
		let mut context = self.context.clone();
		context.insert("html_name".to_string(), Value::String(html_name.to_string()));
		context.insert(
			"value".to_string(),
			value.cloned().unwrap_or(Value::Null),
		);
		templates::render(&self.template, &context)
	}
}

/// Markup strategy of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
	TextInput,
	HiddenInput,
	Template(TemplateWidget),
}

impl Widget {
	/// Whether the rendered markup should skip label and error output.
	pub fn is_hidden(&self) -> bool {
		matches!(self, Widget::HiddenInput | Widget::Template(_))
	}

	pub fn render(&self, html_name: &str, value: Option<&Value>) -> Result<String, RenderError> {
		match self {
			Widget::TextInput => Ok(input_tag("text", html_name, value)),
			Widget::HiddenInput => Ok(input_tag("hidden", html_name, value)),
			Widget::Template(widget) => widget.render(html_name, value),
		}
	}
}

fn input_tag(input_type: &str, html_name: &str, value: Option<&Value>) -> String {
	format!(
		r#"<input type="{}" name="{}" value="{}" />"#,
		input_type,
		escape_attribute(html_name),
		escape_attribute(&value_text(value))
	)
}

fn value_text(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(text)) => text.clone(),
		Some(other) => other.to_string(),
	}
}
