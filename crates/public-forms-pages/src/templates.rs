//! Embedded templates for block and bootstrap markup.

use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::RenderError;

/// Template wrapping a rendered form in its block wrapper.
pub const CONTENT_TEMPLATE: &str = "content.html";

/// Template emitting the async submission bootstrap script.
pub const AJAX_INIT_TEMPLATE: &str = "forms/ajax_init.html";

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
	let mut tera = Tera::default();
	tera.add_raw_template(CONTENT_TEMPLATE, include_str!("../templates/content.html"))
		.expect("Failed to add content.html template");
	tera.add_raw_template(
		AJAX_INIT_TEMPLATE,
		include_str!("../templates/forms/ajax_init.html"),
	)
	.expect("Failed to add forms/ajax_init.html template");
	tera
});

/// Renders an embedded template with a serializable context.
pub fn render<C: Serialize>(name: &str, context: &C) -> Result<String, RenderError> {
	Ok(TEMPLATES.render(name, &Context::from_serialize(context)?)?)
}
