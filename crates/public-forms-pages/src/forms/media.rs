//! Static assets a rendered form pulls in.

use super::widgets::escape_attribute;

/// Script and stylesheet URLs contributed by form fields.
///
/// The page template decides where the rendered tags land, typically in
/// the document head.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormMedia {
	css: Vec<String>,
	js: Vec<String>,
}

impl FormMedia {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a stylesheet URL, keeping the first occurrence's position.
	pub fn add_css(&mut self, url: impl Into<String>) {
		let url = url.into();
		if !self.css.contains(&url) {
			self.css.push(url);
		}
	}

	/// Adds a script URL, keeping the first occurrence's position.
	pub fn add_js(&mut self, url: impl Into<String>) {
		let url = url.into();
		if !self.js.contains(&url) {
			self.js.push(url);
		}
	}

	/// Merges another media set into this one, deduplicating.
	pub fn extend(&mut self, other: &FormMedia) {
		for url in &other.css {
			self.add_css(url.clone());
		}
		for url in &other.js {
			self.add_js(url.clone());
		}
	}

	pub fn is_empty(&self) -> bool {
		self.css.is_empty() && self.js.is_empty()
	}

	pub fn css_urls(&self) -> &[String] {
		&self.css
	}

	pub fn js_urls(&self) -> &[String] {
		&self.js
	}

	/// `<link>` tags for every stylesheet, one per line.
	pub fn render_css(&self) -> String {
		self.css
			.iter()
			.map(|url| {
				format!(
					r#"<link rel="stylesheet" href="{}" />"#,
					escape_attribute(url)
				)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// `<script src>` tags for every script, one per line.
	pub fn render_js(&self) -> String {
		self.js
			.iter()
			.map(|url| format!(r#"<script src="{}"></script>"#, escape_attribute(url)))
			.collect::<Vec<_>>()
			.join("\n")
	}
}
