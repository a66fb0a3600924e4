//! Content type vocabulary for form targets.
//!
//! A content type names a host-application model as `app_label.model`.
//! Blocks reference their target through a [`ContentType`] so the
//! deployment can exclude sensitive models wholesale.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Identifies a host-application model.
///
/// # Examples
///
/// ```
/// use public_forms_pages::contenttypes::ContentType;
///
/// let ct = ContentType::new("guestbook", "entry");
/// assert_eq!(ct.qualified_name(), "guestbook.entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType {
	pub app_label: String,
	pub model: String,
}

impl ContentType {
	pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			model: model.into(),
		}
	}

	/// Dotted `app_label.model` form used in configuration.
	pub fn qualified_name(&self) -> String {
		format!("{}.{}", self.app_label, self.model)
	}
}

impl std::fmt::Display for ContentType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.app_label, self.model)
	}
}

/// Splits a qualified `app_label.model` name.
///
/// Returns `None` unless both halves are non-empty and exactly one dot
/// separates them.
///
/// # Examples
///
/// ```
/// use public_forms_pages::contenttypes::parse_qualified_name;
///
/// assert_eq!(
/// 	parse_qualified_name("guestbook.entry"),
/// 	Some(("guestbook".to_string(), "entry".to_string()))
/// );
/// assert_eq!(parse_qualified_name("guestbook"), None);
/// assert_eq!(parse_qualified_name("a.b.c"), None);
/// ```
pub fn parse_qualified_name(name: &str) -> Option<(String, String)> {
	let (app_label, model) = name.split_once('.')?;
	if app_label.is_empty() || model.is_empty() || model.contains('.') {
		return None;
	}
	Some((app_label.to_string(), model.to_string()))
}

/// Thread-safe registry of content types offered as form targets.
#[derive(Debug, Default)]
pub struct ContentTypeRegistry {
	entries: RwLock<Vec<ContentType>>,
}

impl ContentTypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `content_type` unless it is already present.
	/// Returns whether an entry was added.
	pub fn register(&self, content_type: ContentType) -> bool {
		let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
		if entries.contains(&content_type) {
			return false;
		}
		entries.push(content_type);
		true
	}

	pub fn contains(&self, content_type: &ContentType) -> bool {
		self.entries
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.contains(content_type)
	}

	/// Looks up a registered entry by its qualified name.
	pub fn get(&self, qualified_name: &str) -> Option<ContentType> {
		let (app_label, model) = parse_qualified_name(qualified_name)?;
		let wanted = ContentType::new(app_label, model);
		self.contains(&wanted).then_some(wanted)
	}

	/// Snapshot of every registered content type, in registration order.
	pub fn all(&self) -> Vec<ContentType> {
		self.entries
			.read()
			.unwrap_or_else(|e| e.into_inner())
			.clone()
	}
}
