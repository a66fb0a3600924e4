//! Naming contract between placed blocks, rendered markup, and the binder.
//!
//! A block is addressed by where it sits on a page: `{page_slug}_{region}_
//! {ordering}`. That prefix namespaces its form data, names its submit
//! control, and (suffixed with [`WRAPPER_ID_SUFFIX`]) forms the wrapper id
//! the client binder looks up. Server and client must agree on every one
//! of these, which is why they live here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to a container id to form the binder wrapper's id.
pub const WRAPPER_ID_SUFFIX: &str = "_public_form";

/// Wrapper element id for a container id.
///
/// # Examples
///
/// ```
/// use public_forms_core::naming::wrapper_id;
///
/// assert_eq!(wrapper_id("contact"), "contact_public_form");
/// ```
pub fn wrapper_id(container_id: &str) -> String {
	format!("{}{}", container_id, WRAPPER_ID_SUFFIX)
}

/// Joins a form prefix onto a field name.
///
/// An empty prefix leaves the name untouched; otherwise the two are joined
/// with `-`, matching how bound fields are named in rendered markup.
///
/// # Examples
///
/// ```
/// use public_forms_core::naming::prefixed_field_name;
///
/// assert_eq!(prefixed_field_name("home_main_0", "email"), "home_main_0-email");
/// assert_eq!(prefixed_field_name("", "email"), "email");
/// ```
pub fn prefixed_field_name(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{}-{}", prefix, name)
	}
}

/// Action a public form block performs on its target object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormAction {
	Create,
	Update,
	Delete,
}

impl FormAction {
	pub const ALL: [FormAction; 3] = [FormAction::Create, FormAction::Update, FormAction::Delete];

	/// Submit-name suffix identifying this action.
	pub fn suffix(&self) -> &'static str {
		match self {
			FormAction::Create => "_create",
			FormAction::Update => "_update",
			FormAction::Delete => "_delete",
		}
	}

	/// Inverse of [`FormAction::suffix`].
	///
	/// # Examples
	///
	/// ```
	/// use public_forms_core::naming::FormAction;
	///
	/// assert_eq!(FormAction::from_suffix("_update"), Some(FormAction::Update));
	/// assert_eq!(FormAction::from_suffix("update"), None);
	/// ```
	pub fn from_suffix(suffix: &str) -> Option<FormAction> {
		FormAction::ALL
			.into_iter()
			.find(|action| action.suffix() == suffix)
	}
}

impl fmt::Display for FormAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			FormAction::Create => "create",
			FormAction::Update => "update",
			FormAction::Delete => "delete",
		};
		write!(f, "{}", name)
	}
}

/// Where a block sits on a page: the triple every name derives from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockIdentity {
	pub page_slug: String,
	pub region: String,
	pub ordering: u32,
}

impl BlockIdentity {
	pub fn new(page_slug: impl Into<String>, region: impl Into<String>, ordering: u32) -> Self {
		Self {
			page_slug: page_slug.into(),
			region: region.into(),
			ordering,
		}
	}

	/// Prefix namespacing this block's form data.
	///
	/// # Examples
	///
	/// ```
	/// use public_forms_core::naming::BlockIdentity;
	///
	/// let identity = BlockIdentity::new("test22", "first_col", 0);
	/// assert_eq!(identity.formdata_prefix(), "test22_first_col_0");
	/// ```
	pub fn formdata_prefix(&self) -> String {
		format!("{}_{}_{}", self.page_slug, self.region, self.ordering)
	}

	/// Name of the submit control that marks a request as owned by this
	/// block for `action`.
	///
	/// # Examples
	///
	/// ```
	/// use public_forms_core::naming::{BlockIdentity, FormAction};
	///
	/// let identity = BlockIdentity::new("test22", "first_col", 0);
	/// assert_eq!(identity.submit_name(FormAction::Create), "test22_first_col_0_create");
	/// ```
	pub fn submit_name(&self, action: FormAction) -> String {
		format!("{}{}", self.formdata_prefix(), action.suffix())
	}

	/// Wrapper id this block renders and the client binder resolves.
	pub fn wrapper_id(&self) -> String {
		wrapper_id(&self.formdata_prefix())
	}
}

impl fmt::Display for BlockIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.formdata_prefix())
	}
}
