//! The page content block and the content it operates on.

use std::collections::BTreeMap;

use public_forms_core::{BlockIdentity, FormAction};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::contenttypes::ContentType;
use crate::error::SourceError;
use crate::forms::{CharField, FormField};
use crate::settings::Settings;

/// Target of a form block: a content type plus, for object-bound
/// actions, the id of the object to edit or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRef {
	pub content_type: ContentType,
	pub object_id: Option<i64>,
}

impl ContentRef {
	pub fn new(content_type: ContentType) -> Self {
		Self {
			content_type,
			object_id: None,
		}
	}

	pub fn with_object_id(mut self, object_id: i64) -> Self {
		self.object_id = Some(object_id);
		self
	}
}

/// A placed public form block.
///
/// Placement carries everything the renderers need: where the block
/// sits on the page (its identity), which action it performs and
/// against what content, plus the per-block policy toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicFormBlock {
	pub identity: BlockIdentity,
	pub action: FormAction,
	pub content: ContentRef,
	/// Challenge visitors according to the deployment's captcha policy.
	pub enable_captcha: bool,
	/// Submit in place from the browser instead of a full page load.
	pub enable_ajax: bool,
	/// Whether a valid owner submission performs the action. Disabled
	/// blocks render and validate but never touch content.
	pub success_action: bool,
	/// Redirect target after a performed action. `None` falls back to
	/// the page the block sits on.
	pub success_url: Option<String>,
}

impl PublicFormBlock {
	pub fn new(
		identity: BlockIdentity,
		action: FormAction,
		content: ContentRef,
		settings: &Settings,
	) -> Self {
		Self {
			identity,
			action,
			content,
			enable_captcha: false,
			enable_ajax: settings.default_enable_ajax,
			success_action: true,
			success_url: None,
		}
	}

	pub fn with_captcha(mut self, enable: bool) -> Self {
		self.enable_captcha = enable;
		self
	}

	pub fn with_ajax(mut self, enable: bool) -> Self {
		self.enable_ajax = enable;
		self
	}

	pub fn with_success_action(mut self, enable: bool) -> Self {
		self.success_action = enable;
		self
	}

	pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
		self.success_url = Some(url.into());
		self
	}

	/// DOM id of the wrapper element this block renders into.
	pub fn wrapper_id(&self) -> String {
		self.identity.wrapper_id()
	}
}

/// One stored object, as flat field values.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
	pub id: i64,
	pub data: Map<String, Value>,
}

/// Storage a form block creates, updates and deletes through.
///
/// The host application implements this over its model layer; the
/// bundled [`MemoryContentSource`] backs demos and tests.
pub trait ContentSource {
	fn content_type(&self) -> &ContentType;

	/// Fresh field instances describing the editable surface.
	fn form_fields(&self) -> Vec<Box<dyn FormField>>;

	fn get(&self, id: i64) -> Result<Option<StoredObject>, SourceError>;

	/// Creates (`id == None`) or updates an object from cleaned values.
	fn save(&mut self, id: Option<i64>, data: &Map<String, Value>)
	-> Result<StoredObject, SourceError>;

	fn delete(&mut self, id: i64) -> Result<(), SourceError>;

	/// Canonical URL of an object, when the model has one.
	fn object_url(&self, _object: &StoredObject) -> Option<String> {
		None
	}
}

/// In-memory content source with character fields.
///
/// # Examples
///
/// ```
/// use public_forms_pages::contenttypes::ContentType;
/// use public_forms_pages::forms::CharField;
/// use public_forms_pages::model::{ContentSource, MemoryContentSource};
/// use serde_json::{Map, json};
///
/// let mut source = MemoryContentSource::new(
/// 	ContentType::new("guestbook", "entry"),
/// 	vec![CharField::new("name")],
/// );
/// let mut data = Map::new();
/// data.insert("name".to_string(), json!("Ada"));
/// let object = source.save(None, &data).unwrap();
/// assert_eq!(source.get(object.id).unwrap().unwrap().data["name"], json!("Ada"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryContentSource {
	content_type: ContentType,
	fields: Vec<CharField>,
	objects: BTreeMap<i64, Map<String, Value>>,
	next_id: i64,
	url_base: Option<String>,
}

impl MemoryContentSource {
	pub fn new(content_type: ContentType, fields: Vec<CharField>) -> Self {
		Self {
			content_type,
			fields,
			objects: BTreeMap::new(),
			next_id: 1,
			url_base: None,
		}
	}

	/// Objects get a canonical URL of `{base}{id}/`.
	pub fn with_url_base(mut self, base: impl Into<String>) -> Self {
		self.url_base = Some(base.into());
		self
	}

	/// Seeds an object under a fixed id.
	pub fn insert(&mut self, id: i64, data: Map<String, Value>) {
		self.objects.insert(id, data);
		self.next_id = self.next_id.max(id + 1);
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}
}

impl ContentSource for MemoryContentSource {
	fn content_type(&self) -> &ContentType {
		&self.content_type
	}

	fn form_fields(&self) -> Vec<Box<dyn FormField>> {
		self.fields
			.iter()
			.map(|field| Box::new(field.clone()) as Box<dyn FormField>)
			.collect()
	}

	fn get(&self, id: i64) -> Result<Option<StoredObject>, SourceError> {
		Ok(self.objects.get(&id).map(|data| StoredObject {
			id,
			data: data.clone(),
		}))
	}

	fn save(
		&mut self,
		id: Option<i64>,
		data: &Map<String, Value>,
	) -> Result<StoredObject, SourceError> {
		match id {
			Some(id) => {
				let stored = self
					.objects
					.get_mut(&id)
					.ok_or(SourceError::NotFound { id })?;
				for (key, value) in data {
					stored.insert(key.clone(), value.clone());
				}
				Ok(StoredObject {
					id,
					data: stored.clone(),
				})
			}
			None => {
				let id = self.next_id;
				self.next_id += 1;
				self.objects.insert(id, data.clone());
				Ok(StoredObject {
					id,
					data: data.clone(),
				})
			}
		}
	}

	fn delete(&mut self, id: i64) -> Result<(), SourceError> {
		self.objects
			.remove(&id)
			.map(|_| ())
			.ok_or(SourceError::NotFound { id })
	}

	fn object_url(&self, object: &StoredObject) -> Option<String> {
		self.url_base
			.as_ref()
			.map(|base| format!("{}{}/", base, object.id))
	}
}
