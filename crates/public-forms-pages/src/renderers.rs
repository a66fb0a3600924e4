//! Block renderers for the create, update and delete actions.
//!
//! Every block on a page renders on every request, so a renderer must
//! decide whose submission it is looking at before binding anything.
//! Ownership hangs on the block's submit name: the rendered submit
//! control carries it, and a request naming it in its query string or
//! body belongs to that block. All other blocks render fresh, unbound
//! forms for the same request.

use std::collections::HashSet;

use public_forms_core::FormAction;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::captcha::{self, CaptchaField};
use crate::error::RenderError;
use crate::forms::{AjaxInitField, FormField, FormMedia, PublicForm};
use crate::model::{ContentSource, PublicFormBlock, StoredObject};
use crate::request::FormRequest;
use crate::settings::Settings;
use crate::templates::{self, CONTENT_TEMPLATE};

/// A rendered block: wrapper markup plus the media to place in the
/// document head.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
	pub wrapper_id: String,
	pub html: String,
	pub media: FormMedia,
}

/// Where to send the visitor after a performed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
	pub location: String,
}

#[derive(Serialize)]
struct ContentContext {
	wrapper_id: String,
	form_method: &'static str,
	form_action: String,
	form_body: String,
}

/// Lifecycle shared by the three block renderers.
///
/// `render` produces the block's markup for any request; `finalize`
/// runs after all blocks rendered and performs the action when the
/// request's owner submitted a valid form.
pub trait PublicFormView {
	fn action(&self) -> FormAction;
	fn block(&self) -> &PublicFormBlock;
	fn settings(&self) -> &Settings;

	/// Submission-name prefix of every field in this block's form.
	fn formdata_prefix(&self) -> String {
		self.block().identity.formdata_prefix()
	}

	/// Name of the submit control identifying this block's requests.
	fn submit_name(&self) -> String {
		self.block().identity.submit_name(self.action())
	}

	/// Whether the request carries this block's submit name, in the
	/// query string or the body.
	fn is_request_owner(&self, request: &FormRequest) -> bool {
		request.contains_param(&self.submit_name())
	}

	/// Object this block operates on. Object-bound actions fail when
	/// the block has no id or the id no longer resolves.
	fn resolve_object(
		&self,
		source: &dyn ContentSource,
	) -> Result<Option<StoredObject>, RenderError> {
		let block = self.block();
		match block.content.object_id {
			Some(id) => match source.get(id)? {
				Some(object) => Ok(Some(object)),
				None => Err(RenderError::MissingObject {
					block: block.identity.to_string(),
					id,
				}),
			},
			None => Err(RenderError::MissingObjectId {
				block: block.identity.to_string(),
				action: self.action(),
			}),
		}
	}

	/// Content fields of this action's form, before policy fields.
	fn base_fields(&self, source: &dyn ContentSource) -> Vec<Box<dyn FormField>> {
		source.form_fields()
	}

	/// Pre-fill for unbound rendering.
	fn initial_data(
		&self,
		_source: &dyn ContentSource,
	) -> Result<Option<Map<String, Value>>, RenderError> {
		Ok(None)
	}

	/// Builds this block's form for the request, appending the async
	/// bootstrap and captcha fields the block's policy asks for.
	fn build_form(
		&self,
		request: &FormRequest,
		source: &dyn ContentSource,
	) -> Result<PublicForm, RenderError> {
		let mut form = PublicForm::new(self.formdata_prefix(), self.submit_name());
		for field in self.base_fields(source) {
			form.add_field(field);
		}
		if self.block().enable_ajax {
			form.add_field(Box::new(AjaxInitField::new(
				self.formdata_prefix(),
				self.settings(),
			)));
		}
		if captcha::captcha_required(self.block(), self.settings(), request.session()) {
			form.add_field(Box::new(CaptchaField::from_settings(self.settings())));
		}
		Ok(form)
	}

	/// Renders the block's wrapper for this request.
	///
	/// The owner's POST binds and validates so typed values and errors
	/// re-render in place; every other request gets an unbound form.
	fn render(
		&self,
		request: &FormRequest,
		source: &dyn ContentSource,
	) -> Result<RenderedBlock, RenderError> {
		let mut form = self.build_form(request, source)?;
		let owner_post =
			self.is_request_owner(request) && request.method() == http::Method::POST;
		if owner_post {
			form.bind_pairs(request.form_data());
			form.is_valid();
		} else if let Some(initial) = self.initial_data(source)? {
			form.set_initial(initial.into_iter().collect());
		}
		tracing::debug!(
			block = %self.block().identity,
			action = %self.action(),
			owner = owner_post,
			"rendering public form block"
		);

		let wrapper_id = self.block().wrapper_id();
		let media = form.media();
		let html = templates::render(
			CONTENT_TEMPLATE,
			&ContentContext {
				wrapper_id: wrapper_id.clone(),
				form_method: "post",
				form_action: request.path().to_string(),
				form_body: form.as_html()?,
			},
		)?;
		Ok(RenderedBlock {
			wrapper_id,
			html,
			media,
		})
	}

	/// Performs the action against the content source. Returns the
	/// touched object when one survives the action.
	fn perform(
		&self,
		source: &mut dyn ContentSource,
		form: &PublicForm,
	) -> Result<Option<StoredObject>, RenderError>;

	/// Runs the action for a valid owner POST.
	///
	/// Returns the redirect to follow when the action was performed,
	/// `None` when this request was not an acting submission.
	fn finalize(
		&self,
		request: &mut FormRequest,
		source: &mut dyn ContentSource,
	) -> Result<Option<Redirect>, RenderError> {
		if !self.block().success_action
			|| !self.is_request_owner(request)
			|| request.method() != http::Method::POST
		{
			return Ok(None);
		}
		let mut form = self.build_form(request, source)?;
		form.bind_pairs(request.form_data());
		if !form.is_valid() {
			tracing::debug!(
				block = %self.block().identity,
				action = %self.action(),
				"owner submission failed validation"
			);
			return Ok(None);
		}
		if form.has_field(&self.settings().captcha_field_name) {
			captcha::mark_passed(request.session_mut());
		}
		let object = self.perform(source, &form)?;
		tracing::info!(
			block = %self.block().identity,
			action = %self.action(),
			object_id = object.as_ref().map(|o| o.id),
			"public form action performed"
		);
		Ok(Some(Redirect {
			location: self.success_url(request, source, object.as_ref()),
		}))
	}

	/// Redirect target after a performed action: the block's
	/// configured URL, falling back to the page itself, then to the
	/// object's canonical URL.
	fn success_url(
		&self,
		request: &FormRequest,
		source: &dyn ContentSource,
		object: Option<&StoredObject>,
	) -> String {
		let configured = self
			.block()
			.success_url
			.clone()
			.unwrap_or_else(|| request.path().to_string());
		if !configured.is_empty() {
			return configured;
		}
		object
			.and_then(|object| source.object_url(object))
			.unwrap_or_else(|| "/".to_string())
	}

	/// Cleaned values that belong to the content source's own fields.
	fn save_data(&self, source: &dyn ContentSource, form: &PublicForm) -> Map<String, Value> {
		let content_fields: HashSet<String> = self
			.base_fields(source)
			.iter()
			.map(|field| field.name().to_string())
			.collect();
		form.cleaned_data()
			.iter()
			.filter(|(name, value)| content_fields.contains(*name) && !value.is_null())
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}
}

/// Renders a form creating a new object.
#[derive(Debug, Clone)]
pub struct CreateFormView {
	block: PublicFormBlock,
	settings: Settings,
}

impl CreateFormView {
	pub fn new(block: PublicFormBlock, settings: Settings) -> Self {
		Self { block, settings }
	}
}

impl PublicFormView for CreateFormView {
	fn action(&self) -> FormAction {
		FormAction::Create
	}

	fn block(&self) -> &PublicFormBlock {
		&self.block
	}

	fn settings(&self) -> &Settings {
		&self.settings
	}

	// There is nothing to edit yet.
	fn resolve_object(
		&self,
		_source: &dyn ContentSource,
	) -> Result<Option<StoredObject>, RenderError> {
		Ok(None)
	}

	fn perform(
		&self,
		source: &mut dyn ContentSource,
		form: &PublicForm,
	) -> Result<Option<StoredObject>, RenderError> {
		let data = self.save_data(source, form);
		Ok(Some(source.save(None, &data)?))
	}
}

/// Renders a form editing an existing object.
#[derive(Debug, Clone)]
pub struct UpdateFormView {
	block: PublicFormBlock,
	settings: Settings,
}

impl UpdateFormView {
	pub fn new(block: PublicFormBlock, settings: Settings) -> Self {
		Self { block, settings }
	}
}

impl PublicFormView for UpdateFormView {
	fn action(&self) -> FormAction {
		FormAction::Update
	}

	fn block(&self) -> &PublicFormBlock {
		&self.block
	}

	fn settings(&self) -> &Settings {
		&self.settings
	}

	fn initial_data(
		&self,
		source: &dyn ContentSource,
	) -> Result<Option<Map<String, Value>>, RenderError> {
		Ok(self.resolve_object(source)?.map(|object| object.data))
	}

	fn perform(
		&self,
		source: &mut dyn ContentSource,
		form: &PublicForm,
	) -> Result<Option<StoredObject>, RenderError> {
		let object = self.resolve_object(source)?;
		let id = object.map(|object| object.id);
		let data = self.save_data(source, form);
		Ok(Some(source.save(id, &data)?))
	}
}

/// Renders a delete confirmation for an existing object.
///
/// The confirmation form has no content fields, so it is valid as soon
/// as the owner submits it.
#[derive(Debug, Clone)]
pub struct DeleteFormView {
	block: PublicFormBlock,
	settings: Settings,
}

impl DeleteFormView {
	pub fn new(block: PublicFormBlock, settings: Settings) -> Self {
		Self { block, settings }
	}
}

impl PublicFormView for DeleteFormView {
	fn action(&self) -> FormAction {
		FormAction::Delete
	}

	fn block(&self) -> &PublicFormBlock {
		&self.block
	}

	fn settings(&self) -> &Settings {
		&self.settings
	}

	fn base_fields(&self, _source: &dyn ContentSource) -> Vec<Box<dyn FormField>> {
		Vec::new()
	}

	fn perform(
		&self,
		source: &mut dyn ContentSource,
		_form: &PublicForm,
	) -> Result<Option<StoredObject>, RenderError> {
		let object = self
			.resolve_object(source)?
			.ok_or_else(|| RenderError::MissingObjectId {
				block: self.block.identity.to_string(),
				action: FormAction::Delete,
			})?;
		source.delete(object.id)?;
		Ok(None)
	}
}

/// Builds the renderer matching a block's action.
pub fn renderer_for(block: PublicFormBlock, settings: Settings) -> Box<dyn PublicFormView> {
	match block.action {
		FormAction::Create => Box::new(CreateFormView::new(block, settings)),
		FormAction::Update => Box::new(UpdateFormView::new(block, settings)),
		FormAction::Delete => Box::new(DeleteFormView::new(block, settings)),
	}
}
