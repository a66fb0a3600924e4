//! Server-side half of public forms: page content blocks that let
//! site visitors create, update and delete content objects.
//!
//! A block is placed into a page region with an ordering, which fixes
//! its identity and thereby every name it renders: the wrapper element
//! id, the per-field submission prefix and the submit control marking
//! request ownership. Several blocks coexist on one page because each
//! only ever binds requests carrying its own submit name.
//!
//! Rendering happens in two passes. `render` produces each block's
//! wrapper markup for the current request; `finalize` then gives the
//! owning block the chance to perform its action and answer with a
//! redirect.

pub mod captcha;
pub mod contenttypes;
pub mod error;
pub mod forms;
pub mod model;
pub mod registry;
pub mod renderers;
pub mod request;
pub mod settings;
pub mod templates;

pub use captcha::{CaptchaField, CaptchaPolicy, captcha_required};
pub use contenttypes::{ContentType, ContentTypeRegistry, parse_qualified_name};
pub use error::{RenderError, SourceError};
pub use forms::{
	AjaxInitField, CharField, FieldError, FormField, FormMedia, PublicForm,
	TemplateRenderField,
};
pub use model::{ContentRef, ContentSource, MemoryContentSource, PublicFormBlock, StoredObject};
pub use registry::{HostConfig, check_host, register_target};
pub use renderers::{
	CreateFormView, DeleteFormView, PublicFormView, Redirect, RenderedBlock,
	UpdateFormView, renderer_for,
};
pub use request::{FormRequest, Session};
pub use settings::Settings;
