//! Public forms: page content blocks that site visitors can submit.
//!
//! A block placed into a page region renders a create, update or
//! delete form for a content object. Visitors submit it like any
//! other form; blocks with async submission enabled bind themselves in
//! the browser and swap their markup in place instead of navigating.
//!
//! The workspace splits along the network boundary:
//!
//! - `public-forms-core`: naming, submission state and markup
//!   splitting shared by both sides
//! - `public-forms-pages` (feature `pages`, native only): the page
//!   extension rendering and finalizing blocks on the server
//! - `public-forms-client` (feature `client`): the WASM binder that
//!   drives in-place submission
//!
//! ## Quick Example
//!
//! Rendering and finalizing a guestbook block on the server:
//!
//! ```
//! use public_forms::pages::contenttypes::ContentType;
//! use public_forms::pages::forms::CharField;
//! use public_forms::pages::model::{ContentRef, MemoryContentSource, PublicFormBlock};
//! use public_forms::pages::renderers::renderer_for;
//! use public_forms::pages::request::FormRequest;
//! use public_forms::pages::settings::Settings;
//! use public_forms::{BlockIdentity, FormAction};
//!
//! let settings = Settings::default();
//! let block = PublicFormBlock::new(
//! 	BlockIdentity::new("guestbook", "main", 0),
//! 	FormAction::Create,
//! 	ContentRef::new(ContentType::new("guestbook", "entry")),
//! 	&settings,
//! );
//! let view = renderer_for(block, settings);
//! let mut source = MemoryContentSource::new(
//! 	ContentType::new("guestbook", "entry"),
//! 	vec![CharField::new("name")],
//! );
//!
//! let rendered = view.render(&FormRequest::get("/guestbook/"), &source).unwrap();
//! assert!(rendered.html.contains("guestbook_main_0_public_form"));
//!
//! let mut request = FormRequest::post(
//! 	"/guestbook/",
//! 	&[("guestbook_main_0_create", "1"), ("guestbook_main_0-name", "Ada")],
//! );
//! let redirect = view.finalize(&mut request, &mut source).unwrap().unwrap();
//! assert_eq!(redirect.location, "/guestbook/");
//! ```

// Shared vocabulary is always available.
pub use public_forms_core::{
	BlockIdentity, CLASS_FAILURE, CLASS_SEND, CLASS_SUCCESS, ClassOps, ClassSet,
	FormAction, STATE_CLASSES, ScriptBlock, SplitMarkup, SubmitPhase,
	WRAPPER_ID_SUFFIX, apply_phase, prefixed_field_name, split_scripts, wrapper_id,
};

#[cfg(all(feature = "pages", not(target_arch = "wasm32")))]
pub mod pages;

#[cfg(feature = "client")]
pub mod client;

pub mod prelude {
	pub use crate::{BlockIdentity, FormAction, SubmitPhase, wrapper_id};

	#[cfg(all(feature = "pages", not(target_arch = "wasm32")))]
	pub use crate::pages::{
		ContentRef, ContentSource, ContentType, FormRequest, MemoryContentSource,
		PublicFormBlock, PublicFormView, Session, Settings, renderer_for,
	};

	#[cfg(feature = "client")]
	pub use crate::client::{InjectPolicy, Transport, plan_injection, run_submit};
}
