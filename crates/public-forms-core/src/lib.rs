//! Shared vocabulary for the public forms stack.
//!
//! Target-independent types used by both the server-side page extension
//! (`public-forms-pages`) and the browser binder (`public-forms-client`):
//! the submit lifecycle and its CSS classes, the naming scheme that ties a
//! placed block to its rendered markup, and the markup splitter behind the
//! client's injection policy.
//!
//! Nothing in this crate touches the DOM or performs I/O, so every rule in
//! it is testable on the native target.

pub mod naming;
pub mod sanitize;
pub mod state;

pub use naming::{BlockIdentity, FormAction, WRAPPER_ID_SUFFIX, prefixed_field_name, wrapper_id};
pub use sanitize::{ScriptBlock, SplitMarkup, split_scripts};
pub use state::{
	CLASS_FAILURE, CLASS_SEND, CLASS_SUCCESS, ClassOps, ClassSet, STATE_CLASSES, SubmitPhase,
	apply_phase,
};
