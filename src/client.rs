//! Browser-side binder for in-place form submission.
//!
//! This module provides access to public-forms-client, the WASM
//! module a page loads to submit form blocks asynchronously. Bound
//! forms post through `fetch`, swap the returned markup into their
//! wrapper and mirror progress as CSS classes on the form element.
//!
//! ## Entry point
//!
//! The compiled module exports a single `initialize` function; the
//! rendered bootstrap script calls it with the block's container id:
//!
//! ```js,ignore
//! import init, { initialize } from "/static/pkg/public_forms_client.js";
//! await init();
//! initialize("guestbook_main_0");
//! ```
//!
//! The submission loop itself ([`run_submit`](crate::client::run_submit))
//! is target-independent and exercised natively through the
//! [`Transport`](crate::client::Transport) seam.

// Re-export all public-forms-client functionality
pub use public_forms_client::*;
