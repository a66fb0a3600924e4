//! Server-side page extension: blocks, rendering and finalization.
//!
//! This module provides access to public-forms-pages, the extension a
//! page host mounts to let visitors create, update and delete content
//! through forms placed into page regions.
//!
//! ## Lifecycle
//!
//! - **Render**: every block on a page renders its form; the block
//!   owning the current request binds submitted data and reports
//!   validation errors in place
//! - **Finalize**: after all blocks rendered, the owning block saves
//!   (or deletes) and answers with a redirect to its success URL
//!
//! ## Example
//!
//! ```rust,ignore
//! use public_forms::prelude::*;
//!
//! let view = renderer_for(block, Settings::from_env());
//! let rendered = view.render(&request, &source)?;
//! if let Some(redirect) = view.finalize(&mut request, &mut source)? {
//!     return Ok(redirect.into_response());
//! }
//! ```

// Re-export all public-forms-pages functionality
pub use public_forms_pages::*;
