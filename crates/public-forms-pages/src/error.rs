use public_forms_core::FormAction;
use thiserror::Error;

/// Errors raised while rendering or finalizing a public form block.
#[derive(Debug, Error)]
pub enum RenderError {
	/// Template rendering failed
	#[error("template rendering failed: {0}")]
	Template(#[from] tera::Error),

	/// The block performs an object-bound action but carries no object id
	#[error("block {block} has no target object for {action}")]
	MissingObjectId { block: String, action: FormAction },

	/// The block references an object the content source no longer has
	#[error("object {id} referenced by block {block} was not found")]
	MissingObject { block: String, id: i64 },

	/// Content source failure
	#[error(transparent)]
	Source(#[from] SourceError),
}

/// Errors raised by a content source.
#[derive(Debug, Error)]
pub enum SourceError {
	/// Lookup, save or delete targeted an id the source does not hold
	#[error("object {id} not found")]
	NotFound { id: i64 },

	/// Backend failure while reading or writing
	#[error("storage failure: {0}")]
	Storage(String),
}
