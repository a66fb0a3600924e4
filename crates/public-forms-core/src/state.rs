//! Submit lifecycle of a bound form, expressed as wrapper CSS classes.
//!
//! The wrapper element carries at most one of the three state classes at
//! any time; consuming stylesheets key their pending/success/failure
//! treatments off them. [`apply_phase`] is the only mutation path and is
//! what upholds that exclusivity.

use serde::{Deserialize, Serialize};

/// Class present while a request is in flight.
pub const CLASS_SEND: &str = "ajax-form-send";
/// Class present after the last request completed with a success status.
pub const CLASS_SUCCESS: &str = "ajax-form-success";
/// Class present after the last request failed (error status or transport).
pub const CLASS_FAILURE: &str = "ajax-form-failure";

/// Every state class a wrapper can carry.
pub const STATE_CLASSES: [&str; 3] = [CLASS_SEND, CLASS_SUCCESS, CLASS_FAILURE];

/// Lifecycle phase of a bound form's wrapper.
///
/// `Idle` is the initial phase and carries no class; the other three map
/// one-to-one onto [`STATE_CLASSES`]. A wrapper returns to `Sending` on
/// every resubmit, so `Success` and `Failure` are not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
	Idle,
	Sending,
	Success,
	Failure,
}

impl SubmitPhase {
	/// The CSS class announcing this phase, if any.
	///
	/// # Examples
	///
	/// ```
	/// use public_forms_core::state::SubmitPhase;
	///
	/// assert_eq!(SubmitPhase::Sending.class(), Some("ajax-form-send"));
	/// assert_eq!(SubmitPhase::Idle.class(), None);
	/// ```
	pub fn class(&self) -> Option<&'static str> {
		match self {
			SubmitPhase::Idle => None,
			SubmitPhase::Sending => Some(CLASS_SEND),
			SubmitPhase::Success => Some(CLASS_SUCCESS),
			SubmitPhase::Failure => Some(CLASS_FAILURE),
		}
	}
}

/// Minimal class-list surface [`apply_phase`] mutates.
///
/// The browser implementation wraps `DomTokenList`; [`ClassSet`] is the
/// plain-collection implementation used on the native target and in tests.
pub trait ClassOps {
	fn add_class(&mut self, class: &str);
	fn remove_class(&mut self, class: &str);
	fn has_class(&self, class: &str) -> bool;
}

/// Moves `classes` into `phase`: every other state class is removed before
/// the phase's own class is added, so observers never see two state
/// classes at once. Classes outside [`STATE_CLASSES`] are untouched.
///
/// # Examples
///
/// ```
/// use public_forms_core::state::{ClassOps, ClassSet, SubmitPhase, apply_phase};
///
/// let mut classes = ClassSet::new();
/// apply_phase(&mut classes, SubmitPhase::Sending);
/// assert!(classes.has_class("ajax-form-send"));
///
/// apply_phase(&mut classes, SubmitPhase::Success);
/// assert!(!classes.has_class("ajax-form-send"));
/// assert!(classes.has_class("ajax-form-success"));
/// ```
pub fn apply_phase<C: ClassOps + ?Sized>(classes: &mut C, phase: SubmitPhase) {
	let keep = phase.class();
	for class in STATE_CLASSES {
		if Some(class) != keep {
			classes.remove_class(class);
		}
	}
	if let Some(class) = keep {
		classes.add_class(class);
	}
}

/// Set-backed [`ClassOps`] implementation.
///
/// Stands in for a DOM `classList` wherever no document exists: renderer
/// tests on the server and the binder's native unit tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
	classes: std::collections::BTreeSet<String>,
}

impl ClassSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current classes joined the way a `class` attribute would render them.
	pub fn as_attribute(&self) -> String {
		let mut out = String::new();
		for class in &self.classes {
			if !out.is_empty() {
				out.push(' ');
			}
			out.push_str(class);
		}
		out
	}

	/// How many of [`STATE_CLASSES`] are currently present.
	pub fn state_class_count(&self) -> usize {
		STATE_CLASSES
			.iter()
			.filter(|class| self.classes.contains(**class))
			.count()
	}
}

impl ClassOps for ClassSet {
	fn add_class(&mut self, class: &str) {
		self.classes.insert(class.to_string());
	}

	fn remove_class(&mut self, class: &str) {
		self.classes.remove(class);
	}

	fn has_class(&self, class: &str) -> bool {
		self.classes.contains(class)
	}
}
