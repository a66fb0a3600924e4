//! Auditable injection of server markup into the block wrapper.
//!
//! Injected responses never execute scripts behind the page's back.
//! The default policy drops every script block and logs how many were
//! dropped; deployments that trust their own responses opt into
//! re-execution explicitly, and even then scripts run as fresh nodes
//! created through the DOM rather than as a side effect of assignment.

use public_forms_core::{ScriptBlock, split_scripts};

#[cfg(target_arch = "wasm32")]
use crate::error::BindError;
#[cfg(target_arch = "wasm32")]
use crate::warn_log;

/// What to do with script blocks found in injected markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InjectPolicy {
	/// Drop scripts from the markup and log the count.
	#[default]
	StripScripts,
	/// Re-create each script as a fresh node so the browser runs it.
	ExecuteScripts,
}

/// Outcome of applying a policy to response markup.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectionPlan {
	/// Markup with every script tag removed.
	pub html: String,
	/// Scripts to re-create after the markup lands.
	pub scripts: Vec<ScriptBlock>,
	/// Scripts the policy dropped.
	pub dropped: usize,
}

/// Splits markup into inert HTML and the scripts the policy allows.
///
/// # Examples
///
/// ```
/// use public_forms_client::inject::{InjectPolicy, plan_injection};
///
/// let plan = plan_injection(InjectPolicy::StripScripts, "<p>ok</p><script>x()</script>");
/// assert_eq!(plan.html, "<p>ok</p>");
/// assert!(plan.scripts.is_empty());
/// assert_eq!(plan.dropped, 1);
/// ```
pub fn plan_injection(policy: InjectPolicy, markup: &str) -> InjectionPlan {
	let split = split_scripts(markup);
	match policy {
		InjectPolicy::StripScripts => InjectionPlan {
			html: split.html,
			dropped: split.scripts.len(),
			scripts: Vec::new(),
		},
		InjectPolicy::ExecuteScripts => InjectionPlan {
			html: split.html,
			dropped: 0,
			scripts: split.scripts,
		},
	}
}

/// Replaces the wrapper's content with the planned markup, then
/// re-creates the allowed scripts so the browser executes them.
#[cfg(target_arch = "wasm32")]
pub fn inject_into(wrapper: &web_sys::Element, plan: &InjectionPlan) -> Result<(), BindError> {
	wrapper.set_inner_html(&plan.html);
	if plan.dropped > 0 {
		warn_log!("dropped {} script block(s) from injected markup", plan.dropped);
	}
	let Some(document) = wrapper.owner_document() else {
		return Err(BindError::NoDocument);
	};
	for script in &plan.scripts {
		let element = document
			.create_element("script")
			.map_err(js_inject_error)?;
		if let Some(script_type) = &script.script_type {
			element
				.set_attribute("type", script_type)
				.map_err(js_inject_error)?;
		}
		if let Some(src) = &script.src {
			element.set_attribute("src", src).map_err(js_inject_error)?;
		} else {
			element.set_text_content(Some(&script.body));
		}
		wrapper.append_child(&element).map_err(js_inject_error)?;
	}
	Ok(())
}

#[cfg(target_arch = "wasm32")]
fn js_inject_error(value: wasm_bindgen::JsValue) -> BindError {
	BindError::Inject(format!("{value:?}"))
}
