//! Thin DOM helpers shared by the binder.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use crate::error::BindError;

/// The page document, or the reason there is none.
#[cfg(target_arch = "wasm32")]
pub fn document() -> Result<web_sys::Document, BindError> {
	web_sys::window()
		.ok_or(BindError::NoWindow)?
		.document()
		.ok_or(BindError::NoDocument)
}

/// Every form element under `wrapper`, in document order.
#[cfg(target_arch = "wasm32")]
pub fn forms_within(wrapper: &web_sys::Element) -> Vec<web_sys::HtmlFormElement> {
	let collection = wrapper.get_elements_by_tag_name("form");
	(0..collection.length())
		.filter_map(|index| collection.item(index))
		.filter_map(|element| element.dyn_into::<web_sys::HtmlFormElement>().ok())
		.collect()
}

/// Class membership operations over a live `DOMTokenList`, which is
/// how the binder reports submission state on the wrapper element.
#[cfg(target_arch = "wasm32")]
pub struct DomClassList {
	list: web_sys::DomTokenList,
}

#[cfg(target_arch = "wasm32")]
impl DomClassList {
	pub fn new(list: web_sys::DomTokenList) -> Self {
		Self { list }
	}
}

#[cfg(target_arch = "wasm32")]
impl public_forms_core::ClassOps for DomClassList {
	fn add_class(&mut self, class: &str) {
		let _ = self.list.add_1(class);
	}

	fn remove_class(&mut self, class: &str) {
		let _ = self.list.remove_1(class);
	}

	fn has_class(&self, class: &str) -> bool {
		self.list.contains(class)
	}
}
