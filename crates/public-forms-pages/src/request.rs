//! Request-shaped input for block rendering.
//!
//! Rendering never touches a live connection; the host framework hands
//! over the pieces a block cares about: method, path, query string,
//! form body and the visitor's session.

use std::collections::HashMap;

use http::Method;

/// Visitor session backing the captcha-once bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
	values: HashMap<String, String>,
}

impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.insert(key.into(), value.into());
	}

	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}
}

/// One request as seen by the public form renderers.
///
/// # Examples
///
/// ```
/// use public_forms_pages::request::FormRequest;
///
/// let request = FormRequest::get("/about/?test22_first_col_0_create");
/// assert_eq!(request.path(), "/about/");
/// assert!(request.contains_param("test22_first_col_0_create"));
/// ```
#[derive(Debug, Clone)]
pub struct FormRequest {
	method: Method,
	path: String,
	query: Vec<(String, String)>,
	post: Vec<(String, String)>,
	session: Session,
}

impl FormRequest {
	/// Builds a GET request from a path with an optional query string.
	pub fn get(path_and_query: &str) -> Self {
		let (path, query) = split_query(path_and_query);
		Self {
			method: Method::GET,
			path,
			query,
			post: Vec::new(),
			session: Session::new(),
		}
	}

	/// Builds a POST request carrying a urlencoded form body.
	pub fn post(path_and_query: &str, data: &[(&str, &str)]) -> Self {
		let (path, query) = split_query(path_and_query);
		Self {
			method: Method::POST,
			path,
			query,
			post: data
				.iter()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
			session: Session::new(),
		}
	}

	pub fn with_session(mut self, session: Session) -> Self {
		self.session = session;
		self
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Request path without the query string.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// True when `name` appears in the query string or the form body.
	///
	/// Bare query keys without a value count, which is how ownership
	/// probes such as `?slug_region_0_create` arrive.
	pub fn contains_param(&self, name: &str) -> bool {
		self.query.iter().any(|(key, _)| key == name)
			|| self.post.iter().any(|(key, _)| key == name)
	}

	/// First value submitted under `name`, body taking precedence.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.post
			.iter()
			.chain(self.query.iter())
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Pairs a form binds against: the body for POST, the query
	/// string otherwise.
	pub fn form_data(&self) -> &[(String, String)] {
		if self.method == Method::POST {
			&self.post
		} else {
			&self.query
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn session_mut(&mut self) -> &mut Session {
		&mut self.session
	}
}

fn split_query(path_and_query: &str) -> (String, Vec<(String, String)>) {
	match path_and_query.split_once('?') {
		Some((path, raw)) => {
			let query = serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
				.unwrap_or_default();
			(path.to_string(), query)
		}
		None => (path_and_query.to_string(), Vec::new()),
	}
}
