//! Splits `<script>` elements out of a markup fragment.
//!
//! The client binder never hands server-returned markup to the DOM with
//! scripts still inside it. [`split_scripts`] separates the two so the
//! injection policy can decide what happens to the script half: drop it
//! (the default) or re-create the nodes explicitly.
//!
//! The scanner is deliberately conservative: anything that looks like a
//! script open tag starts a script region, even inside constructs a full
//! HTML parser would treat differently (comments, attribute values of
//! other elements). Over-stripping is the safe direction here. A script
//! region ends at the first `</script` close tag, as in browsers; an
//! unterminated script swallows the rest of the fragment.

/// One removed `<script>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
	/// `src` attribute, when the script is external.
	pub src: Option<String>,
	/// `type` attribute, e.g. `module`. Absent means classic script.
	pub script_type: Option<String>,
	/// Inline script text between the tags. Empty for external scripts.
	pub body: String,
}

impl ScriptBlock {
	/// True when the element references an external file rather than
	/// carrying inline code.
	pub fn is_external(&self) -> bool {
		self.src.is_some()
	}
}

/// Result of [`split_scripts`]: the fragment with scripts removed, plus
/// the removed scripts in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMarkup {
	pub html: String,
	pub scripts: Vec<ScriptBlock>,
}

impl SplitMarkup {
	pub fn has_scripts(&self) -> bool {
		!self.scripts.is_empty()
	}
}

const OPEN_TAG: &str = "<script";
const CLOSE_TAG: &str = "</script";

/// Removes every `<script>` element from `markup`, returning the remaining
/// fragment and the removed scripts in order.
///
/// Runs to a fixpoint: removing a script can join the surrounding text
/// into a new open tag (`<scri` + `pt>`), so the pass repeats until the
/// fragment holds no script open tag at all.
///
/// # Examples
///
/// ```
/// use public_forms_core::sanitize::split_scripts;
///
/// let split = split_scripts("<p>done</p><script>alert(1)</script>");
/// assert_eq!(split.html, "<p>done</p>");
/// assert_eq!(split.scripts[0].body, "alert(1)");
/// ```
pub fn split_scripts(markup: &str) -> SplitMarkup {
	let mut split = strip_pass(markup);
	while find_script_open(&split.html, 0).is_some() {
		let again = strip_pass(&split.html);
		split.html = again.html;
		split.scripts.extend(again.scripts);
	}
	split
}

fn strip_pass(markup: &str) -> SplitMarkup {
	let mut html = String::with_capacity(markup.len());
	let mut scripts = Vec::new();
	let mut cursor = 0;

	while let Some(start) = find_script_open(markup, cursor) {
		html.push_str(&markup[cursor..start]);

		let attrs_start = start + OPEN_TAG.len();
		let Some(tag_end) = find_tag_end(markup, attrs_start) else {
			// Truncated open tag: drop the tail rather than emit half a tag.
			scripts.push(script_block(&markup[attrs_start..], ""));
			cursor = markup.len();
			break;
		};

		let attrs = &markup[attrs_start..tag_end];
		let body_start = tag_end + 1;
		match find_ascii_ci(markup, CLOSE_TAG, body_start) {
			Some(close) => {
				scripts.push(script_block(attrs, &markup[body_start..close]));
				let after_close = close + CLOSE_TAG.len();
				cursor = match markup[after_close..].find('>') {
					Some(gt) => after_close + gt + 1,
					None => markup.len(),
				};
			}
			None => {
				scripts.push(script_block(attrs, &markup[body_start..]));
				cursor = markup.len();
			}
		}
	}

	html.push_str(&markup[cursor..]);
	SplitMarkup { html, scripts }
}

fn script_block(attrs: &str, body: &str) -> ScriptBlock {
	let mut src = None;
	let mut script_type = None;
	for (name, value) in parse_attributes(attrs) {
		match name.as_str() {
			"src" if src.is_none() => src = Some(value),
			"type" if script_type.is_none() => script_type = Some(value),
			_ => {}
		}
	}
	ScriptBlock {
		src,
		script_type,
		body: body.to_string(),
	}
}

/// Finds the next `<script` whose tag name actually ends there, so
/// elements like `<scripts>` pass through untouched.
fn find_script_open(markup: &str, from: usize) -> Option<usize> {
	let mut search = from;
	while let Some(at) = find_ascii_ci(markup, OPEN_TAG, search) {
		let boundary = at + OPEN_TAG.len();
		match markup.as_bytes().get(boundary) {
			None => return Some(at),
			Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
			Some(_) => search = at + 1,
		}
	}
	None
}

fn find_ascii_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
	let hay = haystack.as_bytes();
	let ndl = needle.as_bytes();
	if from > hay.len() || hay.len() - from < ndl.len() {
		return None;
	}
	(from..=hay.len() - ndl.len()).find(|&i| hay[i..i + ndl.len()].eq_ignore_ascii_case(ndl))
}

/// Position of the `>` closing an open tag, skipping quoted attribute
/// values so `data-x="a>b"` does not end the tag early.
fn find_tag_end(markup: &str, from: usize) -> Option<usize> {
	let bytes = markup.as_bytes();
	let mut quote: Option<u8> = None;
	let mut i = from;
	while i < bytes.len() {
		let b = bytes[i];
		match quote {
			Some(q) => {
				if b == q {
					quote = None;
				}
			}
			None => match b {
				b'"' | b'\'' => quote = Some(b),
				b'>' => return Some(i),
				_ => {}
			},
		}
		i += 1;
	}
	None
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
	let bytes = raw.as_bytes();
	let mut attrs = Vec::new();
	let mut i = 0;
	while i < bytes.len() {
		while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
			i += 1;
		}
		if i >= bytes.len() {
			break;
		}
		let name_start = i;
		while i < bytes.len()
			&& !bytes[i].is_ascii_whitespace()
			&& bytes[i] != b'='
			&& bytes[i] != b'/'
		{
			i += 1;
		}
		let name = raw[name_start..i].to_ascii_lowercase();
		while i < bytes.len() && bytes[i].is_ascii_whitespace() {
			i += 1;
		}
		let mut value = String::new();
		if i < bytes.len() && bytes[i] == b'=' {
			i += 1;
			while i < bytes.len() && bytes[i].is_ascii_whitespace() {
				i += 1;
			}
			if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
				let q = bytes[i];
				i += 1;
				let value_start = i;
				while i < bytes.len() && bytes[i] != q {
					i += 1;
				}
				value = raw[value_start..i].to_string();
				if i < bytes.len() {
					i += 1;
				}
			} else {
				let value_start = i;
				while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
					i += 1;
				}
				value = raw[value_start..i].to_string();
			}
		}
		if !name.is_empty() {
			attrs.push((name, value));
		}
	}
	attrs
}
