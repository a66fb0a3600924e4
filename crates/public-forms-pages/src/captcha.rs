//! Captcha policy and the challenge field it appends.
//!
//! Deployments choose between challenging on every submission or only
//! until a session has answered correctly once. Individual blocks opt
//! in through their `enable_captcha` toggle.

use serde_json::Value;

use crate::error::RenderError;
use crate::forms::{FieldError, FormField, Widget};
use crate::model::PublicFormBlock;
use crate::request::Session;
use crate::settings::Settings;

/// Session key recording a passed challenge.
pub const CAPTCHA_PASSED_KEY: &str = "public_forms_captcha_passed";

/// How often captcha-enabled blocks challenge a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptchaPolicy {
	/// Never challenge, regardless of block toggles.
	Off,
	/// Challenge until the session passes once.
	Once,
	/// Challenge on every submission.
	Always,
}

impl CaptchaPolicy {
	/// Resolves the deployment policy; `always` wins over `once`.
	pub fn from_settings(settings: &Settings) -> Self {
		if settings.default_enable_captcha_always {
			CaptchaPolicy::Always
		} else if settings.default_enable_captcha_once {
			CaptchaPolicy::Once
		} else {
			CaptchaPolicy::Off
		}
	}
}

/// Whether this request's form must carry the challenge field.
pub fn captcha_required(
	block: &PublicFormBlock,
	settings: &Settings,
	session: &Session,
) -> bool {
	if !block.enable_captcha {
		return false;
	}
	match CaptchaPolicy::from_settings(settings) {
		CaptchaPolicy::Off => false,
		CaptchaPolicy::Always => true,
		CaptchaPolicy::Once => !session.contains(CAPTCHA_PASSED_KEY),
	}
}

/// Records that the session answered a challenge correctly.
pub fn mark_passed(session: &mut Session) {
	session.set(CAPTCHA_PASSED_KEY, "1");
}

/// Challenge field comparing the visitor's answer to the configured
/// one, ignoring case and surrounding whitespace.
#[derive(Debug, Clone)]
pub struct CaptchaField {
	name: String,
	question: String,
	answer: String,
}

impl CaptchaField {
	pub fn from_settings(settings: &Settings) -> Self {
		Self {
			name: settings.captcha_field_name.clone(),
			question: settings.captcha_question.clone(),
			answer: settings.captcha_answer.clone(),
		}
	}
}

impl FormField for CaptchaField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		Some(&self.question)
	}

	fn clean(&self, value: Option<&Value>) -> Result<Value, FieldError> {
		let answer = match value {
			Some(Value::String(text)) => text.trim(),
			_ => "",
		};
		if answer.is_empty() {
			return Err(FieldError::Required);
		}
		if !answer.eq_ignore_ascii_case(self.answer.trim()) {
			return Err(FieldError::Invalid("Wrong answer, try again.".to_string()));
		}
		Ok(Value::String(answer.to_string()))
	}

	fn render_widget(
		&self,
		html_name: &str,
		value: Option<&Value>,
	) -> Result<String, RenderError> {
		Widget::TextInput.render(html_name, value)
	}
}
