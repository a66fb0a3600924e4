//! Deployment-wide configuration for public form blocks.
//!
//! Every knob has a default; a deployment overrides individual values
//! through `PUBLIC_FORMS_*` environment variables without restating the
//! rest. [`Settings::global`] reads the environment once and caches the
//! result for the lifetime of the process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Environment variable prefix recognized by [`Settings::from_env`].
pub const ENV_PREFIX: &str = "PUBLIC_FORMS_";

static GLOBAL: Lazy<Settings> = Lazy::new(Settings::from_env);

/// Configuration of the public forms extension.
///
/// # Examples
///
/// ```
/// use public_forms_pages::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.captcha_field_name, "captcha");
/// assert!(!settings.default_enable_ajax);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	/// Qualified content type names (`app.model`) that must not be
	/// offered as form targets.
	pub exclude_content_types: Vec<String>,
	/// Middleware names the host application must run.
	pub required_middlewares: Vec<String>,
	/// Application names the host application must enable.
	pub required_applications: Vec<String>,
	/// Field name under which the captcha answer is submitted.
	pub captcha_field_name: String,
	/// Challenge shown as the captcha field label.
	pub captcha_question: String,
	/// Expected captcha answer, compared case-insensitively.
	pub captcha_answer: String,
	/// Captcha-enabled blocks stop challenging a session once it has
	/// answered correctly.
	pub default_enable_captcha_once: bool,
	/// Captcha-enabled blocks challenge on every submission.
	pub default_enable_captcha_always: bool,
	/// Whether new blocks ship with in-place async submission.
	pub default_enable_ajax: bool,
	/// Template rendering the async submission bootstrap.
	pub ajax_init_template: String,
	/// URL of the compiled browser module loaded by the bootstrap.
	pub ajax_module_url: String,
	/// Additional script URLs emitted as form media on async blocks.
	pub ajax_bootstrap_scripts: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			exclude_content_types: Vec::new(),
			required_middlewares: vec!["sessions".to_string()],
			required_applications: vec!["pages".to_string()],
			captcha_field_name: "captcha".to_string(),
			captcha_question: "What is two plus two?".to_string(),
			captcha_answer: "4".to_string(),
			default_enable_captcha_once: true,
			default_enable_captcha_always: false,
			default_enable_ajax: false,
			ajax_init_template: "forms/ajax_init.html".to_string(),
			ajax_module_url: "/static/pkg/public_forms_client.js".to_string(),
			ajax_bootstrap_scripts: Vec::new(),
		}
	}
}

impl Settings {
	/// Process-wide settings, read from the environment on first use.
	pub fn global() -> &'static Settings {
		&GLOBAL
	}

	/// Builds settings from defaults overlaid with `PUBLIC_FORMS_*`
	/// environment variables.
	///
	/// List values are comma separated; boolean values accept
	/// `1/0`, `true/false`, `yes/no` and `on/off`. An unparsable value
	/// is logged and the default kept.
	pub fn from_env() -> Self {
		let mut settings = Self::default();
		overlay_list(&mut settings.exclude_content_types, "EXCLUDE_CONTENT_TYPES");
		overlay_list(&mut settings.required_middlewares, "REQUIRED_MIDDLEWARES");
		overlay_list(&mut settings.required_applications, "REQUIRED_APPLICATIONS");
		overlay_string(&mut settings.captcha_field_name, "CAPTCHA_FIELD_NAME");
		overlay_string(&mut settings.captcha_question, "CAPTCHA_QUESTION");
		overlay_string(&mut settings.captcha_answer, "CAPTCHA_ANSWER");
		overlay_bool(
			&mut settings.default_enable_captcha_once,
			"DEFAULT_ENABLE_CAPTCHA_ONCE",
		);
		overlay_bool(
			&mut settings.default_enable_captcha_always,
			"DEFAULT_ENABLE_CAPTCHA_ALWAYS",
		);
		overlay_bool(&mut settings.default_enable_ajax, "DEFAULT_ENABLE_AJAX");
		overlay_string(&mut settings.ajax_init_template, "AJAX_INIT_TEMPLATE");
		overlay_string(&mut settings.ajax_module_url, "AJAX_MODULE_URL");
		overlay_list(&mut settings.ajax_bootstrap_scripts, "AJAX_BOOTSTRAP_SCRIPTS");
		settings
	}
}

fn env_value(key: &str) -> Option<String> {
	std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn overlay_string(target: &mut String, key: &str) {
	if let Some(value) = env_value(key) {
		*target = value;
	}
}

fn overlay_list(target: &mut Vec<String>, key: &str) {
	if let Some(value) = env_value(key) {
		*target = value
			.split(',')
			.map(str::trim)
			.filter(|item| !item.is_empty())
			.map(str::to_string)
			.collect();
	}
}

fn overlay_bool(target: &mut bool, key: &str) {
	let Some(value) = env_value(key) else {
		return;
	};
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => *target = true,
		"0" | "false" | "no" | "off" => *target = false,
		other => {
			tracing::warn!(
				key = %format!("{ENV_PREFIX}{key}"),
				value = %other,
				"ignoring unparsable boolean setting"
			);
		}
	}
}
