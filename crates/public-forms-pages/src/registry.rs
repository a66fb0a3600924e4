//! Wiring the extension into a host application.

use crate::contenttypes::{ContentType, ContentTypeRegistry};
use crate::settings::Settings;

/// What the host application has enabled, for configuration checks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
	pub middlewares: Vec<String>,
	pub applications: Vec<String>,
}

impl HostConfig {
	pub fn new(
		middlewares: impl IntoIterator<Item = impl Into<String>>,
		applications: impl IntoIterator<Item = impl Into<String>>,
	) -> Self {
		Self {
			middlewares: middlewares.into_iter().map(Into::into).collect(),
			applications: applications.into_iter().map(Into::into).collect(),
		}
	}
}

/// Registers a content type as a public form target.
///
/// Types excluded by the deployment are skipped. Returns whether the
/// registry gained an entry.
pub fn register_target(
	registry: &ContentTypeRegistry,
	content_type: ContentType,
	settings: &Settings,
) -> bool {
	let qualified = content_type.qualified_name();
	if settings.exclude_content_types.contains(&qualified) {
		tracing::debug!(content_type = %qualified, "content type excluded from public forms");
		return false;
	}
	registry.register(content_type)
}

/// Checks the host application for the pieces public forms rely on.
///
/// Missing entries are logged as warnings, never errors: rendering
/// still works without them, only session-backed behavior degrades.
/// Returns the number of warnings raised.
pub fn check_host(host: &HostConfig, settings: &Settings) -> usize {
	let mut warnings = 0;
	for middleware in &settings.required_middlewares {
		if !host.middlewares.contains(middleware) {
			warnings += 1;
			tracing::warn!(
				middleware = %middleware,
				"public forms expect this middleware to be enabled"
			);
		}
	}
	for application in &settings.required_applications {
		if !host.applications.contains(application) {
			warnings += 1;
			tracing::warn!(
				application = %application,
				"public forms expect this application to be enabled"
			);
		}
	}
	warnings
}
