// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client identity, default metadata and per-post options.
//!
//! A crash report always carries the identity the client was built with plus
//! four free-form metadata fields. Each metadata field is resolved on its own:
//! a non-empty per-post value wins, otherwise the client's default is used.

use crate::error::{CoreError, Result};
use crate::form::FormDataParam;

/// Static identity of the application sending crash reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
	database: String,
	app_name: String,
	app_version: String,
}

impl ClientIdentity {
	/// Validates and creates a new identity.
	///
	/// Fails with the error naming the first empty field, checked in the order
	/// database, appName, appVersion.
	pub fn new(
		database: impl Into<String>,
		app_name: impl Into<String>,
		app_version: impl Into<String>,
	) -> Result<Self> {
		let database = database.into();
		let app_name = app_name.into();
		let app_version = app_version.into();

		if database.is_empty() {
			return Err(CoreError::MissingDatabase);
		}
		if app_name.is_empty() {
			return Err(CoreError::MissingAppName);
		}
		if app_version.is_empty() {
			return Err(CoreError::MissingAppVersion);
		}

		Ok(Self {
			database,
			app_name,
			app_version,
		})
	}

	/// The database (tenant) name, used as the ingestion subdomain.
	pub fn database(&self) -> &str {
		&self.database
	}

	pub fn app_name(&self) -> &str {
		&self.app_name
	}

	pub fn app_version(&self) -> &str {
		&self.app_version
	}
}

/// Metadata defaults held by a client between posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultMetadata {
	pub app_key: String,
	pub description: String,
	pub email: String,
	pub user: String,
}

impl DefaultMetadata {
	/// Merges per-post options over these defaults, field by field.
	///
	/// The defaults themselves are never modified.
	pub fn resolve(&self, options: &PostOptions) -> ResolvedMetadata {
		ResolvedMetadata {
			app_key: pick(options.app_key.as_deref(), &self.app_key),
			user: pick(options.user.as_deref(), &self.user),
			email: pick(options.email.as_deref(), &self.email),
			description: pick(options.description.as_deref(), &self.description),
		}
	}
}

/// Empty overrides count as absent.
fn pick(option: Option<&str>, default: &str) -> String {
	match option {
		Some(value) if !value.is_empty() => value.to_string(),
		_ => default.to_string(),
	}
}

/// The metadata values actually sent with a single post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMetadata {
	pub app_key: String,
	pub user: String,
	pub email: String,
	pub description: String,
}

/// Per-post overrides and extra form fields.
///
/// # Example
///
/// ```
/// use bugsplat_core::{FormDataParam, PostOptions};
///
/// let options = PostOptions::new()
///     .user("fred")
///     .description("crashed on save")
///     .param(FormDataParam::text("build", "nightly"));
/// assert_eq!(options.user.as_deref(), Some("fred"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
	pub app_key: Option<String>,
	pub user: Option<String>,
	pub email: Option<String>,
	pub description: Option<String>,
	pub additional_form_data_params: Vec<FormDataParam>,
}

impl PostOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
		self.app_key = Some(app_key.into());
		self
	}

	pub fn user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	pub fn email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Appends an extra form parameter, sent after the standard fields.
	pub fn param(mut self, param: FormDataParam) -> Self {
		self.additional_form_data_params.push(param);
		self
	}

	pub fn params(mut self, params: impl IntoIterator<Item = FormDataParam>) -> Self {
		self.additional_form_data_params.extend(params);
		self
	}
}
