// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! BugSplat client for posting crash reports.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bugsplat_core::{
	create_standardized_call_stack, ClientIdentity, CrashForm, DefaultMetadata, ErrorInput,
	PostOptions,
};
use tracing::{debug, error, info, warn};

use crate::config::{ClientConfig, EnvConfig};
use crate::error::Result;
use crate::response::{classify_response, BugSplatResponse};
use crate::transport::{ReqwestTransport, Transport};

/// Path of the JavaScript-style crash ingestion endpoint.
const POST_PATH: &str = "/post/js/";

/// Builder for constructing a [`BugSplat`] client.
pub struct BugSplatBuilder {
	database: Option<String>,
	app_name: Option<String>,
	app_version: Option<String>,
	base_url: Option<String>,
	config: ClientConfig,
	transport: Option<Arc<dyn Transport>>,
}

impl BugSplatBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			database: None,
			app_name: None,
			app_version: None,
			base_url: None,
			config: ClientConfig::default(),
			transport: None,
		}
	}

	/// Creates a builder pre-populated from `BUGSPLAT_*` environment
	/// variables. Setters called afterwards take precedence.
	pub fn from_env() -> Self {
		Self::new().with_env_config(EnvConfig::from_env())
	}

	fn with_env_config(mut self, env: EnvConfig) -> Self {
		self.database = env.database;
		self.app_name = env.app_name;
		self.app_version = env.app_version;
		self.base_url = env.base_url;
		self
	}

	/// Sets the database name. It selects the ingestion subdomain.
	pub fn database(mut self, database: impl Into<String>) -> Self {
		self.database = Some(database.into());
		self
	}

	pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
		self.app_name = Some(app_name.into());
		self
	}

	pub fn app_version(mut self, app_version: impl Into<String>) -> Self {
		self.app_version = Some(app_version.into());
		self
	}

	/// Overrides `https://{database}.bugsplat.com` as the server root.
	///
	/// Example: `http://127.0.0.1:8080`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	/// Sets the HTTP request timeout of the built-in transport.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = timeout;
		self
	}

	/// Replaces the built-in reqwest transport.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Builds the client.
	///
	/// Fails if the database, app name or app version is missing or empty.
	pub fn build(self) -> Result<BugSplat> {
		let identity = ClientIdentity::new(
			self.database.unwrap_or_default(),
			self.app_name.unwrap_or_default(),
			self.app_version.unwrap_or_default(),
		)?;

		let endpoint = endpoint_url(identity.database(), self.base_url.as_deref());

		let transport: Arc<dyn Transport> = match self.transport {
			Some(transport) => transport,
			None => Arc::new(ReqwestTransport::new(self.config.request_timeout)?),
		};

		info!(
			database = %identity.database(),
			app_name = %identity.app_name(),
			endpoint = %endpoint,
			"BugSplat client initialized"
		);

		Ok(BugSplat {
			identity,
			defaults: DefaultMetadata::default(),
			endpoint,
			transport,
		})
	}
}

impl Default for BugSplatBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn endpoint_url(database: &str, base_url: Option<&str>) -> String {
	match base_url {
		Some(base_url) => format!("{}{}", base_url.trim_end_matches('/'), POST_PATH),
		None => format!("https://{}.bugsplat.com{}", database, POST_PATH),
	}
}

/// Client for posting crash reports to BugSplat.
///
/// # Example
///
/// ```ignore
/// use bugsplat::{BugSplat, ErrorInput, PostOptions};
///
/// let mut bugsplat = BugSplat::new("fred", "my-rust-crasher", "1.0.0")?;
/// bugsplat.set_default_user("fred");
///
/// let result = bugsplat
///     .post("Something went wrong", PostOptions::new().description("on save"))
///     .await?;
///
/// match result.error() {
///     None => println!("crash id {}", result.response().unwrap().crash_id),
///     Some(error) => eprintln!("{error}"),
/// }
/// ```
#[derive(Clone)]
pub struct BugSplat {
	identity: ClientIdentity,
	defaults: DefaultMetadata,
	endpoint: String,
	transport: Arc<dyn Transport>,
}

impl BugSplat {
	/// Creates a client using the built-in HTTP transport.
	pub fn new(
		database: impl Into<String>,
		app_name: impl Into<String>,
		app_version: impl Into<String>,
	) -> Result<Self> {
		BugSplatBuilder::new()
			.database(database)
			.app_name(app_name)
			.app_version(app_version)
			.build()
	}

	/// Creates a new builder for constructing a client.
	pub fn builder() -> BugSplatBuilder {
		BugSplatBuilder::new()
	}

	pub fn identity(&self) -> &ClientIdentity {
		&self.identity
	}

	/// The URL crash reports are posted to.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn defaults(&self) -> &DefaultMetadata {
		&self.defaults
	}

	/// Sets the default `appKey`, used when a post does not provide one.
	pub fn set_default_app_key(&mut self, app_key: impl Into<String>) {
		self.defaults.app_key = app_key.into();
	}

	/// Sets the default `description`, used when a post does not provide one.
	pub fn set_default_description(&mut self, description: impl Into<String>) {
		self.defaults.description = description.into();
	}

	/// Sets the default `email`, used when a post does not provide one.
	pub fn set_default_email(&mut self, email: impl Into<String>) {
		self.defaults.email = email.into();
	}

	/// Sets the default `user`, used when a post does not provide one.
	pub fn set_default_user(&mut self, user: impl Into<String>) {
		self.defaults.user = user.into();
	}

	/// Posts a crash report and classifies the server's answer.
	///
	/// Returns `Err` only when no response was received. Every response,
	/// including 4xx and 5xx statuses, is returned as a [`BugSplatResponse`];
	/// check [`BugSplatResponse::error`] to tell success from failure.
	/// Nothing is retried, including rate-limited posts.
	pub async fn post(
		&self,
		error: impl Into<ErrorInput>,
		options: PostOptions,
	) -> Result<BugSplatResponse> {
		let original = error.into();
		let form = self.build_form(&original, options);

		info!(error = %original, url = %self.endpoint, "Posting crash to BugSplat");

		let reply = self.transport.post(&self.endpoint, form).await?;
		let json = reply.json();

		debug!(status = reply.status, body = %json, "BugSplat POST response");

		let result = classify_response(reply.status, json, original);
		match &result {
			BugSplatResponse::Success { response, .. } => {
				info!(crash_id = %response.crash_id, "Crash posted to BugSplat");
			}
			BugSplatResponse::Failure { error, .. } => {
				warn!(status = reply.status, error = %error, "Crash post was not accepted");
			}
		}

		Ok(result)
	}

	/// Posts a crash report, logs the outcome, then exits the process with
	/// status 1.
	pub async fn post_and_exit(&self, error: impl Into<ErrorInput>, options: PostOptions) {
		match self.post(error, options).await {
			Ok(result) => match result.error() {
				None => info!("Crash posted, exiting"),
				Some(post_error) => error!(error = %post_error, "Crash post failed, exiting"),
			},
			Err(e) => error!(error = %e, "Crash post failed, exiting"),
		}

		std::process::exit(1);
	}

	/// Builds the multipart body: identity, resolved metadata and call stack,
	/// followed by the caller's extra parameters in order.
	///
	/// Reads the defaults once, before any await point in [`Self::post`].
	fn build_form(&self, original: &ErrorInput, options: PostOptions) -> CrashForm {
		let metadata = self.defaults.resolve(&options);
		let callstack = create_standardized_call_stack(original);

		let mut form = CrashForm::new();
		form.append_text("database", self.identity.database());
		form.append_text("appName", self.identity.app_name());
		form.append_text("appVersion", self.identity.app_version());
		form.append_text("appKey", metadata.app_key);
		form.append_text("user", metadata.user);
		form.append_text("email", metadata.email);
		form.append_text("description", metadata.description);
		form.append_text("callstack", callstack);

		for param in options.additional_form_data_params {
			form.append(param);
		}

		form
	}
}

impl fmt::Debug for BugSplat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BugSplat")
			.field("identity", &self.identity)
			.field("defaults", &self.defaults)
			.field("endpoint", &self.endpoint)
			.finish_non_exhaustive()
	}
}
