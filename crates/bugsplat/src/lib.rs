// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash reporting client for posting Rust errors to BugSplat.
//!
//! A post sends one multipart form to `https://{database}.bugsplat.com/post/js/`
//! and classifies the answer into a [`BugSplatResponse`].
//!
//! # Quick Start
//!
//! ```ignore
//! use bugsplat::{BugSplat, ErrorInput, PostOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut bugsplat = BugSplat::new("fred", "my-rust-crasher", env!("CARGO_PKG_VERSION"))?;
//!     bugsplat.set_default_app_key("production");
//!     bugsplat.set_default_email("fred@bedrock.com");
//!
//!     if let Err(e) = risky_operation() {
//!         let log = bugsplat::file_param("app.log").await?;
//!         let result = bugsplat
//!             .post(ErrorInput::from_error(&e), PostOptions::new().param(log))
//!             .await?;
//!
//!         if let Some(error) = result.error() {
//!             eprintln!("crash was not recorded: {error}");
//!         }
//!     }
//!     Ok(())
//! }
//!
//! fn risky_operation() -> Result<(), std::io::Error> {
//!     Ok(())
//! }
//! ```
//!
//! # Results
//!
//! Only transport failures and invalid client identity are `Err`. Every HTTP
//! response is returned as data:
//!
//! - `400` → [`PostError::BadRequest`]
//! - `429` → [`PostError::RateLimited`]
//! - any other non-2xx → [`PostError::Unknown`]
//! - 2xx with a malformed body → [`PostError::InvalidResponse`]
//! - 2xx with a valid body → [`BugSplatResponse::Success`]

mod attachment;
mod client;
mod config;
mod error;
mod response;
mod transport;

pub use attachment::{file_param, file_param_with_key};
pub use client::{BugSplat, BugSplatBuilder};
pub use config::{ClientConfig, EnvConfig, ENV_APP_NAME, ENV_APP_VERSION, ENV_BASE_URL, ENV_DATABASE};
pub use error::{BugSplatSdkError, Result};
pub use response::{classify_response, BugSplatResponse, PostError};
pub use transport::{ReqwestTransport, Transport, TransportResponse};

// Re-export core types for convenience
pub use bugsplat_core::{
	create_standardized_call_stack, try_parse_response_json, validate_response_body, BinaryValue,
	ClientIdentity, CoreError, CrashForm, DefaultMetadata, ErrorDetails, ErrorInput,
	FormDataParam, FormValue, PostOptions, ResponseBody, ResponseStatus,
};
