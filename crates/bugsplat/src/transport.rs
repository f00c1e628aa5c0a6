// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP transport used to deliver crash forms.

use std::time::Duration;

use bugsplat_core::{try_parse_response_json, CrashForm, FormValue};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::error::{BugSplatSdkError, Result};

/// Status and raw body of a completed POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: u16,
	pub body: Bytes,
}

impl TransportResponse {
	pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	/// True for 2xx statuses.
	pub fn ok(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Best-effort JSON view of the body; see [`try_parse_response_json`].
	pub fn json(&self) -> Value {
		try_parse_response_json(&self.body)
	}
}

/// Sends a crash form to a URL with a single POST.
///
/// Implementations return `Err` only when no response was obtained. Any
/// HTTP status, successful or not, is an `Ok` response.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
	async fn post(&self, url: &str, form: CrashForm) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	http_client: Client,
}

impl ReqwestTransport {
	/// Creates a transport whose requests time out after `timeout`.
	pub fn new(timeout: Duration) -> Result<Self> {
		let http_client = bugsplat_common_http::builder()
			.timeout(timeout)
			.build()
			.map_err(BugSplatSdkError::RequestFailed)?;
		Ok(Self { http_client })
	}
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
	async fn post(&self, url: &str, form: CrashForm) -> Result<TransportResponse> {
		let response = self
			.http_client
			.post(url)
			.multipart(to_multipart(form))
			.send()
			.await?;

		let status = response.status().as_u16();
		// An unreadable body is treated like an empty one; it fails JSON
		// parsing downstream.
		let body = match response.bytes().await {
			Ok(body) => body,
			Err(e) => {
				warn!(error = %e, status, "Failed to read crash post response body");
				Bytes::new()
			}
		};

		Ok(TransportResponse { status, body })
	}
}

fn to_multipart(form: CrashForm) -> Form {
	form.into_parts()
		.into_iter()
		.fold(Form::new(), |multipart, param| match param.value {
			FormValue::Text(text) => multipart.text(param.key, text),
			FormValue::Binary(binary) => {
				let part = Part::bytes(binary.data.to_vec());
				let part = match binary.filename {
					Some(filename) => part.file_name(filename),
					None => part,
				};
				multipart.part(param.key, part)
			}
		})
}
