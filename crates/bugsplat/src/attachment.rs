// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! File attachments for crash posts.

use std::path::Path;

use bugsplat_core::FormDataParam;
use bytes::Bytes;
use tracing::debug;

use crate::error::{BugSplatSdkError, Result};

/// Reads a file into a binary form parameter keyed and named by its base
/// name.
///
/// # Example
///
/// ```ignore
/// let log = bugsplat::file_param("logs/app.log").await?;
/// client.post("crashed", PostOptions::new().param(log)).await?;
/// ```
pub async fn file_param(path: impl AsRef<Path>) -> Result<FormDataParam> {
	let path = path.as_ref();
	let key = file_name(path);
	file_param_with_key(key, path).await
}

/// Reads a file into a binary form parameter stored under `key`.
///
/// The multipart filename is still the file's base name.
pub async fn file_param_with_key(key: impl Into<String>, path: impl AsRef<Path>) -> Result<FormDataParam> {
	let path = path.as_ref();
	let data = tokio::fs::read(path)
		.await
		.map_err(|source| BugSplatSdkError::AttachmentRead {
			path: path.to_path_buf(),
			source,
		})?;

	debug!(path = %path.display(), bytes = data.len(), "Read crash attachment");

	Ok(FormDataParam::binary(key, Bytes::from(data), Some(file_name(path))))
}

fn file_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string())
}
