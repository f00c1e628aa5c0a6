// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Multipart form parameters and the crash form body.

use bytes::Bytes;

/// A binary form value, optionally carrying the filename used in the
/// multipart `Content-Disposition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryValue {
	pub data: Bytes,
	pub filename: Option<String>,
}

/// Value of a form parameter: plain text or a binary payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
	Text(String),
	Binary(BinaryValue),
}

impl FormValue {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Binary(_) => None,
		}
	}

	pub fn as_binary(&self) -> Option<&BinaryValue> {
		match self {
			Self::Text(_) => None,
			Self::Binary(binary) => Some(binary),
		}
	}
}

impl From<&str> for FormValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for FormValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Bytes> for FormValue {
	fn from(data: Bytes) -> Self {
		Self::Binary(BinaryValue {
			data,
			filename: None,
		})
	}
}

impl From<Vec<u8>> for FormValue {
	fn from(data: Vec<u8>) -> Self {
		Bytes::from(data).into()
	}
}

impl From<BinaryValue> for FormValue {
	fn from(value: BinaryValue) -> Self {
		Self::Binary(value)
	}
}

/// A caller-supplied form field appended after the standard crash fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDataParam {
	pub key: String,
	pub value: FormValue,
}

impl FormDataParam {
	/// Creates a parameter from anything convertible to a [`FormValue`].
	///
	/// Strings become text fields and byte buffers become binary fields.
	pub fn new(key: impl Into<String>, value: impl Into<FormValue>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}

	pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self::new(key, FormValue::Text(value.into()))
	}

	pub fn binary(key: impl Into<String>, data: impl Into<Bytes>, filename: Option<String>) -> Self {
		Self::new(
			key,
			BinaryValue {
				data: data.into(),
				filename,
			},
		)
	}
}

/// Ordered multipart body for a crash post.
///
/// Transports turn this into their own multipart representation; it carries
/// no encoding of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrashForm {
	parts: Vec<FormDataParam>,
}

impl CrashForm {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a parameter, keeping insertion order.
	pub fn append(&mut self, param: FormDataParam) {
		self.parts.push(param);
	}

	pub fn append_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.append(FormDataParam::text(key, value));
	}

	pub fn append_binary(
		&mut self,
		key: impl Into<String>,
		data: impl Into<Bytes>,
		filename: Option<String>,
	) {
		self.append(FormDataParam::binary(key, data, filename));
	}

	pub fn parts(&self) -> &[FormDataParam] {
		&self.parts
	}

	pub fn into_parts(self) -> Vec<FormDataParam> {
		self.parts
	}

	pub fn len(&self) -> usize {
		self.parts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	/// First parameter stored under `key`.
	pub fn get(&self, key: &str) -> Option<&FormDataParam> {
		self.parts.iter().find(|part| part.key == key)
	}

	/// First text value stored under `key`.
	pub fn text(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(|part| part.value.as_text())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.parts.iter().map(|part| part.key.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn string_values_become_text() {
		let param = FormDataParam::new("build", "nightly");
		assert_eq!(param.value, FormValue::Text("nightly".to_string()));
	}

	#[test]
	fn byte_values_become_binary_without_filename() {
		let param = FormDataParam::new("dump", vec![1u8, 2, 3]);
		let binary = param.value.as_binary().unwrap();
		assert_eq!(binary.data.as_ref(), &[1, 2, 3]);
		assert!(binary.filename.is_none());
	}

	#[test]
	fn binary_keeps_filename() {
		let param = FormDataParam::binary("attachment", "🐶".as_bytes().to_vec(), Some("attachment.txt".into()));
		assert_eq!(
			param.value.as_binary().and_then(|b| b.filename.as_deref()),
			Some("attachment.txt")
		);
		assert!(param.value.as_text().is_none());
	}

	#[test]
	fn form_preserves_order_and_lookups() {
		let mut form = CrashForm::new();
		form.append_text("database", "fred");
		form.append_text("appName", "crasher");
		form.append_binary("log.txt", Bytes::from_static(b"log"), Some("log.txt".into()));

		assert_eq!(form.len(), 3);
		assert_eq!(
			form.keys().collect::<Vec<_>>(),
			vec!["database", "appName", "log.txt"]
		);
		assert_eq!(form.text("appName"), Some("crasher"));
		assert_eq!(form.text("log.txt"), None);
		assert!(form.get("log.txt").is_some());
		assert!(form.get("missing").is_none());
	}
}
