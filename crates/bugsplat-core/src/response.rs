// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crash post response body: schema, validation and lenient parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Outcome reported by the ingestion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
	Success,
	Fail,
}

/// Parsed response from the crash post API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
	pub status: ResponseStatus,
	/// Server time in seconds since the Unix epoch.
	pub current_server_time: Number,
	pub message: String,
	/// Support response URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Id of the newly created crash report.
	pub crash_id: Number,
}

impl ResponseBody {
	/// Builds a body from a parsed value if, and only if, it passes
	/// [`validate_response_body`].
	pub fn from_value(value: &Value) -> Option<Self> {
		if !validate_response_body(value) {
			return None;
		}
		serde_json::from_value(value.clone()).ok()
	}

	/// Server time as a timestamp, if it is representable.
	pub fn server_time(&self) -> Option<DateTime<Utc>> {
		if let Some(secs) = self.current_server_time.as_i64() {
			return DateTime::from_timestamp(secs, 0);
		}
		let secs = self.current_server_time.as_f64()?;
		DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
	}
}

/// Checks that a parsed value has the response body shape.
///
/// Requires an object with `status` of `"success"` or `"fail"`, numeric
/// `current_server_time` and `crash_id`, and a string `message`. `url` may be
/// absent, but if present it must be a string.
pub fn validate_response_body(value: &Value) -> bool {
	let Some(object) = value.as_object() else {
		return false;
	};

	let status_ok = matches!(
		object.get("status").and_then(Value::as_str),
		Some("success" | "fail")
	);
	let url_ok = match object.get("url") {
		None => true,
		Some(url) => url.is_string(),
	};

	status_ok
		&& object.get("current_server_time").is_some_and(Value::is_number)
		&& object.get("message").is_some_and(Value::is_string)
		&& url_ok
		&& object.get("crash_id").is_some_and(Value::is_number)
}

/// Parses a response body as JSON, yielding an empty object on any failure.
///
/// Lossy on purpose: a malformed body is indistinguishable from an empty one
/// and is later rejected by [`validate_response_body`].
pub fn try_parse_response_json(body: &[u8]) -> Value {
	serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn accepts_valid_bodies() {
		let bodies = [
			json!({
				"status": "success",
				"current_server_time": 12,
				"message": "message 1",
				"url": "osaiujdhfihfju",
				"crash_id": 9,
			}),
			json!({
				"status": "fail",
				"current_server_time": 24,
				"message": "message 2",
				"url": "http://example.com",
				"crash_id": 100,
			}),
			json!({
				"status": "success",
				"current_server_time": -100,
				"message": "message 3",
				"crash_id": 333,
			}),
		];

		for body in bodies {
			assert!(validate_response_body(&body), "rejected {body}");
		}
	}

	#[test]
	fn rejects_invalid_bodies() {
		let bodies = [
			Value::Null,
			json!(""),
			json!(2013),
			json!([]),
			json!({}),
			json!({
				"status": "succes",
				"current_server_time": 12,
				"message": "message 1",
				"crash_id": 9,
			}),
			json!({
				"status": "fail",
				"current_server_time": 24,
				"message": "message 2",
				"url": {},
				"crash_id": 100,
			}),
			json!({
				"status": "fail",
				"current_server_time": 24,
				"message": "message 2",
				"url": null,
				"crash_id": 100,
			}),
			json!({
				"current_server_time": -100,
				"message": "message 3",
				"crash_id": 333,
			}),
			json!({
				"status": "success",
				"current_server_time": "12",
				"message": "message 3",
				"crash_id": 333,
			}),
			json!({
				"status": "success",
				"current_server_time": -100,
				"crash_id": 333,
			}),
			json!({
				"status": "success",
				"current_server_time": -100,
				"message": "message 3",
			}),
		];

		for body in bodies {
			assert!(!validate_response_body(&body), "accepted {body}");
		}
	}

	#[test]
	fn from_value_parses_validated_body() {
		let body = ResponseBody::from_value(&json!({
			"status": "success",
			"current_server_time": 1,
			"message": "ok",
			"crash_id": 42,
		}))
		.unwrap();

		assert_eq!(body.status, ResponseStatus::Success);
		assert_eq!(body.crash_id.as_u64(), Some(42));
		assert!(body.url.is_none());
		assert_eq!(body.server_time().unwrap().timestamp(), 1);
	}

	#[test]
	fn from_value_rejects_invalid_body() {
		assert!(ResponseBody::from_value(&json!({ "crash_id": 42 })).is_none());
	}

	#[test]
	fn parse_returns_json_value() {
		let values = [
			json!(12),
			json!("12"),
			json!([]),
			json!({}),
			json!(true),
			json!([{ "type": "person", "value": { "name": "peter", "age": 17 } }]),
		];

		for value in values {
			let bytes = serde_json::to_vec(&value).unwrap();
			assert_eq!(try_parse_response_json(&bytes), value);
		}
	}

	#[test]
	fn parse_failure_yields_empty_object() {
		for body in [&b""[..], b"not json", b"{\"status\":", b"<html></html>"] {
			assert_eq!(try_parse_response_json(body), json!({}));
		}
	}

	/// How a single field is represented in a generated body.
	#[derive(Debug, Clone, Copy)]
	enum Slot {
		Absent,
		Valid,
		WrongType,
	}

	fn slot() -> impl Strategy<Value = Slot> {
		prop_oneof![Just(Slot::Absent), Just(Slot::Valid), Just(Slot::WrongType)]
	}

	fn insert(object: &mut Map<String, Value>, key: &str, slot: Slot, valid: Value, wrong: Value) {
		match slot {
			Slot::Absent => {}
			Slot::Valid => {
				object.insert(key.to_string(), valid);
			}
			Slot::WrongType => {
				object.insert(key.to_string(), wrong);
			}
		}
	}

	proptest! {
		#[test]
		fn validation_matches_field_power_set(
			status in slot(),
			time in slot(),
			message in slot(),
			url in slot(),
			crash_id in slot(),
			status_value in prop_oneof![Just("success"), Just("fail")],
		) {
			let mut object = Map::new();
			insert(&mut object, "status", status, json!(status_value), json!("succes"));
			insert(&mut object, "current_server_time", time, json!(1.5), json!("1"));
			insert(&mut object, "message", message, json!("ok"), json!(7));
			insert(&mut object, "url", url, json!("https://bugsplat.com"), json!(null));
			insert(&mut object, "crash_id", crash_id, json!(42), json!([42]));

			let required_ok = [status, time, message, crash_id]
				.iter()
				.all(|slot| matches!(slot, Slot::Valid));
			let url_ok = !matches!(url, Slot::WrongType);

			prop_assert_eq!(validate_response_body(&Value::Object(object)), required_ok && url_ok);
		}
	}
}
