//! Request body validation for the generation endpoints.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde_json::Value;

use crate::error::AppError;

/// Unwraps the extracted JSON body, turning every extractor rejection into a
/// [`AppError::BadRequest`].
///
/// Bodies over the server's buffering limit are reported against the route's
/// `max_chars` so the caller learns what the limit actually is.
pub fn json_body(
    payload: Result<Json<Value>, JsonRejection>,
    field: &str,
    max_chars: usize,
) -> Result<Value, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => {
            Err(AppError::BadRequest("Request must be JSON".into()))
        }
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AppError::BadRequest(format!(
                "Request body is too large: '{}' is limited to {} characters",
                field, max_chars
            )))
        }
        Err(_) => Err(AppError::BadRequest("Request body must be valid JSON".into())),
    }
}

/// Extracts the string `field` from a JSON object body, trimmed.
///
/// Fails with [`AppError::BadRequest`] when the body is not a JSON object,
/// when the field is missing, not a string, or blank, and when the trimmed
/// value is longer than `max_chars` characters.
pub fn required_text(payload: &Value, field: &str, max_chars: usize) -> Result<String, AppError> {
    let Some(object) = payload.as_object() else {
        return Err(AppError::BadRequest("Request body must be a JSON object".into()));
    };

    let text = match object.get(field) {
        None | Some(Value::Null) => "",
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err(AppError::BadRequest(format!("'{}' must be a string", field))),
    };

    if text.is_empty() {
        return Err(AppError::BadRequest(format!(
            "'{}' is required and must be non-empty",
            field
        )));
    }

    if text.chars().count() > max_chars {
        return Err(AppError::BadRequest(format!(
            "'{}' exceeds the maximum length of {} characters",
            field, max_chars
        )));
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bad_request(result: Result<String, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn returns_trimmed_value() {
        let text = required_text(&json!({ "prompt": "  hello  " }), "prompt", 2000);
        assert_eq!(text.unwrap(), "hello");
    }

    #[test]
    fn extracted_body_passes_through() {
        let value = json_body(Ok(Json(json!({ "query": "rice" }))), "query", 10).unwrap();
        assert_eq!(value, json!({ "query": "rice" }));
    }

    #[test]
    fn rejects_non_object_body() {
        for body in [json!([1, 2]), json!("hi"), json!(42)] {
            assert_eq!(
                bad_request(required_text(&body, "prompt", 10)),
                "Request body must be a JSON object"
            );
        }
    }

    #[test]
    fn rejects_missing_blank_or_null_field() {
        let bodies = [
            json!({}),
            json!({ "prompt": "" }),
            json!({ "prompt": " \n\t " }),
            json!({ "prompt": null }),
        ];
        for body in bodies {
            assert_eq!(
                bad_request(required_text(&body, "prompt", 10)),
                "'prompt' is required and must be non-empty"
            );
        }
    }

    #[test]
    fn rejects_wrong_field_name() {
        let msg = bad_request(required_text(&json!({ "prompt": "hi" }), "query", 10));
        assert!(msg.contains("'query'"));
    }

    #[test]
    fn rejects_non_string_field() {
        assert_eq!(
            bad_request(required_text(&json!({ "query": 7 }), "query", 10)),
            "'query' must be a string"
        );
    }

    #[test]
    fn length_is_counted_in_characters_after_trimming() {
        // 5 characters, 15 bytes
        assert!(required_text(&json!({ "query": "  日本の米作  " }), "query", 5).is_ok());

        let msg = bad_request(required_text(&json!({ "query": "abcdef" }), "query", 5));
        assert_eq!(msg, "'query' exceeds the maximum length of 5 characters");
    }
}
