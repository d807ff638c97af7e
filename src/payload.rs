//! Chat-completion payload repair.
//!
//! The reconstruction pipeline works on plain text. This module is the
//! bridge from completion documents: it finds the assistant content
//! fields inside a chat-completion JSON value and rewrites each one
//! through the pipeline, leaving every other field untouched.

use crate::error::{PayloadError, Result};
use crate::pipeline::Pipeline;
use serde_json::Value;

/// Repairs assistant content fields in a completion document in place.
///
/// Rewrites `choices[*].message.content` and `choices[*].delta.content`
/// wherever the field holds a string. Missing fields and non-string
/// content values are left alone. Returns the number of fields repaired.
pub fn repair_completion(value: &mut Value, pipeline: &Pipeline) -> usize {
    let Some(choices) = value.get_mut("choices").and_then(Value::as_array_mut) else {
        return 0;
    };

    let mut repaired = 0;
    for choice in choices {
        for field in ["message", "delta"] {
            let content = choice.get_mut(field).and_then(|m| m.get_mut("content"));
            if let Some(Value::String(text)) = content {
                let cleaned = pipeline.clean(text);
                *text = cleaned;
                repaired += 1;
            }
        }
    }
    repaired
}

/// Parses a completion document, repairs it, and re-serializes it.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or the repaired
/// document cannot be re-serialized.
pub fn repair_completion_str(json: &str, pipeline: &Pipeline) -> Result<String> {
    let mut value: Value = serde_json::from_str(json).map_err(PayloadError::from)?;
    repair_completion(&mut value, pipeline);
    serde_json::to_string_pretty(&value)
        .map_err(|e| PayloadError::Serialize(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_repair_message_content() {
        let mut value = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "The the answer."}}
            ]
        });
        let count = repair_completion(&mut value, &Pipeline::default());
        assert_eq!(count, 1);
        assert_eq!(
            value["choices"][0]["message"]["content"],
            json!("The answer.")
        );
        assert_eq!(value["choices"][0]["message"]["role"], json!("assistant"));
    }

    #[test]
    fn test_repair_delta_content() {
        let mut value = json!({
            "choices": [
                {"delta": {"content": "Helllo   wooorld!!!"}}
            ]
        });
        let count = repair_completion(&mut value, &Pipeline::default());
        assert_eq!(count, 1);
        assert_eq!(value["choices"][0]["delta"]["content"], json!("Hello world!!!"));
    }

    #[test]
    fn test_repair_multiple_choices() {
        let mut value = json!({
            "choices": [
                {"message": {"content": "first  answer"}},
                {"message": {"content": "second  answer"}}
            ]
        });
        let count = repair_completion(&mut value, &Pipeline::default());
        assert_eq!(count, 2);
        assert_eq!(value["choices"][0]["message"]["content"], json!("first answer"));
        assert_eq!(value["choices"][1]["message"]["content"], json!("second answer"));
    }

    #[test]
    fn test_repair_no_choices() {
        let mut value = json!({"id": "cmpl-1", "model": "m"});
        let original = value.clone();
        assert_eq!(repair_completion(&mut value, &Pipeline::default()), 0);
        assert_eq!(value, original);
    }

    #[test]
    fn test_repair_non_string_content_untouched() {
        let mut value = json!({
            "choices": [
                {"message": {"content": null}},
                {"message": {"content": [{"type": "text", "text": "hi  hi"}]}}
            ]
        });
        let original = value.clone();
        assert_eq!(repair_completion(&mut value, &Pipeline::default()), 0);
        assert_eq!(value, original);
    }

    #[test]
    fn test_repair_preserves_other_fields() {
        let mut value = json!({
            "id": "cmpl-42",
            "model": "answer-v1",
            "usage": {"total_tokens": 12},
            "choices": [
                {"index": 0, "finish_reason": "stop",
                 "message": {"content": "fine  text"}}
            ]
        });
        repair_completion(&mut value, &Pipeline::default());
        assert_eq!(value["id"], json!("cmpl-42"));
        assert_eq!(value["usage"]["total_tokens"], json!(12));
        assert_eq!(value["choices"][0]["finish_reason"], json!("stop"));
    }

    #[test]
    fn test_repair_str_round_trip() {
        let json = r#"{"choices":[{"message":{"content":"The the model model is is great."}}]}"#;
        let output = repair_completion_str(json, &Pipeline::default());
        assert!(output.is_ok());
        assert!(output.unwrap().contains("The model is great."));
    }

    #[test]
    fn test_repair_str_invalid_json() {
        let result = repair_completion_str("{not json", &Pipeline::default());
        assert!(matches!(
            result,
            Err(Error::Payload(PayloadError::Parse(_)))
        ));
    }

    #[test]
    fn test_repair_str_pretty_output() {
        let json = r#"{"choices":[{"message":{"content":"ok"}}]}"#;
        let output = repair_completion_str(json, &Pipeline::default()).unwrap();
        // Pretty printing puts the nested field on its own line
        assert!(output.contains("\n"));
        assert!(output.contains("\"content\": \"ok\""));
    }
}
