use serde_json::{Value, json};

/// JSON Schema the model reply must satisfy: an object with exactly the
/// string properties `summary` and `fullReport`.
///
/// Changing this requires matching changes to `prompt::build_prompt` and to
/// `decode::decode_response`.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "A 2-3 sentence overview of the findings."
            },
            "fullReport": {
                "type": "string",
                "description": "The detailed report in Markdown, sections in the prescribed order."
            }
        },
        "required": ["summary", "fullReport"],
        "additionalProperties": false
    })
}
