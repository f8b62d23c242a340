//! Utilities for extracting structured data from provider responses.
//!
//! Responses often contain JSON wrapped in markdown code blocks or mixed
//! with explanatory text. This module provides extraction utilities that
//! handle the common response patterns; a response with no usable JSON is
//! a provider parse error, never silently swallowed.

use storybarn_error::{ProviderError, ProviderErrorKind, StorybarnResult};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Tries multiple extraction strategies:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns a provider parse error if no JSON is found in the response.
///
/// # Examples
///
/// ```
/// use storybarn_generation::extract_json;
///
/// let response = "Here's your story:\n\
///     \n\
///     ```json\n\
///     {\"title\": \"Biscuit's Big Day\"}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("Biscuit"));
/// ```
pub fn extract_json(response: &str) -> StorybarnResult<String> {
    // Strategy 1: Extract from markdown code blocks
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    // Strategy 2: Balanced structures; prefer whichever opens first
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
        }
        (Some(_), None) => {
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
        _ => {
            if let Some(json) = extract_balanced(response, '{', '}') {
                return Ok(json);
            }
            if let Some(json) = extract_balanced(response, '[', ']') {
                return Ok(json);
            }
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in provider response"
    );

    Err(ProviderError::new(ProviderErrorKind::Parse(format!(
        "no JSON found in response (length: {})",
        response.len()
    )))
    .into())
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence - likely a truncated response
        return Some(response[content_start..].trim().to_string());
    }

    // Try without language specifier
    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters, handling nesting and
/// string escapes.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate JSON, returning a specific type.
///
/// # Errors
///
/// Returns a provider parse error if the JSON string cannot be parsed into
/// type `T`.
pub fn parse_json<T>(json_str: &str) -> StorybarnResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        ProviderError::new(ProviderErrorKind::Parse(format!(
            "failed to parse JSON: {} (JSON: {}...)",
            e, preview
        )))
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_from_code_block() {
        let response = r#"
Here's the story you requested:

```json
{
  "title": "Biscuit Saves the Barn",
  "content": "Once upon a time..."
}
```

Hope you enjoy it!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"title\""));
        assert!(!json.contains("```"));
    }

    #[test]
    fn extracts_balanced_braces_from_prose() {
        let response = r#"Sure! {"title": "A Day Out", "nested": {"deep": true}}"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("nested"));
    }

    #[test]
    fn extracts_arrays() {
        let response = "Items:\n[\n  {\"id\": 1},\n  {\"id\": 2}\n]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn no_json_is_a_parse_error() {
        let response = "This is just plain prose with no JSON in it";
        assert!(extract_json(response).is_err());
    }

    #[test]
    fn handles_escaped_quotes_in_strings() {
        let response = r#"{"text": "She said \"hello\" to the pup"}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn parses_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct Payload {
            title: String,
        }

        let payload: Payload = parse_json(r#"{"title": "Biscuit"}"#).unwrap();
        assert_eq!(payload.title, "Biscuit");

        let err = parse_json::<Payload>(r#"{"nope": 1}"#).unwrap_err();
        assert!(format!("{}", err).contains("parse"));
    }
}
