//! Best-effort extraction of a JSON payload from free-form model text
//!
//! Vendors without a native JSON mode tend to wrap structured output in
//! markdown code fences despite instructions not to. This utility recovers
//! the embedded payload with an explicit ordered strategy list:
//!
//! 1. the trimmed text already looks like JSON (starts with `{` or `[`);
//! 2. an explicit ```json-tagged fence;
//! 3. the first fenced block whose body parses as JSON.
//!
//! Each strategy falls through on failure; if all fail the original text is
//! returned untouched. Extraction is idempotent: running it on an already
//! extracted payload yields the same string.

/// A fenced code block with an optional language tag
struct FencedBlock {
    language: Option<String>,
    body: String,
}

/// Extract an embedded JSON payload, or return the input unchanged
pub fn extract_json_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed.to_string();
    }

    let blocks = fenced_blocks(raw);

    if let Some(block) = blocks
        .iter()
        .find(|b| b.language.as_deref() == Some("json"))
    {
        return block.body.trim().to_string();
    }

    if let Some(block) = blocks
        .iter()
        .find(|b| serde_json::from_str::<serde_json::Value>(b.body.trim()).is_ok())
    {
        return block.body.trim().to_string();
    }

    raw.to_string()
}

/// Scan text for ``` fenced blocks
fn fenced_blocks(text: &str) -> Vec<FencedBlock> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("```") {
        let after_fence = &rest[start + 3..];
        // The opening fence line may carry a language tag
        let Some(newline) = after_fence.find('\n') else {
            break;
        };
        let lang = after_fence[..newline].trim();
        let body_start = &after_fence[newline + 1..];
        let Some(end) = body_start.find("```") else {
            break;
        };

        blocks.push(FencedBlock {
            language: if lang.is_empty() {
                None
            } else {
                Some(lang.to_lowercase())
            },
            body: body_start[..end].to_string(),
        });

        rest = &body_start[end + 3..];
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_json_returned_trimmed() {
        let raw = "  {\"a\": 1}  ";
        assert_eq!(extract_json_payload(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_raw_json_array() {
        let raw = "\n[1, 2, 3]\n";
        assert_eq!(extract_json_payload(raw), "[1, 2, 3]");
    }

    #[test]
    fn test_json_tagged_fence_unwrapped() {
        let raw = "Here you go:\n```json\n{\"key\": \"value\"}\n```\nHope that helps!";
        assert_eq!(extract_json_payload(raw), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_json_tag_wins_even_if_invalid() {
        // An explicit json tag is trusted over later parseable blocks
        let raw = "```json\n{broken\n```\n```\n{\"ok\": true}\n```";
        assert_eq!(extract_json_payload(raw), "{broken");
    }

    #[test]
    fn test_first_parseable_untagged_fence() {
        let raw = "Some prose.\n```\nnot json at all\n```\n```\n{\"found\": 1}\n```";
        assert_eq!(extract_json_payload(raw), "{\"found\": 1}");
    }

    #[test]
    fn test_tagged_non_json_fence_skipped() {
        let raw = "```python\nprint('hi')\n```\n```json\n[true]\n```";
        assert_eq!(extract_json_payload(raw), "[true]");
    }

    #[test]
    fn test_no_json_returns_original_untouched() {
        let raw = "  just prose, no payload here  ";
        assert_eq!(extract_json_payload(raw), raw);
    }

    #[test]
    fn test_unterminated_fence_returns_original() {
        let raw = "```json\n{\"never\": \"closed\"";
        assert_eq!(extract_json_payload(raw), raw);
    }

    #[test]
    fn test_extraction_is_a_fixed_point() {
        let raw = "```json\n{\"stable\": [1, 2]}\n```";
        let once = extract_json_payload(raw);
        let twice = extract_json_payload(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "{\"stable\": [1, 2]}");
    }

    #[test]
    fn test_fixed_point_on_prose() {
        let raw = "no structured payload";
        let once = extract_json_payload(raw);
        assert_eq!(extract_json_payload(&once), once);
    }
}
