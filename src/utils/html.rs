use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("prompt is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: keeps formatting tags (<b>, <p>, <sup>) and strips
/// <script>, <iframe> and event-handler attributes.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Decodes a quiz prompt stored as base64 of HTML text and sanitizes it.
///
/// Whitespace (line breaks inserted by the encoder) is ignored.
pub fn decode_prompt(encoded: &str) -> Result<String, PromptError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    let html = String::from_utf8(bytes)?;
    Ok(clean_html(&html))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(html: &str) -> String {
        STANDARD.encode(html)
    }

    #[test]
    fn decodes_formatting() {
        let prompt = encode("<p>What is 2<sup>3</sup>?</p>");
        assert_eq!(decode_prompt(&prompt).unwrap(), "<p>What is 2<sup>3</sup>?</p>");
    }

    #[test]
    fn strips_scripts() {
        let prompt = encode("<b>Pick one</b><script>alert(1)</script>");
        let html = decode_prompt(&prompt).unwrap();
        assert_eq!(html, "<b>Pick one</b>");
    }

    #[test]
    fn tolerates_wrapped_lines() {
        let encoded = encode("Which key saves a file?");
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{head}\n{tail}");
        assert_eq!(decode_prompt(&wrapped).unwrap(), "Which key saves a file?");
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(decode_prompt("not base64!"), Err(PromptError::Base64(_))));
    }
}
