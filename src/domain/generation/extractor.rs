//! Locates the JSON array embedded in free-form generated text.
//!
//! Generation backends like to wrap their payload in commentary or
//! markdown fences. The scan starts at the first `[` and walks to its
//! matching `]`, ignoring brackets that appear inside string literals.

use super::ParseError;

/// Returns the first balanced `[...]` region of `text`.
pub fn extract_array(text: &str) -> Result<&str, ParseError> {
    let start = text.find('[').ok_or(ParseError::NoArrayFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    Err(ParseError::NoArrayFound)
}
