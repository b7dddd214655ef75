//! # Path Validation
//!
//! Paths are the only caller-controlled part of an address. They end up in
//! the inspection tool's text renderings and in XML-style exports, so the
//! characters that would need escaping there are refused up front.

use crate::errors::AddressError;

/// Maximum path length in characters.
pub const MAX_PATH_LENGTH: usize = 256;

/// Characters refused in paths in addition to ASCII control characters.
pub const FORBIDDEN_PATH_CHARACTERS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Validate a critical data path.
pub fn validate_path(path: &str) -> Result<(), AddressError> {
    if path.is_empty() {
        return Err(AddressError::EmptyPath);
    }

    let length = path.chars().count();
    if length > MAX_PATH_LENGTH {
        return Err(AddressError::PathTooLong {
            length,
            max: MAX_PATH_LENGTH,
        });
    }

    if let Some(character) = path
        .chars()
        .find(|c| c.is_ascii_control() || FORBIDDEN_PATH_CHARACTERS.contains(c))
    {
        return Err(AddressError::ForbiddenCharacter {
            path: path.to_string(),
            character,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_paths() {
        assert!(validate_path("Wagerable").is_ok());
        assert!(validate_path("Bonus/Round 3.Picks").is_ok());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(matches!(
            validate_path("line\nbreak"),
            Err(AddressError::ForbiddenCharacter { character: '\n', .. })
        ));
    }

    #[test]
    fn test_rejects_markup_characters() {
        for c in FORBIDDEN_PATH_CHARACTERS {
            let path = format!("bad{}path", c);
            assert!(validate_path(&path).is_err(), "{} should be rejected", c);
        }
    }

    #[test]
    fn test_length_limit() {
        let ok = "x".repeat(MAX_PATH_LENGTH);
        let too_long = "x".repeat(MAX_PATH_LENGTH + 1);
        assert!(validate_path(&ok).is_ok());
        assert_eq!(
            validate_path(&too_long),
            Err(AddressError::PathTooLong {
                length: MAX_PATH_LENGTH + 1,
                max: MAX_PATH_LENGTH
            })
        );
    }
}
