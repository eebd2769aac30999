//! Validation of a person's name.
//!
//! A name is accepted when it consists solely of ASCII letters.
//! Blank names are reported separately from names with illegal characters,
//! so that the client can be told what went wrong.
//!
//! ```
//! use name_validation::core::validation::name_validator::{validate, Outcome};
//!
//! assert_eq!(Outcome::Valid("Hello, Alice!".to_string()), validate(Some("Alice")));
//! assert_eq!(Outcome::Missing, validate(Some("   ")));
//! assert_eq!(Outcome::Invalid, validate(Some("Bob123")));
//! ```

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::core::greeting::greeting_service;

/// Message for a name that is absent or blank.
pub const MISSING_NAME: &str = "Name is required.";

/// Message for a name that contains anything but letters.
pub const INVALID_NAME: &str = "Invalid characters in name. Only letters are allowed.";

/// One or more ASCII letters, nothing else.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("Invalid name regex"));

/// The result of validating a name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No name, or only whitespace.
    Missing,
    /// The name contains a character that is not an ASCII letter.
    Invalid,
    /// The name is valid, carrying the greeting for it.
    Valid(String),
}

impl Outcome {
    /// The client-facing text of this outcome.
    pub fn message(&self) -> &str {
        match self {
            Outcome::Missing => MISSING_NAME,
            Outcome::Invalid => INVALID_NAME,
            Outcome::Valid(greeting) => greeting,
        }
    }

    /// Whether the name was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validates an optional name, greeting it if it is made up of letters only.
pub fn validate(name: Option<&str>) -> Outcome {
    let name = match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Outcome::Missing,
    };
    if !NAME_RE.is_match(name) {
        return Outcome::Invalid;
    }
    Outcome::Valid(greeting_service::greet(name))
}

#[cfg(test)]
mod tests {
    use super::{validate, Outcome, INVALID_NAME, MISSING_NAME};
    use proptest::prelude::*;

    #[test]
    fn letters_are_greeted() {
        assert_eq!(
            Outcome::Valid("Hello, Alice!".to_string()),
            validate(Some("Alice"))
        );
    }

    #[test]
    fn single_letter_is_valid() {
        assert_eq!(Outcome::Valid("Hello, A!".to_string()), validate(Some("A")));
    }

    #[test]
    fn absent_name_is_missing() {
        assert_eq!(Outcome::Missing, validate(None));
    }

    #[test]
    fn empty_name_is_missing() {
        assert_eq!(Outcome::Missing, validate(Some("")));
    }

    #[test]
    fn whitespace_name_is_missing() {
        assert_eq!(Outcome::Missing, validate(Some("   ")));
        assert_eq!(Outcome::Missing, validate(Some("\t\n")));
        assert_eq!(Outcome::Missing, validate(Some("\u{2003}")));
    }

    #[test]
    fn digits_are_invalid() {
        assert_eq!(Outcome::Invalid, validate(Some("John3")));
        assert_eq!(Outcome::Invalid, validate(Some("Bob123")));
    }

    #[test]
    fn inner_space_is_invalid() {
        assert_eq!(Outcome::Invalid, validate(Some("John Doe")));
    }

    #[test]
    fn surrounding_whitespace_is_invalid() {
        assert_eq!(Outcome::Invalid, validate(Some(" Alice")));
        assert_eq!(Outcome::Invalid, validate(Some("Alice\n")));
    }

    #[test]
    fn non_ascii_letters_are_invalid() {
        assert_eq!(Outcome::Invalid, validate(Some("Zoë")));
        assert_eq!(Outcome::Invalid, validate(Some("Ålesund")));
        assert_eq!(Outcome::Invalid, validate(Some("名前")));
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(MISSING_NAME, Outcome::Missing.message());
        assert_eq!(INVALID_NAME, Outcome::Invalid.to_string());
        assert_eq!("Hello, Bob!", validate(Some("Bob")).message());
        assert!(validate(Some("Bob")).is_valid());
        assert!(!Outcome::Invalid.is_valid());
    }

    proptest! {
        #[test]
        fn prop_letters_are_valid(name in "[A-Za-z]{1,64}") {
            prop_assert_eq!(
                Outcome::Valid(format!("Hello, {name}!")),
                validate(Some(&name))
            );
        }

        #[test]
        fn prop_blank_is_missing(name in "[ \t\r\n\u{a0}\u{2003}]{0,16}") {
            prop_assert_eq!(Outcome::Missing, validate(Some(&name)));
        }

        #[test]
        fn prop_non_letter_is_invalid(
            prefix in "[A-Za-z]{0,8}",
            bad in "[^A-Za-z\\s]",
            suffix in "\\PC{0,8}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert_eq!(Outcome::Invalid, validate(Some(&name)));
        }

        #[test]
        fn prop_validate_is_idempotent(name in "\\PC*") {
            prop_assert_eq!(validate(Some(&name)), validate(Some(&name)));
        }
    }
}
