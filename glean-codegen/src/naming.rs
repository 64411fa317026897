// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Conversion of schema keys into C++ identifiers.
//!
//! Metric keys in Glean schemas use `snake_case` (or occasionally
//! `kebab-case`). The header emitter needs `camelCase` names, so this module
//! removes separator runs and upper-cases the character that follows them.

const SEPARATORS: [char; 2] = ['_', '-'];

/// C++ keywords and alternative operator tokens up to C++20.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq"
];

/// Builder for camel-case identifiers derived from schema keys.
#[derive(Debug, Clone, Copy)]
pub struct CamelCase<'input> {
    source: &'input str
}

impl<'input> CamelCase<'input> {
    /// Creates a new builder for the provided key.
    ///
    /// The builder borrows the key and allocates only when
    /// [`build`](Self::build) is invoked.
    pub fn builder(source: &'input str) -> Self {
        Self {
            source
        }
    }

    /// Builds the camel-case form of the key.
    ///
    /// Each run of `_` or `-` that follows a word character and precedes
    /// another character is dropped and the next character is upper-cased.
    /// The first character is lower-cased unless the key opens with two
    /// upper-case characters. Keys that are entirely upper-case or numeric
    /// are returned as-is, and leading or trailing separators are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_codegen::CamelCase;
    ///
    /// assert_eq!(CamelCase::builder("metric_name").build(), "metricName");
    /// assert_eq!(CamelCase::builder("metricName").build(), "metricName");
    /// ```
    pub fn build(self) -> String {
        let source = self.source;
        if is_upper(source) || is_numeric(source) {
            return source.to_owned();
        }

        let chars: Vec<char> = source.chars().collect();
        let mut camel = String::with_capacity(source.len());

        let keep_first = is_upper(&chars.iter().take(2).collect::<String>());
        let mut index = 0;
        while index < chars.len() {
            let current = chars[index];

            if index == 0 && !keep_first && !is_separator(current) {
                camel.extend(current.to_lowercase());
                index += 1;
                continue;
            }

            if !is_separator(current) {
                camel.push(current);
                index += 1;
                continue;
            }

            let run_end = chars[index..]
                .iter()
                .position(|candidate| !is_separator(*candidate))
                .map_or(chars.len(), |offset| index + offset);
            let follows_word = index > 0 && !is_separator(chars[index - 1]);

            if follows_word && run_end < chars.len() {
                camel.extend(chars[run_end].to_uppercase());
                index = run_end + 1;
            } else {
                camel.extend(&chars[index..run_end]);
                index = run_end;
            }
        }

        camel
    }
}

/// Converts a schema key into its camel-case identifier.
///
/// Shorthand for [`CamelCase::builder`] followed by
/// [`build`](CamelCase::build).
pub fn camelize(key: &str) -> String {
    CamelCase::builder(key).build()
}

/// Checks that `identifier` is usable as a C++ identifier.
///
/// Only ASCII letters, digits and underscores are accepted, and the first
/// character must not be a digit. C++ keywords and names reserved to the
/// implementation (`__` anywhere, or `_` followed by an upper-case letter)
/// are rejected.
///
/// # Errors
///
/// Returns a human-readable reason when the identifier is rejected.
pub fn validate_identifier(identifier: &str) -> Result<(), String> {
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return Err("identifier is empty".to_owned());
    };

    if first.is_ascii_digit() {
        return Err(format!("identifier '{identifier}' starts with a digit"));
    }

    if let Some(invalid) = identifier
        .chars()
        .find(|candidate| !(candidate.is_ascii_alphanumeric() || *candidate == '_'))
    {
        return Err(format!("identifier '{identifier}' contains invalid character {invalid:?}"));
    }

    if CPP_KEYWORDS.contains(&identifier) {
        return Err(format!("identifier '{identifier}' is a C++ keyword"));
    }

    if identifier.contains("__") {
        return Err(format!("identifier '{identifier}' contains a reserved double underscore"));
    }

    if first == '_' && chars.next().is_some_and(|second| second.is_ascii_uppercase()) {
        return Err(format!(
            "identifier '{identifier}' is reserved (underscore followed by an upper-case letter)"
        ));
    }

    Ok(())
}

fn is_separator(candidate: char) -> bool {
    SEPARATORS.contains(&candidate)
}

/// At least one cased character and no lower-case characters.
fn is_upper(value: &str) -> bool {
    let mut cased = false;
    for candidate in value.chars() {
        if candidate.is_lowercase() {
            return false;
        }
        if candidate.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{CPP_KEYWORDS, CamelCase, camelize, validate_identifier};

    proptest! {
        #[test]
        fn snake_case_keys_yield_valid_identifiers(key in "[a-z][a-z0-9]{0,8}(_[a-z0-9]{1,8}){0,4}") {
            let identifier = camelize(&key);
            prop_assume!(!CPP_KEYWORDS.contains(&identifier.as_str()));
            prop_assert!(validate_identifier(&identifier).is_ok());
            prop_assert!(!identifier.contains('_'));
        }

        #[test]
        fn camelize_is_idempotent_on_its_output(key in "[a-z][a-z0-9]{0,8}([_-][a-z0-9]{1,8}){0,4}") {
            let once = camelize(&key);
            prop_assert_eq!(camelize(&once), once);
        }
    }

    #[test]
    fn converts_snake_case() {
        assert_eq!(camelize("metric_name"), "metricName");
        assert_eq!(camelize("first_event"), "firstEvent");
        assert_eq!(camelize("a_b_c"), "aBC");
    }

    #[test]
    fn leaves_camel_case_untouched() {
        assert_eq!(camelize("metricName"), "metricName");
    }

    #[test]
    fn converts_kebab_case_and_mixed_runs() {
        assert_eq!(camelize("screen-lock"), "screenLock");
        assert_eq!(camelize("vpn__on-_off"), "vpnOnOff");
    }

    #[test]
    fn lowercases_leading_capital() {
        assert_eq!(camelize("Main_screen"), "mainScreen");
    }

    #[test]
    fn keeps_acronym_prefix() {
        assert_eq!(camelize("VPNState"), "VPNState");
        assert_eq!(camelize("HTTP_status"), "HTTPStatus");
    }

    #[test]
    fn returns_all_uppercase_and_numeric_keys_unchanged() {
        assert_eq!(camelize("SAMPLE_KEY"), "SAMPLE_KEY");
        assert_eq!(camelize("1234"), "1234");
    }

    #[test]
    fn preserves_leading_and_trailing_separators() {
        assert_eq!(camelize("_private_key"), "_privateKey");
        assert_eq!(camelize("trailing_"), "trailing_");
    }

    #[test]
    fn digits_after_separator_are_joined() {
        assert_eq!(camelize("step_1_done"), "step1Done");
    }

    #[test]
    fn empty_key_stays_empty() {
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn builder_is_copy() {
        let builder = CamelCase::builder("copy_me");
        let copied = builder;
        assert_eq!(builder.build(), copied.build());
    }

    #[test]
    fn validate_identifier_rejects_leading_digit() {
        let reason = validate_identifier("1stEvent").expect_err("leading digit accepted");
        assert!(reason.contains("starts with a digit"));
    }

    #[test]
    fn validate_identifier_rejects_invalid_characters() {
        let reason = validate_identifier("event.name").expect_err("dot accepted");
        assert!(reason.contains("invalid character"));
        assert!(validate_identifier("trailing-").is_err());
        assert!(validate_identifier("").is_err());
    }

    #[test]
    fn validate_identifier_rejects_cpp_keywords() {
        for keyword in ["delete", "class", "default", "new", "switch", "namespace"] {
            let reason = validate_identifier(keyword).expect_err("keyword accepted");
            assert_eq!(reason, format!("identifier '{keyword}' is a C++ keyword"));
        }
        assert!(validate_identifier("deleted").is_ok());
        assert!(validate_identifier("Class").is_ok());
    }

    #[test]
    fn validate_identifier_rejects_reserved_names() {
        let reason = validate_identifier("vpn__state").expect_err("double underscore accepted");
        assert!(reason.contains("double underscore"));
        assert!(validate_identifier("__init").is_err());

        let reason = validate_identifier("_Private").expect_err("_Upper accepted");
        assert!(reason.contains("reserved"));
    }

    #[test]
    fn camelized_keyword_keys_are_rejected() {
        assert!(validate_identifier(&camelize("delete")).is_err());
        assert!(validate_identifier(&camelize("_Private_key")).is_err());
        assert!(validate_identifier(&camelize("delete_event")).is_ok());
    }

    #[test]
    fn validate_identifier_accepts_generated_names() {
        assert!(validate_identifier("firstEvent").is_ok());
        assert!(validate_identifier("_privateKey").is_ok());
        assert!(validate_identifier("step1Done").is_ok());
    }
}
