//! String helpers for field names

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Whether `s` is usable as a logical property or type name
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            // Word boundary on a lower-to-upper transition
            if i > 0 && prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if matches!(ch, '-' | '_' | ' ') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to lowerCamelCase, e.g. a wire name to a logical name
pub fn to_lower_camel_case(s: &str) -> String {
    let snake = to_snake_case(s);
    let mut words = snake.split('_').filter(|w| !w.is_empty());

    let mut result = words.next().map(str::to_string).unwrap_or_default();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("clientId"));
        assert!(is_identifier("_static"));
        assert!(is_identifier("ResponseAccessManyData"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("client-id"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clientId"), "client_id");
        assert_eq!(
            to_snake_case("tokenEndpointAuthMethodsSupported"),
            "token_endpoint_auth_methods_supported"
        );
        assert_eq!(to_snake_case("created-at"), "created_at");
        assert_eq!(to_snake_case("user_id"), "user_id");
    }

    #[test]
    fn test_to_lower_camel_case() {
        assert_eq!(to_lower_camel_case("client_id"), "clientId");
        assert_eq!(
            to_lower_camel_case("token_endpoint_auth_methods_supported"),
            "tokenEndpointAuthMethodsSupported"
        );
        assert_eq!(to_lower_camel_case("static"), "static");
        assert_eq!(
            to_lower_camel_case("authorizationEndpoint"),
            "authorizationEndpoint"
        );
        assert_eq!(to_lower_camel_case(""), "");
    }
}
