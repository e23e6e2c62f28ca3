//! Response-header name tables.
//!
//! The fetch standard defines two fixed groups of response-header names that
//! decide what a filtered response may expose:
//!
//! - **Forbidden response-header names** are never visible to script-level
//!   consumers, regardless of origin.
//! - **CORS-safelisted response-header names** are always visible to
//!   cross-origin callers, even without an `Access-Control-Expose-Headers`
//!   opt-in from the server.
//!
//! All comparisons are ASCII case-insensitive. The predicates here use the
//! standard tables only; use [`HeaderPolicy`](crate::config::HeaderPolicy)
//! when the tables need to be extended.

/// Names that must never reach a script through a filtered response.
pub const FORBIDDEN_RESPONSE_HEADER_NAMES: &[&str] = &["Set-Cookie", "Set-Cookie2"];

/// Names that are always exposed to cross-origin callers.
pub const CORS_SAFELISTED_RESPONSE_HEADER_NAMES: &[&str] = &[
    "Cache-Control",
    "Content-Language",
    "Content-Length",
    "Content-Type",
    "Expires",
    "Last-Modified",
    "Pragma",
];

pub(crate) fn name_in(table: &[&str], name: &[u8]) -> bool {
    table.iter().any(|entry| entry.as_bytes().eq_ignore_ascii_case(name))
}

/// Returns true when `name` is a forbidden response-header name.
pub fn is_forbidden_response_header_name(name: &[u8]) -> bool {
    name_in(FORBIDDEN_RESPONSE_HEADER_NAMES, name)
}

/// Returns true when `name` is CORS-safelisted, or is listed in `exposed`
/// (the response's CORS-exposed header-name list).
///
/// A forbidden response-header name is never safelisted, even when the
/// server lists it in `Access-Control-Expose-Headers`.
pub fn is_cors_safelisted_response_header_name(name: &[u8], exposed: &[&[u8]]) -> bool {
    !is_forbidden_response_header_name(name)
        && (name_in(CORS_SAFELISTED_RESPONSE_HEADER_NAMES, name)
            || exposed.iter().any(|e| e.eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_cookie_is_forbidden_in_any_case() {
        assert!(is_forbidden_response_header_name(b"Set-Cookie"));
        assert!(is_forbidden_response_header_name(b"set-cookie"));
        assert!(is_forbidden_response_header_name(b"SET-COOKIE2"));
        assert!(!is_forbidden_response_header_name(b"Content-Type"));
        assert!(!is_forbidden_response_header_name(b"Set-Cookie3"));
    }

    #[test]
    fn safelisted_names_need_no_exposure() {
        for name in CORS_SAFELISTED_RESPONSE_HEADER_NAMES {
            assert!(is_cors_safelisted_response_header_name(name.as_bytes(), &[]));
            assert!(is_cors_safelisted_response_header_name(
                name.to_ascii_lowercase().as_bytes(),
                &[]
            ));
        }
        assert!(!is_cors_safelisted_response_header_name(b"X-Custom", &[]));
    }

    #[test]
    fn exposed_names_match_case_insensitively() {
        let exposed: Vec<&[u8]> = vec![&b"x-custom"[..]];
        assert!(is_cors_safelisted_response_header_name(b"X-Custom", &exposed));
        assert!(is_cors_safelisted_response_header_name(b"X-CUSTOM", &exposed));
        assert!(!is_cors_safelisted_response_header_name(b"X-Other", &exposed));
    }

    #[test]
    fn exposing_a_forbidden_name_has_no_effect() {
        let exposed: Vec<&[u8]> = vec![&b"Set-Cookie"[..], &b"set-cookie2"[..]];
        assert!(!is_cors_safelisted_response_header_name(b"Set-Cookie", &exposed));
        assert!(!is_cors_safelisted_response_header_name(b"SET-COOKIE2", &exposed));
    }
}
