//! Header policy configuration.
//!
//! `HeaderPolicy` holds the response-header name tables used when building
//! filtered responses. The default policy carries exactly the tables from
//! the fetch standard (see [`header_names`](crate::net::header_names)).
//! Embedders can extend them through [`HeaderPolicy::builder()`], for
//! instance to hide a vendor header from every script.
//!
//! A policy is immutable once built and is passed by reference into the
//! filtered response constructors.
//!
//! # Examples
//!
//! ## Use the standard tables
//! ```rust
//! use gosub_fetch::config::HeaderPolicy;
//! let policy = HeaderPolicy::standard();
//! assert!(policy.is_forbidden_response_header_name(b"set-cookie"));
//! ```
//!
//! ## Extend them with the builder
//! ```rust
//! use gosub_fetch::config::HeaderPolicy;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = HeaderPolicy::builder()
//!     .forbid("X-Internal-Token")
//!     .safelist("X-Request-Id")
//!     .build()?; // returns Result<HeaderPolicy, HeaderPolicyError>
//! assert!(policy.is_forbidden_response_header_name(b"x-internal-token"));
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! Builder validation returns [`HeaderPolicyError`] when a name is empty,
//! contains bytes that are not valid in an HTTP token, or ends up both
//! forbidden and safelisted.

use std::fmt;

use crate::net::header_names::{
    is_cors_safelisted_response_header_name, is_forbidden_response_header_name, name_in,
    CORS_SAFELISTED_RESPONSE_HEADER_NAMES, FORBIDDEN_RESPONSE_HEADER_NAMES,
};

static STANDARD_POLICY: HeaderPolicy = HeaderPolicy::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderPolicy {
    /// Names forbidden on top of the standard forbidden response-header names.
    pub extra_forbidden: Vec<Vec<u8>>,
    /// Names safelisted on top of the standard CORS-safelisted names.
    pub extra_safelisted: Vec<Vec<u8>>,
}

impl HeaderPolicy {
    /// Policy with only the standard tables.
    pub const fn new() -> Self {
        Self {
            extra_forbidden: Vec::new(),
            extra_safelisted: Vec::new(),
        }
    }

    /// Shared instance of the standard policy.
    pub fn standard() -> &'static HeaderPolicy {
        &STANDARD_POLICY
    }

    pub fn builder() -> HeaderPolicyBuilder {
        HeaderPolicyBuilder::default()
    }

    pub fn is_forbidden_response_header_name(&self, name: &[u8]) -> bool {
        is_forbidden_response_header_name(name)
            || self.extra_forbidden.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Forbidden names (standard or extra) are never safelisted, whatever
    /// `exposed` says.
    pub fn is_cors_safelisted_response_header_name(&self, name: &[u8], exposed: &[&[u8]]) -> bool {
        !self.is_forbidden_response_header_name(name)
            && (is_cors_safelisted_response_header_name(name, exposed)
                || self.extra_safelisted.iter().any(|n| n.eq_ignore_ascii_case(name)))
    }

    // Table membership only, ignoring the forbidden check.
    fn safelists(&self, name: &[u8]) -> bool {
        name_in(CORS_SAFELISTED_RESPONSE_HEADER_NAMES, name)
            || self.extra_safelisted.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Builder for [`HeaderPolicy`].
#[derive(Debug, Clone, Default)]
pub struct HeaderPolicyBuilder {
    inner: HeaderPolicy,
}

impl HeaderPolicyBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut HeaderPolicy)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn forbid<N: Into<Vec<u8>>>(self, name: N) -> Self { self.map(|c| c.extra_forbidden.push(name.into())) }
    pub fn safelist<N: Into<Vec<u8>>>(self, name: N) -> Self { self.map(|c| c.extra_safelisted.push(name.into())) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut HeaderPolicy)) -> Self { self.map(f) }

    /// Validate and build the final policy.
    pub fn build(self) -> Result<HeaderPolicy, HeaderPolicyError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderPolicyError {
    EmptyName,
    InvalidName(String),
    Conflict(String),
}

impl fmt::Display for HeaderPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderPolicyError::EmptyName =>
                write!(f, "header name must not be empty"),
            HeaderPolicyError::InvalidName(n) =>
                write!(f, "'{n}' is not a valid header name"),
            HeaderPolicyError::Conflict(n) =>
                write!(f, "'{n}' cannot be both forbidden and safelisted"),
        }
    }
}
impl std::error::Error for HeaderPolicyError {}

// RFC 9110 tchar
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn validate(c: &HeaderPolicy) -> Result<(), HeaderPolicyError> {
    for name in c.extra_forbidden.iter().chain(c.extra_safelisted.iter()) {
        if name.is_empty() {
            return Err(HeaderPolicyError::EmptyName);
        }
        if !name.iter().copied().all(is_token_byte) {
            return Err(HeaderPolicyError::InvalidName(String::from_utf8_lossy(name).into_owned()));
        }
    }

    let forbidden = FORBIDDEN_RESPONSE_HEADER_NAMES
        .iter()
        .map(|n| n.as_bytes())
        .chain(c.extra_forbidden.iter().map(Vec::as_slice));
    for name in forbidden {
        if c.safelists(name) {
            return Err(HeaderPolicyError::Conflict(String::from_utf8_lossy(name).into_owned()));
        }
    }
    Ok(())
}
