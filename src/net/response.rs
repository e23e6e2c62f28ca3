//! Fetch response model.
//!
//! A [`Response`] is the raw, unfiltered result of an HTTP exchange as seen
//! by the fetch layer, or a synthetic **network error** when no usable
//! exchange happened. It is the *internal response* that
//! [`FilteredResponse`](crate::net::filtered::FilteredResponse) views are
//! built on.
//!
//! ## Notes
//! - Headers are kept in an ordered [`HeaderList`] with raw byte names and
//!   values, so duplicates and original casing survive.
//! - `url_list` is the chain of URLs the request went through. The response
//!   URL is always derived from it (see [`Response::url`]).
//! - A network error always has status `0`, an empty status message, no
//!   headers and no body.
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::errors::FetchError;
use crate::net::headers::{extract_header_value, Header, HeaderList};
use crate::net::status::{is_null_body_status, is_ok_status, is_redirect_status};

/// Highest status a response can carry.
pub const MAX_STATUS: u16 = 999;

/// How a response was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[default]
    Default,
    Basic,
    Cors,
    Error,
    Opaque,
    OpaqueRedirect,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Default => "default",
            ResponseType::Basic => "basic",
            ResponseType::Cors => "cors",
            ResponseType::Error => "error",
            ResponseType::Opaque => "opaque",
            ResponseType::OpaqueRedirect => "opaqueredirect",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully buffered response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    bytes: Vec<u8>,
}

impl Body {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The internal (unfiltered) response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    response_type: ResponseType,
    aborted: bool,
    url_list: Vec<Url>,
    status: u16,
    status_message: Vec<u8>,
    header_list: HeaderList,
    body: Option<Body>,
    cors_exposed_header_name_list: Vec<Vec<u8>>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            response_type: ResponseType::Default,
            aborted: false,
            url_list: Vec::new(),
            status: 200,
            status_message: Vec::new(),
            header_list: HeaderList::new(),
            body: None,
            cors_exposed_header_name_list: Vec::new(),
        }
    }
}

impl Response {
    /// A fresh response: type `default`, status 200, everything else empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    pub fn network_error() -> Self {
        let mut response = Self::new();
        response.set_status(0);
        response.set_type(ResponseType::Error);
        assert!(response.body.is_none(), "network error must not carry a body");
        response
    }

    pub fn aborted_network_error() -> Self {
        let mut response = Self::network_error();
        response.set_aborted(true);
        response
    }

    /// Builds a response from what the transport handed back.
    ///
    /// `http` does not keep the reason phrase from the wire, so the canonical
    /// one for the status is used. Null body statuses never get a body.
    /// Header order is only kept within a name; see
    /// [`HeaderList`]'s `From<&HeaderMap>`.
    pub fn from_http(response: http::Response<Vec<u8>>, url_list: Vec<Url>) -> Self {
        let (parts, body) = response.into_parts();
        let status = parts.status;

        Self {
            url_list,
            status: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().as_bytes().to_vec(),
            header_list: HeaderList::from(&parts.headers),
            body: (!is_null_body_status(status.as_u16())).then(|| Body::new(body)),
            ..Self::default()
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }

    pub fn is_aborted_network_error(&self) -> bool {
        self.response_type == ResponseType::Error && self.aborted
    }

    pub fn is_ok(&self) -> bool {
        is_ok_status(self.status)
    }

    pub fn has_null_body_status(&self) -> bool {
        is_null_body_status(self.status)
    }

    /// The response URL: the last entry of the URL list, if any.
    pub fn url(&self) -> Option<&Url> {
        self.url_list.last()
    }

    /// Resolves the redirect target of this response.
    ///
    /// Returns `Ok(None)` when the status is not a redirect status. A redirect
    /// without a `Location` header, or with one that does not parse against
    /// the response URL, is an [`FetchError::InvalidLocationUrl`].
    ///
    /// When the parsed target has no fragment it inherits `request_fragment`.
    pub fn location_url(&self, request_fragment: Option<&str>) -> Result<Option<Url>, FetchError> {
        if !is_redirect_status(self.status) {
            return Ok(None);
        }

        let Some(location) = extract_header_value(&self.header_list, b"Location") else {
            log::warn!("Redirect status {} without a Location header", self.status);
            return Err(FetchError::InvalidLocationUrl("missing 'Location' header".into()));
        };

        let location = std::str::from_utf8(location)
            .map_err(|e| FetchError::InvalidLocationUrl(e.to_string()))?;

        let mut url = Url::options()
            .base_url(self.url())
            .parse(location)
            .map_err(|e| {
                log::warn!("Cannot parse Location {:?}: {}", location, e);
                FetchError::InvalidLocationUrl(e.to_string())
            })?;

        if url.fragment().is_none() && request_fragment.is_some() {
            url.set_fragment(request_fragment);
        }

        log::debug!("Resolved location URL {} (status {})", url, self.status);
        Ok(Some(url))
    }

    pub fn response_type(&self) -> ResponseType { self.response_type }
    pub fn aborted(&self) -> bool { self.aborted }
    pub fn url_list(&self) -> &[Url] { &self.url_list }
    pub fn status(&self) -> u16 { self.status }
    pub fn status_message(&self) -> &[u8] { &self.status_message }
    pub fn header_list(&self) -> &HeaderList { &self.header_list }
    pub fn body(&self) -> Option<&Body> { self.body.as_ref() }
    pub fn cors_exposed_header_name_list(&self) -> &[Vec<u8>] { &self.cors_exposed_header_name_list }

    /// Switching to `error` requires the response to already look like a
    /// network error; leaving `error` requires it not to be aborted.
    pub fn set_type(&mut self, response_type: ResponseType) {
        if response_type == ResponseType::Error {
            assert!(
                self.status == 0
                    && self.status_message.is_empty()
                    && self.header_list.is_empty()
                    && self.body.is_none(),
                "network error must have status 0 and no status message, headers or body"
            );
        } else {
            assert!(!self.aborted, "only a network error can be aborted");
        }
        self.response_type = response_type;
    }

    pub fn set_aborted(&mut self, aborted: bool) {
        assert!(!aborted || self.is_network_error(), "only a network error can be aborted");
        self.aborted = aborted;
    }

    pub fn set_status(&mut self, status: u16) {
        assert!(status <= MAX_STATUS, "status {status} is out of range (expected 0..=999)");
        assert!(!self.is_network_error() || status == 0, "network error must have status 0");
        self.status = status;
    }

    pub fn set_status_message(&mut self, message: impl Into<Vec<u8>>) {
        let message = message.into();
        assert!(
            !self.is_network_error() || message.is_empty(),
            "network error must not have a status message"
        );
        self.status_message = message;
    }

    pub fn set_body(&mut self, body: Option<Body>) {
        assert!(!self.is_network_error() || body.is_none(), "network error must not carry a body");
        self.body = body;
    }

    pub fn append_header(&mut self, header: Header) {
        assert!(!self.is_network_error(), "network error must not have headers");
        self.header_list.append(header);
    }

    fn assert_invariants(&self) {
        assert!(self.status <= MAX_STATUS, "status {} is out of range (expected 0..=999)", self.status);
        if self.is_network_error() {
            assert!(
                self.status == 0
                    && self.status_message.is_empty()
                    && self.header_list.is_empty()
                    && self.body.is_none(),
                "network error must have status 0 and no status message, headers or body"
            );
        } else {
            assert!(!self.aborted, "only a network error can be aborted");
        }
    }

    pub fn url_list_mut(&mut self) -> &mut Vec<Url> { &mut self.url_list }
    pub fn cors_exposed_header_name_list_mut(&mut self) -> &mut Vec<Vec<u8>> { &mut self.cors_exposed_header_name_list }
}

/// Fluent construction of a [`Response`], mostly for the network layer and tests.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    inner: Response,
}

impl ResponseBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut Response)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn status(self, status: u16) -> Self {
        assert!(status <= MAX_STATUS, "status {status} is out of range (expected 0..=999)");
        self.map(|r| r.status = status)
    }
    pub fn status_message<M: Into<Vec<u8>>>(self, msg: M) -> Self { self.map(|r| r.status_message = msg.into()) }
    pub fn header<N: Into<Vec<u8>>, V: Into<Vec<u8>>>(self, name: N, value: V) -> Self {
        self.map(|r| r.header_list.append(Header::new(name, value)))
    }
    pub fn body<B: Into<Vec<u8>>>(self, body: B) -> Self { self.map(|r| r.body = Some(Body::new(body))) }
    pub fn url(self, url: Url) -> Self { self.map(|r| r.url_list.push(url)) }
    pub fn response_type(self, response_type: ResponseType) -> Self { self.map(|r| r.response_type = response_type) }
    pub fn cors_exposed_header_name<N: Into<Vec<u8>>>(self, name: N) -> Self {
        self.map(|r| r.cors_exposed_header_name_list.push(name.into()))
    }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut Response)) -> Self { self.map(f) }

    /// Panics if the result would break the network error invariants or
    /// carry a status above 999.
    pub fn build(self) -> Response {
        self.inner.assert_invariants();
        self.inner
    }
}
