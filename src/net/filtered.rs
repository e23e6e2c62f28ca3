//! Filtered responses.
//!
//! A filtered response is a restricted, read-only view over an internal
//! [`Response`]. Which view a consumer gets is decided by the fetch
//! algorithm, based on how the request related to the caller's origin:
//!
//! | Filter           | Headers                                   | Status / message / body | URL list     |
//! |------------------|-------------------------------------------|-------------------------|--------------|
//! | `Basic`          | all but forbidden response-header names   | pass-through            | pass-through |
//! | `Cors`           | safelisted and exposed, never forbidden    | pass-through            | pass-through |
//! | `Opaque`         | none                                      | `0` / empty / none      | empty        |
//! | `OpaqueRedirect` | none                                      | `0` / empty / none      | pass-through |
//!
//! Views borrow the internal response and never modify it. Header lists are
//! computed once, when the view is created, from the internal response's
//! header list at that time.
//!
//! ```rust
//! use gosub_fetch::net::{FilteredResponse, FilterType, Response};
//! # fn main() -> Result<(), gosub_fetch::errors::FetchError> {
//! let internal = Response::builder()
//!     .header("Set-Cookie", "id=1")
//!     .header("Content-Type", "text/html")
//!     .build();
//!
//! let basic = FilteredResponse::create(FilterType::Basic, &internal)?;
//! assert_eq!(basic.header_list().len(), 1);
//! # Ok(()) }
//! ```
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::HeaderPolicy;
use crate::errors::FetchError;
use crate::net::headers::{Header, HeaderList};
use crate::net::response::{Body, Response, ResponseType};

static EMPTY_HEADER_LIST: HeaderList = HeaderList::new();

/// Which filter to apply to an internal response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Basic,
    Cors,
    Opaque,
    OpaqueRedirect,
}

impl FilterType {
    /// The response type a view of this kind reports.
    pub fn response_type(self) -> ResponseType {
        match self {
            FilterType::Basic => ResponseType::Basic,
            FilterType::Cors => ResponseType::Cors,
            FilterType::Opaque => ResponseType::Opaque,
            FilterType::OpaqueRedirect => ResponseType::OpaqueRedirect,
        }
    }
}

// Copies the headers accepted by `keep`, in order.
fn filter_header_list(
    internal: &HeaderList,
    mut keep: impl FnMut(&Header) -> bool,
) -> Result<HeaderList, FetchError> {
    let mut header_list = HeaderList::new();
    for header in internal {
        if keep(header) {
            header_list.try_append(header.clone())?;
        }
    }
    Ok(header_list)
}

/// View without forbidden response headers.
#[derive(Debug, Clone)]
pub struct BasicFilteredResponse<'a> {
    internal_response: &'a Response,
    header_list: HeaderList,
}

impl<'a> BasicFilteredResponse<'a> {
    pub fn create(internal_response: &'a Response) -> Result<Self, FetchError> {
        Self::create_with_policy(internal_response, HeaderPolicy::standard())
    }

    pub fn create_with_policy(
        internal_response: &'a Response,
        policy: &HeaderPolicy,
    ) -> Result<Self, FetchError> {
        let header_list = filter_header_list(internal_response.header_list(), |header| {
            !policy.is_forbidden_response_header_name(&header.name)
        })?;

        log::trace!(
            "Basic filter kept {} of {} headers",
            header_list.len(),
            internal_response.header_list().len()
        );

        Ok(Self {
            internal_response,
            header_list,
        })
    }

    pub fn header_list(&self) -> &HeaderList {
        &self.header_list
    }
}

/// View limited to CORS-safelisted and explicitly exposed headers.
#[derive(Debug, Clone)]
pub struct CorsFilteredResponse<'a> {
    internal_response: &'a Response,
    header_list: HeaderList,
}

impl<'a> CorsFilteredResponse<'a> {
    pub fn create(internal_response: &'a Response) -> Result<Self, FetchError> {
        Self::create_with_policy(internal_response, HeaderPolicy::standard())
    }

    pub fn create_with_policy(
        internal_response: &'a Response,
        policy: &HeaderPolicy,
    ) -> Result<Self, FetchError> {
        let exposed: Vec<&[u8]> = internal_response
            .cors_exposed_header_name_list()
            .iter()
            .map(Vec::as_slice)
            .collect();

        let header_list = filter_header_list(internal_response.header_list(), |header| {
            policy.is_cors_safelisted_response_header_name(&header.name, &exposed)
        })?;

        log::trace!(
            "CORS filter kept {} of {} headers ({} exposed names)",
            header_list.len(),
            internal_response.header_list().len(),
            exposed.len()
        );

        Ok(Self {
            internal_response,
            header_list,
        })
    }

    pub fn header_list(&self) -> &HeaderList {
        &self.header_list
    }
}

/// View that hides everything about the response.
#[derive(Debug, Clone, Copy)]
pub struct OpaqueFilteredResponse<'a> {
    internal_response: &'a Response,
}

impl<'a> OpaqueFilteredResponse<'a> {
    pub fn create(internal_response: &'a Response) -> Self {
        Self { internal_response }
    }
}

/// View over a redirect the caller must not be able to follow or inspect.
#[derive(Debug, Clone, Copy)]
pub struct OpaqueRedirectFilteredResponse<'a> {
    internal_response: &'a Response,
}

impl<'a> OpaqueRedirectFilteredResponse<'a> {
    pub fn create(internal_response: &'a Response) -> Self {
        Self { internal_response }
    }
}

/// Any of the four filtered views over an internal response.
#[derive(Debug, Clone)]
pub enum FilteredResponse<'a> {
    Basic(BasicFilteredResponse<'a>),
    Cors(CorsFilteredResponse<'a>),
    Opaque(OpaqueFilteredResponse<'a>),
    OpaqueRedirect(OpaqueRedirectFilteredResponse<'a>),
}

impl<'a> FilteredResponse<'a> {
    /// Creates a view of kind `filter` over `internal_response`, using the
    /// standard header tables.
    pub fn create(filter: FilterType, internal_response: &'a Response) -> Result<Self, FetchError> {
        Self::create_with_policy(filter, internal_response, HeaderPolicy::standard())
    }

    pub fn create_with_policy(
        filter: FilterType,
        internal_response: &'a Response,
        policy: &HeaderPolicy,
    ) -> Result<Self, FetchError> {
        if internal_response.is_network_error() {
            log::debug!("Applying {} filter to a network error", filter.response_type());
        }

        Ok(match filter {
            FilterType::Basic => {
                BasicFilteredResponse::create_with_policy(internal_response, policy)?.into()
            }
            FilterType::Cors => {
                CorsFilteredResponse::create_with_policy(internal_response, policy)?.into()
            }
            FilterType::Opaque => OpaqueFilteredResponse::create(internal_response).into(),
            FilterType::OpaqueRedirect => {
                OpaqueRedirectFilteredResponse::create(internal_response).into()
            }
        })
    }

    pub fn filter_type(&self) -> FilterType {
        match self {
            FilteredResponse::Basic(_) => FilterType::Basic,
            FilteredResponse::Cors(_) => FilterType::Cors,
            FilteredResponse::Opaque(_) => FilterType::Opaque,
            FilteredResponse::OpaqueRedirect(_) => FilterType::OpaqueRedirect,
        }
    }

    pub fn response_type(&self) -> ResponseType {
        self.filter_type().response_type()
    }

    pub fn internal_response(&self) -> &'a Response {
        match self {
            FilteredResponse::Basic(r) => r.internal_response,
            FilteredResponse::Cors(r) => r.internal_response,
            FilteredResponse::Opaque(r) => r.internal_response,
            FilteredResponse::OpaqueRedirect(r) => r.internal_response,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            FilteredResponse::Opaque(_) | FilteredResponse::OpaqueRedirect(_) => 0,
            _ => self.internal_response().status(),
        }
    }

    pub fn status_message(&self) -> &[u8] {
        match self {
            FilteredResponse::Opaque(_) | FilteredResponse::OpaqueRedirect(_) => &[],
            _ => self.internal_response().status_message(),
        }
    }

    pub fn header_list(&self) -> &HeaderList {
        match self {
            FilteredResponse::Basic(r) => &r.header_list,
            FilteredResponse::Cors(r) => &r.header_list,
            FilteredResponse::Opaque(_) | FilteredResponse::OpaqueRedirect(_) => &EMPTY_HEADER_LIST,
        }
    }

    pub fn body(&self) -> Option<&Body> {
        match self {
            FilteredResponse::Opaque(_) | FilteredResponse::OpaqueRedirect(_) => None,
            _ => self.internal_response().body(),
        }
    }

    pub fn url_list(&self) -> &[Url] {
        match self {
            FilteredResponse::Opaque(_) => &[],
            _ => self.internal_response().url_list(),
        }
    }

    /// Last entry of the visible URL list.
    pub fn url(&self) -> Option<&Url> {
        self.url_list().last()
    }
}

impl<'a> From<BasicFilteredResponse<'a>> for FilteredResponse<'a> {
    fn from(r: BasicFilteredResponse<'a>) -> Self {
        FilteredResponse::Basic(r)
    }
}

impl<'a> From<CorsFilteredResponse<'a>> for FilteredResponse<'a> {
    fn from(r: CorsFilteredResponse<'a>) -> Self {
        FilteredResponse::Cors(r)
    }
}

impl<'a> From<OpaqueFilteredResponse<'a>> for FilteredResponse<'a> {
    fn from(r: OpaqueFilteredResponse<'a>) -> Self {
        FilteredResponse::Opaque(r)
    }
}

impl<'a> From<OpaqueRedirectFilteredResponse<'a>> for FilteredResponse<'a> {
    fn from(r: OpaqueRedirectFilteredResponse<'a>) -> Self {
        FilteredResponse::OpaqueRedirect(r)
    }
}
