//! Fetch-layer response handling.
//!
//! The network transport hands over a raw [`Response`]. Before anything is
//! exposed to a script, the fetch algorithm wraps it in one of the
//! [`FilteredResponse`] views, depending on how the request related to the
//! caller's origin.
//!
//! # Available types
//!
//! - [`Response`]: the internal response, or a network error.
//! - [`HeaderList`] / [`Header`]: ordered, duplicate-preserving headers.
//! - [`FilteredResponse`] and [`FilterType`]: the basic, CORS, opaque and
//!   opaque-redirect views.
//!
//! Header-name and status predicates live in [`header_names`] and [`status`].

pub mod filtered;
pub mod header_names;
pub mod headers;
pub mod response;
pub mod status;

pub use filtered::{
    BasicFilteredResponse, CorsFilteredResponse, FilterType, FilteredResponse,
    OpaqueFilteredResponse, OpaqueRedirectFilteredResponse,
};
pub use headers::{extract_header_value, Header, HeaderList};
pub use response::{Body, Response, ResponseBuilder, ResponseType};
