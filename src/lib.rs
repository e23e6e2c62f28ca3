pub mod config;
pub mod errors;
pub mod net;

pub use config::HeaderPolicy;
pub use errors::FetchError;
pub use net::*;
