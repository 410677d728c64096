//! Upstream football data API access
//!
//! [`UpstreamClient`] issues single requests; `request_all_pages` drives it
//! across pages for list endpoints. HTTP goes through the [`Transport`] trait.

mod client;
mod error;
mod pagination;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use client::{encode_segment, ApiFamily, Page, Pagination, UpstreamClient};
pub use error::UpstreamError;
pub use transport::{RawResponse, ReqwestTransport, Transport};
