//! # ats-client
//!
//! Access to the placement backend that owns shareable link records.
//! [`LinkBackend`] is the seam the service layer depends on;
//! [`HttpLinkBackend`] is the production implementation over REST.

pub mod backend;
pub mod http;

pub use backend::LinkBackend;
pub use http::HttpLinkBackend;
