//! REST API collaborator for the cache layer.
//!
//! This module provides the [`Transport`] trait the managers fetch
//! through, the `reqwest`-backed [`RestTransport`] implementation,
//! endpoint path builders, and the transport error taxonomy.

pub mod endpoints;
pub mod error;
pub mod transport;

pub use error::ApiError;
pub use transport::{RestTransport, Transport};
