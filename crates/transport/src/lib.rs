//! `transport` crate: the outbound HTTP seam of the dispatcher.
//!
//! Every request the engine makes is first described as a [`CallDescriptor`]
//! and then handed to an [`HttpTransport`]. The production implementation is
//! [`ReqwestTransport`]; [`mock::MockTransport`] is the in-memory double used
//! by tests across the workspace.

pub mod descriptor;
pub mod error;
pub mod http;
pub mod mock;
pub mod traits;

pub use descriptor::{CallDescriptor, HttpMethod};
pub use error::TransportError;
pub use http::{ReqwestTransport, TransportConfig};
pub use traits::HttpTransport;
