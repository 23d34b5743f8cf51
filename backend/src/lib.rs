//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Trace identifier propagated through logs and response headers.
pub use domain::TraceId;
/// Request tracing middleware applied by the server factory.
pub use middleware::Trace;
