//! User registry backend library.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the user repository port.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
