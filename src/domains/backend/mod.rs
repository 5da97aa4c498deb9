//! Backend domain module.
//!
//! Wraps the order-management HTTP service behind the [`BackendGateway`]
//! trait:
//!
//! - `GET  /order_detail/{orderNumber}`
//! - `GET  /order_overview/{orderNumber}`
//! - `GET  /email/{orderNumber}`
//! - `POST /product_descriptions/` with `{"skus": [...]}`

mod error;
mod gateway;

pub use error::{BackendError, FailureClass};
pub use gateway::{BackendGateway, BackendRequest, HttpBackend, Method};
