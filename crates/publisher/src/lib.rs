//! # Publisher
//!
//! Pull-only HTTP view of the latest capture.
//!
//! - `GET /` viewer page that reloads the image on a timer
//! - `GET /image.jpg` latest JPEG, or 503 before the first capture
//! - `GET /healthz` liveness
//!
//! ## Example
//!
//! ```ignore
//! let endpoint = PublicationEndpoint::bind(&blueprint.publish, artifacts.clone()).await?;
//! let server = endpoint.spawn(shutdown_rx);
//! ```

mod error;
mod page;
mod routes;
mod server;

pub use error::{PublisherError, Result};
pub use page::viewer_page;
pub use routes::{router, NOT_READY_BODY, X_CAPTURE_FILE, X_CAPTURE_SEQUENCE};
pub use server::PublicationEndpoint;
