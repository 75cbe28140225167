//! Publisher error types

use std::net::SocketAddr;

use thiserror::Error;

/// Publication endpoint errors
#[derive(Debug, Error)]
pub enum PublisherError {
    /// Listener could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an error
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Result type alias for publisher operations
pub type Result<T> = std::result::Result<T, PublisherError>;
