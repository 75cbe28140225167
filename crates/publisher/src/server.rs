//! PublicationEndpoint - server lifecycle around the router

use std::net::SocketAddr;

use axum::Router;
use capture::LatestArtifactStore;
use contracts::PublishConfig;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use crate::error::{PublisherError, Result};
use crate::routes::router;

/// Bound, not yet serving, HTTP endpoint
pub struct PublicationEndpoint {
    listener: TcpListener,
    app: Router,
}

impl PublicationEndpoint {
    /// Bind `config.bind_addr:config.port`
    ///
    /// Port 0 picks a free port; see [`Self::local_addr`].
    #[instrument(
        name = "publication_endpoint_bind",
        skip_all,
        fields(addr = %config.socket_addr())
    )]
    pub async fn bind(config: &PublishConfig, artifacts: LatestArtifactStore) -> Result<Self> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| PublisherError::Bind { addr, source })?;

        Ok(Self {
            listener,
            app: router(artifacts, config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` flips to `true` (or its sender is dropped)
    ///
    /// Stops accepting on shutdown; requests already in flight finish.
    pub async fn serve(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr = self.local_addr()?;
        info!(%addr, "Publication endpoint listening");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.wait_for(|stop| *stop).await;
            })
            .await?;

        info!("Publication endpoint stopped");
        Ok(())
    }

    /// Serve on a background task
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<Result<()>> {
        tokio::spawn(async move {
            let result = self.serve(shutdown).await;
            if let Err(e) = &result {
                error!(error = %e, "Publication endpoint failed");
            }
            result
        })
    }
}
