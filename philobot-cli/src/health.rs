//! Bare HTTP listener so a hosting platform's port check passes. Any request
//! on any path gets 200 OK; it has no relationship to the pipeline and runs
//! independently of pipeline build.

use anyhow::Result;
use axum::{http::StatusCode, Router};
use tokio::net::TcpListener;
use tracing::info;

/// Binds `0.0.0.0:port` and serves 200 `OK` forever.
pub async fn serve_health(port: u16) -> Result<()> {
    let (addr, server) = serve_health_with_addr(port).await?;
    info!(addr = %addr, "health listener bound");
    server.await
}

/// Variant that reports the bound address, for port 0 in tests.
pub async fn serve_health_with_addr(
    port: u16,
) -> Result<(
    std::net::SocketAddr,
    impl std::future::Future<Output = Result<()>>,
)> {
    let app = Router::new().fallback(|| async { (StatusCode::OK, "OK") });
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    let addr = listener.local_addr()?;
    let server = async move {
        axum::serve(listener, app).await?;
        Ok(())
    };
    Ok((addr, server))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_any_path_returns_ok() {
        let (addr, server) = serve_health_with_addr(0).await.unwrap();
        tokio::spawn(server);

        for path in ["/", "/healthz", "/anything/else"] {
            let resp = reqwest::get(format!("http://{}{}", addr, path))
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
        }
    }
}
