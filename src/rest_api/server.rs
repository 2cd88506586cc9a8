//! # API Server
//!
//! Axum router and listener. The router is built from an already-connected
//! store handle, so the listener can only start after the connection
//! succeeded.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::HttpConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::store::Store;

use super::handlers::{self, ApiState};

/// HTTP server for the movie collection API
pub struct ApiServer {
    config: HttpConfig,
    router: Router,
}

impl ApiServer {
    /// Create a server over a connected store
    pub fn new(config: HttpConfig, store: &Store) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the Axum router
    fn build_router(config: &HttpConfig, store: &Store) -> Router {
        let state = Arc::new(ApiState::new(store.collection("movies")));

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // If no origins configured, use permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(handlers::health))
            .route("/movies", get(handlers::list_movies))
            .route("/movies", post(handlers::create_movie))
            .route("/movies/{id}", get(handlers::get_movie))
            .route("/movies/{id}", patch(handlers::update_movie))
            .route("/movies/{id}", delete(handlers::delete_movie))
            .with_state(state)
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for in-process testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the listener and serve until the process exits
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("addr", self.config.socket_addr().as_str())]);

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    async fn connected_store() -> Store {
        Store::connect(StoreConfig::default()).await.unwrap()
    }

    #[tokio::test]
    async fn test_router_builds() {
        let store = connected_store().await;
        let server = ApiServer::new(HttpConfig::default(), &store);
        let _router = server.router();
        // If we get here, router construction succeeded
    }

    #[tokio::test]
    async fn test_socket_addr_from_config() {
        let store = connected_store().await;
        let server = ApiServer::new(HttpConfig::with_port(8080), &store);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_router_builds_with_cors_origins() {
        let store = connected_store().await;
        let config = HttpConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = ApiServer::new(config, &store).router();
    }
}
