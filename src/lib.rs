//! # formroute
//!
//! Multipart form routes for axum, declared with a method attribute.
//!
//! A handler method is tagged with `#[post_multipart("/path")]`. The
//! `#[multipart_routes]` attribute on the surrounding impl block collects
//! those tags into a static [`RouteMarker`] table and generates the code that
//! registers each method in a [`RouteRegistry`]. The registry is an explicit
//! path → handler table, built once at startup and turned into an
//! `axum::Router`.
//!
//! ## Features
//!
//! - **Route markers**: inert `'static` metadata, readable through [`MultipartRoutes::MARKERS`]
//! - **Part binding**: handler arguments are bound to form parts by name
//! - **Startup validation**: duplicate or unusable paths fail registration
//! - **Per-request errors**: wrong content type, malformed bodies and missing parts become JSON error responses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formroute::prelude::*;
//!
//! #[derive(Default)]
//! pub struct UploadController;
//!
//! #[multipart_routes]
//! impl UploadController {
//!     #[post_multipart("/upload")]
//!     async fn handle_upload(&self, title: String, file: FormPart) -> ApiResponse<usize> {
//!         tracing::info!(%title, "received upload");
//!         ApiResponse::created(file.len())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> formroute::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!
//!     let mut registry = RouteRegistry::with_config(config.dispatcher.clone());
//!     registry.controller(Arc::new(UploadController))?;
//!
//!     formroute::server::serve(registry.into_router(), &config).await
//! }
//! ```

pub mod common;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod marker;
pub mod multipart;
pub mod registry;
pub mod server;

// Re-export core types
pub use common::ApiResponse;
pub use config::{ConfigService, DispatcherConfig, ServerConfig};
pub use error::{FormRouteError, Result};
pub use marker::{MultipartRoutes, RouteMarker};
pub use multipart::{FormPart, FromMultipart, MultipartForm};
pub use registry::{MultipartHandler, RouteRegistry};

// Re-export macros
pub use formroute_macro::{multipart_routes, part, post_multipart};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use formroute::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ApiResponse, StatusCode};
    pub use crate::config::{ConfigService, DispatcherConfig, ServerConfig};
    pub use crate::error::{FormRouteError, Result};
    pub use crate::marker::{MultipartRoutes, RouteMarker};
    pub use crate::multipart::{FormPart, FromMultipart, MultipartForm};
    pub use crate::registry::{MultipartHandler, RouteRegistry};
    pub use crate::server::shutdown_signal;
    pub use crate::{multipart_routes, part, post_multipart};
    pub use axum::{
        Router,
        body::Bytes,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
