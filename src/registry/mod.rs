//! Route registry
//!
//! The explicit table that replaces metadata scanning: every multipart route
//! is registered once at startup, either from a controller's marker table
//! ([`RouteRegistry::controller`]) or by hand ([`RouteRegistry::register`],
//! [`RouteRegistry::route`]). Registration problems surface here as errors so
//! startup can abort before the server binds.

use crate::config::DispatcherConfig;
use crate::error::{FormRouteError, Result};
use crate::marker::{MultipartRoutes, RouteMarker};
use crate::multipart::MultipartForm;
use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;

const ANONYMOUS_HANDLER: &str = "<anonymous>";

/// A handler that receives a fully decoded multipart form.
#[async_trait]
pub trait MultipartHandler: Send + Sync + 'static {
    async fn handle(&self, form: MultipartForm) -> Response;
}

#[async_trait]
impl<F, Fut, R> MultipartHandler for F
where
    F: Fn(MultipartForm) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    async fn handle(&self, form: MultipartForm) -> Response {
        (self)(form).await.into_response()
    }
}

#[derive(Clone)]
pub(crate) struct RouteEntry {
    pub(crate) marker: RouteMarker,
    pub(crate) handler: Arc<dyn MultipartHandler>,
}

/// Path → handler table for multipart routes.
///
/// # Example
///
/// ```rust,ignore
/// use formroute::prelude::*;
///
/// let mut registry = RouteRegistry::new();
/// registry
///     .controller(Arc::new(UploadController::default()))?
///     .route("/ping", |form: MultipartForm| async move { form.len().to_string() })?;
///
/// let app: Router = registry.into_router();
/// ```
pub struct RouteRegistry {
    routes: DashMap<String, RouteEntry>,
    config: DispatcherConfig,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            routes: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Register `handler` under the path carried by `marker`.
    pub fn register<H>(&mut self, marker: RouteMarker, handler: H) -> Result<&mut Self>
    where
        H: MultipartHandler,
    {
        validate_path(marker.path())?;

        if let Some(existing) = self.routes.get(marker.path()) {
            return Err(FormRouteError::DuplicateRoute {
                path: marker.path().to_string(),
                existing: existing.marker.handler().to_string(),
                handler: marker.handler().to_string(),
            });
        }

        tracing::info!(path = marker.path(), handler = marker.handler(), "Registered multipart route");
        self.routes.insert(
            marker.path().to_string(),
            RouteEntry {
                marker,
                handler: Arc::new(handler),
            },
        );
        Ok(self)
    }

    /// Register a handler that has no marker of its own.
    pub fn route<H>(&mut self, path: &'static str, handler: H) -> Result<&mut Self>
    where
        H: MultipartHandler,
    {
        self.register(RouteMarker::new(path, ANONYMOUS_HANDLER), handler)
    }

    /// Register every marked method of a controller.
    pub fn controller<C>(&mut self, controller: Arc<C>) -> Result<&mut Self>
    where
        C: MultipartRoutes,
    {
        tracing::debug!(
            controller = std::any::type_name::<C>(),
            routes = C::MARKERS.len(),
            "Registering controller"
        );
        controller.register(self)?;
        Ok(self)
    }

    /// Registered markers, sorted by path.
    pub fn markers(&self) -> Vec<RouteMarker> {
        let mut markers: Vec<RouteMarker> = self.routes.iter().map(|e| e.marker).collect();
        markers.sort_by_key(|m| m.path());
        markers
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<RouteEntry>, DispatcherConfig) {
        let mut entries: Vec<RouteEntry> = self.routes.into_iter().map(|(_, e)| e).collect();
        entries.sort_by_key(|e| e.marker.path());
        (entries, self.config)
    }
}

/// Paths are matched literally, so anything the router would treat as a
/// capture or wildcard is refused.
fn validate_path(path: &str) -> Result<()> {
    let reason = if path.is_empty() {
        "path is empty"
    } else if !path.starts_with('/') {
        "path must start with '/'"
    } else if path.contains(['{', '}']) || path.split('/').any(|s| s.starts_with(':')) {
        "path captures are not supported"
    } else if path.contains('*') {
        "wildcards are not supported"
    } else {
        return Ok(());
    };

    Err(FormRouteError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}
