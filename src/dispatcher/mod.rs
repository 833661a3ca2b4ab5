//! Dispatcher
//!
//! Turns a [`RouteRegistry`] into an `axum::Router`. Each registered path
//! becomes a `POST` route that checks the content type, decodes the body into
//! a [`MultipartForm`] and hands it to the registered handler. Failures are
//! answered per request and never take the server down.

use crate::error::{FormRouteError, Result};
use crate::marker::RouteMarker;
use crate::multipart::MultipartForm;
use crate::registry::{RouteEntry, RouteRegistry};
use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request},
    http::{Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::post,
};

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

impl RouteRegistry {
    /// Build a router serving every registered route.
    ///
    /// Requests to unregistered paths get a JSON 404; other methods on a
    /// registered path get axum's 405.
    pub fn into_router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let (entries, config) = self.into_parts();
        let mut router = Router::new();

        for entry in entries {
            let path = entry.marker.path();
            router = router.route(
                path,
                post(move |request: Request| {
                    let entry = entry.clone();
                    async move { dispatch(entry, request).await }
                }),
            );
        }

        router
            .fallback(route_not_found)
            .layer(DefaultBodyLimit::max(config.body_limit))
    }
}

async fn dispatch(entry: RouteEntry, request: Request) -> Response {
    let marker = entry.marker;
    match read_form(request).await {
        Ok(form) => {
            tracing::debug!(
                path = marker.path(),
                handler = marker.handler(),
                parts = form.len(),
                "Dispatching multipart request"
            );
            entry.handler.handle(form).await
        }
        Err(err) => reject(&marker, err),
    }
}

async fn read_form(request: Request) -> Result<MultipartForm> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !is_multipart(&content_type) {
        return Err(FormRouteError::UnsupportedContentType {
            content_type: if content_type.is_empty() {
                "<none>".to_string()
            } else {
                content_type
            },
        });
    }

    let multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| FormRouteError::MalformedBody(rejection.body_text()))?;
    MultipartForm::decode(multipart).await
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(MULTIPART_FORM_DATA))
        .unwrap_or(false)
}

/// Log a request-time failure and render it.
///
/// Used by the dispatcher and by code generated for `#[multipart_routes]`
/// when an argument cannot be bound.
#[doc(hidden)]
pub fn reject(marker: &RouteMarker, err: FormRouteError) -> Response {
    tracing::warn!(
        path = marker.path(),
        handler = marker.handler(),
        error = %err,
        "Rejected multipart request"
    );
    err.into_response()
}

async fn route_not_found(uri: Uri) -> Response {
    tracing::warn!(path = uri.path(), "No multipart route matched");
    FormRouteError::RouteNotFound {
        path: uri.path().to_string(),
    }
    .into_response()
}
