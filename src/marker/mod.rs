//! Route markers
//!
//! A [`RouteMarker`] is the value produced by `#[post_multipart("/path")]`.
//! It carries the route path exactly as written, plus the name of the method
//! it was attached to. Markers are plain `'static` data: the macros collect
//! them into a constant table, and nothing ever mutates them.

use crate::error::Result;
use crate::registry::RouteRegistry;
use std::sync::Arc;

/// Metadata attached to a handler method that accepts multipart form posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteMarker {
    path: &'static str,
    handler: &'static str,
}

impl RouteMarker {
    /// Create a marker for `handler` bound to `path`.
    pub const fn new(path: &'static str, handler: &'static str) -> Self {
        Self { path, handler }
    }

    /// The route path, exactly as given at the attachment site.
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Name of the method carrying this marker.
    pub const fn handler(&self) -> &'static str {
        self.handler
    }
}

impl std::fmt::Display for RouteMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "POST {} -> {}", self.path, self.handler)
    }
}

/// Types whose impl block carries `#[post_multipart]` methods.
///
/// Implemented by the `#[multipart_routes]` attribute; there is normally no
/// reason to implement it by hand.
///
/// # Example
/// ```rust,ignore
/// use formroute::prelude::*;
///
/// pub struct UploadController;
///
/// #[multipart_routes]
/// impl UploadController {
///     #[post_multipart("/upload")]
///     async fn handle_upload(&self, file: FormPart) -> ApiResponse<usize> {
///         ApiResponse::created(file.len())
///     }
/// }
///
/// assert_eq!(UploadController::MARKERS.len(), 1);
/// assert_eq!(UploadController::MARKERS[0].path(), "/upload");
/// ```
pub trait MultipartRoutes: Send + Sync + 'static {
    /// One marker per marked method, in declaration order.
    const MARKERS: &'static [RouteMarker];

    /// Look up the marker attached to the method named `handler`.
    fn marker(handler: &str) -> Option<&'static RouteMarker> {
        Self::MARKERS.iter().find(|m| m.handler() == handler)
    }

    /// Register every marked method of `self` in the registry.
    fn register(self: Arc<Self>, registry: &mut RouteRegistry) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPLOAD: RouteMarker = RouteMarker::new("/upload", "handle_upload");

    #[test]
    fn test_path_is_returned_verbatim() {
        for path in ["/upload", "", "  /spaced  ", "/UPPER/Case/", "no-leading-slash"] {
            let marker = RouteMarker::new(path, "handler");
            assert_eq!(marker.path(), path);
        }
    }

    #[test]
    fn test_const_marker() {
        assert_eq!(UPLOAD.path(), "/upload");
        assert_eq!(UPLOAD.handler(), "handle_upload");
        assert_eq!(UPLOAD.to_string(), "POST /upload -> handle_upload");
    }

    #[test]
    fn test_markers_are_independent() {
        let a = RouteMarker::new("/a", "first");
        let b = RouteMarker::new("/b", "second");
        let copy = a;
        assert_eq!(copy, a);
        assert_ne!(a, b);
        assert_eq!(a.path(), "/a");
        assert_eq!(b.path(), "/b");
    }
}
