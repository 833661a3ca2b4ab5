use proc_macro::TokenStream;

mod marker;
mod routes;

/// Marks a handler method as accepting `multipart/form-data` posts at the
/// given path.
///
/// The marker itself does nothing: `#[multipart_routes]` on the enclosing
/// impl block reads it, records it in `MultipartRoutes::MARKERS` and
/// generates the registration code. The path is kept exactly as written.
///
/// # Example
/// ```rust,ignore
/// #[multipart_routes]
/// impl UploadController {
///     #[post_multipart("/upload")]
///     async fn handle_upload(&self, file: FormPart) -> ApiResponse<usize> {
///         // ...
///     }
///
///     #[post_multipart(path = "/admin/request-join")]
///     async fn request_join(&self, invite: String) -> ApiResponse<JoinReceipt> {
///         // ...
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn post_multipart(attr: TokenStream, item: TokenStream) -> TokenStream {
    marker::post_multipart_attribute(attr, item)
}

/// Attribute macro for collecting `#[post_multipart]` methods in an impl block
///
/// Every other argument of a marked method is bound to the form part with
/// the same name through `FromMultipart`; use `#[part("...")]` when the part
/// name is not a valid identifier.
///
/// # Example
/// ```rust,ignore
/// #[multipart_routes]
/// impl ChaincodeController {
///     #[post_multipart("/admin/upload-chaincode")]
///     async fn upload(
///         &self,
///         #[part("chaincode-file")] package: FormPart,
///         version: String,
///     ) -> ApiResponse<ChaincodeReceipt> {
///         // ...
///     }
/// }
///
/// let mut registry = RouteRegistry::new();
/// registry.controller(Arc::new(ChaincodeController::default()))?;
/// ```
#[proc_macro_attribute]
pub fn multipart_routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    routes::multipart_routes_attribute(attr, item)
}

/// Parameter attribute naming the form part an argument binds to
#[proc_macro_attribute]
pub fn part(_attr: TokenStream, item: TokenStream) -> TokenStream {
    // Pass-through, actual handling is done by #[multipart_routes]
    item
}
