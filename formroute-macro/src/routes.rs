use crate::marker::{is_marker_attr, is_part_attr, MarkerArgs};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat};

struct ArgInfo {
    part_name: String,
    ty: syn::Type,
}

struct RouteInfo {
    path: LitStr,
    fn_name: syn::Ident,
    args: Vec<ArgInfo>,
}

pub fn multipart_routes_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = TokenStream2::from(attr);
    if !attr.is_empty() {
        return syn::Error::new(attr.span(), "#[multipart_routes] takes no arguments")
            .to_compile_error()
            .into();
    }
    let input = syn::parse_macro_input!(item as ItemImpl);
    match expand_routes(input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

pub(crate) fn expand_routes(mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[multipart_routes] must be placed on an inherent impl block",
        ));
    }

    let mut routes: Vec<RouteInfo> = Vec::new();
    for item in input.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            match extract_route_info(method)? {
                Some(route) => {
                    routes.push(route);
                    strip_route_attrs(method);
                }
                None => reject_stray_part_attrs(method)?,
            }
        }
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let markers = routes.iter().map(|route| {
        let path = &route.path;
        let fn_name = route.fn_name.to_string();
        quote! { ::formroute::RouteMarker::new(#path, #fn_name) }
    });

    let registrations = routes.iter().enumerate().map(|(index, route)| {
        let fn_name = &route.fn_name;
        let arg_idents: Vec<_> = (0..route.args.len())
            .map(|i| format_ident!("__arg_{}", i))
            .collect();
        let bindings = route.args.iter().zip(&arg_idents).map(|(arg, ident)| {
            let ty = &arg.ty;
            let part_name = &arg.part_name;
            quote! {
                let #ident = match <#ty as ::formroute::FromMultipart>::from_multipart(&__form, #part_name) {
                    Ok(value) => value,
                    Err(err) => return ::formroute::dispatcher::reject(&__marker, err),
                };
            }
        });

        quote! {
            {
                let __controller = ::std::sync::Arc::clone(&self);
                let __marker = <Self as ::formroute::MultipartRoutes>::MARKERS[#index];
                registry.register(__marker, move |__form: ::formroute::MultipartForm| {
                    let __controller = ::std::sync::Arc::clone(&__controller);
                    async move {
                        use ::formroute::axum::response::IntoResponse;
                        #(#bindings)*
                        __controller.#fn_name(#(#arg_idents),*).await.into_response()
                    }
                })?;
            }
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::formroute::MultipartRoutes for #self_ty #where_clause {
            const MARKERS: &'static [::formroute::RouteMarker] = &[#(#markers),*];

            #[allow(unused_variables)]
            fn register(
                self: ::std::sync::Arc<Self>,
                registry: &mut ::formroute::RouteRegistry,
            ) -> ::formroute::Result<()> {
                #(#registrations)*
                Ok(())
            }
        }
    })
}

fn extract_route_info(method: &ImplItemFn) -> syn::Result<Option<RouteInfo>> {
    let mut markers = method.attrs.iter().filter(|attr| is_marker_attr(attr));
    let Some(marker) = markers.next() else {
        return Ok(None);
    };
    if let Some(duplicate) = markers.next() {
        return Err(syn::Error::new(
            duplicate.span(),
            format!(
                "`{}` already has a #[post_multipart] marker; a method can carry only one",
                method.sig.ident
            ),
        ));
    }

    let MarkerArgs { path } = marker.parse_args()?;
    let sig = &method.sig;

    if sig.asyncness.is_none() {
        return Err(syn::Error::new(
            sig.fn_token.span(),
            "#[post_multipart] handlers must be `async fn`",
        ));
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        Some(other) => {
            return Err(syn::Error::new(
                other.span(),
                "#[post_multipart] handlers must take `&self`",
            ))
        }
        None => {
            return Err(syn::Error::new(
                sig.ident.span(),
                "#[post_multipart] handlers must take `&self`",
            ))
        }
    }

    let mut args = Vec::new();
    for input in inputs {
        let FnArg::Typed(pat_type) = input else {
            return Err(syn::Error::new(input.span(), "unexpected receiver"));
        };
        let part_name = match part_override(&pat_type.attrs)? {
            Some(name) => name,
            None => match &*pat_type.pat {
                Pat::Ident(pat_ident) => pat_ident.ident.unraw().to_string(),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "bind form parts to plain identifiers, or name the part with #[part(\"...\")]",
                    ))
                }
            },
        };
        if !matches!(&*pat_type.pat, Pat::Ident(_)) {
            return Err(syn::Error::new(
                pat_type.pat.span(),
                "handler arguments must be plain identifiers",
            ));
        }
        args.push(ArgInfo {
            part_name,
            ty: (*pat_type.ty).clone(),
        });
    }

    Ok(Some(RouteInfo {
        path,
        fn_name: sig.ident.clone(),
        args,
    }))
}

/// `#[part("name")]` on an argument overrides the part it binds to.
fn part_override(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    match attrs.iter().find(|attr| is_part_attr(attr)) {
        Some(attr) => Ok(Some(attr.parse_args::<LitStr>()?.value())),
        None => Ok(None),
    }
}

/// `#[part]` only means something on a marked handler; rustc would otherwise
/// report it as an attribute macro on a parameter.
fn reject_stray_part_attrs(method: &ImplItemFn) -> syn::Result<()> {
    for input in &method.sig.inputs {
        if let FnArg::Typed(pat_type) = input {
            if let Some(attr) = pat_type.attrs.iter().find(|attr| is_part_attr(attr)) {
                return Err(syn::Error::new(
                    attr.span(),
                    format!(
                        "#[part] needs a #[post_multipart] marker on `{}`",
                        method.sig.ident
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn strip_route_attrs(method: &mut ImplItemFn) {
    method.attrs.retain(|attr| !is_marker_attr(attr));
    for input in method.sig.inputs.iter_mut() {
        if let FnArg::Typed(pat_type) = input {
            pat_type.attrs.retain(|attr| !is_part_attr(attr));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(input: ItemImpl) -> syn::Result<String> {
        expand_routes(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_collects_markers_in_order() {
        let output = expand(parse_quote! {
            impl Uploads {
                #[post_multipart("/upload")]
                async fn handle_upload(&self, file: FormPart) -> StatusCode { todo!() }

                fn helper(&self) {}

                #[post_multipart(path = "/admin/request-join")]
                async fn request_join(&self, #[part("invite-file")] invite: String) -> StatusCode { todo!() }
            }
        })
        .unwrap();

        let upload = output.find("\"/upload\"").unwrap();
        let join = output.find("\"/admin/request-join\"").unwrap();
        assert!(upload < join);
        assert!(output.contains("\"invite-file\""));
        assert!(!output.contains("post_multipart"));
        assert!(!output.contains("# [part"));
    }

    #[test]
    fn test_rejects_duplicate_marker() {
        let err = expand(parse_quote! {
            impl Uploads {
                #[post_multipart("/a")]
                #[post_multipart("/b")]
                async fn twice(&self) -> StatusCode { todo!() }
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only one"));
    }

    #[test]
    fn test_rejects_sync_handler() {
        let err = expand(parse_quote! {
            impl Uploads {
                #[post_multipart("/a")]
                fn sync(&self) -> StatusCode { todo!() }
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("async fn"));
    }

    #[test]
    fn test_rejects_missing_receiver() {
        let err = expand(parse_quote! {
            impl Uploads {
                #[post_multipart("/a")]
                async fn free(form: MultipartForm) -> StatusCode { todo!() }
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("&self"));
    }

    #[test]
    fn test_rejects_destructured_argument() {
        let err = expand(parse_quote! {
            impl Uploads {
                #[post_multipart("/a")]
                async fn pair(&self, (a, b): (String, String)) -> StatusCode { todo!() }
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("identifiers"));
    }

    #[test]
    fn test_rejects_missing_path() {
        assert!(expand(parse_quote! {
            impl Uploads {
                #[post_multipart]
                async fn nothing(&self) -> StatusCode { todo!() }
            }
        })
        .is_err());
    }

    #[test]
    fn test_rejects_part_on_unmarked_method() {
        let err = expand(parse_quote! {
            impl Uploads {
                async fn helper(&self, #[part("chaincode-file")] package: FormPart) {}
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("#[part] needs a #[post_multipart] marker"));
        assert!(err.to_string().contains("helper"));
    }

    #[test]
    fn test_impl_without_markers() {
        let output = expand(parse_quote! {
            impl Uploads {
                fn helper(&self) {}
            }
        })
        .unwrap();
        assert!(output.contains("MARKERS"));
    }
}
