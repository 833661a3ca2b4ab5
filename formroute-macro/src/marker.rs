use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, LitStr, Token,
};

pub const MARKER_ATTR: &str = "post_multipart";
pub const PART_ATTR: &str = "part";

/// Arguments of `#[post_multipart(...)]`: either `"/path"` or `path = "/path"`.
pub struct MarkerArgs {
    pub path: LitStr,
}

impl Parse for MarkerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error(
                "expected a route path, e.g. #[post_multipart(\"/upload\")]",
            ));
        }

        let path = if input.peek(LitStr) {
            input.parse()?
        } else {
            let name: syn::Ident = input.parse()?;
            if name != "path" {
                return Err(syn::Error::new(
                    name.span(),
                    format!("unknown argument `{}`, expected `path`", name),
                ));
            }
            input.parse::<Token![=]>()?;
            input.parse()?
        };

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("#[post_multipart] takes a single route path"));
        }
        Ok(MarkerArgs { path })
    }
}

/// Standalone use: validate the arguments, leave the method untouched.
/// Inside `#[multipart_routes]` the marker is consumed before this runs.
pub fn post_multipart_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _args = parse_macro_input!(attr as MarkerArgs);
    let input = parse_macro_input!(item as syn::ImplItemFn);

    TokenStream::from(quote! {
        #input
    })
}

/// Matches `#[post_multipart]` and path-qualified forms like
/// `#[formroute::post_multipart]`.
pub fn is_marker_attr(attr: &Attribute) -> bool {
    last_segment_is(attr, MARKER_ATTR)
}

pub fn is_part_attr(attr: &Attribute) -> bool {
    last_segment_is(attr, PART_ATTR)
}

fn last_segment_is(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .segments
        .last()
        .map_or(false, |segment| segment.ident == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_bare_literal() {
        let args: MarkerArgs = syn::parse_str("\"/upload\"").unwrap();
        assert_eq!(args.path.value(), "/upload");
    }

    #[test]
    fn test_parse_named_path() {
        let args: MarkerArgs = syn::parse_str("path = \"/admin/request-join\",").unwrap();
        assert_eq!(args.path.value(), "/admin/request-join");
    }

    #[test]
    fn test_empty_string_is_accepted() {
        let args: MarkerArgs = syn::parse_str("\"\"").unwrap();
        assert_eq!(args.path.value(), "");
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(syn::parse_str::<MarkerArgs>("").is_err());
        assert!(syn::parse_str::<MarkerArgs>("route = \"/x\"").is_err());
        assert!(syn::parse_str::<MarkerArgs>("\"/a\", \"/b\"").is_err());
        assert!(syn::parse_str::<MarkerArgs>("42").is_err());
    }

    #[test]
    fn test_attr_matching() {
        let plain: Attribute = parse_quote!(#[post_multipart("/x")]);
        let qualified: Attribute = parse_quote!(#[formroute::post_multipart("/x")]);
        let other: Attribute = parse_quote!(#[doc = "x"]);
        assert!(is_marker_attr(&plain));
        assert!(is_marker_attr(&qualified));
        assert!(!is_marker_attr(&other));
    }
}
