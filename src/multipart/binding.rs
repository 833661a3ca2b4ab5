//! Binding form parts to handler arguments
//!
//! `#[multipart_routes]` turns every argument of a marked method into a call
//! to [`FromMultipart::from_multipart`], passing the argument name (or the
//! `#[part("...")]` override) as the part name.

use super::{FormPart, MultipartForm};
use crate::error::{FormRouteError, Result};
use axum::body::Bytes;

/// Types that can be extracted from a decoded form by part name.
pub trait FromMultipart: Sized {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self>;
}

fn required<'a>(form: &'a MultipartForm, name: &str) -> Result<&'a FormPart> {
    form.get(name).ok_or_else(|| FormRouteError::MissingPart {
        name: name.to_string(),
    })
}

/// The whole form; the name is ignored.
impl FromMultipart for MultipartForm {
    fn from_multipart(form: &MultipartForm, _name: &str) -> Result<Self> {
        Ok(form.clone())
    }
}

impl FromMultipart for FormPart {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self> {
        required(form, name).cloned()
    }
}

impl FromMultipart for Bytes {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self> {
        // Bytes clones are refcounted, not copied.
        required(form, name).map(|part| part.data.clone())
    }
}

impl FromMultipart for String {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self> {
        required(form, name)?.text().map(str::to_owned)
    }
}

/// Every part with the given name; empty when none was sent.
impl FromMultipart for Vec<FormPart> {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self> {
        Ok(form.get_all(name).cloned().collect())
    }
}

impl<T: FromMultipart> FromMultipart for Option<T> {
    fn from_multipart(form: &MultipartForm, name: &str) -> Result<Self> {
        if form.contains(name) {
            T::from_multipart(form, name).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MultipartForm {
        MultipartForm::new()
            .with_part(FormPart::new("invite", "{\"network\":\"test_net\"}"))
            .with_part(FormPart::new("file", &b"abc"[..]).with_file_name("a.bin"))
            .with_part(FormPart::new("file", &b"def"[..]).with_file_name("b.bin"))
            .with_part(FormPart::new("broken", vec![0xc3u8, 0x28]))
    }

    #[test]
    fn test_bind_text_and_bytes() {
        let form = form();
        let invite = String::from_multipart(&form, "invite").unwrap();
        assert_eq!(invite, "{\"network\":\"test_net\"}");

        let bytes = Bytes::from_multipart(&form, "file").unwrap();
        assert_eq!(&bytes[..], b"abc");
    }

    #[test]
    fn test_bind_repeated_parts() {
        let form = form();
        let files = Vec::<FormPart>::from_multipart(&form, "file").unwrap();
        let names: Vec<_> = files.iter().filter_map(|f| f.file_name.as_deref()).collect();
        assert_eq!(names, vec!["a.bin", "b.bin"]);

        let none = Vec::<FormPart>::from_multipart(&form, "absent").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_bind_optional() {
        let form = form();
        assert_eq!(Option::<String>::from_multipart(&form, "absent").unwrap(), None);
        assert!(Option::<FormPart>::from_multipart(&form, "file").unwrap().is_some());
        // Present but undecodable is still an error.
        assert!(Option::<String>::from_multipart(&form, "broken").is_err());
    }

    #[test]
    fn test_missing_required_part() {
        let err = String::from_multipart(&form(), "absent").unwrap_err();
        assert!(matches!(err, FormRouteError::MissingPart { name } if name == "absent"));
    }

    #[test]
    fn test_whole_form() {
        let whole = MultipartForm::from_multipart(&form(), "ignored").unwrap();
        assert_eq!(whole.len(), 4);
    }
}
