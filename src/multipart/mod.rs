//! Decoded multipart forms
//!
//! The dispatcher reads every field of an incoming `multipart/form-data`
//! body into a [`MultipartForm`] before the handler runs, so handlers and the
//! [`FromMultipart`] impls only ever see fully buffered parts.

use crate::error::{FormRouteError, Result};
use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode as HttpStatusCode;

pub mod binding;

pub use binding::FromMultipart;

/// One named part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the client sent this part as a file upload.
    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The part body as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.data).map_err(|e| FormRouteError::InvalidPart {
            name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}

/// All parts of a decoded multipart body, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain an axum multipart extractor, buffering every field.
    pub async fn decode(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::new();
        while let Some(field) = multipart.next_field().await.map_err(decode_error)? {
            let name = field
                .name()
                .map(str::to_owned)
                .ok_or_else(|| FormRouteError::MalformedBody("form part without a name".into()))?;
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let data = field.bytes().await.map_err(decode_error)?;

            tracing::trace!(part = %name, bytes = data.len(), "decoded form part");
            form.push(FormPart {
                name,
                file_name,
                content_type,
                data,
            });
        }
        Ok(form)
    }

    pub fn push(&mut self, part: FormPart) -> &mut Self {
        self.parts.push(part);
        self
    }

    pub fn with_part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    /// First part named `name`.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Every part named `name`, in submission order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormPart> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| FormRouteError::MissingPart { name: name.to_string() })?
            .text()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Distinct part names, first occurrence first.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in &self.parts {
            if !names.contains(&part.name.as_str()) {
                names.push(&part.name);
            }
        }
        names
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromIterator<FormPart> for MultipartForm {
    fn from_iter<I: IntoIterator<Item = FormPart>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

fn decode_error(err: MultipartError) -> FormRouteError {
    if err.status() == HttpStatusCode::PAYLOAD_TOO_LARGE {
        FormRouteError::PayloadTooLarge(err.body_text())
    } else {
        FormRouteError::MalformedBody(err.body_text())
    }
}
