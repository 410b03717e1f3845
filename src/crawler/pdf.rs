//! Inline PDF text extraction
//!
//! Pure-Rust PDF handling via `lopdf`. Only resources already fetched
//! inline are attempted here; classification of download-only resources
//! happens before the bytes ever reach this module.
//!
//! Extraction failures are never fatal to the page the PDF was found on:
//! the caller records a skip for the PDF itself and produces the page
//! record without `pdf_text`.

use crate::record::SkipReason;
use lopdf::Document;
use thiserror::Error;

/// Why a PDF resource was skipped instead of contributing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PdfSkipReason {
    #[error("PDF is password protected")]
    PasswordProtected,

    #[error("PDF could not be decoded")]
    Corrupt,

    #[error("PDF requires an explicit download step")]
    DownloadRequired,
}

impl From<PdfSkipReason> for SkipReason {
    fn from(reason: PdfSkipReason) -> Self {
        match reason {
            PdfSkipReason::PasswordProtected => SkipReason::PdfPasswordProtected,
            PdfSkipReason::Corrupt => SkipReason::PdfCorrupt,
            PdfSkipReason::DownloadRequired => SkipReason::PdfDownloadRequired,
        }
    }
}

/// Extracts text from an inline PDF resource
///
/// Classification:
/// - bytes that do not decode as a PDF document → `Corrupt`
/// - an encrypted document → `PasswordProtected`
/// - text extraction failing on a structurally valid document → `Corrupt`
///
/// A well-formed PDF with no text at all (e.g. scanned images) returns
/// `Ok` with an empty string; that is not a failure, it just contributes
/// no `pdf_text`.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfSkipReason> {
    let document = Document::load_mem(bytes).map_err(|_| PdfSkipReason::Corrupt)?;

    if document.trailer.get(b"Encrypt").is_ok() {
        return Err(PdfSkipReason::PasswordProtected);
    }

    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }

    let text = document
        .extract_text(&pages)
        .map_err(|_| PdfSkipReason::Corrupt)?;

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Builds a minimal single-page PDF containing the given text
    fn pdf_with_text(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_extracts_text_from_valid_pdf() {
        let bytes = pdf_with_text("Annual meeting minutes");
        let text = extract_pdf_text(&bytes).unwrap();
        assert!(text.contains("Annual meeting minutes"));
    }

    #[test]
    fn test_garbage_bytes_are_corrupt() {
        let result = extract_pdf_text(b"this is not a pdf at all");
        assert_eq!(result.unwrap_err(), PdfSkipReason::Corrupt);
    }

    #[test]
    fn test_truncated_pdf_is_corrupt() {
        let mut bytes = pdf_with_text("Some document text here");
        bytes.truncate(40);
        let result = extract_pdf_text(&bytes);
        assert_eq!(result.unwrap_err(), PdfSkipReason::Corrupt);
    }

    #[test]
    fn test_encrypted_pdf_is_password_protected() {
        let mut doc = Document::load_mem(&pdf_with_text("Hidden text")).unwrap();
        doc.trailer.set(
            "Encrypt",
            dictionary! { "Filter" => "Standard", "V" => 1, "R" => 2 },
        );

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();

        let result = extract_pdf_text(&bytes);
        assert_eq!(result.unwrap_err(), PdfSkipReason::PasswordProtected);
    }

    #[test]
    fn test_skip_reason_conversion() {
        assert_eq!(
            SkipReason::from(PdfSkipReason::PasswordProtected),
            SkipReason::PdfPasswordProtected
        );
        assert_eq!(SkipReason::from(PdfSkipReason::Corrupt), SkipReason::PdfCorrupt);
        assert_eq!(
            SkipReason::from(PdfSkipReason::DownloadRequired),
            SkipReason::PdfDownloadRequired
        );
    }
}
