use std::path::{ Path, PathBuf };

use log::{ debug, info };

use crate::errors::{ FactCheckError, FactCheckResult };
use crate::traits::document_loader::DocumentLoader;

/// PDF text loader using the pdf-extract crate.
/// Handles digital PDFs with an embedded text layer; scanned pages yield empty text.
pub struct PdfDocumentLoader;

impl DocumentLoader for PdfDocumentLoader {
    fn load(&self, bytes: &[u8]) -> FactCheckResult<String> {
        let pages = pdf_extract
            ::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| FactCheckError::LoadError(format!("Unreadable PDF: {}", e)))?;

        let empty_pages = pages
            .iter()
            .filter(|p| p.trim().is_empty())
            .count();
        info!("Extracted text from {} PDF pages", pages.len());
        if empty_pages > 0 {
            debug!("{} pages had no extractable text", empty_pages);
        }

        Ok(pages.concat())
    }

    fn format_name(&self) -> &'static str {
        "pdf"
    }
}

/// Loader for plain-text and Markdown documents
pub struct TextDocumentLoader;

impl DocumentLoader for TextDocumentLoader {
    fn load(&self, bytes: &[u8]) -> FactCheckResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e|
            FactCheckError::LoadError(format!("Document is not valid UTF-8 text: {}", e))
        )
    }

    fn format_name(&self) -> &'static str {
        "text"
    }
}

/// Pick a loader from the file extension; anything that is not text is treated as PDF
pub fn loader_for_path(path: &Path) -> Box<dyn DocumentLoader> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("txt") | Some("md") | Some("markdown") => Box::new(TextDocumentLoader),
        _ => Box::new(PdfDocumentLoader),
    }
}

/// An uploaded document: its identifier and raw bytes
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl DocumentSource {
    pub fn from_path(path: &Path) -> FactCheckResult<Self> {
        let bytes = std::fs
            ::read(path)
            .map_err(|e| FactCheckError::LoadError(format!("Failed to read {}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, path: path.to_path_buf(), bytes })
    }

    /// Load the document's text with the loader matching its extension
    pub fn load_text(&self) -> FactCheckResult<String> {
        loader_for_path(&self.path).load(&self.bytes)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a PDF with one page per entry using lopdf (the library pdf-extract uses internally).
    pub(crate) fn make_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        save(build_test_document(page_texts))
    }

    /// Same pages, but protected by a standard security handler whose user
    /// password is not empty, so the text cannot be read without it.
    fn make_encrypted_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{ Object, StringFormat };

        let mut doc = build_test_document(page_texts);
        let hex = |byte: u8| Object::String(vec![byte; 32], StringFormat::Hexadecimal);
        let encrypt_id = doc.add_object(
            dictionary! {
            "Filter" => "Standard",
            "V" => 2,
            "R" => 3,
            "Length" => 128,
            "P" => -3904,
            "O" => hex(0x5a),
            "U" => hex(0xa5),
        }
        );
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set("ID", vec![hex(0x11), hex(0x11)]);
        save(doc)
    }

    fn save(mut doc: lopdf::Document) -> Vec<u8> {
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn build_test_document(page_texts: &[&str]) -> lopdf::Document {
        use lopdf::dictionary;
        use lopdf::{ Document, Object, Stream };

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(
            dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }
        );
        let resources_id = doc.add_object(
            dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        }
        );

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", text)
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(
                dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            }
            );
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(
                dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }
            )
        );

        let catalog_id = doc.add_object(
            dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }
        );
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn pdf_pages_are_concatenated_in_order() {
        let bytes = make_test_pdf(&["Revenue rose 12 percent", "", "Founded in 1998"]);
        let text = PdfDocumentLoader.load(&bytes).unwrap();

        let revenue = text.find("Revenue").expect("first page text missing");
        let founded = text.find("Founded").expect("third page text missing");
        assert!(revenue < founded);
    }

    #[test]
    fn corrupt_pdf_is_a_load_error() {
        let result = PdfDocumentLoader.load(b"%PDF-1.4 this is not really a pdf");
        assert!(matches!(result, Err(FactCheckError::LoadError(_))));
    }

    #[test]
    fn encrypted_pdf_is_a_load_error() {
        let bytes = make_encrypted_test_pdf(&["Payroll grew 4 percent"]);
        let result = PdfDocumentLoader.load(&bytes);
        assert!(matches!(result, Err(FactCheckError::LoadError(_))));
    }

    #[test]
    fn text_loader_rejects_invalid_utf8() {
        assert_eq!(TextDocumentLoader.load(b"Inflation hit 3.2%").unwrap(), "Inflation hit 3.2%");
        assert!(matches!(TextDocumentLoader.load(&[0xff, 0xfe, 0x00]), Err(FactCheckError::LoadError(_))));
    }

    #[test]
    fn loader_is_chosen_by_extension() {
        assert_eq!(loader_for_path(Path::new("notes.MD")).format_name(), "text");
        assert_eq!(loader_for_path(Path::new("report.pdf")).format_name(), "pdf");
        assert_eq!(loader_for_path(Path::new("no_extension")).format_name(), "pdf");
    }

    #[test]
    fn document_source_reads_file_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.txt");
        std::fs::write(&path, "The bridge opened in 1937.").unwrap();

        let source = DocumentSource::from_path(&path).unwrap();
        assert_eq!(source.name, "brief.txt");
        assert_eq!(source.load_text().unwrap(), "The bridge opened in 1937.");

        let missing = DocumentSource::from_path(&dir.path().join("missing.pdf"));
        assert!(matches!(missing, Err(FactCheckError::LoadError(_))));
    }
}
