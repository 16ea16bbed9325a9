use lopdf::Document;

use crate::{
    errors::{AppError, AppResult},
    services::page_selector::select_pages,
};

/// Anything that can hand out plain text per zero-based page index.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn page_text(&self, index: usize) -> AppResult<String>;
}

/// A PDF opened from an in-memory upload. Dropping it releases the parsed document.
pub struct PdfDocument {
    document: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    pub fn open(bytes: &[u8]) -> AppResult<Self> {
        let document = Document::load_mem(bytes)?;
        let page_numbers = document.get_pages().into_keys().collect();

        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> AppResult<String> {
        let page_number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Page {} not found", index + 1)))?;

        Ok(self.document.extract_text(&[page_number])?)
    }
}

impl Drop for PdfDocument {
    fn drop(&mut self) {
        log::debug!("Closed PDF document ({} pages)", self.page_numbers.len());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub total_pages: usize,
    pub selected_pages: Vec<usize>,
    pub text: String,
}

/// Concatenates the text of `pages` in the given order, with no separator.
/// Pages whose text cannot be decoded contribute nothing.
pub fn extract_text(source: &dyn PageSource, pages: &[usize]) -> String {
    let mut text = String::new();

    for &index in pages {
        match source.page_text(index) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => log::warn!("Skipping page {}: {}", index + 1, e),
        }
    }

    text
}

/// Opens an uploaded PDF, resolves the page range and extracts the selected text.
/// The document is released before this returns, on success or failure.
pub fn extract_selected_text(bytes: &[u8], range_expr: Option<&str>) -> AppResult<ExtractedText> {
    let document = PdfDocument::open(bytes)?;
    let total_pages = document.page_count();
    let selected_pages = select_pages(range_expr, total_pages);
    let text = extract_text(&document, &selected_pages);
    drop(document);

    log::info!(
        "Extracted {} characters from {} of {} pages",
        text.chars().count(),
        selected_pages.len(),
        total_pages
    );

    Ok(ExtractedText {
        total_pages,
        selected_pages,
        text,
    })
}
