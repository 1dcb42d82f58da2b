// WHY: turns pasted text or a PDF into the single linear string the highlight engine consumes
// Page boundaries are not preserved; pages are decoded in order and joined with a paragraph break

use std::path::{Path, PathBuf};

use lopdf::Document as PdfDocument;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Failures surfaced to the user before any highlighting happens
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Please choose a PDF file.")]
    NotPdf,

    #[error("Paste some text or upload a PDF.")]
    EmptyInput,

    #[error("Failed to read PDF: {0}")]
    Decode(#[source] lopdf::Error),

    #[error("Failed to read PDF page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: lopdf::Error,
    },

    #[error("No text could be extracted from this PDF.")]
    NoExtractableText,

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration for document ingestion
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Treat every input as a PDF regardless of extension or magic bytes
    pub force_pdf: bool,
    /// Separator placed between consecutive pages' text
    pub page_separator: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            force_pdf: false,
            page_separator: "\n\n".to_string(),
        }
    }
}

/// Raw input before extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Text(String),
    Pdf(Vec<u8>),
}

/// Progress update emitted after each decoded page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page number just completed
    pub page: usize,
    pub total: usize,
}

/// Text ready for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedText {
    pub text: String,
    /// Number of pages decoded, `None` for pasted text
    pub pages: Option<usize>,
}

/// Loads documents from disk or stdin and extracts their text
pub struct DocumentReader {
    config: IngestConfig,
}

impl DocumentReader {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Read a document from a path, sniffing PDF by extension or magic bytes
    pub async fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Document, IngestError> {
        let path = path.as_ref();
        debug!("Reading document: {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let has_pdf_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        self.classify_bytes(bytes, has_pdf_extension)
    }

    /// Read a document from stdin
    pub async fn read_stdin(&self) -> Result<Document, IngestError> {
        let mut bytes = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut bytes)
            .await
            .map_err(IngestError::Stdin)?;
        self.classify_bytes(bytes, false)
    }

    fn classify_bytes(&self, bytes: Vec<u8>, has_pdf_extension: bool) -> Result<Document, IngestError> {
        if self.config.force_pdf || has_pdf_extension || bytes.starts_with(PDF_MAGIC) {
            return Ok(Document::Pdf(bytes));
        }

        // WHY: binary input that is neither UTF-8 text nor PDF is rejected as an unsupported file
        String::from_utf8(bytes)
            .map(Document::Text)
            .map_err(|_| IngestError::NotPdf)
    }

    /// Extract analysis-ready text, reporting per-page progress for PDFs
    pub async fn extract<F>(&self, document: Document, progress: F) -> Result<IngestedText, IngestError>
    where
        F: FnMut(PageProgress) + Send + 'static,
    {
        match document {
            Document::Text(raw) => {
                let text = prepare_text(&raw)?;
                info!(chars = text.chars().count(), "Accepted pasted text");
                Ok(IngestedText { text, pages: None })
            }
            Document::Pdf(bytes) => {
                let separator = self.config.page_separator.clone();
                // WHY: lopdf decoding is CPU-bound and synchronous
                let (text, pages) = tokio::task::spawn_blocking(move || {
                    extract_pdf_text(&bytes, &separator, progress)
                })
                .await??;
                info!(pages, chars = text.chars().count(), "Extracted PDF text");
                Ok(IngestedText { text, pages: Some(pages) })
            }
        }
    }
}

/// Trim pasted text and reject empty input
pub fn prepare_text(raw: &str) -> Result<String, IngestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

/// Decode a PDF page by page and join the pages' text
///
/// Returns the trimmed text and the number of pages decoded.
pub fn extract_pdf_text<F>(bytes: &[u8], separator: &str, mut progress: F) -> Result<(String, usize), IngestError>
where
    F: FnMut(PageProgress),
{
    let pdf = PdfDocument::load_mem(bytes).map_err(IngestError::Decode)?;
    let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
    let total = page_numbers.len();
    debug!(total, "Decoding PDF pages");

    let mut parts = Vec::with_capacity(total);
    for (done, page) in page_numbers.into_iter().enumerate() {
        let raw = pdf
            .extract_text(&[page])
            .map_err(|source| IngestError::Page { page, source })?;
        parts.push(flatten_page(&raw));
        progress(PageProgress { page: done + 1, total });
    }

    let text = join_pages(parts, separator);
    if text.is_empty() {
        warn!(total, "PDF contained no extractable text");
        return Err(IngestError::NoExtractableText);
    }
    Ok((text, total))
}

/// Collapse a page's text runs onto one line separated by single spaces
fn flatten_page(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join per-page text in page order and trim the result
pub fn join_pages<I, S>(pages: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = pages
        .into_iter()
        .map(|page| page.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(separator);
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    #[test]
    fn test_prepare_text_trims() {
        assert_eq!(prepare_text("  act now \n").unwrap(), "act now");
    }

    #[test]
    fn test_prepare_text_rejects_blank() {
        assert!(matches!(prepare_text(" \n\t "), Err(IngestError::EmptyInput)));
        assert_eq!(IngestError::EmptyInput.to_string(), "Paste some text or upload a PDF.");
    }

    #[test]
    fn test_join_pages_separator_and_trim() {
        let pages = vec!["  First page", "Second page", "Third page  "];
        assert_eq!(join_pages(pages, "\n\n"), "First page\n\nSecond page\n\nThird page");
    }

    #[test]
    fn test_join_pages_all_empty() {
        assert_eq!(join_pages(vec!["", "  ", ""], "\n\n"), "");
    }

    #[test]
    fn test_flatten_page() {
        assert_eq!(flatten_page("Act now\n  before it's\n\ntoo late\n"), "Act now before it's too late");
    }

    #[test]
    fn test_corrupt_pdf_is_decode_error() {
        let result = extract_pdf_text(b"%PDF-1.4 this is not really a pdf", "\n\n", |_| {});
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }

    #[tokio::test]
    async fn test_read_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "article.txt", "Act now!".as_bytes()).await;

        let reader = DocumentReader::new(IngestConfig::default());
        let document = reader.read_path(&path).await.unwrap();
        assert_eq!(document, Document::Text("Act now!".to_string()));
    }

    #[tokio::test]
    async fn test_pdf_sniffed_by_magic_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let magic = write_file(temp_dir.path(), "upload.bin", b"%PDF-1.7\n...").await;
        let ext = write_file(temp_dir.path(), "report.PDF", b"anything").await;

        let reader = DocumentReader::new(IngestConfig::default());
        assert!(matches!(reader.read_path(&magic).await.unwrap(), Document::Pdf(_)));
        assert!(matches!(reader.read_path(&ext).await.unwrap(), Document::Pdf(_)));
    }

    #[tokio::test]
    async fn test_binary_non_pdf_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "image.png", &[0x89, 0x50, 0x4E, 0x47, 0xFF, 0xFE]).await;

        let reader = DocumentReader::new(IngestConfig::default());
        let result = reader.read_path(&path).await;
        assert!(matches!(result, Err(IngestError::NotPdf)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let reader = DocumentReader::new(IngestConfig::default());
        let result = reader.read_path(temp_dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(IngestError::Io { .. })));
    }

    #[tokio::test]
    async fn test_extract_text_document() {
        let reader = DocumentReader::new(IngestConfig::default());
        let extracted = reader
            .extract(Document::Text("\n  Hurry, act now.  \n".to_string()), |_| {})
            .await
            .unwrap();
        assert_eq!(extracted.text, "Hurry, act now.");
        assert_eq!(extracted.pages, None);
    }

    #[tokio::test]
    async fn test_extract_corrupt_pdf_document() {
        let reader = DocumentReader::new(IngestConfig::default());
        let result = reader.extract(Document::Pdf(b"not a pdf".to_vec()), |_| {}).await;
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }
}
