#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use refcards::{GenerationOutput, GenerationRequest, PipelineBuilder, PipelineError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of a single page, numbered from 1
    pub fn page_text(&self, page_num: u32) -> String {
        self.doc.extract_text(&[page_num]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run a request through a default pipeline and reload the document.
pub async fn generate(
    request: GenerationRequest,
) -> Result<(GeneratedPdf, GenerationOutput), Box<dyn std::error::Error>> {
    let pipeline = PipelineBuilder::new().with_concurrency(4).build()?;
    let output = pipeline.generate(request).await?;
    let pdf = GeneratedPdf::from_bytes(output.document.clone())?;
    Ok((pdf, output))
}

/// Like [`generate`], for links with a JSON configuration.
pub async fn generate_with_json(
    links: &str,
    config_json: &str,
) -> Result<(GeneratedPdf, GenerationOutput), Box<dyn std::error::Error>> {
    generate(GenerationRequest::new(links).with_json_config(config_json)?).await
}

pub fn is_cancelled(result: &Result<GenerationOutput, PipelineError>) -> bool {
    matches!(result, Err(PipelineError::Cancelled))
}
