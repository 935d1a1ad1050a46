use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Drawing issued before a page was started")]
    NoActivePage,
    #[error("Unknown image handle: {0}")]
    UnknownImage(String),
}
