use thiserror::Error;

/// Raised when text can't be laid out in its box
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// None of the candidate fonts satisfied the box's width, height, and
    /// right padding constraints for the text
    #[error("no font among {candidates} candidates fits the text in the box")]
    NoFittingFont { candidates: usize },
}

/// Errors that can occur while loading a font
#[derive(Error, Debug)]
pub enum FontError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),
}

/// Errors that can occur while creating, loading, or saving a canvas
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode or encode the image
    Image(#[from] image::ImageError),

    /// The requested surface has a zero or oversized dimension
    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}
