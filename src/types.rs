use std::path::PathBuf;

/// Width and height, in pixels, of every generated QR image.
pub const QR_CODE_SIZE: u32 = 300;

/// Logos wider than this are squeezed to this width when compressing.
pub const LOGO_WIDTH: u32 = 60;

/// Logos taller than this are squeezed to this height when compressing.
pub const LOGO_HEIGHT: u32 = 60;

/// Quiet zone around the symbol, in modules.
pub const MARGIN: u32 = 1;

/// Corner arc of the border drawn around the logo.
pub const BORDER_ARC: u32 = 6;

/// Stroke width of the border drawn around the logo.
pub const BORDER_STROKE: f32 = 3.0;

/// JPEG quality used for every written image.
pub const JPEG_QUALITY: u8 = 75;

/// Extension of generated files. The output is always JPEG.
pub const FILE_EXTENSION: &str = "jpg";

/// Represents errors that can occur during QR encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An invalid parameter was provided to a function.
    #[error("Invalid parameter")]
    InvalidParameter,
    /// A logo path was given but nothing exists there.
    #[error("Logo file not found: {}", .0.display())]
    LogoNotFound(PathBuf),
    /// The image to decode could not be found.
    #[error("File not found")]
    FileNotFound,
    /// An I/O error occurred during file reading or writing.
    #[error("I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
    /// Building the QR image failed. Contains a message from the failing library.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
    /// A symbol was located but could not be read.
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(err) => Error::IoError(err),
            other => Error::EncodingFailed(other.to_string()),
        }
    }
}

/// QR error correction levels, from least to most redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCorrectionLevel {
    /// Recovers roughly 7% of damaged codewords.
    L,
    /// Recovers roughly 15% of damaged codewords.
    M,
    /// Recovers roughly 25% of damaged codewords.
    Q,
    /// Recovers roughly 30% of damaged codewords.
    H,
}

/// Character set used to turn text into payload bytes and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterSet {
    #[default]
    Utf8,
    Iso8859_1,
}

impl CharacterSet {
    /// Encodes `text` into payload bytes.
    ///
    /// Returns `None` when `text` holds a character the set cannot represent.
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        match self {
            CharacterSet::Utf8 => Some(text.as_bytes().to_vec()),
            CharacterSet::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
        }
    }

    /// Decodes payload bytes into text, or `None` if they are invalid for this set.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            CharacterSet::Utf8 => String::from_utf8(bytes.to_vec()).ok(),
            CharacterSet::Iso8859_1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Lowercase label of the set, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            CharacterSet::Utf8 => "utf-8",
            CharacterSet::Iso8859_1 => "iso-8859-1",
        }
    }
}

/// Hints handed to a [`SymbolEncoder`](crate::SymbolEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeHints {
    /// Redundancy of the generated symbol. Defaults to `ErrorCorrectionLevel::H`.
    pub error_correction: ErrorCorrectionLevel,
    /// How the content is turned into bytes. Defaults to UTF-8.
    pub character_set: CharacterSet,
}

impl Default for EncodeHints {
    fn default() -> Self {
        EncodeHints {
            error_correction: ErrorCorrectionLevel::H,
            character_set: CharacterSet::Utf8,
        }
    }
}

/// Hints handed to a [`SymbolDecoder`](crate::SymbolDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeHints {
    /// How the payload bytes are turned into text. Defaults to UTF-8.
    pub character_set: CharacterSet,
}
