use crate::{DecodeHints, EncodeHints, QrcodeEncoder, RqrrDecoder};

/// Generates and reads QR code images.
///
/// The barcode work is delegated to a [`SymbolEncoder`](crate::SymbolEncoder)
/// and a [`SymbolDecoder`](crate::SymbolDecoder); the codec itself only
/// renders, composites and stores images. The free functions of this crate use
/// `QrCodec::default()`.
#[derive(Debug, Clone)]
pub struct QrCodec<E = QrcodeEncoder, D = RqrrDecoder> {
    pub(crate) encoder: E,
    pub(crate) decoder: D,
    pub(crate) encode_hints: EncodeHints,
    pub(crate) decode_hints: DecodeHints,
}

impl<E, D> QrCodec<E, D> {
    /// Creates a codec with the fixed level H / UTF-8 hints.
    pub fn new(encoder: E, decoder: D) -> Self {
        QrCodec {
            encoder,
            decoder,
            encode_hints: EncodeHints::default(),
            decode_hints: DecodeHints::default(),
        }
    }
}

impl Default for QrCodec {
    fn default() -> Self {
        QrCodec::new(QrcodeEncoder, RqrrDecoder)
    }
}
