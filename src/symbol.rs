//! The boundary between this crate and the barcode libraries it wraps.

use std::panic::{self, AssertUnwindSafe};

use image::{
    GrayImage,
    imageops::{self, FilterType},
};
use rqrr::DeQRError;

use crate::{BitMatrix, DecodeHints, EncodeHints, Error, ErrorCorrectionLevel};

/// Turns text into a bare QR module grid, without any quiet zone.
pub trait SymbolEncoder {
    fn encode(&self, content: &str, hints: &EncodeHints) -> Result<BitMatrix, Error>;
}

/// Finds and reads a QR symbol in a luminance plane.
///
/// `Ok(None)` means no symbol was found. Errors are reserved for symbols that
/// were located but could not be read, including payloads that are not valid
/// in the hinted character set.
pub trait SymbolDecoder {
    fn decode(&self, luminance: &GrayImage, hints: &DecodeHints) -> Result<Option<String>, Error>;
}

/// [`SymbolEncoder`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl From<ErrorCorrectionLevel> for qrcode::EcLevel {
    fn from(level: ErrorCorrectionLevel) -> Self {
        match level {
            ErrorCorrectionLevel::L => qrcode::EcLevel::L,
            ErrorCorrectionLevel::M => qrcode::EcLevel::M,
            ErrorCorrectionLevel::Q => qrcode::EcLevel::Q,
            ErrorCorrectionLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl SymbolEncoder for QrcodeEncoder {
    fn encode(&self, content: &str, hints: &EncodeHints) -> Result<BitMatrix, Error> {
        let data = hints.character_set.encode(content).ok_or_else(|| {
            Error::EncodingFailed(format!(
                "content is not representable in {}",
                hints.character_set.name()
            ))
        })?;

        let code = qrcode::QrCode::with_error_correction_level(&data, hints.error_correction.into())
            .map_err(|e| Error::EncodingFailed(e.to_string()))?;

        let size = code.width() as u32;
        let mut modules = BitMatrix::new(size, size);
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color == qrcode::Color::Dark {
                modules.set(i as u32 % size, i as u32 / size, true);
            }
        }

        tracing::debug!(modules = size, bytes = data.len(), "encoded QR symbol");
        Ok(modules)
    }
}

/// [`SymbolDecoder`] backed by the `rqrr` crate.
///
/// rqrr thresholds the luminance plane adaptively before looking for finder
/// patterns, so no separate binarization pass is needed. Payloads are
/// converted strictly: bytes that are invalid in the hinted character set are
/// a [`Error::DecodingFailed`], never replacement characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

/// Factor a plane is enlarged by when the first scan reads nothing.
const RETRY_SCALE: u32 = 3;

/// Planes larger than this on either side are not enlarged for a second scan.
const RETRY_MAX_SIDE: u32 = 1024;

impl SymbolDecoder for RqrrDecoder {
    fn decode(&self, luminance: &GrayImage, hints: &DecodeHints) -> Result<Option<String>, Error> {
        let first = scan(luminance, hints);
        if matches!(first, Ok(Some(_)))
            || luminance.width() > RETRY_MAX_SIDE
            || luminance.height() > RETRY_MAX_SIDE
        {
            return first;
        }

        // rqrr cannot sample symbols drawn at one pixel per module.
        let enlarged = imageops::resize(
            luminance,
            luminance.width() * RETRY_SCALE,
            luminance.height() * RETRY_SCALE,
            FilterType::Nearest,
        );
        tracing::debug!(scale = RETRY_SCALE, "rescanning enlarged plane");

        match scan(&enlarged, hints) {
            Ok(Some(text)) => Ok(Some(text)),
            second => first.and(second),
        }
    }
}

fn scan(luminance: &GrayImage, hints: &DecodeHints) -> Result<Option<String>, Error> {
    let payload = panic::catch_unwind(AssertUnwindSafe(|| detect_payload(luminance)))
        .map_err(|cause| {
            let message = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::warn!("rqrr panicked: {message}");
            Error::DecodingFailed(message)
        })??;

    match payload {
        Some(payload) => hints.character_set.decode(&payload).map(Some).ok_or_else(|| {
            Error::DecodingFailed(format!("payload is not valid {}", hints.character_set.name()))
        }),
        None => Ok(None),
    }
}

/// Raw payload of the first readable grid in `luminance`.
fn detect_payload(luminance: &GrayImage) -> Result<Option<Vec<u8>>, Error> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luminance.width() as usize,
        luminance.height() as usize,
        |x, y| luminance.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    tracing::debug!(candidates = grids.len(), "detected QR grids");

    let mut failure = None;
    for grid in grids {
        let mut payload = Vec::new();
        match grid.decode_to(&mut payload) {
            Ok(meta) => {
                tracing::debug!(?meta, length = payload.len(), "decoded QR payload");
                return Ok(Some(payload));
            }
            Err(e) if is_corrupt_symbol(&e) => {
                tracing::warn!("failed to decode QR grid: {e:?}");
                if failure.is_none() {
                    failure = Some(e);
                }
            }
            // Finder patterns that do not belong to a readable symbol.
            Err(e) => tracing::debug!("rejected QR grid: {e:?}"),
        }
    }

    match failure {
        Some(e) => Err(Error::DecodingFailed(format!("{e:?}"))),
        None => Ok(None),
    }
}

/// Whether the symbol was located and its format read, but the data stream is broken.
fn is_corrupt_symbol(err: &DeQRError) -> bool {
    matches!(
        err,
        DeQRError::DataEcc
            | DeQRError::DataOverflow
            | DeQRError::DataUnderflow
            | DeQRError::UnknownDataType
            | DeQRError::EncodingError
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharacterSet, matrix, types::MARGIN};
    use image::Luma;

    fn luminance_of(modules: &BitMatrix) -> GrayImage {
        let pixels = matrix::render(modules, 200, 200, MARGIN + 3).unwrap();
        GrayImage::from_fn(pixels.width(), pixels.height(), |x, y| {
            if pixels.get(x, y) { Luma([0]) } else { Luma([255]) }
        })
    }

    #[test]
    fn short_text_uses_version_one() {
        let modules = QrcodeEncoder.encode("hello", &EncodeHints::default()).unwrap();
        assert_eq!((modules.width(), modules.height()), (21, 21));
        // Top-left finder pattern corner.
        assert!(modules.get(0, 0));
        assert!(modules.get(6, 6));
        assert!(!modules.get(7, 7));
    }

    #[test]
    fn encoder_rejects_content_over_capacity() {
        let content = "x".repeat(4000);
        let err = QrcodeEncoder.encode(&content, &EncodeHints::default()).unwrap_err();
        assert!(matches!(err, Error::EncodingFailed(_)));
    }

    #[test]
    fn encoder_rejects_unrepresentable_characters() {
        let hints = EncodeHints {
            character_set: CharacterSet::Iso8859_1,
            ..Default::default()
        };
        let err = QrcodeEncoder.encode("世界", &hints).unwrap_err();
        assert!(matches!(err, Error::EncodingFailed(_)));
    }

    #[test]
    fn decoder_reads_encoder_output() {
        let modules = QrcodeEncoder.encode("symbol boundary", &EncodeHints::default()).unwrap();
        let decoded = RqrrDecoder.decode(&luminance_of(&modules), &DecodeHints::default()).unwrap();
        assert_eq!(decoded.as_deref(), Some("symbol boundary"));
    }

    #[test]
    fn blank_plane_has_no_symbol() {
        let blank = GrayImage::from_pixel(120, 80, Luma([255]));
        assert_eq!(RqrrDecoder.decode(&blank, &DecodeHints::default()).unwrap(), None);
    }

    #[test]
    fn latin1_payload_is_not_read_as_utf8() {
        let latin1 = EncodeHints {
            character_set: CharacterSet::Iso8859_1,
            ..Default::default()
        };
        let modules = QrcodeEncoder.encode("café", &latin1).unwrap();
        let plane = luminance_of(&modules);

        let err = RqrrDecoder.decode(&plane, &DecodeHints::default()).unwrap_err();
        assert!(matches!(err, Error::DecodingFailed(_)), "got {err:?}");

        let hints = DecodeHints {
            character_set: CharacterSet::Iso8859_1,
        };
        assert_eq!(RqrrDecoder.decode(&plane, &hints).unwrap().as_deref(), Some("café"));
    }

    #[test]
    fn unrecoverable_data_is_an_error_not_absence() {
        let mut modules = QrcodeEncoder.encode("hello", &EncodeHints::default()).unwrap();
        // Invert the bottom-right data block; finders, timing and format bits stay intact.
        for y in 9..21 {
            for x in 9..21 {
                let dark = modules.get(x, y);
                modules.set(x, y, !dark);
            }
        }

        let err = RqrrDecoder
            .decode(&luminance_of(&modules), &DecodeHints::default())
            .unwrap_err();
        assert!(matches!(err, Error::DecodingFailed(_)), "got {err:?}");
    }

    #[test]
    fn one_pixel_per_module_is_read_after_enlarging() {
        let content = "abc".repeat(330);
        let modules = QrcodeEncoder.encode(&content, &EncodeHints::default()).unwrap();
        let pixels = matrix::render(&modules, 1, 1, MARGIN).unwrap();
        assert_eq!(pixels.width(), modules.width() + 2 * MARGIN);
        let plane = GrayImage::from_fn(pixels.width(), pixels.height(), |x, y| {
            if pixels.get(x, y) { Luma([0]) } else { Luma([255]) }
        });

        let decoded = RqrrDecoder.decode(&plane, &DecodeHints::default()).unwrap();
        assert_eq!(decoded.as_deref(), Some(content.as_str()));
    }
}
