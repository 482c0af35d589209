use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

use image::DynamicImage;

use crate::{Error, QrCodec, SymbolDecoder};

impl<E, D: SymbolDecoder> QrCodec<E, D> {
    /// Reads the QR code in the image at `path`.
    ///
    /// Returns `Ok(None)` when the file is not an image or holds no QR code.
    pub fn decode(&self, path: impl AsRef<Path>) -> Result<Option<String>, Error> {
        let file = File::open(path.as_ref()).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::FileNotFound,
            _ => Error::IoError(e),
        })?;
        self.decode_from_reader(file)
    }

    pub fn decode_from_reader(&self, reader: impl Read) -> Result<Option<String>, Error> {
        let mut data = Vec::new();
        BufReader::new(reader).read_to_end(&mut data)?;
        self.decode_from_memory(&data)
    }

    pub fn decode_from_memory(&self, data: &[u8]) -> Result<Option<String>, Error> {
        let image = match image::load_from_memory(data) {
            Ok(image) => image,
            Err(e) => {
                tracing::debug!("not a decodable raster: {e}");
                return Ok(None);
            }
        };
        self.decode_image(&image)
    }

    pub fn decode_image(&self, image: &DynamicImage) -> Result<Option<String>, Error> {
        let luminance = image.to_luma8();
        self.decoder.decode(&luminance, &self.decode_hints)
    }
}

/// Reads the QR code in the image at `path`, or `None` if there is none.
#[tracing::instrument(skip_all, level = "trace")]
pub fn decode(path: impl AsRef<Path>) -> Result<Option<String>, Error> {
    <QrCodec>::default().decode(path)
}

pub fn decode_from_reader(reader: impl Read) -> Result<Option<String>, Error> {
    <QrCodec>::default().decode_from_reader(reader)
}

pub fn decode_from_memory(data: &[u8]) -> Result<Option<String>, Error> {
    <QrCodec>::default().decode_from_memory(data)
}

pub fn decode_image(image: &DynamicImage) -> Result<Option<String>, Error> {
    <QrCodec>::default().decode_image(image)
}
