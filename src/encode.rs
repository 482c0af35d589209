use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use image::{DynamicImage, RgbImage, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::{
    Error, QrCodec, SymbolEncoder, logo,
    logo::{BLACK, WHITE},
    matrix,
    types::{FILE_EXTENSION, JPEG_QUALITY, MARGIN, QR_CODE_SIZE},
};

impl<E: SymbolEncoder, D> QrCodec<E, D> {
    /// Builds the QR image for `content` in memory, with an optional logo in its center.
    ///
    /// An empty `logo_path` is treated like `None`.
    pub fn encode_to_image(
        &self,
        content: &str,
        logo_path: Option<&Path>,
        need_compress: bool,
    ) -> Result<RgbImage, Error> {
        let modules = self.encoder.encode(content, &self.encode_hints)?;
        let pixels = matrix::render(&modules, QR_CODE_SIZE, QR_CODE_SIZE, MARGIN)?;
        tracing::debug!(
            modules = modules.width(),
            width = pixels.width(),
            height = pixels.height(),
            "rendered QR matrix"
        );

        let mut canvas = RgbaImage::from_fn(pixels.width(), pixels.height(), |x, y| {
            if pixels.get(x, y) { BLACK } else { WHITE }
        });

        if let Some(logo_path) = logo_path.filter(|p| !p.as_os_str().is_empty()) {
            logo::insert_logo(&mut canvas, logo_path, need_compress)?;
        }

        Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
    }

    /// Writes the QR image for `content` to `writer` as a JPEG.
    pub fn encode_to_writer(
        &self,
        content: &str,
        logo_path: Option<&Path>,
        need_compress: bool,
        writer: impl Write,
    ) -> Result<(), Error> {
        let image = self.encode_to_image(content, logo_path, need_compress)?;
        write_jpeg(&image, writer)
    }

    /// Writes the QR image for `content` into `dest_path` and returns the file name.
    ///
    /// The image is built before the directory is touched, so a missing logo
    /// leaves the filesystem unchanged.
    pub fn encode_with_logo(
        &self,
        content: &str,
        logo_path: Option<&Path>,
        dest_path: impl AsRef<Path>,
        need_compress: bool,
    ) -> Result<String, Error> {
        let image = self.encode_to_image(content, logo_path, need_compress)?;

        let dest_path = dest_path.as_ref();
        mkdirs(dest_path)?;

        let file_name = format!("{}.{}", epoch_millis()?, FILE_EXTENSION);
        let path = dest_path.join(&file_name);
        let file = File::create(&path)?;
        write_jpeg(&image, file)?;

        tracing::debug!(path = %path.display(), "wrote QR image");
        Ok(file_name)
    }

    /// Same as [`QrCodec::encode_with_logo`] without a logo.
    pub fn encode(&self, content: &str, dest_path: impl AsRef<Path>) -> Result<String, Error> {
        self.encode_with_logo(content, None, dest_path, true)
    }
}

/// Encodes `content` into `dest_path/<epoch-millis>.jpg` and returns the file name.
#[tracing::instrument(skip_all, level = "trace")]
pub fn encode(content: &str, dest_path: impl AsRef<Path>) -> Result<String, Error> {
    <QrCodec>::default().encode(content, dest_path)
}

/// Like [`encode`], with `logo_path` drawn in the middle of the code.
///
/// With `need_compress` the logo is shrunk to at most 60x60 first.
#[tracing::instrument(skip_all, level = "trace")]
pub fn encode_with_logo(
    content: &str,
    logo_path: Option<&Path>,
    dest_path: impl AsRef<Path>,
    need_compress: bool,
) -> Result<String, Error> {
    <QrCodec>::default().encode_with_logo(content, logo_path, dest_path, need_compress)
}

pub fn encode_to_image(
    content: &str,
    logo_path: Option<&Path>,
    need_compress: bool,
) -> Result<RgbImage, Error> {
    <QrCodec>::default().encode_to_image(content, logo_path, need_compress)
}

pub fn encode_to_writer(
    content: &str,
    logo_path: Option<&Path>,
    need_compress: bool,
    writer: impl Write,
) -> Result<(), Error> {
    <QrCodec>::default().encode_to_writer(content, logo_path, need_compress, writer)
}

/// Creates `dest_path` and any missing parents.
pub fn mkdirs(dest_path: impl AsRef<Path>) -> Result<(), Error> {
    let dest_path = dest_path.as_ref();
    if !dest_path.is_dir() {
        std::fs::create_dir_all(dest_path)?;
    }
    Ok(())
}

fn write_jpeg(image: &RgbImage, writer: impl Write) -> Result<(), Error> {
    let mut writer = BufWriter::new(writer);
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode_image(image)?;
    writer.flush()?;
    Ok(())
}

fn epoch_millis() -> Result<u128, Error> {
    let since_the_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(std::io::Error::other)?;
    Ok(since_the_epoch.as_millis())
}
