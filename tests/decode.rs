use qr_codec_rs::{Error, decode, decode_from_memory, decode_from_reader, decode_image, encode};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

// Helper to write a smooth, code-free test picture
fn write_photo(path: &Path) {
    let photo = image::RgbImage::from_fn(320, 240, |x, y| {
        image::Rgb([(x * 255 / 320) as u8, (y * 255 / 240) as u8, ((x + y) % 256) as u8])
    });
    photo.save(path).expect("Failed to write photo");
}

#[test]
fn test_decode_from_path_valid_qr() {
    let dir = tempfile::tempdir().unwrap();
    let file_name = encode("decode me", dir.path()).unwrap();

    let result = decode(dir.path().join(file_name));
    assert!(result.is_ok(), "Failed to decode from path: {:?}", result.err());
    assert_eq!(result.unwrap().as_deref(), Some("decode me"));
}

#[test]
fn test_decode_from_reader_valid_qr() {
    let dir = tempfile::tempdir().unwrap();
    let file_name = encode("via reader", dir.path()).unwrap();

    let file = File::open(dir.path().join(file_name)).unwrap();
    let result = decode_from_reader(BufReader::new(file));
    assert_eq!(result.unwrap().as_deref(), Some("via reader"));
}

#[test]
fn test_decode_png_input() {
    let dir = tempfile::tempdir().unwrap();
    let file_name = encode("png input", dir.path()).unwrap();

    // Re-save losslessly; any format the image crate reads is accepted.
    let png = dir.path().join("copy.png");
    image::open(dir.path().join(file_name)).unwrap().save(&png).unwrap();
    assert_eq!(decode(&png).unwrap().as_deref(), Some("png input"));
}

#[test]
fn test_decode_photo_without_code_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("photo.png");
    write_photo(&photo);

    let result = decode(&photo);
    assert!(result.is_ok(), "Decoding a photo should not fail: {:?}", result.err());
    assert_eq!(result.unwrap(), None);
}

#[test]
fn test_decode_blank_image_is_none() {
    let blank = image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        300,
        300,
        image::Luma([255]),
    ));
    assert_eq!(decode_image(&blank).unwrap(), None);
}

#[test]
fn test_decode_non_image_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.jpg");
    fs::write(&path, b"this is not an image").unwrap();

    assert_eq!(decode(&path).unwrap(), None);
    assert_eq!(decode_from_memory(&[0, 1, 2, 3, 4, 5]).unwrap(), None);
}

#[test]
fn test_decode_from_path_non_existent_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = decode(dir.path().join("non_existent_file.jpg"));
    assert!(matches!(result, Err(Error::FileNotFound)), "Got {:?}", result);
}
