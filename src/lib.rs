//! # qr-codec-rs
//!
//! Generate QR code images, optionally with a logo in the middle, and read
//! them back.
//!
//! The barcode work is done by the `qrcode` (encoding) and `rqrr` (detection
//! and decoding) crates. This crate renders the symbol into a fixed 300x300
//! image, composites the logo and stores the result as a JPEG.
//!
//! ## Features
//!
//! - Encode text at error correction level H with a one module quiet zone.
//! - Insert a logo, shrunk to at most 60x60, framed by a rounded border.
//! - Write images as `<epoch-millis>.jpg`, creating the output directory.
//! - Decode from files, readers, memory or already loaded images.
//! - Swap the barcode library through [`SymbolEncoder`] / [`SymbolDecoder`].
//!
//! ## Examples
//!
//! ### Generating a QR code
//!
//! ```no_run
//! use qr_codec_rs::{encode, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let file_name = encode("https://example.com", "out/codes")?;
//!     println!("Wrote out/codes/{}", file_name);
//!     Ok(())
//! }
//! ```
//!
//! ### Generating a QR code with a logo
//!
//! ```no_run
//! use std::path::Path;
//! use qr_codec_rs::{encode_with_logo, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let logo = Path::new("assets/logo.png");
//!     let file_name = encode_with_logo("https://example.com", Some(logo), "out/codes", true)?;
//!     println!("Wrote out/codes/{}", file_name);
//!     Ok(())
//! }
//! ```
//!
//! ### Reading a QR code
//!
//! ```no_run
//! use qr_codec_rs::{decode, Error};
//!
//! fn main() -> Result<(), Error> {
//!     match decode("out/codes/1700000000000.jpg")? {
//!         Some(text) => println!("Found: {}", text),
//!         None => println!("No QR code in image"),
//!     }
//!     Ok(())
//! }
//! ```

mod types;
pub use types::*;

mod matrix;
pub use matrix::*;

mod symbol;
pub use symbol::*;

mod logo;
pub use logo::{Border, draw_rounded_border, insert_logo, logo_dimensions};

mod codec;
pub use codec::*;

mod decode;
pub use decode::*;

mod encode;
pub use encode::*;
