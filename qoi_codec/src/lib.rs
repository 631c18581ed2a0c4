//! This crate implements an encoder and decoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! The two primary exports are the `encode` and `decode` functions. `encode`
//! turns an in-memory [Image] into the bytes of a complete QOI file, and
//! `decode` is its exact inverse. `encode_to` and `decode_from` do the same
//! against any `std::io::Write` or `std::io::Read`.
//!
//! An [Image] is a row-major grid of packed `0xAARRGGBB` pixels together
//! with the channel count and colorspace tags written to the file header.
//! The encoded stream always carries all four channels.
//!
//! To keep this crate simple, it does not read or write any other image
//! format and does not touch the file system.
//!
//! # In-memory example
//!
//! ```rust
//! use qoi_codec::{decode, encode, Image};
//!
//! // A 2x1 image made up of two identical opaque pixels.
//! let image = Image::new(vec![vec![0xff0a141e, 0xff0a141e]], 4, 0);
//!
//! // Header, one RGB token, one RUN token and the end marker.
//! let bytes = encode(&image)?;
//! assert_eq!(bytes.len(), 14 + 4 + 1 + 8);
//!
//! assert_eq!(decode(&bytes)?, image);
//! # Ok::<(), qoi_codec::Error>(())
//! ```
//!
//! # Limiting decoded dimensions
//!
//! ```rust
//! use qoi_codec::{decode_with_options, encode, DecodeOptions, Image};
//!
//! let image = Image::new(vec![vec![0xff000000; 64]; 2], 3, 1);
//! let bytes = encode(&image)?;
//!
//! let options = DecodeOptions::new().set_max_width(32);
//! assert!(decode_with_options(&bytes, &options).is_err());
//! # Ok::<(), qoi_codec::Error>(())
//! ```

pub use crate::decode::{
  decode, decode_from, decode_header, decode_pixels, decode_with_options, DecodeOptions,
};
pub use crate::encode::{encode, encode_header, encode_pixels, encode_to};
pub use crate::error::{Error, FormatError, ImageError};
pub use crate::header::{
  Channels, Colorspace, Header, QOI_END_MARKER, QOI_HEADER_LEN, QOI_MAGIC, QOI_MAX_RUN,
};
pub use crate::image::{to_channels, to_grid, Image};
pub use crate::pixel::Pixel;

mod decode;
mod encode;
mod error;
mod header;
mod image;
mod op;
mod pixel;
mod state;
