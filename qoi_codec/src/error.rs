use std::io;

use thiserror::Error;

/// An enumeration of all error values this crate may produce.
///
/// Errors fall into two categories: an in-memory image that cannot be
/// encoded (`InvalidImage`), and encoded bytes that cannot be decoded
/// (`InvalidFormat`). Both are permanent, nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
  /// The in-memory image is malformed and cannot be encoded.
  #[error("invalid image: {0}")]
  InvalidImage(#[from] ImageError),
  /// The encoded bytes are malformed and cannot be decoded.
  #[error("invalid QOI data: {0}")]
  InvalidFormat(#[from] FormatError),
  /// Any `std::io::Error` raised by the reader or writer handed to
  /// `encode_to` or `decode_from`.
  #[error(transparent)]
  Io(#[from] io::Error),
}

/// Reasons an in-memory image is rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ImageError {
  /// Channel count other than 3 (RGB) or 4 (RGBA).
  #[error("invalid channel count {0}, expected 3 or 4")]
  InvalidChannels(u8),
  /// Colorspace tag other than 0 (sRGB) or 1 (linear).
  #[error("invalid colorspace {0}, expected 0 for sRGB or 1 for linear")]
  InvalidColorspace(u8),
  /// The pixel grid has no rows, or its rows have no pixels.
  #[error("image has no pixels")]
  EmptyGrid,
  /// A row of the pixel grid differs in width from the first row.
  #[error("row {row} has {found} pixels, expected {expected}")]
  NonRectangular {
    row: usize,
    expected: usize,
    found: usize,
  },
  /// A dimension does not fit in the header's 32-bit field.
  #[error("image dimension {0} does not fit in 32 bits")]
  TooLarge(usize),
  /// The requested grid holds more pixels than fit in a `usize`.
  #[error("a {height}x{width} grid has too many pixels")]
  GridOverflow { height: usize, width: usize },
  /// A flat pixel sequence does not match the requested grid size.
  #[error("expected {expected} pixels, found {found}")]
  LengthMismatch { expected: usize, found: usize },
}

/// Reasons encoded QOI bytes are rejected.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FormatError {
  /// The header does not start with `qoif`.
  #[error("missing `qoif` magic bytes")]
  InvalidMagic,
  /// The header is not exactly 14 bytes long.
  #[error("header is {0} bytes long, expected 14")]
  InvalidHeaderLength(usize),
  /// The header's channel count is not 3 or 4.
  #[error("invalid channel count {0}, expected 3 or 4")]
  InvalidChannels(u8),
  /// The header's colorspace is not 0 or 1.
  #[error("invalid colorspace {0}, expected 0 for sRGB or 1 for linear")]
  InvalidColorspace(u8),
  /// Width or height is zero, or their product overflows.
  #[error("invalid image width or height")]
  InvalidDimensions,
  /// Width or height is larger than the configured decode limits.
  #[error("image of {width}x{height} exceeds the limit of {max_width}x{max_height}")]
  DimensionsExceedLimit {
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
  },
  /// The file does not end with the 8-byte end marker.
  #[error("missing end of stream marker")]
  MissingEndMarker,
  /// The token stream ended before every pixel was decoded.
  #[error("unexpectedly reached the end of the token stream")]
  UnexpectedEof,
  /// A run token would write past the last pixel of the image.
  #[error("run of {run} pixels at pixel {position} overruns an image of {total} pixels")]
  Overrun {
    run: usize,
    position: usize,
    total: usize,
  },
  /// Bytes remain in the token stream after the last pixel was decoded.
  #[error("{0} unused bytes after the last pixel")]
  TrailingData(usize),
}

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Error::InvalidImage(a), Error::InvalidImage(b)) => a == b,
      (Error::InvalidFormat(a), Error::InvalidFormat(b)) => a == b,
      (Error::Io(a), Error::Io(b)) => a.kind() == b.kind(),
      _ => false,
    }
  }
}
