use std::io;

use log::{debug, trace};

use crate::error::{Error, FormatError};
use crate::header::{Header, QOI_END_MARKER, QOI_HEADER_LEN};
use crate::image::{to_grid, Image};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Limits enforced while decoding, checked against the header before any
/// pixel buffer is allocated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeOptions {
  max_width: u32,
  max_height: u32,
}

impl Default for DecodeOptions {
  fn default() -> Self {
    Self::new()
  }
}

impl DecodeOptions {
  /// Options without a limit: any width and height a header can declare
  /// are accepted. Use the setters to bound untrusted input.
  pub const fn new() -> Self {
    Self { max_width: u32::MAX, max_height: u32::MAX }
  }

  /// Sets the largest width a decoded image may declare.
  pub const fn set_max_width(mut self, max_width: u32) -> Self {
    self.max_width = max_width;
    self
  }

  /// Sets the largest height a decoded image may declare.
  pub const fn set_max_height(mut self, max_height: u32) -> Self {
    self.max_height = max_height;
    self
  }

  pub const fn max_width(&self) -> u32 {
    self.max_width
  }

  pub const fn max_height(&self) -> u32 {
    self.max_height
  }
}

/// Decodes the bytes of a complete QOI file into an in-memory image, using
/// the default [DecodeOptions].
pub fn decode(bytes: &[u8]) -> Result<Image, Error> {
  decode_with_options(bytes, &DecodeOptions::default())
}

/// Reads a complete QOI file from the given reader and decodes it. The whole
/// input is buffered first, there is no incremental decoding.
pub fn decode_from<R: io::Read>(mut reader: R) -> Result<Image, Error> {
  let mut bytes = Vec::new();
  reader.read_to_end(&mut bytes)?;
  decode(&bytes)
}

/// Decodes the bytes of a complete QOI file into an in-memory image.
///
/// The end marker is checked first, then the header, then the token stream
/// between them is decoded. Any malformed byte fails the whole call.
pub fn decode_with_options(bytes: &[u8], options: &DecodeOptions) -> Result<Image, Error> {
  if bytes.len() < QOI_HEADER_LEN + QOI_END_MARKER.len() || !bytes.ends_with(&QOI_END_MARKER) {
    debug!("Rejecting {} byte input without end marker", bytes.len());
    return Err(FormatError::MissingEndMarker.into());
  }

  let (header_bytes, rest) = bytes.split_at(QOI_HEADER_LEN);
  let tokens = &rest[..rest.len() - QOI_END_MARKER.len()];
  let header = decode_header(header_bytes)?;

  trace!("Image width: {}", header.width);
  trace!("Image height: {}", header.height);
  trace!("Image channels: {:?}", header.channels);
  trace!("Image colorspace: {:?}", header.colorspace);

  if header.width > options.max_width || header.height > options.max_height {
    debug!("Rejecting image larger than the configured limits");
    return Err(
      FormatError::DimensionsExceedLimit {
        width: header.width,
        height: header.height,
        max_width: options.max_width,
        max_height: options.max_height,
      }
      .into(),
    );
  }

  let pixels = decode_pixels(tokens, header.width, header.height)?;
  let grid = to_grid(&pixels, header.height as usize, header.width as usize)?;

  trace!("Finished decoding image");

  Ok(Image::new(grid, header.channels as u8, header.colorspace as u8))
}

/// Parses a 14 byte QOI header.
pub fn decode_header(bytes: &[u8]) -> Result<Header, Error> {
  Ok(Header::from_bytes(bytes)?)
}

/// Decodes a bare token stream into exactly `width * height` pixels.
///
/// Fails if the stream ends before the last pixel, if a run would write past
/// the last pixel, or if bytes remain once every pixel is decoded.
pub fn decode_pixels(tokens: &[u8], width: u32, height: u32) -> Result<Vec<Pixel>, Error> {
  let total = (width as usize)
    .checked_mul(height as usize)
    .filter(|&total| total > 0)
    .ok_or(FormatError::InvalidDimensions)?;

  let mut state = State::new();
  let mut pixels = Vec::with_capacity(total);
  let mut bytes = tokens.iter().copied();

  while pixels.len() < total {
    let op = Op::try_from_bytes(&mut bytes)?;
    let pixel = decode_pixel(&state, op);

    let count = match op {
      Op::Run(run) => run as usize,
      _ => 1,
    };

    if count > total - pixels.len() {
      return Err(FormatError::Overrun { run: count, position: pixels.len(), total }.into());
    }

    pixels.resize(pixels.len() + count, pixel);
    state.update(pixel);
  }

  let remaining = bytes.len();

  if remaining > 0 {
    debug!("Rejecting token stream with {} unused bytes", remaining);
    return Err(FormatError::TrailingData(remaining).into());
  }

  Ok(pixels)
}

// Produces the pixel a single token stands for, given the current `state`.
// A run stands for the previous pixel, repeated by the caller.
fn decode_pixel(state: &State, op: Op) -> Pixel {
  match op {
    Op::Diff(diff_r, diff_g, diff_b) => {
      Pixel::from_diff(PixelDiff::Color(diff_r, diff_g, diff_b), &state.prev_pixel)
    }
    Op::Index(index) => {
      state.cache[index as usize]
    }
    Op::Luma(luma_g, luma_rg, luma_bg) => {
      Pixel::from_diff(PixelDiff::Luma(luma_g, luma_rg, luma_bg), &state.prev_pixel)
    }
    Op::Rgb(r, g, b) => {
      Pixel { r, g, b, a: state.prev_pixel.a }
    }
    Op::Rgba(r, g, b, a) => {
      Pixel { r, g, b, a }
    }
    Op::Run(_) => {
      state.prev_pixel
    }
  }
}
