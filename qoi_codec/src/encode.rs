use std::io;

use log::trace;

use crate::error::{Error, ImageError};
use crate::header::{Header, QOI_END_MARKER, QOI_HEADER_LEN};
use crate::image::{to_channels, Image};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::state::State;

/// Encodes an in-memory image into the bytes of a complete QOI file: header,
/// token stream and end marker.
pub fn encode(image: &Image) -> Result<Vec<u8>, Error> {
  let mut dest = Vec::new();
  encode_to(image, &mut dest)?;
  Ok(dest)
}

/// Encodes an in-memory image and writes the QOI file to the given writer.
///
/// The image is fully validated before the first byte is written, so an
/// `InvalidImage` error never leaves a partial file behind. Only errors
/// raised by the writer itself can interrupt the output.
pub fn encode_to<W: io::Write>(image: &Image, mut writer: W) -> Result<(), Error> {
  let header = encode_header(image)?;
  let pixels = to_channels(&image.pixels)?;

  trace!("Encoding {}x{} image", image.width(), image.height());

  writer.write_all(&header)?;
  encode_pixels(&pixels, &mut writer)?;
  writer.write_all(&QOI_END_MARKER)?;
  writer.flush()?;

  trace!("Finished encoding image");

  Ok(())
}

/// Builds the 14 byte header for the given image.
pub fn encode_header(image: &Image) -> Result<[u8; QOI_HEADER_LEN], Error> {
  let (width, height) = (image.width(), image.height());

  if width == 0 || height == 0 {
    return Err(ImageError::EmptyGrid.into());
  }

  let width = u32::try_from(width).map_err(|_| ImageError::TooLarge(width))?;
  let height = u32::try_from(height).map_err(|_| ImageError::TooLarge(height))?;

  Ok(Header::new(width, height, image.channels, image.colorspace)?.to_bytes())
}

/// Encodes a row-major pixel sequence into a bare token stream, without
/// header or end marker.
pub fn encode_pixels<W: io::Write>(pixels: &[Pixel], mut writer: W) -> Result<(), Error> {
  let mut state = State::new();

  for &pixel in pixels {
    encode_pixel(&mut state, pixel, &mut writer)?;
    state.prev_pixel = pixel;
  }

  if let Some(op) = state.take_run() {
    op.write_to(&mut writer)?;
  }

  Ok(())
}

// Encodes and writes the provided pixel. Tokens are tried in a fixed order:
// run, index, diff, luma, then rgb or rgba. A pixel that misses the index is
// cached before a diff is attempted.
fn encode_pixel<W: io::Write>(
  state: &mut State,
  pixel: Pixel,
  mut writer: W,
) -> Result<(), Error> {
  if pixel == state.prev_pixel {
    if let Some(op) = state.extend_run() {
      op.write_to(&mut writer)?;
    }

    return Ok(());
  }

  // A differing pixel ends the pending run.
  if let Some(op) = state.take_run() {
    op.write_to(&mut writer)?;
  }

  let op = if let Some(index) = state.cache_match_or_replace(pixel) {
    Op::Index(index)
  } else {
    match pixel.diff(&state.prev_pixel) {
      Some(PixelDiff::Color(diff_r, diff_g, diff_b)) => Op::Diff(diff_r, diff_g, diff_b),
      Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg)) => Op::Luma(luma_g, luma_rg, luma_bg),
      None if pixel.a == state.prev_pixel.a => Op::Rgb(pixel.r, pixel.g, pixel.b),
      None => Op::Rgba(pixel.r, pixel.g, pixel.b, pixel.a),
    }
  };

  op.write_to(&mut writer)?;
  Ok(())
}
