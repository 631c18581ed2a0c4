use crate::error::ImageError;
use crate::pixel::Pixel;

/// An in-memory image: a row-major `height × width` grid of packed
/// `0xAARRGGBB` pixels together with the raw channel count and colorspace
/// tags that end up in the QOI header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
  /// Rows of packed ARGB pixels, top to bottom.
  pub pixels: Vec<Vec<u32>>,
  /// The declared channel count, 3 (RGB) or 4 (RGBA).
  pub channels: u8,
  /// The colorspace tag, 0 (sRGB with linear alpha) or 1 (all linear).
  pub colorspace: u8,
}

impl Image {
  pub fn new(pixels: Vec<Vec<u32>>, channels: u8, colorspace: u8) -> Self {
    Self { pixels, channels, colorspace }
  }

  /// Number of rows.
  pub fn height(&self) -> usize {
    self.pixels.len()
  }

  /// Number of pixels in the first row, `0` for an empty grid.
  pub fn width(&self) -> usize {
    self.pixels.first().map_or(0, Vec::len)
  }
}

/// Flattens a pixel grid into a row-major pixel sequence. The pixel at row
/// `h`, column `w` lands at index `h * width + w`.
///
/// Fails when the grid has no pixels or its rows differ in width.
pub fn to_channels(grid: &[Vec<u32>]) -> Result<Vec<Pixel>, ImageError> {
  let width = grid.first().map_or(0, Vec::len);

  if width == 0 {
    return Err(ImageError::EmptyGrid);
  }

  let mut pixels = Vec::with_capacity(width * grid.len());

  for (row, line) in grid.iter().enumerate() {
    if line.len() != width {
      return Err(ImageError::NonRectangular { row, expected: width, found: line.len() });
    }

    pixels.extend(line.iter().map(|&argb| Pixel::from_argb(argb)));
  }

  Ok(pixels)
}

/// Rebuilds a `height × width` grid from a row-major pixel sequence.
pub fn to_grid(pixels: &[Pixel], height: usize, width: usize) -> Result<Vec<Vec<u32>>, ImageError> {
  let expected = height.checked_mul(width).ok_or(ImageError::GridOverflow { height, width })?;

  if pixels.len() != expected || expected == 0 {
    return Err(ImageError::LengthMismatch { expected, found: pixels.len() });
  }

  Ok(
    pixels
      .chunks_exact(width)
      .map(|row| row.iter().map(|pixel| pixel.to_argb()).collect())
      .collect(),
  )
}
