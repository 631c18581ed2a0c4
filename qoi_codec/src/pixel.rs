// An enumeration of the possible pixel "diffs", each channel with its bias
// already applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PixelDiff {
  // A `DIFF` token diff, each channel biased by +2.
  Color(u8, u8, u8),
  // A `LUMA` token diff: green biased by +32, red-green and blue-green biased
  // by +8.
  Luma(u8, u8, u8),
}

/// A single RGBA pixel. Channels are never pre-multiplied with alpha.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Pixel {
  /// Red channel value.
  pub r: u8,
  /// Green channel value.
  pub g: u8,
  /// Blue channel value.
  pub b: u8,
  /// Alpha channel value.
  pub a: u8,
}

impl Pixel {
  /// The value of the previous-pixel register before the first pixel of an
  /// image is encoded or decoded: opaque black.
  pub const START: Pixel = Pixel::new(0, 0, 0, 255);

  /// Fully transparent black, the initial value of every cache slot.
  pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

  /// Builds a pixel from its four channel values.
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Unpacks a `0xAARRGGBB` value.
  pub const fn from_argb(argb: u32) -> Self {
    let [a, r, g, b] = argb.to_be_bytes();
    Self { r, g, b, a }
  }

  /// Packs the pixel into a `0xAARRGGBB` value.
  pub const fn to_argb(self) -> u32 {
    u32::from_be_bytes([self.a, self.r, self.g, self.b])
  }

  // Attempts to produce a `PixelDiff` against the provided `other` pixel.
  // Returns `Some(PixelDiff)` when there is a diff within range, otherwise
  // `None` is returned. A `Color` diff always wins over a `Luma` diff.
  pub(crate) fn diff(&self, other: &Pixel) -> Option<PixelDiff> {
    if self.a != other.a {
      return None;
    }

    let diff_r = self.r.wrapping_sub(other.r);
    let diff_g = self.g.wrapping_sub(other.g);
    let diff_b = self.b.wrapping_sub(other.b);

    let color_r = diff_r.wrapping_add(2);
    let color_g = diff_g.wrapping_add(2);
    let color_b = diff_b.wrapping_add(2);

    if color_r <= 3 && color_g <= 3 && color_b <= 3 {
      return Some(PixelDiff::Color(color_r, color_g, color_b));
    }

    let luma_g = diff_g.wrapping_add(32);

    if luma_g > 63 {
      return None;
    }

    let luma_rg = diff_r.wrapping_sub(diff_g).wrapping_add(8);
    let luma_bg = diff_b.wrapping_sub(diff_g).wrapping_add(8);

    if luma_rg <= 15 && luma_bg <= 15 {
      return Some(PixelDiff::Luma(luma_g, luma_rg, luma_bg));
    }

    None
  }

  // Recreates a `Pixel` from the provided `diff` and the pixel it was taken
  // against. Alpha is always carried over.
  pub(crate) fn from_diff(diff: PixelDiff, prev: &Pixel) -> Self {
    match diff {
      PixelDiff::Color(diff_r, diff_g, diff_b) => Self {
        r: prev.r.wrapping_add(diff_r.wrapping_sub(2)),
        g: prev.g.wrapping_add(diff_g.wrapping_sub(2)),
        b: prev.b.wrapping_add(diff_b.wrapping_sub(2)),
        a: prev.a,
      },
      PixelDiff::Luma(luma_g, luma_rg, luma_bg) => {
        let diff_g = luma_g.wrapping_sub(32);
        let diff_r = luma_rg.wrapping_sub(8).wrapping_add(diff_g);
        let diff_b = luma_bg.wrapping_sub(8).wrapping_add(diff_g);

        Self {
          r: prev.r.wrapping_add(diff_r),
          g: prev.g.wrapping_add(diff_g),
          b: prev.b.wrapping_add(diff_b),
          a: prev.a,
        }
      }
    }
  }

  /// The QOI color hash, always in `0..64`. Not implemented via the `Hash`
  /// trait since the value is part of the wire format.
  pub fn qoi_hash(&self) -> usize {
    let r = self.r as usize;
    let g = self.g as usize;
    let b = self.b as usize;
    let a = self.a as usize;

    (r * 3 + g * 5 + b * 7 + a * 11) % 64
  }
}
