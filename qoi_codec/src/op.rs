use std::io;

use crate::error::FormatError;
use crate::header::QOI_MAX_RUN;

// The type of token a leading byte introduces. Every byte maps to exactly one
// tag: the two exact-match bytes are checked before the 2-bit prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tag {
  Diff,
  Index,
  Luma,
  Rgb,
  Rgba,
  Run,
}

impl Tag {
  pub fn of(byte: u8) -> Self {
    match byte {
      Op::TAG_RGB => Tag::Rgb,
      Op::TAG_RGBA => Tag::Rgba,
      _ => match byte & Op::MASK_TAG {
        Op::TAG_INDEX => Tag::Index,
        Op::TAG_DIFF => Tag::Diff,
        Op::TAG_LUMA => Tag::Luma,
        _ => Tag::Run,
      },
    }
  }
}

// An enumeration of each possible QOI token, or Op.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Op {
  // `DIFF`, the red, green, and blue difference from the previous pixel, each
  // with a bias of +2.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 1 |  dr |  dg |  db  |
  //
  Diff(u8, u8, u8),

  // `INDEX`, a slot of the pixel cache.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 0 0 |      index       |
  //
  Index(u8),

  // `LUMA`, the green difference from the previous pixel with a bias of +32,
  // then the red-green and blue-green differences with a bias of +8.
  //
  // | 7 6   5  4  3  2  1  0 | 7  6  5  4   3  2  1  0 |
  // |------------------------|-------------------------|
  // | 1 0 |       dg         |   dr - dg  |   db - dg  |
  //
  Luma(u8, u8, u8),

  // `RGB`, raw red, green, and blue values. Alpha is carried over.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|
  // | 1  1  1  1  1  1  1  0 |   r  |   g  |   b  |
  //
  Rgb(u8, u8, u8),

  // `RGBA`, raw red, green, blue, and alpha values.
  //
  // | 7  6  5  4  3  2  1  0 | 7..0 | 7..0 | 7..0 | 7..0 |
  // |------------------------|------|------|------|------|
  // | 1  1  1  1  1  1  1  1 |   r  |   g  |   b  |   a  |
  //
  Rgba(u8, u8, u8, u8),

  // `RUN`, the number of times the previous pixel repeats, 1 to 62. Stored on
  // the wire with a bias of -1.
  //
  // | 7 6   5  4  3  2  1  0 |
  // |------------------------|
  // | 1 1 |      run         |
  //
  Run(u8),
}

impl Op {
  const MASK_DIFF: u8 = 0x03;
  const MASK_LUMA_1: u8 = 0x3f;
  const MASK_LUMA_2: u8 = 0x0f;
  const MASK_INDEX: u8 = 0x3f;
  const MASK_RUN: u8 = 0x3f;
  const MASK_TAG: u8 = 0xc0;

  const TAG_DIFF: u8 = 0x40;
  const TAG_INDEX: u8 = 0x00;
  const TAG_LUMA: u8 = 0x80;
  const TAG_RGB: u8 = 0xfe;
  const TAG_RGBA: u8 = 0xff;
  const TAG_RUN: u8 = 0xc0;

  // Encodes the `Op` and writes it as bytes into the given writer.
  pub fn write_to<W: io::Write>(self, mut writer: W) -> Result<(), io::Error> {
    match self {
      Op::Diff(diff_r, diff_g, diff_b) => {
        writer.write_all(&[Op::TAG_DIFF | (diff_r << 4) | (diff_g << 2) | diff_b])?;
      }
      Op::Index(index) => {
        writer.write_all(&[Op::TAG_INDEX | (index & Op::MASK_INDEX)])?;
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        writer.write_all(&[Op::TAG_LUMA | luma_g, (luma_rg << 4) | luma_bg])?;
      }
      Op::Rgb(r, g, b) => {
        writer.write_all(&[Op::TAG_RGB, r, g, b])?;
      }
      Op::Rgba(r, g, b, a) => {
        writer.write_all(&[Op::TAG_RGBA, r, g, b, a])?;
      }
      Op::Run(run_count) => {
        debug_assert!((1..=QOI_MAX_RUN).contains(&run_count));
        writer.write_all(&[Op::TAG_RUN | (run_count - 1)])?;
      }
    }

    Ok(())
  }

  // Attempts to decode an `Op` from the given bytes. Fails with
  // `UnexpectedEof` if the token is cut short.
  pub fn try_from_bytes<I: Iterator<Item = u8>>(bytes: &mut I) -> Result<Self, FormatError> {
    let mut next = || bytes.next().ok_or(FormatError::UnexpectedEof);
    let byte = next()?;

    let op = match Tag::of(byte) {
      Tag::Rgb => Op::Rgb(next()?, next()?, next()?),
      Tag::Rgba => Op::Rgba(next()?, next()?, next()?, next()?),
      Tag::Diff => Op::Diff(
        byte >> 4 & Op::MASK_DIFF,
        byte >> 2 & Op::MASK_DIFF,
        byte & Op::MASK_DIFF,
      ),
      Tag::Index => Op::Index(byte & Op::MASK_INDEX),
      Tag::Luma => {
        let next_byte = next()?;

        Op::Luma(
          byte & Op::MASK_LUMA_1,
          next_byte >> 4 & Op::MASK_LUMA_2,
          next_byte & Op::MASK_LUMA_2,
        )
      }
      Tag::Run => Op::Run((byte & Op::MASK_RUN) + 1),
    };

    Ok(op)
  }
}
