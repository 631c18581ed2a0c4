use crate::error::{FormatError, ImageError};

/// The four magic bytes every QOI file starts with.
pub const QOI_MAGIC: &[u8; 4] = b"qoif";
/// The fixed length of an encoded header.
pub const QOI_HEADER_LEN: usize = 14;
/// The marker terminating every QOI file.
pub const QOI_END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
/// The longest run a single `RUN` token can describe.
pub const QOI_MAX_RUN: u8 = 62;

/// The number of color channels declared by an image. The encoded stream
/// always carries alpha, the tag only describes the source image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Channels {
  Rgb = 3,
  Rgba = 4,
}

impl TryFrom<u8> for Channels {
  type Error = u8;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      3 => Ok(Channels::Rgb),
      4 => Ok(Channels::Rgba),
      other => Err(other),
    }
  }
}

/// How an image's colors are organized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colorspace {
  /// sRGB color channels with a linear alpha channel.
  Srgb = 0,
  /// All channels linear.
  Linear = 1,
}

impl TryFrom<u8> for Colorspace {
  type Error = u8;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    match byte {
      0 => Ok(Colorspace::Srgb),
      1 => Ok(Colorspace::Linear),
      other => Err(other),
    }
  }
}

/// The decoded contents of a 14 byte QOI header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
  /// The image's width in pixels.
  pub width: u32,
  /// The image's height in pixels.
  pub height: u32,
  /// The image's declared channel count, see [Channels].
  pub channels: Channels,
  /// The image's colorspace, see [Colorspace].
  pub colorspace: Colorspace,
}

impl Header {
  /// Builds a header from the raw channel and colorspace tags of an
  /// in-memory image.
  pub fn new(width: u32, height: u32, channels: u8, colorspace: u8) -> Result<Self, ImageError> {
    Ok(Self {
      width,
      height,
      channels: Channels::try_from(channels).map_err(ImageError::InvalidChannels)?,
      colorspace: Colorspace::try_from(colorspace).map_err(ImageError::InvalidColorspace)?,
    })
  }

  /// Serializes the header as magic, big-endian width and height, channel
  /// count and colorspace.
  pub fn to_bytes(&self) -> [u8; QOI_HEADER_LEN] {
    let mut bytes = [0; QOI_HEADER_LEN];

    bytes[..4].copy_from_slice(QOI_MAGIC);
    bytes[4..8].copy_from_slice(&self.width.to_be_bytes());
    bytes[8..12].copy_from_slice(&self.height.to_be_bytes());
    bytes[12] = self.channels as u8;
    bytes[13] = self.colorspace as u8;

    bytes
  }

  /// Parses exactly [QOI_HEADER_LEN] bytes.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
    let bytes: &[u8; QOI_HEADER_LEN] = bytes
      .try_into()
      .map_err(|_| FormatError::InvalidHeaderLength(bytes.len()))?;

    if &bytes[..4] != QOI_MAGIC {
      return Err(FormatError::InvalidMagic);
    }

    let width = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let height = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

    if width == 0 || height == 0 {
      return Err(FormatError::InvalidDimensions);
    }

    Ok(Self {
      width,
      height,
      channels: Channels::try_from(bytes[12]).map_err(FormatError::InvalidChannels)?,
      colorspace: Colorspace::try_from(bytes[13]).map_err(FormatError::InvalidColorspace)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header_bytes(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(QOI_MAGIC);
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[channels, colorspace]);
    bytes
  }

  #[test]
  fn test_header_to_bytes() {
    let header = Header::new(800, 600, 4, 0).expect("Failed to build header");

    assert_eq!(header.to_bytes().as_slice(), header_bytes(800, 600, 4, 0).as_slice());
    assert_eq!(
      header.to_bytes(),
      [b'q', b'o', b'i', b'f', 0, 0, 3, 32, 0, 0, 2, 88, 4, 0]
    );
  }

  #[test]
  fn test_header_from_bytes() {
    assert_eq!(
      Header::from_bytes(&header_bytes(3, 7, 3, 1)),
      Ok(Header { width: 3, height: 7, channels: Channels::Rgb, colorspace: Colorspace::Linear })
    );
  }

  #[test]
  fn test_header_rejects_bad_tags() {
    assert_eq!(Header::new(1, 1, 5, 0), Err(ImageError::InvalidChannels(5)));
    assert_eq!(Header::new(1, 1, 4, 2), Err(ImageError::InvalidColorspace(2)));
    assert_eq!(
      Header::from_bytes(&header_bytes(1, 1, 2, 0)),
      Err(FormatError::InvalidChannels(2))
    );
    assert_eq!(
      Header::from_bytes(&header_bytes(1, 1, 4, 9)),
      Err(FormatError::InvalidColorspace(9))
    );
  }

  #[test]
  fn test_header_rejects_bad_magic() {
    let mut bytes = header_bytes(1, 1, 4, 0);
    bytes[0] = b'Q';

    assert_eq!(Header::from_bytes(&bytes), Err(FormatError::InvalidMagic));
  }

  #[test]
  fn test_header_rejects_wrong_length() {
    let bytes = header_bytes(1, 1, 4, 0);

    assert_eq!(Header::from_bytes(&bytes[..13]), Err(FormatError::InvalidHeaderLength(13)));
    assert_eq!(Header::from_bytes(&[]), Err(FormatError::InvalidHeaderLength(0)));
  }

  #[test]
  fn test_header_rejects_empty_dimensions() {
    assert_eq!(
      Header::from_bytes(&header_bytes(0, 10, 4, 0)),
      Err(FormatError::InvalidDimensions)
    );
    assert_eq!(
      Header::from_bytes(&header_bytes(10, 0, 4, 0)),
      Err(FormatError::InvalidDimensions)
    );
  }
}
