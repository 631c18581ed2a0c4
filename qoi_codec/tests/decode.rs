use qoi_codec::{
  decode, decode_header, decode_pixels, Channels, Colorspace, Error, FormatError, Header, Pixel,
  QOI_END_MARKER,
};

fn file(header: &[u8], tokens: &[u8]) -> Vec<u8> {
  let mut bytes = header.to_vec();

  bytes.extend_from_slice(tokens);
  bytes.extend_from_slice(&QOI_END_MARKER);
  bytes
}

fn header(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
  let mut bytes = b"qoif".to_vec();

  bytes.extend_from_slice(&width.to_be_bytes());
  bytes.extend_from_slice(&height.to_be_bytes());
  bytes.extend_from_slice(&[channels, colorspace]);
  bytes
}

#[test]
fn test_decoding_two_identical_pixels() {
  let bytes = file(&header(2, 1, 4, 0), &[0xfe, 10, 20, 30, 0xc0]);
  let image = decode(&bytes).expect("Failed to decode image");

  assert_eq!(image.pixels, vec![vec![0xff0a141e, 0xff0a141e]]);
  assert_eq!(image.channels, 4);
  assert_eq!(image.colorspace, 0);
}

#[test]
fn test_decoding_header_fields() {
  assert_eq!(
    decode_header(&header(640, 480, 3, 1)).expect("Failed to decode header"),
    Header { width: 640, height: 480, channels: Channels::Rgb, colorspace: Colorspace::Linear }
  );
}

#[test]
fn test_decoding_truncated_header() {
  let bytes = header(1, 1, 4, 0);

  assert!(matches!(
    decode_header(&bytes[..13]),
    Err(Error::InvalidFormat(FormatError::InvalidHeaderLength(13)))
  ));
}

#[test]
fn test_decoding_invalid_magic() {
  let mut bytes = file(&header(1, 1, 4, 0), &[0xc0]);
  bytes[3] = b'g';

  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::InvalidMagic))));
}

#[test]
fn test_decoding_invalid_header_tags() {
  let bytes = file(&header(1, 1, 5, 0), &[0xc0]);
  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::InvalidChannels(5)))));

  let bytes = file(&header(1, 1, 4, 2), &[0xc0]);
  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::InvalidColorspace(2)))));
}

#[test]
fn test_decoding_zero_dimensions() {
  let bytes = file(&header(0, 0, 3, 1), &[]);

  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::InvalidDimensions))));
}

#[test]
fn test_decoding_incomplete_image() {
  // Two pixels declared, one decoded.
  let bytes = file(&header(2, 1, 4, 0), &[0xc0]);

  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::UnexpectedEof))));
}

#[test]
fn test_decoding_missing_end_marker() {
  let mut bytes = header(1, 1, 4, 0);
  bytes.push(0xc0);

  assert!(matches!(decode(&bytes), Err(Error::InvalidFormat(FormatError::MissingEndMarker))));
}

#[test]
fn test_decoding_overrunning_run() {
  let bytes = file(&header(3, 1, 4, 0), &[0xc0 | 3]);

  assert!(matches!(
    decode(&bytes),
    Err(Error::InvalidFormat(FormatError::Overrun { run: 4, position: 0, total: 3 }))
  ));
}

#[test]
fn test_decoding_every_leading_byte() {
  // Each byte is followed by enough filler for the longest token. Decoding
  // one pixel must either succeed or fail on format, never panic.
  for byte in 0..=255u8 {
    let tokens = [byte, 1, 2, 3, 4];
    let result = decode_pixels(&tokens, 1, 1);

    match byte {
      0xfe => assert!(matches!(result, Err(Error::InvalidFormat(FormatError::TrailingData(1))))),
      0xff => assert_eq!(result.expect("Failed to decode rgba"), vec![Pixel::new(1, 2, 3, 4)]),
      0x80..=0xbf => {
        assert!(matches!(result, Err(Error::InvalidFormat(FormatError::TrailingData(3)))))
      }
      0xc1..=0xfd => {
        assert!(matches!(result, Err(Error::InvalidFormat(FormatError::Overrun { .. }))))
      }
      _ => assert!(matches!(result, Err(Error::InvalidFormat(FormatError::TrailingData(4))))),
    }
  }
}
