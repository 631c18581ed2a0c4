use std::mem;

use crate::header::QOI_MAX_RUN;
use crate::op::Op;
use crate::pixel::Pixel;

// The call-scoped state maintained while encoding or decoding one image.
pub struct State {
  // A cache of previously seen pixels, indexed by their hash. Collisions
  // overwrite, there is no chaining.
  pub cache: [Pixel; 64],
  // The previously decoded/encoded pixel.
  pub prev_pixel: Pixel,
  // Length of the pending run (Op::Run), encoder only.
  pub run_count: u8,
}

impl State {
  pub fn new() -> Self {
    Self {
      cache: [Pixel::TRANSPARENT; 64],
      prev_pixel: Pixel::START,
      run_count: 0,
    }
  }

  // The update applied after every token: cache the pixel at its hash and
  // make it the previous pixel.
  pub fn update(&mut self, pixel: Pixel) {
    self.cache[pixel.qoi_hash()] = pixel;
    self.prev_pixel = pixel;
  }

  // Extends the pending run by one pixel. Once the run reaches the longest
  // length a single token can hold it is ended and returned.
  pub fn extend_run(&mut self) -> Option<Op> {
    self.run_count += 1;

    if self.run_count == QOI_MAX_RUN {
      return self.take_run();
    }

    None
  }

  // Ends the pending run, if any, and returns its token.
  pub fn take_run(&mut self) -> Option<Op> {
    match mem::take(&mut self.run_count) {
      0 => None,
      run => Some(Op::Run(run)),
    }
  }

  // Checks if the given pixel matches the cached pixel at the computed index
  // and returns the index. If there is no match, the given pixel is inserted,
  // overwriting the pixel that was previously cached, and the index is not
  // returned.
  pub fn cache_match_or_replace(&mut self, pixel: Pixel) -> Option<u8> {
    let index = pixel.qoi_hash();

    if self.cache[index] == pixel {
      return Some(index as u8);
    }

    self.cache[index] = pixel;

    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_initial_state() {
    let state = State::new();

    assert!(state.cache.iter().all(|pixel| *pixel == Pixel::new(0, 0, 0, 0)));
    assert_eq!(state.prev_pixel, Pixel::new(0, 0, 0, 255));
    assert_eq!(state.run_count, 0);
  }

  #[test]
  fn test_update_caches_and_sets_previous() {
    let mut state = State::new();
    let pixel = Pixel::new(101, 102, 103, 104);

    state.update(pixel);

    assert_eq!(state.prev_pixel, pixel);
    assert_eq!(state.cache[54], pixel);
  }

  #[test]
  fn test_run_is_taken_once() {
    let mut state = State::new();

    assert_eq!(state.take_run(), None);
    assert_eq!(state.extend_run(), None);
    assert_eq!(state.extend_run(), None);
    assert_eq!(state.take_run(), Some(Op::Run(2)));
    assert_eq!(state.run_count, 0);
    assert_eq!(state.take_run(), None);
  }

  #[test]
  fn test_run_ends_at_max_length() {
    let mut state = State::new();

    for _ in 1..QOI_MAX_RUN {
      assert_eq!(state.extend_run(), None);
    }

    assert_eq!(state.extend_run(), Some(Op::Run(QOI_MAX_RUN)));
    assert_eq!(state.run_count, 0);
  }

  #[test]
  fn test_cache_collisions_overwrite() {
    let mut state = State::new();
    // Both hash to slot 0.
    let first = Pixel::new(0, 0, 0, 0);
    let second = Pixel::new(0, 0, 64, 64);

    assert_eq!(first.qoi_hash(), second.qoi_hash());
    assert_eq!(state.cache_match_or_replace(first), Some(0));
    assert_eq!(state.cache_match_or_replace(second), None);
    assert_eq!(state.cache[0], second);
    assert_eq!(state.cache_match_or_replace(first), None);
    assert_eq!(state.cache_match_or_replace(first), Some(0));
  }
}
