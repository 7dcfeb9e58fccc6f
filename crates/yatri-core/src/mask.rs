//! Display masking for sensitive strings.

pub const MASK_CHAR: char = '*';

/// Trailing characters left visible by [`mask`].
pub const DEFAULT_VISIBLE: usize = 4;

/// Mask all but the last [`DEFAULT_VISIBLE`] characters.
pub fn mask(value: &str) -> String {
  mask_with(value, DEFAULT_VISIBLE)
}

/// Mask all but the last `visible` characters.
///
/// Values no longer than `visible` are masked entirely. Counts `char`s, so
/// multi-byte input is never split.
pub fn mask_with(value: &str, visible: usize) -> String {
  let len = value.chars().count();
  if len <= visible {
    return std::iter::repeat_n(MASK_CHAR, len).collect();
  }
  let hidden = len - visible;
  value
    .chars()
    .enumerate()
    .map(|(i, c)| if i < hidden { MASK_CHAR } else { c })
    .collect()
}
