//! Verhoeff checksum over decimal digit strings.
//!
//! The three tables are the standard dihedral-group constants: `D` is the
//! multiplication table of D5, `P` the position-dependent permutation, and
//! `INV` the multiplicative inverse used when generating a check digit.

use crate::{Error, Result};

/// Number of digits in a complete identity number, check digit included.
pub const NUMBER_LEN: usize = 12;

/// Number of digits in the body a check digit is generated for.
pub const BODY_LEN: usize = NUMBER_LEN - 1;

const D: [[u8; 10]; 10] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
  [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
  [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
  [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
  [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
  [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
  [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
  [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
  [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
  [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const P: [[u8; 10]; 8] = [
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
  [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
  [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
  [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
  [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
  [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
  [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
  [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Run the Verhoeff recurrence over `digits` (values 0–9, most significant
/// first), shifting every position by `offset`.
fn fold(digits: &[u8], offset: usize) -> u8 {
  digits
    .iter()
    .rev()
    .enumerate()
    .fold(0, |c, (i, &v)| D[c as usize][P[(i + offset) % 8][v as usize] as usize])
}

/// `true` if `digits` (values 0–9) carry a valid trailing Verhoeff check digit.
pub fn checksum_ok(digits: &[u8]) -> bool {
  fold(digits, 0) == 0
}

/// Compute the check digit to append to an 11-digit `body`.
///
/// Appending the returned digit always yields a number that passes
/// [`checksum_ok`].
pub fn check_digit(body: &str) -> Result<u8> {
  if body.len() != BODY_LEN || !body.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InvalidCheckBody { expected: BODY_LEN });
  }
  let digits: Vec<u8> = body.bytes().map(|b| b - b'0').collect();
  Ok(INV[fold(&digits, 1) as usize])
}
