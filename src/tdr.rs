//! Reading, writing and synthesizing TDR bit streams.
//!
//! Grounded on `TDRReader.C` (`readTDR`/`readHexTDR`) for the two input
//! formats and `TDRGen.C` for the synthetic generator, with the generator's
//! PRNG seed made a runtime argument instead of a compile-time constant.

use crate::error::{Error, Result};
use crate::trit::Trit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::BufRead;
use std::path::Path;

/// Parse a text TDR buffer: whitespace-separated `{0,1,X}` symbols. Unknown
/// characters are logged and skipped rather than rejected (`InputError` is a
/// warning here, not a failure, per the input-format contract).
pub fn parse_text(contents: &str) -> Vec<Trit> {
    let mut trits = Vec::new();
    for (lineno, line) in contents.lines().enumerate() {
        for c in line.chars() {
            if c.is_whitespace() {
                continue;
            }
            match Trit::from_char(c) {
                Some(t) => trits.push(t),
                None => log::warn!("line {}: unsupported character '{}' skipped", lineno + 1, c),
            }
        }
    }
    trits
}

pub fn read_text(path: &Path) -> Result<Vec<Trit>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_text(&contents))
}

/// Decode one hex TDR line: exactly 9 characters, the first 8 a big-endian
/// 32-bit hex word, the 9th a separator that carries no data.
pub fn parse_hex_line(line: &str) -> Result<Vec<Trit>> {
    if line.chars().count() != 9 {
        return Err(Error::Input(format!(
            "hex TDR line must be exactly 9 characters, got {}: {:?}",
            line.chars().count(),
            line
        )));
    }
    let word = &line[..8];
    let value = u32::from_str_radix(word, 16)
        .map_err(|e| Error::Input(format!("invalid hex word {:?}: {}", word, e)))?;
    Ok((0..32)
        .rev()
        .map(|i| {
            if (value >> i) & 1 == 1 {
                Trit::High
            } else {
                Trit::Low
            }
        })
        .collect())
}

pub fn read_hex(path: &Path) -> Result<Vec<Trit>> {
    let file = std::fs::File::open(path)?;
    let mut trits = Vec::new();
    for line in std::io::BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        trits.extend(parse_hex_line(&line)?);
    }
    Ok(trits)
}

/// Render a trit slice back to text-TDR form, one symbol per line (used by
/// the synthetic generator and by tests that round-trip through the reader).
pub fn write_text(trits: &[Trit]) -> String {
    let mut out = String::with_capacity(trits.len() * 2);
    for t in trits {
        out.push(t.to_char());
        out.push('\n');
    }
    out
}

/// Generate `len` synthetic trits; don't-cares are drawn only if `allow_x`.
/// The seed is always caller-supplied so runs are reproducible on demand.
pub fn generate(len: usize, allow_x: bool, seed: u64) -> Vec<Trit> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if allow_x && rng.gen_bool(1.0 / 8.0) {
                Trit::DontCare
            } else if rng.gen_bool(0.5) {
                Trit::High
            } else {
                Trit::Low
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text_skips_unsupported_chars_but_keeps_going() {
        let trits = parse_text("01X 0\n1?1");
        assert_eq!(trits.len(), 6);
    }

    #[test]
    fn hex_line_decodes_big_endian() {
        let trits = parse_hex_line("00000001-").unwrap();
        assert_eq!(trits.len(), 32);
        assert_eq!(trits[31], Trit::High);
        assert!(trits[..31].iter().all(|&t| t == Trit::Low));
    }

    #[test]
    fn hex_line_rejects_wrong_length() {
        assert!(parse_hex_line("0001").is_err());
    }

    #[test]
    fn generate_is_deterministic_for_a_given_seed() {
        let a = generate(64, true, 42);
        let b = generate(64, true, 42);
        assert_eq!(a, b);
        let c = generate(64, true, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn generate_without_allow_x_never_emits_dont_care() {
        let trits = generate(256, false, 7);
        assert!(trits.iter().all(|t| t.is_bit()));
    }
}
