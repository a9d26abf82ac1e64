//! The closed set of compressed data words (CDWs) the decoder understands.
//!
//! A `Cdw` names a *slot* in the decoder's hardware: its own literal
//! encoding (the bits actually shifted into the scan chain) is fixed by its
//! tag, independent of whatever uncompressed data word (UDW) is currently
//! bound to it. `NONE` is not a real codeword; it is the sentinel returned
//! by a failed dictionary lookup.

use num_derive::{FromPrimitive, ToPrimitive};

/// A tagged codeword. Variants below the `-- extended set --` marker are
/// only active when the codebook was built with `ext_cdws` enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Cdw {
    None,
    Xxx, // repetition marker, zero-width encoding
    Lxx, // 0
    Hxx, // 1
    Llx, // 00
    Lhx, // 01
    Hlx, // 10
    Hhx, // 11
    Lll, // 000
    Llh, // 001
    Lhl, // 010
    Lhh, // 011
    Hll, // 100
    Hlh, // 101
    Hhl, // 110
    Hhh, // 111
    // -- extended set --
    Llll, // 0000
    Lllh, // 0001
    Llhl, // 0010
    Llhh, // 0011
    Lhll, // 0100
    Lhlh, // 0101
    Lhhl, // 0110
    Lhhh, // 0111
    Hlll, // 1000
    Hllh, // 1001
    Hlhl, // 1010
    Hlhh, // 1011
    Hhll, // 1100
    Hhlh, // 1101
    Hhhl, // 1110
    Hhhh, // 1111
}

impl Cdw {
    /// The bit literal this CDW is physically shifted as; `XXX` is empty
    /// (it signals "repeat the previous non-XXX codeword").
    pub fn encoding(self) -> &'static str {
        use Cdw::*;
        match self {
            None => panic!("NONE is not a real codeword"),
            Xxx => "",
            Lxx => "0",
            Hxx => "1",
            Llx => "00",
            Lhx => "01",
            Hlx => "10",
            Hhx => "11",
            Lll => "000",
            Llh => "001",
            Lhl => "010",
            Lhh => "011",
            Hll => "100",
            Hlh => "101",
            Hhl => "110",
            Hhh => "111",
            Llll => "0000",
            Lllh => "0001",
            Llhl => "0010",
            Llhh => "0011",
            Lhll => "0100",
            Lhlh => "0101",
            Lhhl => "0110",
            Lhhh => "0111",
            Hlll => "1000",
            Hllh => "1001",
            Hlhl => "1010",
            Hlhh => "1011",
            Hhll => "1100",
            Hhlh => "1101",
            Hhhl => "1110",
            Hhhh => "1111",
        }
    }

    /// Length in bits of the physical encoding (0 for `XXX`).
    pub fn length(self) -> usize {
        self.encoding().len()
    }

    pub fn is_empty_cdw(self) -> bool {
        self == Cdw::Xxx
    }

    pub fn is_valid(self) -> bool {
        self != Cdw::None
    }

    /// Static CDWs ship fixed in the decoder (never overwritable by dynamic
    /// insertion): the two single-bit tags. Matches
    /// `Decompressor::isStaticCDW`, which (per its own `TODO`) never treats
    /// the 2-trit family as static regardless of `ext_cdws`.
    pub fn is_static(self) -> bool {
        matches!(self, Cdw::Lxx | Cdw::Hxx)
    }

    /// All CDW tags belonging to the non-extended codebook, in the fixed
    /// enumeration order used to seed `TBR`.
    pub fn base_set() -> &'static [Cdw] {
        use Cdw::*;
        &[
            Xxx, Lxx, Hxx, Llx, Lhx, Hlx, Hhx, Lll, Llh, Lhl, Lhh, Hll, Hlh, Hhl, Hhh,
        ]
    }

    /// The 16 additional 4-trit tags unlocked by `ext_cdws`.
    pub fn extended_set() -> &'static [Cdw] {
        use Cdw::*;
        &[
            Llll, Lllh, Llhl, Llhh, Lhll, Lhlh, Lhhl, Lhhh, Hlll, Hllh, Hlhl, Hlhh, Hhll, Hhlh,
            Hhhl, Hhhh,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_lengths_match_name() {
        assert_eq!(Cdw::Xxx.length(), 0);
        assert_eq!(Cdw::Lxx.length(), 1);
        assert_eq!(Cdw::Llx.length(), 2);
        assert_eq!(Cdw::Lll.length(), 3);
        assert_eq!(Cdw::Llll.length(), 4);
    }

    #[test]
    fn only_single_bit_tags_are_static() {
        assert!(Cdw::Lxx.is_static());
        assert!(Cdw::Hxx.is_static());
        assert!(!Cdw::Llx.is_static());
        assert!(!Cdw::Lll.is_static());
    }
}
