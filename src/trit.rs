//! The three-valued symbol a TDR bit stream is built from.

use std::fmt;

/// A single scan-chain symbol: driven low, driven high, or don't-care.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trit {
    Low,
    High,
    DontCare,
}

impl Trit {
    /// Parse a single input character (`'0'`, `'1'`, `'X'`/`'x'`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Trit::Low),
            '1' => Some(Trit::High),
            'X' | 'x' => Some(Trit::DontCare),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Trit::Low => '0',
            Trit::High => '1',
            Trit::DontCare => 'X',
        }
    }

    /// `true` for `Low`/`High`, which are the only values a UDW literal can
    /// be built from (a don't-care can never be a dictionary hit).
    pub fn is_bit(self) -> bool {
        !matches!(self, Trit::DontCare)
    }

    pub fn as_bit(self) -> Option<u8> {
        match self {
            Trit::Low => Some(0),
            Trit::High => Some(1),
            Trit::DontCare => None,
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Render a trit slice as the `{0,1}` literal string used as a codebook
/// lookup key: a don't-care resolves to `'1'` (`TDRReader.C`/`Utils.C`
/// treat `X` as a concrete bit for every dictionary comparison), so it is
/// never a foreign character `udw_map` has no entry for. This is distinct
/// from [`Trit::to_char`], which keeps `X` literal for text-TDR rendering.
pub fn serialize(trits: &[Trit]) -> String {
    trits
        .iter()
        .map(|t| if *t == Trit::DontCare { '1' } else { t.to_char() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_chars() {
        for c in ['0', '1', 'X'] {
            let t = Trit::from_char(c).unwrap();
            assert_eq!(t.to_char(), if c == 'x' { 'X' } else { c });
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Trit::from_char('2'), None);
        assert_eq!(Trit::from_char(' '), None);
    }

    #[test]
    fn serialize_resolves_dont_care_to_a_concrete_bit() {
        let v = vec![Trit::Low, Trit::High, Trit::DontCare];
        assert_eq!(serialize(&v), "011");
    }
}
