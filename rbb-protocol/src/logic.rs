//! The nine-valued logic type used by HDL simulators and its two-valued projection.
//!
//! Simulators hand signal values across their foreign interfaces as the ordinal of the
//! VHDL `std_ulogic` enumeration. The bridge itself only knows about plain bits, so
//! the conversion happens here, at the boundary.
use std::fmt::Display;

/// A `std_ulogic` value, numbered like the VHDL enumeration.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Logic {
    /// Uninitialized
    #[default]
    U = 0,
    /// Forcing unknown
    X = 1,
    /// Forcing 0
    Zero = 2,
    /// Forcing 1
    One = 3,
    /// High impedance
    Z = 4,
    /// Weak unknown
    W = 5,
    /// Weak 0
    L = 6,
    /// Weak 1
    H = 7,
    /// Don't care
    DontCare = 8,
}

impl Logic {
    /// Decodes the ordinal a simulator passes for a `std_ulogic`.
    pub fn from_raw(raw: u8) -> Option<Logic> {
        Some(match raw {
            0 => Logic::U,
            1 => Logic::X,
            2 => Logic::Zero,
            3 => Logic::One,
            4 => Logic::Z,
            5 => Logic::W,
            6 => Logic::L,
            7 => Logic::H,
            8 => Logic::DontCare,
            _ => return None,
        })
    }

    /// The ordinal of this value.
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Collapses to a bit: forcing and weak 1 are high, everything else is low.
    pub fn to_bit(self) -> bool {
        matches!(self, Logic::One | Logic::H)
    }

    /// Forcing 1 for `true`, forcing 0 for `false`.
    pub fn from_bit(bit: bool) -> Logic {
        if bit { Logic::One } else { Logic::Zero }
    }

    /// Collapses a raw ordinal to a bit. Ordinals outside of the enumeration are low.
    pub fn raw_to_bit(raw: u8) -> bool {
        Logic::from_raw(raw).is_some_and(Logic::to_bit)
    }
}

impl From<bool> for Logic {
    fn from(value: bool) -> Self {
        Logic::from_bit(value)
    }
}

impl Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Logic::U => 'U',
            Logic::X => 'X',
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::Z => 'Z',
            Logic::W => 'W',
            Logic::L => 'L',
            Logic::H => 'H',
            Logic::DontCare => '-',
        };
        write!(f, "{}", c)
    }
}

#[cfg(test)]
mod test {
    use super::Logic;

    #[test]
    fn only_strong_and_weak_one_are_high() {
        let high: Vec<Logic> = (0..=8)
            .filter_map(Logic::from_raw)
            .filter(|l| l.to_bit())
            .collect();
        assert_eq!(high, vec![Logic::One, Logic::H]);
    }

    #[test]
    fn raw_ordinals_round_trip() {
        for raw in 0..=8 {
            assert_eq!(Logic::from_raw(raw).unwrap().as_raw(), raw);
        }
        assert_eq!(Logic::from_raw(9), None);
    }

    #[test]
    fn out_of_range_raw_is_low() {
        assert!(!Logic::raw_to_bit(9));
        assert!(!Logic::raw_to_bit(0xff));
        assert!(Logic::raw_to_bit(3));
        assert!(Logic::raw_to_bit(7));
    }

    #[test]
    fn bits_drive_forcing_levels() {
        assert_eq!(Logic::from_bit(true), Logic::One);
        assert_eq!(Logic::from_bit(false), Logic::Zero);
        assert_eq!(Logic::X.to_string(), "X");
        assert_eq!(Logic::DontCare.to_string(), "-");
    }
}
