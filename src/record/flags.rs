use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// SAM-compatible record flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flags(u16);
impl Flags {
    pub const PAIRED: Self = Self(0x1);
    pub const UNMAPPED: Self = Self(0x4);
    pub const MATE_UNMAPPED: Self = Self(0x8);
    pub const FIRST_SEGMENT: Self = Self(0x40);
    pub const LAST_SEGMENT: Self = Self(0x80);
    pub const QC_FAIL: Self = Self(0x200);

    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn bits(&self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}
impl BitOr for Flags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
impl From<u16> for Flags {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}
impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
