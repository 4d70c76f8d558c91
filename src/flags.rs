//! Matcher option toggles.
//!
//! The three flags map 1:1 onto the pattern library's builder options. A
//! [`FlagSet`] is a bitmask so that any combination folds into a single
//! options value with `|`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::error::FlagParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Letters match regardless of case.
    CaseInsensitive,
    /// `.` also matches `\n`.
    DotMatchesAll,
    /// `^` and `$` match at line boundaries, not only at the ends of the text.
    MultilineAnchors,
}

impl Flag {
    pub const ALL: [Flag; 3] = [
        Flag::CaseInsensitive,
        Flag::DotMatchesAll,
        Flag::MultilineAnchors,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            Self::CaseInsensitive => 0b001,
            Self::DotMatchesAll => 0b010,
            Self::MultilineAnchors => 0b100,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Self::CaseInsensitive => 'i',
            Self::DotMatchesAll => 's',
            Self::MultilineAnchors => 'm',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.letter() == letter)
    }

    /// Label shown next to the toggle in the tester UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CaseInsensitive => "Case Insensitive",
            Self::DotMatchesAll => "Dot (.) matches all",
            Self::MultilineAnchors => "^$ matches at line breaks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagSet {
    bits: u8,
}

impl FlagSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn bits(self) -> u8 {
        self.bits
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn contains(self, flag: Flag) -> bool {
        self.bits & flag.bit() != 0
    }

    /// Adds `flag`. Returns `false` when it was already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        let before = self.bits;
        self.bits |= flag.bit();
        before != self.bits
    }

    /// Removes `flag`. Returns `false` when it was not present.
    pub fn remove(&mut self, flag: Flag) -> bool {
        let before = self.bits;
        self.bits &= !flag.bit();
        before != self.bits
    }

    pub fn set(&mut self, flag: Flag, enabled: bool) -> bool {
        if enabled {
            self.insert(flag)
        } else {
            self.remove(flag)
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl From<Flag> for FlagSet {
    fn from(flag: Flag) -> Self {
        Self { bits: flag.bit() }
    }
}

impl BitOr for FlagSet {
    type Output = FlagSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOr<Flag> for FlagSet {
    type Output = FlagSet;

    fn bitor(self, rhs: Flag) -> Self::Output {
        self | FlagSet::from(rhs)
    }
}

impl BitOr for Flag {
    type Output = FlagSet;

    fn bitor(self, rhs: Flag) -> Self::Output {
        FlagSet::from(self) | rhs
    }
}

impl BitOrAssign<Flag> for FlagSet {
    fn bitor_assign(&mut self, rhs: Flag) {
        self.insert(rhs);
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        iter.into_iter().fold(FlagSet::empty(), |set, flag| set | flag)
    }
}

impl FromStr for FlagSet {
    type Err = FlagParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut out = FlagSet::empty();
        for letter in input.chars() {
            let Some(flag) = Flag::from_letter(letter) else {
                return Err(FlagParseError::UnknownLetter {
                    input: input.to_string(),
                    letter,
                });
            };
            if !out.insert(flag) {
                return Err(FlagParseError::Repeated {
                    input: input.to_string(),
                    letter,
                });
            }
        }
        Ok(out)
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in [
            Flag::CaseInsensitive,
            Flag::MultilineAnchors,
            Flag::DotMatchesAll,
        ] {
            if self.contains(flag) {
                write!(f, "{}", flag.letter())?;
            }
        }
        Ok(())
    }
}
