//! The nine Vimshottari lords and their period weights.
//!
//! The cycle order and the weights are fixed by the classical scheme:
//! Ketu 7, Venus 20, Sun 6, Moon 10, Mars 7, Rahu 18, Jupiter 16,
//! Saturn 19, Mercury 17. Together they span 120 years.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashaError;

/// Number of lords in the cycle.
pub const LORD_COUNT: usize = 9;

/// Length of one full Vimshottari cycle in years.
pub const TOTAL_CYCLE_YEARS: u32 = 120;

/// A Vimshottari dasha lord, declared in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lord {
    Ketu,
    Venus,
    Sun,
    Moon,
    Mars,
    Rahu,
    Jupiter,
    Saturn,
    Mercury,
}

/// All nine lords in cycle order.
pub const LORD_CYCLE: [Lord; LORD_COUNT] = [
    Lord::Ketu,
    Lord::Venus,
    Lord::Sun,
    Lord::Moon,
    Lord::Mars,
    Lord::Rahu,
    Lord::Jupiter,
    Lord::Saturn,
    Lord::Mercury,
];

/// Period weights in years, indexed like [`LORD_CYCLE`].
pub const LORD_YEARS: [u32; LORD_COUNT] = [7, 20, 6, 10, 7, 18, 16, 19, 17];

/// Lord at position `(start_index + offset) mod 9` in the cycle.
pub const fn lord_at(start_index: usize, offset: usize) -> Lord {
    LORD_CYCLE[(start_index % LORD_COUNT + offset % LORD_COUNT) % LORD_COUNT]
}

/// Period weight of `lord` in years out of 120.
pub const fn weight_of(lord: Lord) -> u32 {
    LORD_YEARS[lord.index()]
}

impl Lord {
    /// 0-based position in [`LORD_CYCLE`].
    pub const fn index(self) -> usize {
        match self {
            Self::Ketu => 0,
            Self::Venus => 1,
            Self::Sun => 2,
            Self::Moon => 3,
            Self::Mars => 4,
            Self::Rahu => 5,
            Self::Jupiter => 6,
            Self::Saturn => 7,
            Self::Mercury => 8,
        }
    }

    /// English name, as used in rendered records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ketu => "Ketu",
            Self::Venus => "Venus",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Rahu => "Rahu",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Mercury => "Mercury",
        }
    }

    /// Sanskrit name of the graha.
    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Ketu => "Ketu",
            Self::Venus => "Shukra",
            Self::Sun => "Surya",
            Self::Moon => "Chandra",
            Self::Mars => "Mangal",
            Self::Rahu => "Rahu",
            Self::Jupiter => "Guru",
            Self::Saturn => "Shani",
            Self::Mercury => "Buddh",
        }
    }

    /// Full-cycle period in years.
    pub const fn years(self) -> u32 {
        weight_of(self)
    }

    /// The lord that follows this one in the cycle.
    pub const fn next(self) -> Self {
        lord_at(self.index(), 1)
    }
}

impl Display for Lord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lord {
    type Err = DashaError;

    /// Case-insensitive match on the English or Sanskrit name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        LORD_CYCLE
            .iter()
            .copied()
            .find(|l| {
                l.name().eq_ignore_ascii_case(needle)
                    || l.sanskrit_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| DashaError::UnknownLord(s.to_string()))
    }
}
