//! Core types for the Vimshottari period tree.

use crate::lord::Lord;

/// Year length for dasha arithmetic (mean Gregorian year, in days).
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Deepest level materialized by the builder (Mahadasha through Prana).
pub const MAX_DASHA_DEPTH: i32 = 6;

/// Default depth for top-level requests: Mahadashas only.
pub const DEFAULT_DASHA_DEPTH: i32 = 1;

/// Convert a span in years to days.
pub fn years_to_days(years: f64) -> f64 {
    years * DAYS_PER_YEAR
}

/// Convert a span in days to years.
pub fn days_to_years(days: f64) -> f64 {
    days / DAYS_PER_YEAR
}

/// The six named nesting levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 1,
    Bhukti = 2,
    Antara = 3,
    Pratyantara = 4,
    Sookshma = 5,
    Prana = 6,
}

impl DashaLevel {
    /// Level for a 1-based nesting depth.
    pub fn from_depth(depth: i32) -> Option<Self> {
        match depth {
            1 => Some(Self::Mahadasha),
            2 => Some(Self::Bhukti),
            3 => Some(Self::Antara),
            4 => Some(Self::Pratyantara),
            5 => Some(Self::Sookshma),
            6 => Some(Self::Prana),
            _ => None,
        }
    }

    /// 1-based nesting depth.
    pub const fn depth(self) -> i32 {
        self as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Bhukti => "Bhukti",
            Self::Antara => "Antara",
            Self::Pratyantara => "Pratyantara",
            Self::Sookshma => "Sookshma",
            Self::Prana => "Prana",
        }
    }

    /// Short label used in breadcrumbs and table headers.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Mahadasha => "MD",
            Self::Bhukti => "B",
            Self::Antara => "A",
            Self::Pratyantara => "P",
            Self::Sookshma => "S",
            Self::Prana => "PD",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Bhukti),
            Self::Bhukti => Some(Self::Antara),
            Self::Antara => Some(Self::Pratyantara),
            Self::Pratyantara => Some(Self::Sookshma),
            Self::Sookshma => Some(Self::Prana),
            Self::Prana => None,
        }
    }
}

/// One period of the tree: a lord ruling the half-open span `[start_jd, end_jd)`.
///
/// `children` is empty until the node is expanded; when present it holds
/// exactly nine contiguous sub-periods starting with this node's own lord.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaNode {
    pub lord: Lord,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Duration of the period in years.
    pub fn duration_years(&self) -> f64 {
        days_to_years(self.duration_days())
    }

    /// Whether `jd` falls inside `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DashaNode::node_count).sum::<usize>()
    }
}
