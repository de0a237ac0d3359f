// src/interval/chunk.rs

//! Chunk lengths: the span of simulation time one aggregated file covers.

use std::fmt;
use std::str::FromStr;

use crate::errors::{PpschedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkUnit {
    Years,
    Months,
}

/// Length of one requested aggregation chunk.
///
/// Only whole years and whole months exist in this model; there is no
/// sub-month chunk aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLength {
    pub unit: ChunkUnit,
    pub quantity: u32,
}

impl ChunkLength {
    pub fn years(quantity: u32) -> Self {
        Self {
            unit: ChunkUnit::Years,
            quantity,
        }
    }

    pub fn months(quantity: u32) -> Self {
        Self {
            unit: ChunkUnit::Months,
            quantity,
        }
    }

    /// Parse chunk length specs like `"5yr"` or `"6mo"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let s = spec.trim();
        let malformed = || PpschedError::MalformedInterval(spec.to_string());
        let (digits, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).ok_or_else(malformed)?);
        let quantity: u32 = digits.parse().map_err(|_| malformed())?;
        if quantity == 0 {
            return Err(malformed());
        }
        match unit {
            "yr" => Ok(ChunkLength::years(quantity)),
            "mo" => Ok(ChunkLength::months(quantity)),
            _ => Err(malformed()),
        }
    }

    pub fn in_months(&self) -> u32 {
        match self.unit {
            ChunkUnit::Years => self.quantity * 12,
            ChunkUnit::Months => self.quantity,
        }
    }

    /// Whole years, if this length is year-aligned.
    pub fn in_years(&self) -> Option<u32> {
        let m = self.in_months();
        (m % 12 == 0).then_some(m / 12)
    }
}

impl FromStr for ChunkLength {
    type Err = PpschedError;

    fn from_str(s: &str) -> Result<Self> {
        ChunkLength::parse(s)
    }
}

impl fmt::Display for ChunkLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            ChunkUnit::Years => write!(f, "{}yr", self.quantity),
            ChunkUnit::Months => write!(f, "{}mo", self.quantity),
        }
    }
}
