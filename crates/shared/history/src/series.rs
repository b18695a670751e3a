//! Append-only series with trailing-window averaging

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One value per completed round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    values: Vec<Decimal>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: Decimal) {
        self.values.push(value);
    }

    /// Mean of the last `range` values
    ///
    /// A range longer than the series averages everything recorded; an empty
    /// series (or a zero range) averages to zero.
    pub fn average(&self, range: usize) -> Decimal {
        let take = range.min(self.values.len());
        if take == 0 {
            return Decimal::ZERO;
        }
        let sum: Decimal = self.values[self.values.len() - take..].iter().sum();
        sum / Decimal::from(take)
    }

    /// Mean of the whole series
    pub fn mean(&self) -> Decimal {
        self.average(self.values.len())
    }

    #[inline]
    pub fn last(&self) -> Option<Decimal> {
        self.values.last().copied()
    }

    #[inline]
    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
