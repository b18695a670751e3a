//! Adaptive price beliefs
//!
//! Every agent keeps, per commodity and per side, the price it will offer at
//! next round. Filled offers pull the belief toward the observed clearing
//! price; unfilled offers push it toward the other side of the book.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::Price;

/// Decimal places a belief keeps after each update
pub const BELIEF_PRECISION: u32 = 8;

/// Result of one offer after clearing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// At least one unit traded, at this (volume-weighted) clearing price
    Filled(Price),
    /// Nothing traded
    Unfilled,
}

/// Step sizes of the belief update, owned by the agent class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeliefPolicy {
    /// Fraction of the gap to the clearing price closed on a fill (0..=1)
    pub learning_rate: Decimal,
    /// Relative move applied to the target after an unfilled offer
    pub failure_step: Decimal,
    /// Smallest absolute move after an unfilled offer
    pub min_step: Decimal,
}

impl Default for BeliefPolicy {
    fn default() -> Self {
        Self {
            learning_rate: dec!(0.5),
            failure_step: dec!(0.1),
            min_step: dec!(0.05),
        }
    }
}

/// Per-commodity price belief for both sides of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBelief {
    /// Price the agent is willing to pay
    pub buy: Price,
    /// Price the agent is willing to accept
    pub sell: Price,
}

impl PriceBelief {
    /// Start both sides at the same price
    pub fn new(price: Price) -> Self {
        let price = price.max(Decimal::ZERO);
        Self {
            buy: price,
            sell: price,
        }
    }

    /// Current target for one side
    pub fn target(&self, side: Side) -> Price {
        match side {
            Side::Buy => self.buy,
            Side::Sell => self.sell,
        }
    }

    /// Apply the outcome of one offer on `side`
    pub fn update(&mut self, side: Side, outcome: TradeOutcome, policy: &BeliefPolicy) {
        let target = match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        };

        match outcome {
            TradeOutcome::Filled(clearing_price) => {
                let rate = policy.learning_rate.clamp(Decimal::ZERO, Decimal::ONE);
                *target += (clearing_price - *target) * rate;
            }
            TradeOutcome::Unfilled => {
                let step = (*target * policy.failure_step).max(policy.min_step);
                match side {
                    Side::Buy => *target += step,
                    Side::Sell => *target -= step,
                }
            }
        }

        // Bounded scale keeps every later product and quotient in range
        *target = (*target).max(Decimal::ZERO).round_dp(BELIEF_PRECISION);
    }
}
