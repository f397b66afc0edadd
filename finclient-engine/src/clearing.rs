//! Call-auction clearing price calculation
//!
//! Collects every active order into price levels and picks the single price
//! that maximises executable volume.
//!
//! ```text
//! cum_bid(p) = Σ qty of bids with limit >= p
//! cum_ask(p) = Σ qty of asks with limit <= p
//! volume(p)  = min(cum_bid(p), cum_ask(p))
//! ```
//!
//! Ties on volume go to the smallest surplus `|cum_bid - cum_ask|`, then to
//! the lowest price. A book whose best volume is zero does not clear.

use finclient_domain::{Order, OrderSide, Price};
use std::collections::BTreeMap;
use tracing::debug;

// =============================================================================
// Outcome
// =============================================================================

/// Result of a successful clearing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearingOutcome {
    /// Clearing price
    pub price: Price,
    /// Cumulative bid quantity willing to trade at `price`
    pub bid_volume: u128,
    /// Cumulative ask quantity willing to trade at `price`
    pub ask_volume: u128,
}

impl ClearingOutcome {
    /// Matched volume at the clearing price
    pub fn volume(&self) -> u128 {
        self.bid_volume.min(self.ask_volume)
    }

    /// Unmatched quantity on the heavier side
    pub fn surplus(&self) -> u128 {
        self.bid_volume.abs_diff(self.ask_volume)
    }

    /// True if this candidate should replace `current` as the best one.
    ///
    /// Candidates are visited in ascending price order, so a candidate that
    /// only equals `current` loses and the lower price is kept.
    fn beats(&self, current: &ClearingOutcome) -> bool {
        match self.volume().cmp(&current.volume()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.surplus() < current.surplus(),
        }
    }
}

/// Aggregate quantity resting at one limit price
#[derive(Debug, Default, Clone, Copy)]
struct PriceLevel {
    bid: u128,
    ask: u128,
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless call-auction calculator
///
/// Pure function of its input: no mutation, no I/O, safe to call from any
/// thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearingEngine;

impl ClearingEngine {
    /// Compute the clearing price, or `None` when nothing can trade
    ///
    /// # Example
    ///
    /// ```
    /// # use finclient_domain::Order;
    /// # use finclient_engine::ClearingEngine;
    /// # use rust_decimal_macros::dec;
    /// let book = vec![
    ///     Order::parse("BUY 10 @ $12").unwrap(),
    ///     Order::parse("BUY 5 @ $11").unwrap(),
    ///     Order::parse("SELL 8 @ $10").unwrap(),
    ///     Order::parse("SELL 6 @ $11").unwrap(),
    /// ];
    ///
    /// let price = ClearingEngine::compute(&book).unwrap();
    /// assert_eq!(price.as_decimal(), dec!(11));
    /// ```
    pub fn compute<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Option<Price> {
        Self::evaluate(orders).map(|outcome| outcome.price)
    }

    /// Compute the clearing price together with the volumes behind it
    pub fn evaluate<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Option<ClearingOutcome> {
        let mut levels: BTreeMap<Price, PriceLevel> = BTreeMap::new();
        let mut total_bid: u128 = 0;
        let mut total_ask: u128 = 0;

        // Keys are normalized so 5.50 and 5.5 share a level and print the same
        for order in orders {
            let quantity = u128::from(order.quantity().value());
            match order.side() {
                OrderSide::Buy => {
                    levels.entry(order.price().normalized()).or_default().bid += quantity;
                    total_bid += quantity;
                },
                OrderSide::Sell => {
                    levels.entry(order.price().normalized()).or_default().ask += quantity;
                    total_ask += quantity;
                },
                OrderSide::None => {},
            }
        }

        if total_bid == 0 || total_ask == 0 {
            debug!(total_bid = %total_bid, total_ask = %total_ask, "One-sided book, no clearing price");
            return None;
        }

        let mut best: Option<ClearingOutcome> = None;
        let mut bids_below: u128 = 0;
        let mut asks_at_or_below: u128 = 0;

        for (price, level) in &levels {
            asks_at_or_below += level.ask;
            let candidate = ClearingOutcome {
                price: *price,
                bid_volume: total_bid - bids_below,
                ask_volume: asks_at_or_below,
            };
            bids_below += level.bid;

            best = match best {
                Some(current) if !candidate.beats(&current) => Some(current),
                _ => Some(candidate),
            };
        }

        match best {
            Some(outcome) if outcome.volume() > 0 => {
                debug!(
                    price = %outcome.price,
                    volume = %outcome.volume(),
                    surplus = %outcome.surplus(),
                    levels = levels.len(),
                    "Clearing price found"
                );
                Some(outcome)
            },
            _ => {
                debug!(levels = levels.len(), "Book does not cross, no clearing price");
                None
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
