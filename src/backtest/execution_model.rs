//! Fill pricing for simulated entries
//!
//! Historical data only carries best asks, so every simulated buy crosses the
//! spread by a fixed additive slippage. Depth and partial fills are not
//! modelled: a price that satisfies the condition fills in full.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default additive slippage per fill
pub const DEFAULT_SLIPPAGE: Decimal = dec!(0.01);

/// Prices simulated fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillModel {
    /// Added to the observed ask on every fill
    pub slippage: Decimal,
}

impl FillModel {
    /// Create a fill model
    pub fn new(slippage: Decimal) -> Self {
        Self { slippage }
    }

    /// Price paid when buying at the given ask
    pub fn entry_price(&self, ask: Decimal) -> Decimal {
        ask + self.slippage
    }

    /// Leg 2 price if hedging at `opposite_ask` keeps the pair within `sum_target`
    pub fn hedge_price(
        &self,
        leg1_entry: Decimal,
        opposite_ask: Decimal,
        sum_target: Decimal,
    ) -> Option<Decimal> {
        let leg2_entry = self.entry_price(opposite_ask);
        (leg1_entry + leg2_entry <= sum_target).then_some(leg2_entry)
    }
}

impl Default for FillModel {
    fn default() -> Self {
        Self::new(DEFAULT_SLIPPAGE)
    }
}
