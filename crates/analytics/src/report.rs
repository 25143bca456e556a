use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The profit and tax waterfall over a ledger snapshot.
///
/// Every intermediate is kept so report screens can show the full path from
/// sales to net profit, not just the bottom line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitReport {
    // I. Aggregates by type
    pub sales: Decimal,
    pub purchases: Decimal,
    pub expenses: Decimal,
    pub analysis_revenue: Decimal,

    // II. Record counts
    pub sell_count: usize,
    pub buy_count: usize,
    pub expense_count: usize,
    pub analysis_count: usize,

    // III. Waterfall
    pub gross_profit: Decimal,
    pub operating_profit: Decimal,
    /// `max(operating_profit, 0)`. Losses are neither taxed nor refunded.
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub vat: Decimal,
    pub net_profit: Decimal,
}

impl ProfitReport {
    /// Creates a zeroed-out report, the correct result for an empty ledger.
    pub fn new() -> Self {
        Self {
            sales: Decimal::ZERO,
            purchases: Decimal::ZERO,
            expenses: Decimal::ZERO,
            analysis_revenue: Decimal::ZERO,
            sell_count: 0,
            buy_count: 0,
            expense_count: 0,
            analysis_count: 0,
            gross_profit: Decimal::ZERO,
            operating_profit: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            vat: Decimal::ZERO,
            net_profit: Decimal::ZERO,
        }
    }

    pub fn total_tax(&self) -> Decimal {
        self.income_tax + self.vat
    }

    pub fn is_loss(&self) -> bool {
        self.operating_profit < Decimal::ZERO
    }
}

impl Default for ProfitReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure-gold stock derived by replaying BUY and SELL records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Σ pure content of BUY records, in grams.
    pub bought_pure_weight: Decimal,
    /// Σ pure content of SELL records, in grams.
    pub sold_pure_weight: Decimal,
    /// `bought - sold`. Negative when more was sold than was recorded as bought.
    pub net_pure_weight: Decimal,
    /// The 24k spot price the stock was valued at.
    pub spot_price_24k: Decimal,
    /// `net_pure_weight * spot_price_24k`. Negative along with the weight.
    pub stock_value: Decimal,
}

impl InventoryReport {
    pub fn new(spot_price_24k: Decimal) -> Self {
        Self {
            bought_pure_weight: Decimal::ZERO,
            sold_pure_weight: Decimal::ZERO,
            net_pure_weight: Decimal::ZERO,
            spot_price_24k,
            stock_value: Decimal::ZERO,
        }
    }

    /// A negative stock points at a missing BUY entry or a mistyped SELL.
    pub fn is_oversold(&self) -> bool {
        self.net_pure_weight < Decimal::ZERO
    }
}
