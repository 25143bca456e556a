use crate::error::AnalyticsError;
use crate::inventory::pure_content;
use crate::report::{InventoryReport, ProfitReport};
use crate::statement::{Statement, StatementFilter};
use core_types::{Transaction, TransactionType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Income tax applied to positive operating profit.
pub const INCOME_TAX_RATE: Decimal = dec!(0.23);
/// VAT applied to positive operating profit.
pub const VAT_RATE: Decimal = dec!(0.14);

/// A stateless calculator for deriving the shop's figures from its ledger.
///
/// The tax rates are fixed. `Settings::tax_rate` is not consulted.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates the ledger into the profit and tax waterfall.
    ///
    /// # Arguments
    ///
    /// * `ledger` - Every transaction currently on the books, in any order.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::Overflow`] when the stored amounts do not fit a `Decimal`.
    pub fn profit(&self, ledger: &[Transaction]) -> Result<ProfitReport, AnalyticsError> {
        let mut report = ProfitReport::new();

        self.calculate_aggregates(ledger, &mut report)?;
        self.calculate_waterfall(&mut report)?;

        tracing::debug!(
            records = ledger.len(),
            operating_profit = %report.operating_profit,
            net_profit = %report.net_profit,
            "Computed profit report."
        );
        Ok(report)
    }

    /// Replays BUY and SELL records into net pure-gold stock, valued at `spot_price_24k`.
    ///
    /// A negative result is reported as is; it is the operator's cue that the
    /// ledger is missing a purchase.
    pub fn inventory(
        &self,
        ledger: &[Transaction],
        spot_price_24k: Decimal,
    ) -> Result<InventoryReport, AnalyticsError> {
        let mut report = InventoryReport::new(spot_price_24k);

        for tx in ledger {
            let Some(content) = pure_content(tx)? else {
                continue;
            };
            let (side, figure) = match tx.kind {
                TransactionType::Buy => (&mut report.bought_pure_weight, "purchased weights"),
                TransactionType::Sell => (&mut report.sold_pure_weight, "sold weights"),
                TransactionType::Analysis | TransactionType::Expense => continue,
            };
            *side = side.checked_add(content).ok_or(AnalyticsError::Overflow { figure })?;
        }

        report.net_pure_weight = report
            .bought_pure_weight
            .checked_sub(report.sold_pure_weight)
            .ok_or(AnalyticsError::Overflow { figure: "stock weights" })?;
        report.stock_value = report
            .net_pure_weight
            .checked_mul(spot_price_24k)
            .ok_or(AnalyticsError::Overflow { figure: "stock values" })?;

        if report.is_oversold() {
            tracing::warn!(
                net_pure_weight = %report.net_pure_weight,
                "Inventory is negative: more gold sold than recorded as bought."
            );
        }
        Ok(report)
    }

    /// Lists the records matching `filter` together with their total amount.
    pub fn statement(&self, ledger: &[Transaction], filter: StatementFilter) -> Result<Statement, AnalyticsError> {
        Statement::build(ledger, filter)
    }

    /// Sums `total_amount` per transaction type.
    fn calculate_aggregates(&self, ledger: &[Transaction], report: &mut ProfitReport) -> Result<(), AnalyticsError> {
        for tx in ledger {
            let (sum, count, figure) = match tx.kind {
                TransactionType::Sell => (&mut report.sales, &mut report.sell_count, "sales"),
                TransactionType::Buy => (&mut report.purchases, &mut report.buy_count, "purchases"),
                TransactionType::Expense => (&mut report.expenses, &mut report.expense_count, "expenses"),
                TransactionType::Analysis => (
                    &mut report.analysis_revenue,
                    &mut report.analysis_count,
                    "analysis fees",
                ),
            };
            *sum = sum.checked_add(tx.total_amount).ok_or(AnalyticsError::Overflow { figure })?;
            *count += 1;
        }
        Ok(())
    }

    /// Gross → operating → taxed → net.
    fn calculate_waterfall(&self, report: &mut ProfitReport) -> Result<(), AnalyticsError> {
        let overflow = |figure| AnalyticsError::Overflow { figure };

        report.gross_profit = report
            .sales
            .checked_sub(report.purchases)
            .ok_or(overflow("gross profits"))?;
        report.operating_profit = report
            .gross_profit
            .checked_add(report.analysis_revenue)
            .and_then(|v| v.checked_sub(report.expenses))
            .ok_or(overflow("operating profits"))?;

        report.taxable_income = report.operating_profit.max(Decimal::ZERO);
        report.income_tax = report.taxable_income * INCOME_TAX_RATE;
        report.vat = report.taxable_income * VAT_RATE;

        report.net_profit = report.operating_profit - report.income_tax - report.vat;
        Ok(())
    }
}
