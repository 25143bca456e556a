use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One partner's slice of the profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerShare {
    pub partner_id: String,
    pub name: String,
    pub capital: Decimal,
    /// `capital / total_capital`, or 0 when the pool is empty.
    pub share: Decimal,
    /// `share * 100`, for display.
    pub share_pct: Decimal,
    /// `net_profit * share`. Negative when the shop made a loss.
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub total_capital: Decimal,
    pub net_profit: Decimal,
    pub shares: Vec<PartnerShare>,
}

impl AllocationReport {
    /// Σ share. 1 whenever any capital is pooled, 0 otherwise.
    pub fn share_sum(&self) -> Decimal {
        self.shares.iter().map(|s| s.share).sum()
    }

    pub fn allocated_profit(&self) -> Decimal {
        self.shares.iter().map(|s| s.profit).sum()
    }

    /// True when there are partners but none has contributed capital.
    pub fn is_unfunded(&self) -> bool {
        !self.shares.is_empty() && self.total_capital.is_zero()
    }
}
