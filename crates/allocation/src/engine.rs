use crate::error::AllocationError;
use crate::report::{AllocationReport, PartnerShare};
use core_types::Partner;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Checks a partner before it is added to the pool.
pub fn validate_capital(name: &str, capital: Decimal) -> Result<(), AllocationError> {
    if name.trim().is_empty() {
        return Err(AllocationError::EmptyName);
    }
    if capital < Decimal::ZERO {
        return Err(AllocationError::NegativeCapital(capital));
    }
    Ok(())
}

/// A stateless calculator that distributes net profit by contributed capital.
#[derive(Debug, Default)]
pub struct AllocationEngine {}

impl AllocationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates `net_profit` across `partners`.
    ///
    /// With zero pooled capital every share is 0% and nothing is allocated; that is
    /// a warning for the operator, not an error. Sums that leave the decimal range
    /// are [`AllocationError::Overflow`].
    pub fn allocate(&self, partners: &[Partner], net_profit: Decimal) -> Result<AllocationReport, AllocationError> {
        let overflow = |figure| AllocationError::Overflow { figure };
        let total_capital = partners
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.capital))
            .ok_or(overflow("capitals"))?;

        if total_capital.is_zero() && !partners.is_empty() {
            tracing::warn!(
                partners = partners.len(),
                "Partner pool has no capital; every share is 0%."
            );
        }

        let shares = partners
            .iter()
            .map(|partner| -> Result<PartnerShare, AllocationError> {
                let share = if total_capital.is_zero() {
                    Decimal::ZERO
                } else {
                    partner.capital.checked_div(total_capital).ok_or(overflow("shares"))?
                };
                Ok(PartnerShare {
                    partner_id: partner.id.clone(),
                    name: partner.name.clone(),
                    capital: partner.capital,
                    share,
                    share_pct: share.checked_mul(dec!(100)).ok_or(overflow("shares"))?,
                    profit: net_profit.checked_mul(share).ok_or(overflow("profits"))?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AllocationReport {
            total_capital,
            net_profit,
            shares,
        })
    }
}
