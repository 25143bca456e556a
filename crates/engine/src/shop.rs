use crate::entry::{ExpenseEntry, NewEmployee, NewPermission, OperationEntry};
use crate::error::EngineError;
use allocation::{validate_capital, AllocationEngine, AllocationReport};
use analytics::{AnalyticsEngine, InventoryReport, ProfitReport, Statement, StatementFilter};
use chrono::{DateTime, Utc};
use core_types::{new_id, CoreError, Employee, Partner, Permission, PermissionStatus, Settings, Transaction, TransactionType, User, UserRole};
use database::{Backup, BlobStore, DbRepository, RestoreSummary};
use export::{to_csv, CsvQuoting, StatementRow};
use pricing::{advise, estimate_assay, quote_for, AssayEstimate, MarketAdvice, PriceQuote};
use rust_decimal::Decimal;
use serde::Serialize;

/// How many ledger records the dashboard lists.
pub const RECENT_LIMIT: usize = 5;

/// Everything the front page shows, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub settings: Settings,
    pub profit: ProfitReport,
    pub inventory: InventoryReport,
    pub partner_count: usize,
    pub pending_permissions: usize,
    /// Newest first.
    pub recent: Vec<Transaction>,
}

/// The shop's single entry point.
///
/// Owns the repository and the stateless calculators. Every read takes a fresh
/// snapshot of the stored collections; every write replaces a whole collection.
pub struct ShopEngine<B: BlobStore> {
    repo: DbRepository<B>,
    analytics: AnalyticsEngine,
    allocation: AllocationEngine,
    quoting: CsvQuoting,
}

impl<B: BlobStore> ShopEngine<B> {
    pub fn new(store: B) -> Self {
        Self::with_defaults(store, Settings::default())
    }

    /// Uses `defaults` until the operator saves settings of their own.
    pub fn with_defaults(store: B, defaults: Settings) -> Self {
        Self {
            repo: DbRepository::with_default_settings(store, defaults),
            analytics: AnalyticsEngine::new(),
            allocation: AllocationEngine::new(),
            quoting: CsvQuoting::default(),
        }
    }

    pub fn with_csv_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn repository(&self) -> &DbRepository<B> {
        &self.repo
    }

    // --- Settings ---

    pub fn settings(&self) -> Result<Settings, EngineError> {
        Ok(self.repo.settings()?)
    }

    /// Saves new settings. Prices must not be negative.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), EngineError> {
        let prices = [
            ("goldPrice24", settings.gold_price24),
            ("goldPrice21", settings.gold_price21),
            ("goldPrice18", settings.gold_price18),
            ("taxRate", settings.tax_rate),
        ];
        for (field, value) in prices {
            if value < Decimal::ZERO {
                return Err(CoreError::InvalidInput(field.to_string(), format!("{value} is negative")).into());
            }
        }
        if settings.currency.trim().is_empty() {
            return Err(CoreError::InvalidInput("currency".to_string(), "must not be empty".to_string()).into());
        }
        self.repo.replace_settings(&settings)?;
        Ok(())
    }

    // --- Pricing ---

    /// The per-gram quote for `kind` at the current spot price. `None` for ANALYSIS and EXPENSE.
    pub fn quote(&self, kind: TransactionType, karat: Option<Decimal>) -> Result<Option<PriceQuote>, EngineError> {
        let settings = self.repo.settings()?;
        Ok(quote_for(&settings, kind, karat)?)
    }

    pub fn assay(&self, weight: Decimal, karat: Decimal) -> Result<AssayEstimate, EngineError> {
        let settings = self.repo.settings()?;
        Ok(estimate_assay(weight, karat, settings.gold_price24)?)
    }

    /// Compares an observed live 24k price with the manually set one.
    pub fn advice(&self, live_price: Decimal) -> Result<MarketAdvice, EngineError> {
        let settings = self.repo.settings()?;
        Ok(advise(live_price, settings.gold_price24))
    }

    // --- Ledger ---

    pub fn ledger(&self) -> Result<Vec<Transaction>, EngineError> {
        Ok(self.repo.transactions()?)
    }

    /// Prices, validates and stores a BUY, SELL or ANALYSIS.
    pub fn record_operation(&mut self, entry: OperationEntry) -> Result<Transaction, EngineError> {
        let settings = self.repo.settings()?;
        let tx = entry.into_transaction(&settings)?;
        self.repo.prepend_transaction(tx.clone())?;
        tracing::info!(id = %tx.id, kind = %tx.kind, total = %tx.total_amount, "Recorded operation.");
        Ok(tx)
    }

    pub fn record_expense(&mut self, entry: ExpenseEntry) -> Result<Transaction, EngineError> {
        let tx = entry.into_transaction()?;
        self.repo.prepend_transaction(tx.clone())?;
        tracing::info!(id = %tx.id, total = %tx.total_amount, "Recorded expense.");
        Ok(tx)
    }

    /// Deletes every ledger record. Staff, partners and settings are kept.
    pub fn clear_ledger(&mut self) -> Result<(), EngineError> {
        Ok(self.repo.clear_transactions()?)
    }

    // --- Reports ---

    pub fn inventory(&self) -> Result<InventoryReport, EngineError> {
        let ledger = self.repo.transactions()?;
        let settings = self.repo.settings()?;
        Ok(self.analytics.inventory(&ledger, settings.gold_price24)?)
    }

    pub fn profit(&self) -> Result<ProfitReport, EngineError> {
        let ledger = self.repo.transactions()?;
        Ok(self.analytics.profit(&ledger)?)
    }

    /// Splits the current net profit across the partners by capital.
    pub fn allocations(&self) -> Result<AllocationReport, EngineError> {
        let profit = self.profit()?;
        let partners = self.repo.partners()?;
        Ok(self.allocation.allocate(&partners, profit.net_profit)?)
    }

    pub fn statement(&self, filter: StatementFilter) -> Result<Statement, EngineError> {
        let ledger = self.repo.transactions()?;
        Ok(self.analytics.statement(&ledger, filter)?)
    }

    /// The filtered statement as a CSV document, quoted per the configured mode.
    pub fn statement_csv(&self, filter: StatementFilter) -> Result<String, EngineError> {
        let statement = self.statement(filter)?;
        let rows: Vec<StatementRow> = statement.rows.iter().map(StatementRow::from).collect();
        Ok(to_csv(&rows, self.quoting)?)
    }

    pub fn dashboard(&self) -> Result<Dashboard, EngineError> {
        let ledger = self.repo.transactions()?;
        let settings = self.repo.settings()?;
        let pending_permissions = self
            .repo
            .permissions()?
            .iter()
            .filter(|p| p.status == PermissionStatus::Pending)
            .count();

        Ok(Dashboard {
            profit: self.analytics.profit(&ledger)?,
            inventory: self.analytics.inventory(&ledger, settings.gold_price24)?,
            partner_count: self.repo.partners()?.len(),
            pending_permissions,
            recent: ledger.iter().take(RECENT_LIMIT).cloned().collect(),
            settings,
        })
    }

    // --- Partners ---

    pub fn partners(&self) -> Result<Vec<Partner>, EngineError> {
        Ok(self.repo.partners()?)
    }

    /// Adds a partner. The stored percentage starts at 0; shares come from capital.
    pub fn add_partner(&mut self, name: &str, capital: Decimal) -> Result<Partner, EngineError> {
        validate_capital(name, capital)?;
        let partner = Partner {
            id: new_id(),
            name: name.trim().to_string(),
            capital,
            percentage: Decimal::ZERO,
        };
        self.repo.add_partner(partner.clone())?;
        Ok(partner)
    }

    pub fn remove_partner(&mut self, id: &str) -> Result<Partner, EngineError> {
        Ok(self.repo.delete_partner(id)?)
    }

    // --- Employees ---

    pub fn employees(&self) -> Result<Vec<Employee>, EngineError> {
        Ok(self.repo.employees()?)
    }

    pub fn add_employee(&mut self, employee: NewEmployee) -> Result<Employee, EngineError> {
        let employee = employee.into_employee()?;
        self.repo.add_employee(employee.clone())?;
        Ok(employee)
    }

    pub fn update_employee(&mut self, employee: Employee) -> Result<(), EngineError> {
        Ok(self.repo.update_employee(employee)?)
    }

    pub fn remove_employee(&mut self, id: &str) -> Result<Employee, EngineError> {
        Ok(self.repo.delete_employee(id)?)
    }

    // --- Permissions ---

    pub fn permissions(&self) -> Result<Vec<Permission>, EngineError> {
        Ok(self.repo.permissions()?)
    }

    /// Issues a PENDING permission for an existing employee.
    pub fn issue_permission(&mut self, request: NewPermission) -> Result<Permission, EngineError> {
        let employee = self
            .repo
            .employees()?
            .into_iter()
            .find(|e| e.id == request.employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound(request.employee_id.clone()))?;
        let permission = request.issue(&employee)?;
        self.repo.add_permission(permission.clone())?;
        Ok(permission)
    }

    pub fn remove_permission(&mut self, id: &str) -> Result<Permission, EngineError> {
        Ok(self.repo.delete_permission(id)?)
    }

    // --- Users ---

    pub fn users(&self) -> Result<Vec<User>, EngineError> {
        Ok(self.repo.users()?)
    }

    /// Adds a user with no password and no recorded login.
    pub fn add_user(&mut self, username: &str, role: UserRole) -> Result<User, EngineError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::InvalidInput("username".to_string(), "must not be empty".to_string()).into());
        }
        let user = User {
            id: new_id(),
            username: username.to_string(),
            password: None,
            role,
            last_login: String::new(),
        };
        self.repo.add_user(user.clone())?;
        Ok(user)
    }

    pub fn remove_user(&mut self, id: &str) -> Result<User, EngineError> {
        Ok(self.repo.delete_user(id)?)
    }

    // --- Backup ---

    pub fn create_backup(&self, now: DateTime<Utc>) -> Result<Backup, EngineError> {
        Ok(self.repo.create_backup(now)?)
    }

    /// Restores a backup document. A malformed document changes nothing.
    pub fn restore_backup(&mut self, raw: &str) -> Result<RestoreSummary, EngineError> {
        Ok(self.repo.restore_backup(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use database::MemoryBlobStore;
    use rust_decimal_macros::dec;

    fn engine() -> ShopEngine<MemoryBlobStore> {
        ShopEngine::new(MemoryBlobStore::new())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn quote_follows_settings_changes() {
        let mut shop = engine();
        let before = shop.quote(TransactionType::Sell, Some(dec!(875))).unwrap().unwrap();
        assert_eq!(before.price_per_gram, dec!(2762));

        let mut settings = shop.settings().unwrap();
        settings.gold_price24 = dec!(4000);
        shop.update_settings(settings).unwrap();

        let after = shop.quote(TransactionType::Sell, Some(dec!(875))).unwrap().unwrap();
        assert_eq!(after.price_per_gram, dec!(3550));
    }

    #[test]
    fn negative_settings_are_rejected() {
        let mut shop = engine();
        let settings = Settings {
            gold_price21: dec!(-1),
            ..Settings::default()
        };
        assert!(matches!(shop.update_settings(settings), Err(EngineError::Core(_))));
        assert_eq!(shop.settings().unwrap(), Settings::default());
    }

    #[test]
    fn configured_defaults_apply() {
        let defaults = Settings {
            gold_price24: dec!(3200),
            ..Settings::default()
        };
        let shop = ShopEngine::with_defaults(MemoryBlobStore::new(), defaults);
        let estimate = shop.assay(dec!(100), dec!(875)).unwrap();
        assert_eq!(estimate.estimated_value, dec!(280000));
        assert_eq!(shop.advice(dec!(3300)).unwrap(), MarketAdvice::SellOpportunity);
    }

    #[test]
    fn invalid_entries_never_reach_the_ledger() {
        let mut shop = engine();
        let mut entry = OperationEntry::new(TransactionType::Sell, date());
        entry.weight = Some(dec!(10));
        entry.karat = Some(dec!(875));
        entry.discount = Some(dec!(150));

        assert!(shop.record_operation(entry).is_err());
        assert!(shop.ledger().unwrap().is_empty());
    }

    #[test]
    fn dashboard_lists_recent_first() {
        let mut shop = engine();
        for amount in 1..=7 {
            shop.record_expense(ExpenseEntry {
                date: date(),
                description: format!("Expense {amount}"),
                amount: Decimal::from(amount),
                category: "supplies".to_string(),
                payee: None,
            })
            .unwrap();
        }

        let dashboard = shop.dashboard().unwrap();
        assert_eq!(dashboard.recent.len(), RECENT_LIMIT);
        assert_eq!(dashboard.recent[0].total_amount, dec!(7));
        assert_eq!(dashboard.profit.expenses, dec!(28));
        assert_eq!(dashboard.profit.net_profit, dec!(-28));
    }

    #[test]
    fn permission_needs_a_known_employee() {
        let mut shop = engine();
        let result = shop.issue_permission(NewPermission {
            employee_id: "ghost".to_string(),
            date: date(),
            destination: "Bank".to_string(),
            items: "1 ingot".to_string(),
        });
        assert!(matches!(result, Err(EngineError::EmployeeNotFound(id)) if id == "ghost"));
    }

    #[test]
    fn empty_statement_cannot_be_exported() {
        let shop = engine();
        assert!(matches!(
            shop.statement_csv(StatementFilter::All),
            Err(EngineError::Export(export::ExportError::NoData))
        ));
    }

    #[test]
    fn users_are_listed_and_named_uniquely() {
        let mut shop = engine();
        let admin = shop.add_user(" admin ", UserRole::Admin).unwrap();
        assert_eq!(admin.username, "admin");
        assert!(matches!(
            shop.add_user("admin", UserRole::Limited),
            Err(EngineError::Database(database::DbError::Duplicate { .. }))
        ));
        assert!(matches!(shop.add_user("  ", UserRole::Limited), Err(EngineError::Core(_))));

        assert_eq!(shop.users().unwrap(), vec![admin.clone()]);
        shop.remove_user(&admin.id).unwrap();
        assert!(shop.users().unwrap().is_empty());
    }
}
