use crate::error::DbError;
use crate::keys;
use crate::store::BlobStore;
use core_types::{Employee, Partner, Permission, Settings, Transaction, User};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The `DbRepository` provides a typed, application-specific interface to a
/// [`BlobStore`]. It encapsulates every key and the JSON encoding of each
/// collection.
#[derive(Debug, Clone)]
pub struct DbRepository<B> {
    store: B,
    default_settings: Settings,
}

impl<B: BlobStore> DbRepository<B> {
    /// Creates a new `DbRepository` over `store`, falling back to the stock
    /// [`Settings`] when none have been saved yet.
    pub fn new(store: B) -> Self {
        Self::with_default_settings(store, Settings::default())
    }

    pub fn with_default_settings(store: B, default_settings: Settings) -> Self {
        Self {
            store,
            default_settings,
        }
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn into_store(self) -> B {
        self.store
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, DbError> {
        match self.store.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(T::default()),
        }
    }

    pub(crate) fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), DbError> {
        let raw = serde_json::to_string(value)?;
        self.store.put(key, &raw)
    }

    // --- Ledger ---

    /// The ledger, newest first.
    pub fn transactions(&self) -> Result<Vec<Transaction>, DbError> {
        self.load(keys::TRANSACTIONS)
    }

    pub fn replace_transactions(&mut self, ledger: &[Transaction]) -> Result<(), DbError> {
        self.save(keys::TRANSACTIONS, ledger)
    }

    /// Puts `tx` at the head of the ledger.
    pub fn prepend_transaction(&mut self, tx: Transaction) -> Result<(), DbError> {
        let mut ledger = self.transactions()?;
        ledger.insert(0, tx);
        self.replace_transactions(&ledger)?;
        tracing::info!(records = ledger.len(), "Appended transaction to ledger.");
        Ok(())
    }

    pub fn clear_transactions(&mut self) -> Result<(), DbError> {
        self.store.remove(keys::TRANSACTIONS)?;
        tracing::info!("Cleared the ledger.");
        Ok(())
    }

    // --- Employees ---

    pub fn employees(&self) -> Result<Vec<Employee>, DbError> {
        self.load(keys::EMPLOYEES)
    }

    pub fn replace_employees(&mut self, employees: &[Employee]) -> Result<(), DbError> {
        self.save(keys::EMPLOYEES, employees)
    }

    pub fn add_employee(&mut self, employee: Employee) -> Result<(), DbError> {
        let mut employees = self.employees()?;
        if employees.iter().any(|e| e.id == employee.id) {
            return Err(DbError::Duplicate {
                collection: "employee",
                id: employee.id,
            });
        }
        tracing::info!(id = %employee.id, code = %employee.code, "Added employee.");
        employees.push(employee);
        self.replace_employees(&employees)
    }

    /// Replaces the stored employee that has the same id.
    pub fn update_employee(&mut self, employee: Employee) -> Result<(), DbError> {
        let mut employees = self.employees()?;
        let slot = employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or_else(|| DbError::NotFound {
                collection: "employee",
                id: employee.id.clone(),
            })?;
        *slot = employee;
        self.replace_employees(&employees)
    }

    pub fn delete_employee(&mut self, id: &str) -> Result<Employee, DbError> {
        let mut employees = self.employees()?;
        let removed = take_by_id(&mut employees, id, |e| &e.id, "employee")?;
        self.replace_employees(&employees)?;
        tracing::info!(%id, "Deleted employee.");
        Ok(removed)
    }

    // --- Partners ---

    pub fn partners(&self) -> Result<Vec<Partner>, DbError> {
        self.load(keys::PARTNERS)
    }

    pub fn replace_partners(&mut self, partners: &[Partner]) -> Result<(), DbError> {
        self.save(keys::PARTNERS, partners)
    }

    pub fn add_partner(&mut self, partner: Partner) -> Result<(), DbError> {
        let mut partners = self.partners()?;
        if partners.iter().any(|p| p.id == partner.id) {
            return Err(DbError::Duplicate {
                collection: "partner",
                id: partner.id,
            });
        }
        tracing::info!(id = %partner.id, capital = %partner.capital, "Added partner.");
        partners.push(partner);
        self.replace_partners(&partners)
    }

    pub fn delete_partner(&mut self, id: &str) -> Result<Partner, DbError> {
        let mut partners = self.partners()?;
        let removed = take_by_id(&mut partners, id, |p| &p.id, "partner")?;
        self.replace_partners(&partners)?;
        tracing::info!(%id, "Deleted partner.");
        Ok(removed)
    }

    // --- Permissions ---

    /// Transport permissions, newest first.
    pub fn permissions(&self) -> Result<Vec<Permission>, DbError> {
        self.load(keys::PERMISSIONS)
    }

    pub fn replace_permissions(&mut self, permissions: &[Permission]) -> Result<(), DbError> {
        self.save(keys::PERMISSIONS, permissions)
    }

    pub fn add_permission(&mut self, permission: Permission) -> Result<(), DbError> {
        let mut permissions = self.permissions()?;
        tracing::info!(id = %permission.id, employee = %permission.employee_id, "Issued permission.");
        permissions.insert(0, permission);
        self.replace_permissions(&permissions)
    }

    pub fn delete_permission(&mut self, id: &str) -> Result<Permission, DbError> {
        let mut permissions = self.permissions()?;
        let removed = take_by_id(&mut permissions, id, |p| &p.id, "permission")?;
        self.replace_permissions(&permissions)?;
        tracing::info!(%id, "Deleted permission.");
        Ok(removed)
    }

    // --- Users ---

    pub fn users(&self) -> Result<Vec<User>, DbError> {
        self.load(keys::USERS)
    }

    pub fn replace_users(&mut self, users: &[User]) -> Result<(), DbError> {
        self.save(keys::USERS, users)
    }

    /// Adds a user. Both the id and the username must be unused.
    pub fn add_user(&mut self, user: User) -> Result<(), DbError> {
        let mut users = self.users()?;
        if let Some(existing) = users.iter().find(|u| u.id == user.id || u.username == user.username) {
            return Err(DbError::Duplicate {
                collection: "user",
                id: existing.id.clone(),
            });
        }
        tracing::info!(id = %user.id, username = %user.username, "Added user.");
        users.push(user);
        self.replace_users(&users)
    }

    pub fn delete_user(&mut self, id: &str) -> Result<User, DbError> {
        let mut users = self.users()?;
        let removed = take_by_id(&mut users, id, |u| &u.id, "user")?;
        self.replace_users(&users)?;
        tracing::info!(%id, "Deleted user.");
        Ok(removed)
    }

    // --- Settings ---

    /// The stored settings, or the repository's defaults if none were saved.
    pub fn settings(&self) -> Result<Settings, DbError> {
        match self.store.get(keys::SETTINGS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(self.default_settings.clone()),
        }
    }

    pub fn replace_settings(&mut self, settings: &Settings) -> Result<(), DbError> {
        self.save(keys::SETTINGS, settings)?;
        tracing::info!(gold_price24 = %settings.gold_price24, "Saved settings.");
        Ok(())
    }
}

fn take_by_id<T>(
    items: &mut Vec<T>,
    id: &str,
    id_of: impl Fn(&T) -> &String,
    collection: &'static str,
) -> Result<T, DbError> {
    let index = items
        .iter()
        .position(|item| id_of(item) == id)
        .ok_or_else(|| DbError::NotFound {
            collection,
            id: id.to_string(),
        })?;
    Ok(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBlobStore;
    use chrono::NaiveDate;
    use core_types::{PermissionStatus, TransactionType, UserRole};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn repo() -> DbRepository<MemoryBlobStore> {
        DbRepository::new(MemoryBlobStore::new())
    }

    fn expense(id: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            customer_name: None,
            description: Some("Rent".to_string()),
            weight: None,
            karat: None,
            price_per_gram: None,
            total_amount: amount,
            technician_id: None,
            is_paid: true,
            discount: None,
            details: None,
        }
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            code: format!("EMP{id:0>3}"),
            job_title: "Assayer".to_string(),
            phone: "0100000001".to_string(),
            email: None,
        }
    }

    fn permission(id: &str) -> Permission {
        Permission {
            id: id.to_string(),
            employee_id: "1".to_string(),
            employee_name: "Ahmed".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
            destination: "Assay office".to_string(),
            items: "2 ingots".to_string(),
            status: PermissionStatus::Pending,
        }
    }

    #[test]
    fn empty_store_yields_defaults() {
        let repo = repo();
        assert!(repo.transactions().unwrap().is_empty());
        assert!(repo.employees().unwrap().is_empty());
        assert!(repo.partners().unwrap().is_empty());
        assert!(repo.permissions().unwrap().is_empty());
        assert!(repo.users().unwrap().is_empty());
        assert_eq!(repo.settings().unwrap(), Settings::default());
    }

    #[test]
    fn configured_default_settings_apply_until_saved() {
        let defaults = Settings {
            gold_price24: dec!(4000),
            ..Settings::default()
        };
        let mut repo = DbRepository::with_default_settings(MemoryBlobStore::new(), defaults.clone());
        assert_eq!(repo.settings().unwrap(), defaults);

        let saved = Settings {
            gold_price24: dec!(3500),
            ..defaults
        };
        repo.replace_settings(&saved).unwrap();
        assert_eq!(repo.settings().unwrap().gold_price24, dec!(3500));
    }

    #[test]
    fn ledger_is_newest_first_and_clearable() {
        let mut repo = repo();
        repo.prepend_transaction(expense("1", dec!(100))).unwrap();
        repo.prepend_transaction(expense("2", dec!(200))).unwrap();

        let ids: Vec<_> = repo.transactions().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["2", "1"]);

        repo.clear_transactions().unwrap();
        assert!(repo.transactions().unwrap().is_empty());
        assert!(repo.store().get(keys::TRANSACTIONS).unwrap().is_none());
    }

    #[test]
    fn employee_crud() {
        let mut repo = repo();
        repo.add_employee(employee("1", "Ahmed")).unwrap();
        repo.add_employee(employee("2", "Sara")).unwrap();
        assert!(matches!(
            repo.add_employee(employee("1", "Again")),
            Err(DbError::Duplicate { collection: "employee", .. })
        ));

        let mut updated = employee("2", "Sara Ali");
        updated.email = Some("sara@example.com".to_string());
        repo.update_employee(updated).unwrap();
        assert_eq!(repo.employees().unwrap()[1].name, "Sara Ali");

        assert!(matches!(
            repo.update_employee(employee("9", "Ghost")),
            Err(DbError::NotFound { collection: "employee", .. })
        ));

        let removed = repo.delete_employee("1").unwrap();
        assert_eq!(removed.name, "Ahmed");
        assert_eq!(repo.employees().unwrap().len(), 1);
    }

    #[test]
    fn partners_append_and_delete() {
        let mut repo = repo();
        for (id, capital) in [("1", dec!(5000000)), ("2", dec!(3000000))] {
            repo.add_partner(Partner {
                id: id.to_string(),
                name: format!("Partner {id}"),
                capital,
                percentage: Decimal::ZERO,
            })
            .unwrap();
        }
        assert_eq!(repo.partners().unwrap()[1].capital, dec!(3000000));

        repo.delete_partner("1").unwrap();
        assert_eq!(repo.partners().unwrap().len(), 1);
        assert!(matches!(repo.delete_partner("1"), Err(DbError::NotFound { .. })));
    }

    #[test]
    fn permissions_are_newest_first() {
        let mut repo = repo();
        repo.add_permission(permission("a")).unwrap();
        repo.add_permission(permission("b")).unwrap();
        let ids: Vec<_> = repo.permissions().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        repo.delete_permission("a").unwrap();
        assert_eq!(repo.permissions().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_blob_is_a_json_error() {
        let mut store = MemoryBlobStore::new();
        store.put(keys::PARTNERS, "{not json").unwrap();
        let repo = DbRepository::new(store);
        assert!(matches!(repo.partners(), Err(DbError::Json(_))));
    }

    #[test]
    fn user_crud_rejects_taken_usernames() {
        let mut repo = repo();
        let user = |id: &str, username: &str| User {
            id: id.to_string(),
            username: username.to_string(),
            password: None,
            role: UserRole::Limited,
            last_login: String::new(),
        };
        repo.add_user(user("u1", "admin")).unwrap();
        repo.add_user(user("u2", "cashier")).unwrap();
        assert!(matches!(
            repo.add_user(user("u3", "admin")),
            Err(DbError::Duplicate { collection: "user", id }) if id == "u1"
        ));

        assert_eq!(repo.delete_user("u1").unwrap().username, "admin");
        assert!(matches!(repo.delete_user("u1"), Err(DbError::NotFound { .. })));
        assert_eq!(repo.users().unwrap().len(), 1);
    }
}
