use crate::error::DbError;
use crate::keys;
use crate::repository::DbRepository;
use crate::store::BlobStore;
use chrono::{DateTime, NaiveDate, Utc};
use core_types::{Employee, Partner, Permission, Settings, Transaction, User};
use serde::{Deserialize, Serialize};

/// A snapshot of every collection.
///
/// Every key is optional when reading, so partial backups restore what they carry
/// and leave everything else alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Employee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<Partner>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Backup {
    pub fn to_json(&self) -> Result<String, DbError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a backup document. Any malformed record rejects the whole payload.
    pub fn from_json(raw: &str) -> Result<Self, DbError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Which collections a restore overwrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RestoreSummary {
    pub settings: bool,
    pub users: bool,
    pub transactions: bool,
    pub employees: bool,
    pub partners: bool,
    pub permissions: bool,
}

impl RestoreSummary {
    pub fn applied(&self) -> usize {
        [
            self.settings,
            self.users,
            self.transactions,
            self.employees,
            self.partners,
            self.permissions,
        ]
        .iter()
        .filter(|applied| **applied)
        .count()
    }
}

/// `PyramidsGold_Backup_<YYYY-MM-DD>.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("PyramidsGold_Backup_{}.json", date.format("%Y-%m-%d"))
}

impl<B: BlobStore> DbRepository<B> {
    /// Captures every collection, stamped with `now`.
    pub fn create_backup(&self, now: DateTime<Utc>) -> Result<Backup, DbError> {
        let backup = Backup {
            settings: Some(self.settings()?),
            users: Some(self.users()?),
            transactions: Some(self.transactions()?),
            employees: Some(self.employees()?),
            partners: Some(self.partners()?),
            permissions: Some(self.permissions()?),
            timestamp: Some(now),
        };
        tracing::info!(
            transactions = backup.transactions.as_ref().map_or(0, Vec::len),
            "Created backup."
        );
        Ok(backup)
    }

    /// Parses `raw` in full, then overwrites each collection the backup carries.
    ///
    /// On a parse failure nothing is written.
    pub fn restore_backup(&mut self, raw: &str) -> Result<RestoreSummary, DbError> {
        let backup = Backup::from_json(raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected malformed backup; nothing was restored.");
        })?;
        self.apply_backup(&backup)
    }

    pub fn apply_backup(&mut self, backup: &Backup) -> Result<RestoreSummary, DbError> {
        let mut summary = RestoreSummary::default();

        if let Some(settings) = &backup.settings {
            self.save(keys::SETTINGS, settings)?;
            summary.settings = true;
        }
        if let Some(users) = &backup.users {
            self.save(keys::USERS, users)?;
            summary.users = true;
        }
        if let Some(transactions) = &backup.transactions {
            self.save(keys::TRANSACTIONS, transactions)?;
            summary.transactions = true;
        }
        if let Some(employees) = &backup.employees {
            self.save(keys::EMPLOYEES, employees)?;
            summary.employees = true;
        }
        if let Some(partners) = &backup.partners {
            self.save(keys::PARTNERS, partners)?;
            summary.partners = true;
        }
        if let Some(permissions) = &backup.permissions {
            self.save(keys::PERMISSIONS, permissions)?;
            summary.permissions = true;
        }

        tracing::info!(collections = summary.applied(), timestamp = ?backup.timestamp, "Restored backup.");
        Ok(summary)
    }
}
