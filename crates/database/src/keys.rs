//! Storage keys, one per collection.

pub const TRANSACTIONS: &str = "pg_transactions";
pub const EMPLOYEES: &str = "pg_employees";
pub const PARTNERS: &str = "pg_partners";
pub const SETTINGS: &str = "pg_settings";
pub const PERMISSIONS: &str = "pg_permissions";
pub const USERS: &str = "pg_users";

pub const ALL: [&str; 6] = [TRANSACTIONS, EMPLOYEES, PARTNERS, SETTINGS, PERMISSIONS, USERS];
