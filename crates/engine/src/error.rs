use core_types::TransactionType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] pricing::PricingError),

    #[error("Report error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Partner error: {0}")]
    Allocation(#[from] allocation::AllocationError),

    #[error("Database error: {0}")]
    Database(#[from] database::DbError),

    #[error("Export error: {0}")]
    Export(#[from] export::ExportError),

    #[error("{0} entries cannot be recorded through this flow.")]
    UnsupportedOperation(TransactionType),

    #[error("Employee with id '{0}' not found.")]
    EmployeeNotFound(String),
}
