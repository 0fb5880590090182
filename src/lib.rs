pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod projector;
pub mod render;
pub mod sync;
pub mod validation;

pub use config::{ClientConfig, MutationPolicy};
pub use errors::{SyncError, ValidationError};
pub use models::{Snapshot, Transaction, TransactionKind};
pub use projector::{Locale, ViewProjector};
pub use sync::SyncClient;
pub use validation::{validate_savings_amount, validate_transaction};
