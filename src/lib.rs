// Vetsoft - Veterinary Clinic Records
// Exposes all modules for use in the CLI, the API server, and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod logging;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use db::{count, create, find, get, list, save, setup_database, update};
pub use entities::{
    validate_client, validate_medicine, validate_pet, validate_product, validate_provider,
    validate_vet, Client, EntityKind, Medicine, Pet, Product, Provider, Record, Specialty, Vet,
};
pub use error::{RecordError, RecordResult};
pub use validation::{FieldErrors, FormData};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
