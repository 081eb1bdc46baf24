// Entity Models - one flat record per clinic form
//
// Each entity has:
// - Integer identity assigned by the database
// - A validator turning raw form strings into field errors
// - A Record impl so the generic repository (db.rs) can store it

pub mod client;
pub mod medicine;
pub mod pet;
pub mod product;
pub mod provider;
pub mod vet;

pub use client::{validate_client, Client};
pub use medicine::{validate_medicine, Medicine};
pub use pet::{validate_pet, Pet};
pub use product::{validate_product, Product};
pub use provider::{validate_provider, Provider};
pub use vet::{validate_vet, Specialty, Vet};

use crate::validation::{FieldErrors, FormData};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::Serialize;

// ============================================================================
// RECORD TRAIT
// ============================================================================

/// A persisted clinic record.
///
/// `FIELDS` drives the generated SQL: `values()` and `to_form()` must
/// follow it, and `from_row()` reads the same column names.
pub trait Record: Sized + Serialize {
    /// Singular name for logs and errors ("client")
    const ENTITY: &'static str;

    /// Table name, also the URL segment ("clients")
    const TABLE: &'static str;

    /// Stored columns other than `id`, in bind order
    const FIELDS: &'static [&'static str];

    fn id(&self) -> i64;

    /// Field errors for `data` as of `today`. Empty = valid.
    fn validate(data: &FormData, today: NaiveDate) -> FieldErrors;

    /// Build the record from a form that already passed `validate`
    fn from_form(id: i64, data: &FormData) -> Self;

    /// Stored values rendered back as form strings
    fn to_form(&self) -> FormData;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Column values in `FIELDS` order
    fn values(&self) -> Vec<Value>;
}

// ============================================================================
// ENTITY KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityKind {
    #[value(alias = "client")]
    Clients,
    #[value(alias = "pet")]
    Pets,
    #[value(alias = "medicine")]
    Medicines,
    #[value(alias = "product")]
    Products,
    #[value(alias = "provider")]
    Providers,
    #[value(alias = "vet")]
    Vets,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Clients,
        EntityKind::Pets,
        EntityKind::Medicines,
        EntityKind::Products,
        EntityKind::Providers,
        EntityKind::Vets,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Clients => Client::TABLE,
            EntityKind::Pets => Pet::TABLE,
            EntityKind::Medicines => Medicine::TABLE,
            EntityKind::Products => Product::TABLE,
            EntityKind::Providers => Provider::TABLE,
            EntityKind::Vets => Vet::TABLE,
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Clients => Client::FIELDS,
            EntityKind::Pets => Pet::FIELDS,
            EntityKind::Medicines => Medicine::FIELDS,
            EntityKind::Products => Product::FIELDS,
            EntityKind::Providers => Provider::FIELDS,
            EntityKind::Vets => Vet::FIELDS,
        }
    }
}

/// TEXT column value
pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::validation::FormData;
    use chrono::NaiveDate;

    pub fn form(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }
}
