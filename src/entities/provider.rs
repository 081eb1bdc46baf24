// 🚚 Provider Entity - suppliers of medicines and products

use super::{text, Record};
use crate::validation::{
    self, field, FieldErrors, FormCheck, FormData, MSG_EMAIL_REQUIRED, MSG_NAME_REQUIRED,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

// Providers keep their historical wording, without the accent
pub const MSG_EMAIL_INVALID: &str = "Por favor ingrese un email valido";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn validate_provider(data: &FormData) -> FieldErrors {
    Provider::validate(data, validation::today())
}

impl Record for Provider {
    const ENTITY: &'static str = "provider";
    const TABLE: &'static str = "providers";
    const FIELDS: &'static [&'static str] = &["name", "email", "address"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, _today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        check.required("name", MSG_NAME_REQUIRED);

        if let Some(email) = check.required("email", MSG_EMAIL_REQUIRED) {
            check.check("email", validation::email(email, MSG_EMAIL_INVALID));
        }

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Provider {
            id,
            name: field(data, "name").to_string(),
            email: field(data, "email").to_string(),
            address: field(data, "address").to_string(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("address".to_string(), self.address.clone()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Provider {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            address: row.get("address")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![text(&self.name), text(&self.email), text(&self.address)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{fixed_today, form};

    #[test]
    fn test_empty_form_reports_required_fields() {
        let errors = Provider::validate(&FormData::new(), fixed_today());

        assert_eq!(errors["name"], MSG_NAME_REQUIRED);
        assert_eq!(errors["email"], MSG_EMAIL_REQUIRED);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_invalid_email() {
        let data = form(&[("name", "Juan Perez"), ("email", "invalid-email")]);
        let errors = Provider::validate(&data, fixed_today());

        assert_eq!(errors["email"], MSG_EMAIL_INVALID);
    }

    #[test]
    fn test_any_domain_is_accepted() {
        let data = form(&[
            ("name", "Proveedor de Prueba"),
            ("email", "proveedor@ejemplo.com"),
            ("address", "Calle Falsa 123"),
        ]);

        assert!(Provider::validate(&data, fixed_today()).is_empty());
    }
}
