// 🧑 Client Entity - pet owners registered at the clinic

use super::{text, Record};
use crate::validation::{
    self, field, FieldErrors, FormCheck, FormData, MSG_EMAIL_REQUIRED, MSG_NAME_REQUIRED,
    MSG_PHONE_REQUIRED,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_EMAIL_INVALID: &str = "Por favor ingrese un email válido";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    /// Digits only, "54" country prefix included
    pub phone: String,
    pub email: String,
    /// Optional, empty when not given
    pub address: String,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validate a client form against today's date
pub fn validate_client(data: &FormData) -> FieldErrors {
    Client::validate(data, validation::today())
}

impl Record for Client {
    const ENTITY: &'static str = "client";
    const TABLE: &'static str = "clients";
    const FIELDS: &'static [&'static str] = &["name", "phone", "email", "address"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, _today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        if let Some(name) = check.required("name", MSG_NAME_REQUIRED) {
            check.check("name", validation::letters_and_spaces(name));
        }

        if let Some(phone) = check.required("phone", MSG_PHONE_REQUIRED) {
            check.check("phone", validation::argentine_phone(phone));
        }

        if let Some(email) = check.required("email", MSG_EMAIL_REQUIRED) {
            check.check("email", validation::email(email, MSG_EMAIL_INVALID));
            check.check("email", validation::clinic_email(email));
        }

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Client {
            id,
            name: field(data, "name").to_string(),
            phone: field(data, "phone").to_string(),
            email: field(data, "email").to_string(),
            address: field(data, "address").to_string(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("email".to_string(), self.email.clone()),
            ("address".to_string(), self.address.clone()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Client {
            id: row.get("id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
            address: row.get("address")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.phone),
            text(&self.email),
            text(&self.address),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{fixed_today, form};
    use crate::validation::{MSG_EMAIL_DOMAIN, MSG_NAME_LETTERS, MSG_PHONE_DIGITS, MSG_PHONE_PREFIX};

    fn valid() -> FormData {
        form(&[
            ("name", "Juan Sebastian Veron"),
            ("phone", "54221555232"),
            ("address", "13 y 44"),
            ("email", "brujita75@vetsoft.com"),
        ])
    }

    fn errors_with(key: &str, value: &str) -> FieldErrors {
        let mut data = valid();
        data.insert(key.to_string(), value.to_string());
        Client::validate(&data, fixed_today())
    }

    #[test]
    fn test_valid_client_has_no_errors() {
        assert!(Client::validate(&valid(), fixed_today()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let errors = Client::validate(&FormData::new(), fixed_today());

        assert_eq!(errors["name"], MSG_NAME_REQUIRED);
        assert_eq!(errors["phone"], MSG_PHONE_REQUIRED);
        assert_eq!(errors["email"], MSG_EMAIL_REQUIRED);
        // address is optional
        assert!(!errors.contains_key("address"));
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(errors_with("email", "brujita75")["email"], MSG_EMAIL_INVALID);
    }

    #[test]
    fn test_email_must_use_clinic_domain() {
        assert_eq!(errors_with("email", "rositac@gmail.com")["email"], MSG_EMAIL_DOMAIN);
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(errors_with("phone", "")["phone"], MSG_PHONE_REQUIRED);
        assert_eq!(errors_with("phone", "111111111")["phone"], MSG_PHONE_PREFIX);
        assert_eq!(errors_with("phone", "54aaa1111111")["phone"], MSG_PHONE_DIGITS);
    }

    #[test]
    fn test_name_with_digits() {
        assert_eq!(errors_with("name", "Juan123")["name"], MSG_NAME_LETTERS);
    }

    #[test]
    fn test_form_round_trip_keeps_values() {
        let client = Client::from_form(7, &valid());
        assert_eq!(client.id, 7);
        assert_eq!(client.to_form(), valid());
        assert_eq!(client.to_string(), "Juan Sebastian Veron");
    }
}
