// 🐾 Pet Entity - animals treated at the clinic

use super::{text, Record};
use crate::validation::{self, field, FieldErrors, FormCheck, FormData, MSG_NAME_REQUIRED};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_BREED_REQUIRED: &str = "Por favor seleccione una raza";
pub const MSG_BIRTHDAY_REQUIRED: &str = "Por favor ingrese una fecha de nacimiento";
pub const MSG_BIRTHDAY_INVALID: &str = "Por favor ingrese una fecha de nacimiento válida";
pub const MSG_BIRTHDAY_FUTURE: &str =
    "La fecha de nacimiento no puede ser mayor o igual a la fecha actual";
pub const MSG_WEIGHT_REQUIRED: &str = "Por favor ingrese un peso";
pub const MSG_WEIGHT_INVALID: &str = "El peso debe ser un número mayor a cero";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub birthday: NaiveDate,
    /// Kilograms
    pub weight: f64,
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validate a pet form; the birthday must be before today
pub fn validate_pet(data: &FormData) -> FieldErrors {
    Pet::validate(data, validation::today())
}

impl Record for Pet {
    const ENTITY: &'static str = "pet";
    const TABLE: &'static str = "pets";
    const FIELDS: &'static [&'static str] = &["name", "breed", "birthday", "weight"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        if let Some(name) = check.required("name", MSG_NAME_REQUIRED) {
            check.check("name", validation::letters_and_spaces(name));
        }

        check.required("breed", MSG_BREED_REQUIRED);

        if let Some(birthday) = check.required("birthday", MSG_BIRTHDAY_REQUIRED) {
            check.check(
                "birthday",
                validation::date_before(birthday, today, MSG_BIRTHDAY_INVALID, MSG_BIRTHDAY_FUTURE),
            );
        }

        if let Some(weight) = check.required("weight", MSG_WEIGHT_REQUIRED) {
            check.check(
                "weight",
                validation::positive_number(weight, MSG_WEIGHT_INVALID, MSG_WEIGHT_INVALID),
            );
        }

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Pet {
            id,
            name: field(data, "name").to_string(),
            breed: field(data, "breed").to_string(),
            birthday: NaiveDate::parse_from_str(field(data, "birthday"), "%Y-%m-%d")
                .unwrap_or_default(),
            weight: field(data, "weight").parse().unwrap_or_default(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("breed".to_string(), self.breed.clone()),
            ("birthday".to_string(), self.birthday.format("%Y-%m-%d").to_string()),
            ("weight".to_string(), self.weight.to_string()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Pet {
            id: row.get("id")?,
            name: row.get("name")?,
            breed: row.get("breed")?,
            birthday: row.get("birthday")?,
            weight: row.get("weight")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.breed),
            text(&self.birthday.format("%Y-%m-%d").to_string()),
            Value::Real(self.weight),
        ]
    }
}
