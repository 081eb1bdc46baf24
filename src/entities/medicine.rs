// 💊 Medicine Entity

use super::{text, Record};
use crate::validation::{self, field, FieldErrors, FormCheck, FormData, MSG_NAME_REQUIRED};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_DESCRIPTION_REQUIRED: &str = "Por favor ingrese una descripción";
pub const MSG_DOSE_REQUIRED: &str = "Por favor ingrese una dosis";
pub const MSG_DOSE_INVALID: &str = "La dosis debe ser un número entero";
pub const MSG_DOSE_RANGE: &str = "La dosis debe estar en un rango de 1 a 10";

pub const DOSE_MIN: i64 = 1;
pub const DOSE_MAX: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub dose: i64,
}

impl fmt::Display for Medicine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn validate_medicine(data: &FormData) -> FieldErrors {
    Medicine::validate(data, validation::today())
}

impl Record for Medicine {
    const ENTITY: &'static str = "medicine";
    const TABLE: &'static str = "medicines";
    const FIELDS: &'static [&'static str] = &["name", "description", "dose"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, _today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        check.required("name", MSG_NAME_REQUIRED);
        check.required("description", MSG_DESCRIPTION_REQUIRED);

        if let Some(dose) = check.required("dose", MSG_DOSE_REQUIRED) {
            check.check(
                "dose",
                validation::integer_in_range(dose, DOSE_MIN, DOSE_MAX, MSG_DOSE_INVALID, MSG_DOSE_RANGE),
            );
        }

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Medicine {
            id,
            name: field(data, "name").to_string(),
            description: field(data, "description").to_string(),
            dose: field(data, "dose").parse().unwrap_or_default(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("description".to_string(), self.description.clone()),
            ("dose".to_string(), self.dose.to_string()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Medicine {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            dose: row.get("dose")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.description),
            Value::Integer(self.dose),
        ]
    }
}
