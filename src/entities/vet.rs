// 🩺 Vet Entity - veterinary staff
//
// Same contact rules as clients (clinic email, Argentine phone),
// plus a specialty picked from a fixed list.

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
use std::str::FromStr;

pub const MSG_EMAIL_INVALID: &str = "Por favor ingrese un email válido";
pub const MSG_SPECIALTY_INVALID: &str = "Por favor seleccione una especialidad válida";

// ============================================================================
// SPECIALTY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Specialty {
    #[default]
    #[serde(rename = "Medicina interna")]
    InternalMedicine,
    #[serde(rename = "Cirugía")]
    Surgery,
    #[serde(rename = "Dermatología")]
    Dermatology,
    #[serde(rename = "Oftalmología")]
    Ophthalmology,
    #[serde(rename = "Odontología")]
    Dentistry,
    #[serde(rename = "Oncología")]
    Oncology,
    #[serde(rename = "Ortopedia")]
    Orthopedics,
    #[serde(rename = "Cardiología")]
    Cardiology,
    #[serde(rename = "Neurología")]
    Neurology,
    #[serde(rename = "Reproducción")]
    Reproduction,
}

impl Specialty {
    pub const ALL: [Specialty; 10] = [
        Specialty::InternalMedicine,
        Specialty::Surgery,
        Specialty::Dermatology,
        Specialty::Ophthalmology,
        Specialty::Dentistry,
        Specialty::Oncology,
        Specialty::Orthopedics,
        Specialty::Cardiology,
        Specialty::Neurology,
        Specialty::Reproduction,
    ];

    /// Label shown in forms and stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::InternalMedicine => "Medicina interna",
            Specialty::Surgery => "Cirugía",
            Specialty::Dermatology => "Dermatología",
            Specialty::Ophthalmology => "Oftalmología",
            Specialty::Dentistry => "Odontología",
            Specialty::Oncology => "Oncología",
            Specialty::Orthopedics => "Ortopedia",
            Specialty::Cardiology => "Cardiología",
            Specialty::Neurology => "Neurología",
            Specialty::Reproduction => "Reproducción",
        }
    }
}

impl FromStr for Specialty {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Specialty::ALL
            .into_iter()
            .find(|specialty| specialty.as_str().eq_ignore_ascii_case(s))
            .ok_or(MSG_SPECIALTY_INVALID)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VET ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vet {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialty: Specialty,
}

impl fmt::Display for Vet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn validate_vet(data: &FormData) -> FieldErrors {
    Vet::validate(data, validation::today())
}

/// Blank specialty falls back to the default
fn parse_specialty(value: &str) -> Result<Specialty, &'static str> {
    if value.is_empty() {
        Ok(Specialty::default())
    } else {
        value.parse()
    }
}

impl Record for Vet {
    const ENTITY: &'static str = "vet";
    const TABLE: &'static str = "vets";
    const FIELDS: &'static [&'static str] = &["name", "email", "phone", "specialty"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, _today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        if let Some(name) = check.required("name", MSG_NAME_REQUIRED) {
            check.check("name", validation::letters_and_spaces(name));
        }

        if let Some(email) = check.required("email", MSG_EMAIL_REQUIRED) {
            check.check("email", validation::email(email, MSG_EMAIL_INVALID));
            check.check("email", validation::clinic_email(email));
        }

        if let Some(phone) = check.required("phone", MSG_PHONE_REQUIRED) {
            check.check("phone", validation::argentine_phone(phone));
        }

        let specialty = check.value("specialty");
        check.check("specialty", parse_specialty(specialty));

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Vet {
            id,
            name: field(data, "name").to_string(),
            email: field(data, "email").to_string(),
            phone: field(data, "phone").to_string(),
            specialty: parse_specialty(field(data, "specialty")).unwrap_or_default(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("phone".to_string(), self.phone.clone()),
            ("specialty".to_string(), self.specialty.as_str().to_string()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let specialty: String = row.get("specialty")?;

        Ok(Vet {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            specialty: parse_specialty(&specialty).unwrap_or_default(),
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.email),
            text(&self.phone),
            text(self.specialty.as_str()),
        ]
    }
}
