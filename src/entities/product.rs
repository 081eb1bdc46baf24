// 📦 Product Entity - items sold at the clinic

use super::{text, Record};
use crate::validation::{self, field, FieldErrors, FormCheck, FormData, MSG_NAME_REQUIRED};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MSG_TYPE_REQUIRED: &str = "Por favor ingrese un tipo";
pub const MSG_PRICE_REQUIRED: &str = "Por favor ingrese un precio";
pub const MSG_PRICE_INVALID: &str = "El precio debe ser un número válido";
pub const MSG_PRICE_NOT_POSITIVE: &str = "El precio debe ser mayor que cero";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Stored and submitted as `type`
    #[serde(rename = "type")]
    pub product_type: String,
    pub price: f64,
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn validate_product(data: &FormData) -> FieldErrors {
    Product::validate(data, validation::today())
}

impl Record for Product {
    const ENTITY: &'static str = "product";
    const TABLE: &'static str = "products";
    const FIELDS: &'static [&'static str] = &["name", "type", "price"];

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(data: &FormData, _today: NaiveDate) -> FieldErrors {
        let mut check = FormCheck::new(data);

        check.required("name", MSG_NAME_REQUIRED);
        check.required("type", MSG_TYPE_REQUIRED);

        if let Some(price) = check.required("price", MSG_PRICE_REQUIRED) {
            check.check(
                "price",
                validation::positive_number(price, MSG_PRICE_INVALID, MSG_PRICE_NOT_POSITIVE),
            );
        }

        check.finish()
    }

    fn from_form(id: i64, data: &FormData) -> Self {
        Product {
            id,
            name: field(data, "name").to_string(),
            product_type: field(data, "type").to_string(),
            price: field(data, "price").parse().unwrap_or_default(),
        }
    }

    fn to_form(&self) -> FormData {
        FormData::from([
            ("name".to_string(), self.name.clone()),
            ("type".to_string(), self.product_type.clone()),
            ("price".to_string(), self.price.to_string()),
        ])
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Product {
            id: row.get("id")?,
            name: row.get("name")?,
            product_type: row.get("type")?,
            price: row.get("price")?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.name),
            text(&self.product_type),
            Value::Real(self.price),
        ]
    }
}
