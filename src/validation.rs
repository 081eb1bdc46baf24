// ✅ Field Validation - shared rule set for every clinic form
//
// A form arrives as untyped strings (field name → raw value).
// Each entity runs its own checks through a FormCheck and gets back a
// field-keyed map of Spanish messages. Empty map = valid.

use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Raw submitted values, keyed by field name
pub type FormData = HashMap<String, String>;

/// Field name → human-readable message. Empty when the form is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Email domain every clinic address must end with
pub const CLINIC_EMAIL_DOMAIN: &str = "@vetsoft.com";

/// Argentine country code, required at the start of phone numbers
pub const PHONE_PREFIX: &str = "54";

pub const MSG_NAME_REQUIRED: &str = "Por favor ingrese un nombre";
pub const MSG_NAME_LETTERS: &str = "El nombre solo puede contener letras y espacios";
pub const MSG_PHONE_REQUIRED: &str = "Por favor ingrese un teléfono";
pub const MSG_PHONE_PREFIX: &str =
    "El número de teléfono debe comenzar con el prefijo 54 para Argentina";
pub const MSG_PHONE_DIGITS: &str =
    "El número de teléfono debe comenzar con el prefijo 54 para Argentina y solo puede contener números";
pub const MSG_EMAIL_REQUIRED: &str = "Por favor ingrese un email";
pub const MSG_EMAIL_DOMAIN: &str = "El email debe terminar con @vetsoft.com";

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Trimmed value of a field; a missing key reads as ""
pub fn field<'a>(data: &'a FormData, name: &str) -> &'a str {
    data.get(name).map(|v| v.trim()).unwrap_or("")
}

// ============================================================================
// FORM CHECK
// ============================================================================

/// Accumulates field errors for one form.
///
/// The first failing rule of a field wins: later rejections for the same
/// field are ignored so the caller sees the most basic problem first.
pub struct FormCheck<'a> {
    data: &'a FormData,
    errors: FieldErrors,
}

impl<'a> FormCheck<'a> {
    pub fn new(data: &'a FormData) -> Self {
        FormCheck {
            data,
            errors: FieldErrors::new(),
        }
    }

    pub fn value(&self, name: &str) -> &'a str {
        field(self.data, name)
    }

    /// Returns the value when present, otherwise records `message`
    pub fn required(&mut self, name: &str, message: &str) -> Option<&'a str> {
        let value = self.value(name);
        if value.is_empty() {
            self.reject(name, message);
            None
        } else {
            Some(value)
        }
    }

    pub fn reject(&mut self, name: &str, message: &str) {
        self.errors
            .entry(name.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record the error of a rule result, keeping the parsed value on success
    pub fn check<T>(&mut self, name: &str, result: Result<T, &str>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.reject(name, message);
                None
            }
        }
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Letters (any script, accents included) and spaces only
pub fn letters_and_spaces(value: &str) -> Result<(), &'static str> {
    if value.chars().all(|c| c.is_alphabetic() || c == ' ') {
        Ok(())
    } else {
        Err(MSG_NAME_LETTERS)
    }
}

/// At least one "@". `invalid` is the entity's own wording.
pub fn email<'m>(value: &str, invalid: &'m str) -> Result<(), &'m str> {
    if value.contains('@') {
        Ok(())
    } else {
        Err(invalid)
    }
}

/// Address belongs to the clinic domain (case-insensitive)
pub fn clinic_email(value: &str) -> Result<(), &'static str> {
    if value.to_lowercase().ends_with(CLINIC_EMAIL_DOMAIN) {
        Ok(())
    } else {
        Err(MSG_EMAIL_DOMAIN)
    }
}

/// Argentine phone: "54" followed by digits only
pub fn argentine_phone(value: &str) -> Result<(), &'static str> {
    let Some(rest) = value.strip_prefix(PHONE_PREFIX) else {
        return Err(MSG_PHONE_PREFIX);
    };

    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err(MSG_PHONE_DIGITS);
    }

    Ok(())
}

/// Finite decimal number. `NaN` and infinities are rejected.
pub fn number<'m>(value: &str, invalid: &'m str) -> Result<f64, &'m str> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(invalid),
    }
}

/// Finite number strictly greater than zero
pub fn positive_number<'m>(
    value: &str,
    invalid: &'m str,
    not_positive: &'m str,
) -> Result<f64, &'m str> {
    let n = number(value, invalid)?;
    if n <= 0.0 {
        return Err(not_positive);
    }
    Ok(n)
}

/// Whole number inside `[min, max]`
pub fn integer_in_range<'m>(
    value: &str,
    min: i64,
    max: i64,
    invalid: &'m str,
    out_of_range: &'m str,
) -> Result<i64, &'m str> {
    let n = value.parse::<i64>().map_err(|_| invalid)?;
    if n < min || n > max {
        return Err(out_of_range);
    }
    Ok(n)
}

/// `YYYY-MM-DD` date strictly before `today`
pub fn date_before<'m>(
    value: &str,
    today: NaiveDate,
    invalid: &'m str,
    not_before: &'m str,
) -> Result<NaiveDate, &'m str> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid)?;
    if date >= today {
        return Err(not_before);
    }
    Ok(date)
}
