//! Customer form validation.
//!
//! Each field is described by a row in a rule table and checked by one generic
//! validator. Every field is checked on every call so the form can show all
//! problems at once.

use std::collections::BTreeMap;
use std::fmt;

use fishmarket_core::{Email, EmailError};
use serde::{Deserialize, Serialize};

/// Raw, unvalidated form input as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl CustomerForm {
    /// The raw value for a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Zip => &self.zip,
        }
    }

    /// Returns `true` if every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|&f| self.value(f).is_empty())
    }
}

/// Validated customer details. All text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl CustomerInfo {
    /// `"{address}, {city}, {state} {zip}"`
    #[must_use]
    pub fn delivery_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip
        )
    }
}

/// A customer form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::Zip,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a field must look like besides staying under its maximum length.
#[derive(Debug, Clone, Copy)]
enum Format {
    Text {
        min: usize,
        too_short: &'static str,
    },
    Email {
        invalid: &'static str,
    },
}

/// One row of the validation table.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: Field,
    max: usize,
    too_long: &'static str,
    format: Format,
}

impl FieldRule {
    const fn text(
        field: Field,
        min: usize,
        max: usize,
        too_short: &'static str,
        too_long: &'static str,
    ) -> Self {
        Self {
            field,
            max,
            too_long,
            format: Format::Text { min, too_short },
        }
    }

    /// Check a trimmed value, returning the message for the first violation.
    ///
    /// The email rule also hands back the parsed address. A malformed address
    /// reports the format message even when it is also too long.
    fn check(&self, value: &str) -> Result<Option<Email>, &'static str> {
        match self.format {
            Format::Text { min, too_short } => {
                let len = value.chars().count();
                if len < min {
                    Err(too_short)
                } else if len > self.max {
                    Err(self.too_long)
                } else {
                    Ok(None)
                }
            }
            Format::Email { invalid } => match Email::parse(value) {
                Ok(email) if email.as_str().chars().count() <= self.max => Ok(Some(email)),
                Ok(_) | Err(EmailError::TooLong { .. }) => Err(self.too_long),
                Err(_) => Err(invalid),
            },
        }
    }
}

/// Field constraints for the order form.
const RULES: [FieldRule; 7] = [
    FieldRule::text(
        Field::Name,
        2,
        100,
        "Name must be at least 2 characters",
        "Name too long",
    ),
    FieldRule {
        field: Field::Email,
        max: Email::MAX_LENGTH,
        too_long: "Email too long",
        format: Format::Email {
            invalid: "Invalid email address",
        },
    },
    FieldRule::text(
        Field::Phone,
        10,
        20,
        "Phone number must be at least 10 digits",
        "Phone number too long",
    ),
    FieldRule::text(
        Field::Address,
        5,
        500,
        "Address must be at least 5 characters",
        "Address too long",
    ),
    FieldRule::text(Field::City, 2, 100, "City required", "City name too long"),
    FieldRule::text(Field::State, 2, 50, "State required", "State name too long"),
    FieldRule::text(Field::Zip, 3, 20, "ZIP code required", "ZIP code too long"),
];

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failed fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a customer form.
///
/// All values are trimmed before their rules run. On success the trimmed
/// values are returned as a [`CustomerInfo`].
///
/// # Errors
///
/// Returns `ValidationErrors` naming every field that broke a rule.
pub fn validate(form: &CustomerForm) -> Result<CustomerInfo, ValidationErrors> {
    let mut errors = BTreeMap::new();
    let mut email = None;
    for rule in &RULES {
        match rule.check(form.value(rule.field).trim()) {
            Ok(parsed) => email = email.or(parsed),
            Err(message) => {
                errors.insert(rule.field, message.to_owned());
            }
        }
    }

    match email {
        Some(email) if errors.is_empty() => Ok(CustomerInfo {
            name: form.name.trim().to_owned(),
            email,
            phone: form.phone.trim().to_owned(),
            address: form.address.trim().to_owned(),
            city: form.city.trim().to_owned(),
            state: form.state.trim().to_owned(),
            zip: form.zip.trim().to_owned(),
        }),
        _ => Err(ValidationErrors(errors)),
    }
}
