//! Contact form record and whole-form validation.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::fields::{
    ContactField, FieldError, validate_company, validate_email, validate_message, validate_name,
    validate_phone,
};
use super::sanitize::sanitize_input;

/// Contact form as submitted by a visitor.
///
/// Required fields default to the empty string when absent so validation,
/// not deserialisation, reports them as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    /// Sender's name (required).
    #[serde(default)]
    pub name: String,
    /// Sender's email (required).
    #[serde(default)]
    pub email: String,
    /// Phone number (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Company name (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Enquiry body (required).
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Phone as a plain string; absent reads as empty.
    pub fn phone_str(&self) -> &str {
        self.phone.as_deref().unwrap_or_default()
    }

    /// Company as a plain string; absent reads as empty.
    pub fn company_str(&self) -> &str {
        self.company.as_deref().unwrap_or_default()
    }

    /// Run every field validator and collect all failures.
    pub fn validate(&self) -> FormValidation {
        validate_form(self)
    }

    /// Escape every field for onward delivery.
    ///
    /// Call only after [`ContactForm::validate`] has passed; sanitising never
    /// influences validation. Optional fields that sanitise to nothing become
    /// `None`.
    pub fn sanitized(&self) -> SanitizedContact {
        let optional = |value: &str| Some(sanitize_input(value)).filter(|v| !v.is_empty());
        SanitizedContact {
            name: sanitize_input(&self.name),
            email: sanitize_input(&self.email),
            phone: optional(self.phone_str()),
            company: optional(self.company_str()),
            message: sanitize_input(&self.message),
        }
    }
}

/// Contact fields after HTML escaping and trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    /// Escaped name.
    pub name: String,
    /// Escaped email.
    pub email: String,
    /// Escaped phone, if any.
    pub phone: Option<String>,
    /// Escaped company, if any.
    pub company: Option<String>,
    /// Escaped message.
    pub message: String,
}

/// Field-to-error map rebuilt on every validation.
///
/// Iterates in display order and serialises as `{ "<field>": "<message>" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, FieldError>);

impl FieldErrors {
    fn record(&mut self, result: Result<(), FieldError>) {
        if let Err(error) = result {
            self.0.insert(error.field(), error);
        }
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error recorded for `field`, if any.
    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Failing fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            map.serialize_entry(field.as_str(), &error.to_string())?;
        }
        map.end()
    }
}

/// Result of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    is_valid: bool,
    errors: FieldErrors,
}

impl FormValidation {
    fn from_errors(errors: FieldErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// True when no field failed.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Every failing field.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// First failure in display order, used for the summary notice.
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors.iter().next().map(|(_, error)| error)
    }
}

/// Validate all five fields without short-circuiting.
///
/// # Examples
/// ```
/// use site_backend::domain::contact::{ContactField, ContactForm, validate_form};
///
/// let form = ContactForm {
///     name: "A".into(),
///     email: "user@example.com".into(),
///     message: "short".into(),
///     ..ContactForm::default()
/// };
/// let outcome = validate_form(&form);
/// assert!(!outcome.is_valid());
/// assert!(outcome.errors().get(ContactField::Name).is_some());
/// assert!(outcome.errors().get(ContactField::Message).is_some());
/// ```
pub fn validate_form(form: &ContactForm) -> FormValidation {
    let mut errors = FieldErrors::default();
    errors.record(validate_name(&form.name));
    errors.record(validate_email(&form.email));
    errors.record(validate_phone(form.phone_str()));
    errors.record(validate_company(form.company_str()));
    errors.record(validate_message(&form.message));
    FormValidation::from_errors(errors)
}
