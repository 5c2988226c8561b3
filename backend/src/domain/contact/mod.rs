//! Contact form model: field validators, whole-form validation and
//! sanitisation.
//!
//! Everything here is pure and synchronous. Rate limiting and delivery live
//! in [`crate::domain::rate_limit`] and
//! [`crate::domain::contact_submission`].

mod fields;
mod form;
mod sanitize;

pub use fields::{
    COMPANY_MAX, ContactField, EMAIL_DOMAIN_TYPOS, FieldError, FieldResult, MESSAGE_MAX,
    MESSAGE_MIN, NAME_MAX, NAME_MIN, PHONE_DOMESTIC, PHONE_INTERNATIONAL, PhoneRule,
    validate_company, validate_email, validate_message, validate_name, validate_phone,
};
pub use form::{ContactForm, FieldErrors, FormValidation, SanitizedContact, validate_form};
pub use sanitize::sanitize_input;
