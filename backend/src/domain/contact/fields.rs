//! Per-field validators for the contact form.
//!
//! Each validator is independent of the others and trims before measuring.
//! Lengths are counted in Unicode scalar values.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum trimmed length of a name.
pub const NAME_MIN: usize = 2;
/// Maximum trimmed length of a name.
pub const NAME_MAX: usize = 100;
/// Maximum trimmed length of a company name.
pub const COMPANY_MAX: usize = 200;
/// Minimum trimmed length of a message.
pub const MESSAGE_MIN: usize = 10;
/// Maximum trimmed length of a message.
pub const MESSAGE_MAX: usize = 5000;

/// Mail-provider domains that are almost always typos.
pub const EMAIL_DOMAIN_TYPOS: [&str; 4] = ["gmial.com", "gmai.com", "yahooo.com", "outlok.com"];

/// Accepted phone numbering: domestic trunk-prefixed or international.
///
/// Australian rules: ten digits with a leading `0` (e.g. `04XX XXX XXX`),
/// or eleven digits with the `61` country code. Swap these for another
/// locale.
pub const PHONE_DOMESTIC: PhoneRule = PhoneRule {
    digits: 10,
    prefix: "0",
};
/// International form of [`PHONE_DOMESTIC`].
pub const PHONE_INTERNATIONAL: PhoneRule = PhoneRule {
    digits: 11,
    prefix: "61",
};

/// Digit count and leading digits a phone number must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRule {
    /// Exact number of digits once punctuation is stripped.
    pub digits: usize,
    /// Required leading digits.
    pub prefix: &'static str,
}

impl PhoneRule {
    fn accepts(self, digits: &str) -> bool {
        digits.len() == self.digits && digits.starts_with(self.prefix)
    }
}

/// Contact form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    /// Sender's name.
    Name,
    /// Sender's email address.
    Email,
    /// Optional phone number.
    Phone,
    /// Optional company name.
    Company,
    /// Enquiry body.
    Message,
}

impl ContactField {
    /// Every field in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Company,
        Self::Message,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::Message => "message",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company name",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
///
/// The `Display` output is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required field was empty or whitespace.
    Required(ContactField),
    /// Trimmed value shorter than `min`.
    TooShort { field: ContactField, min: usize },
    /// Trimmed value longer than `max`.
    TooLong { field: ContactField, max: usize },
    /// Name consisted only of digits.
    NameNotPlausible,
    /// Email did not have a `local@domain.tld` shape.
    EmailFormat,
    /// Email domain is a known misspelling.
    EmailDomainTypo { domain: String },
    /// Phone did not match any accepted numbering rule.
    PhoneFormat,
}

impl FieldError {
    /// Field the error belongs to.
    pub fn field(&self) -> ContactField {
        match self {
            Self::Required(field)
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. } => *field,
            Self::NameNotPlausible => ContactField::Name,
            Self::EmailFormat | Self::EmailDomainTypo { .. } => ContactField::Email,
            Self::PhoneFormat => ContactField::Phone,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {min} characters", field.label())
            }
            Self::TooLong { field, max } => {
                write!(f, "{} must be less than {max} characters", field.label())
            }
            Self::NameNotPlausible => write!(f, "Please enter a valid name"),
            Self::EmailFormat => write!(f, "Please enter a valid email address"),
            Self::EmailDomainTypo { .. } => {
                write!(f, "Please check your email domain for typos")
            }
            Self::PhoneFormat => write!(
                f,
                "Please enter a valid Australian phone number (e.g., 04XX XXX XXX)"
            ),
        }
    }
}

impl std::error::Error for FieldError {}

/// Outcome of a single field validator.
pub type FieldResult = Result<(), FieldError>;

/// Loose `local@domain.tld` shape; typo domains are checked separately.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN)
        .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
});

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_length(field: ContactField, value: &str, min: usize, max: usize) -> FieldResult {
    let length = value.trim().chars().count();
    if length < min {
        return Err(FieldError::TooShort { field, min });
    }
    if length > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

/// Validate the sender's name.
///
/// # Examples
/// ```
/// use site_backend::domain::contact::validate_name;
///
/// assert!(validate_name("Ada Lovelace").is_ok());
/// assert!(validate_name("12345").is_err());
/// ```
pub fn validate_name(value: &str) -> FieldResult {
    if is_blank(value) {
        return Err(FieldError::Required(ContactField::Name));
    }
    check_length(ContactField::Name, value, NAME_MIN, NAME_MAX)?;
    if value.trim().chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::NameNotPlausible);
    }
    Ok(())
}

/// Validate the sender's email address.
///
/// The shape check runs on the raw value, so surrounding whitespace is a
/// format error rather than being trimmed away.
///
/// # Panics
///
/// Panics on first use if the built-in email pattern fails to compile,
/// which `email_pattern_compiles` rules out.
pub fn validate_email(value: &str) -> FieldResult {
    if is_blank(value) {
        return Err(FieldError::Required(ContactField::Email));
    }
    if !EMAIL_RE.is_match(value) {
        return Err(FieldError::EmailFormat);
    }
    let domain = value
        .split_once('@')
        .map(|(_, domain)| domain.to_lowercase())
        .unwrap_or_default();
    if EMAIL_DOMAIN_TYPOS.contains(&domain.as_str()) {
        return Err(FieldError::EmailDomainTypo { domain });
    }
    Ok(())
}

/// Validate the optional phone number.
///
/// Punctuation and spaces are ignored; only the digits are checked against
/// [`PHONE_DOMESTIC`] and [`PHONE_INTERNATIONAL`].
pub fn validate_phone(value: &str) -> FieldResult {
    if is_blank(value) {
        return Ok(());
    }
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if PHONE_DOMESTIC.accepts(&digits) || PHONE_INTERNATIONAL.accepts(&digits) {
        Ok(())
    } else {
        Err(FieldError::PhoneFormat)
    }
}

/// Validate the optional company name.
pub fn validate_company(value: &str) -> FieldResult {
    if is_blank(value) {
        return Ok(());
    }
    check_length(ContactField::Company, value, 0, COMPANY_MAX)
}

/// Validate the enquiry body.
pub fn validate_message(value: &str) -> FieldResult {
    if is_blank(value) {
        return Err(FieldError::Required(ContactField::Message));
    }
    check_length(ContactField::Message, value, MESSAGE_MIN, MESSAGE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn message(result: FieldResult) -> String {
        result.expect_err("validation should fail").to_string()
    }

    #[rstest]
    #[case::empty("", "Name is required")]
    #[case::whitespace("   ", "Name is required")]
    #[case::single_char("A", "Name must be at least 2 characters")]
    #[case::padded_single_char("  A  ", "Name must be at least 2 characters")]
    #[case::digits("12345", "Please enter a valid name")]
    fn rejects_bad_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(message(validate_name(input)), expected);
    }

    #[rstest]
    #[case::two_chars("Al")]
    #[case::mixed_digits("R2D2")]
    #[case::accented("Zoë")]
    fn accepts_plausible_names(#[case] input: &str) {
        assert!(validate_name(input).is_ok());
    }

    #[test]
    fn name_length_bounds_are_inclusive() {
        assert!(validate_name(&"a".repeat(NAME_MAX)).is_ok());
        assert_eq!(
            message(validate_name(&"a".repeat(NAME_MAX + 1))),
            "Name must be less than 100 characters"
        );
    }

    #[test]
    fn every_short_trimmed_name_fails_and_every_plausible_one_passes() {
        for length in 0..NAME_MIN {
            assert!(validate_name(&"x".repeat(length)).is_err());
        }
        for length in [NAME_MIN, 50, NAME_MAX] {
            let name = format!("{}a", "7".repeat(length - 1));
            assert!(validate_name(&name).is_ok(), "length {length} should pass");
        }
    }

    #[rstest]
    #[case::plain("user@example.com")]
    #[case::subdomain("first.last@mail.example.co.uk")]
    #[case::upper_case_typo_lookalike("user@GMAIL.com")]
    fn accepts_valid_emails(#[case] input: &str) {
        assert!(validate_email(input).is_ok());
    }

    #[rstest]
    #[case::empty("", "Email is required")]
    #[case::no_at("not-an-email", "Please enter a valid email address")]
    #[case::no_dot("user@localhost", "Please enter a valid email address")]
    #[case::two_ats("a@b@c.com", "Please enter a valid email address")]
    #[case::inner_space("us er@example.com", "Please enter a valid email address")]
    #[case::leading_space(" user@example.com", "Please enter a valid email address")]
    #[case::typo("user@gmial.com", "Please check your email domain for typos")]
    #[case::typo_any_case("user@YAHOOO.COM", "Please check your email domain for typos")]
    fn rejects_bad_emails(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(message(validate_email(input)), expected);
    }

    #[test]
    fn email_pattern_compiles() {
        let pattern = Regex::new(EMAIL_PATTERN).expect("email pattern should compile");
        assert!(pattern.is_match("ada@example.com"));
        assert!(!pattern.is_match("ada@example"));
    }

    #[test]
    fn typo_error_keeps_lowercased_domain() {
        let error = validate_email("x@OutLok.com").expect_err("typo");
        assert_eq!(
            error,
            FieldError::EmailDomainTypo {
                domain: "outlok.com".to_owned()
            }
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("  ")]
    #[case::mobile("0412345678")]
    #[case::spaced_mobile("0412 345 678")]
    #[case::landline("(07) 5555 1234")]
    #[case::international("61412345678")]
    #[case::international_plus("+61 412 345 678")]
    fn accepts_valid_phones(#[case] input: &str) {
        assert!(validate_phone(input).is_ok());
    }

    #[rstest]
    #[case::short("12345")]
    #[case::ten_without_trunk("1412345678")]
    #[case::eleven_wrong_country("44412345678")]
    #[case::letters_only("call me")]
    fn rejects_bad_phones(#[case] input: &str) {
        assert_eq!(
            message(validate_phone(input)),
            "Please enter a valid Australian phone number (e.g., 04XX XXX XXX)"
        );
    }

    #[test]
    fn company_is_optional_but_bounded() {
        assert!(validate_company("").is_ok());
        assert!(validate_company(&"c".repeat(COMPANY_MAX)).is_ok());
        assert_eq!(
            message(validate_company(&"c".repeat(COMPANY_MAX + 1))),
            "Company name must be less than 200 characters"
        );
    }

    #[rstest]
    #[case::empty("", "Message is required")]
    #[case::short("short", "Message must be at least 10 characters")]
    #[case::padded_short("   nine char   ", "Message must be at least 10 characters")]
    fn rejects_bad_messages(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(message(validate_message(input)), expected);
    }

    #[test]
    fn message_bounds_are_inclusive() {
        assert!(validate_message(&"m".repeat(MESSAGE_MIN)).is_ok());
        assert!(validate_message(&"m".repeat(MESSAGE_MAX)).is_ok());
        assert!(validate_message(&"m".repeat(MESSAGE_MIN - 1)).is_err());
        assert_eq!(
            message(validate_message(&"m".repeat(MESSAGE_MAX + 1))),
            "Message must be less than 5000 characters"
        );
    }

    #[test]
    fn errors_report_their_field() {
        let errors = [
            validate_name(""),
            validate_email("bad"),
            validate_phone("1"),
            validate_company(&"c".repeat(COMPANY_MAX + 1)),
            validate_message(""),
        ];
        let fields: Vec<_> = errors
            .into_iter()
            .map(|result| result.expect_err("fails").field())
            .collect();
        assert_eq!(fields, ContactField::ALL);
    }
}
