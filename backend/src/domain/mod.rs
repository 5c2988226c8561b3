//! Domain primitives, services and ports.
//!
//! Purpose: hold the contact form rules, the submission cooldown, the site
//! routing table and the error envelope shared by every adapter. Nothing in
//! here depends on actix, reqwest or utoipa.
//!
//! Public surface:
//! - `Error`, `ErrorCode`: API error envelope and its stable identifiers.
//! - `ContactSubmissionService`: contact form use case.
//! - `SubmissionRateLimiter`: per-browser cooldown.
//! - `TraceId`: per-request correlation identifier.

pub mod contact;
pub mod contact_submission;
pub mod error;
pub mod ports;
pub mod rate_limit;
pub mod site_route;
pub mod trace_id;

pub use self::contact_submission::{ContactSubmissionService, ContactSubmissionSettings};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::rate_limit::{RateLimited, SubmissionRateLimiter};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use site_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no such page"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
