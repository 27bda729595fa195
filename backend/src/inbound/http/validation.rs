//! Request validation helpers shared by the HTTP handlers.
//!
//! Every rejection becomes an `invalid_request` error whose `details` carry
//! the offending `field` and a stable `code`.

use actix_web::{error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::parcel::ParcelId;
use crate::domain::{
    Error, LoginValidationError, RegistrationValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    MalformedBody,
    EmptyUsername,
    UsernameTooLong,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong,
    EmptyPassword,
    PasswordTooShort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::MalformedBody => "malformed_body",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong => "username_too_long",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmailTooLong => "email_too_long",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort => "password_too_short",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

const ID: FieldName = FieldName::new("id");
const BODY: FieldName = FieldName::new("body");
const USERNAME: FieldName = FieldName::new("username");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Parse a parcel id taken from the request path.
pub(crate) fn parse_parcel_id(raw: &str) -> Result<ParcelId, Error> {
    raw.parse::<i64>().map(ParcelId::new).map_err(|_| {
        Error::invalid_request("parcel id must be an integer").with_details(json!({
            "field": ID.as_str(),
            "value": raw,
            "code": ErrorCode::InvalidId.as_str(),
        }))
    })
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error(USERNAME, ErrorCode::EmptyUsername, err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error(PASSWORD, ErrorCode::EmptyPassword, err.to_string())
        }
    }
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    let (field, code) = match err {
        RegistrationValidationError::User(user) => match user {
            UserValidationError::EmptyUsername => (USERNAME, ErrorCode::EmptyUsername),
            UserValidationError::UsernameTooLong { .. } => (USERNAME, ErrorCode::UsernameTooLong),
            UserValidationError::EmptyEmail => (EMAIL, ErrorCode::EmptyEmail),
            UserValidationError::InvalidEmail => (EMAIL, ErrorCode::InvalidEmail),
            UserValidationError::EmailTooLong { .. } => (EMAIL, ErrorCode::EmailTooLong),
            UserValidationError::EmptyId | UserValidationError::InvalidId => {
                return Error::internal(format!("unexpected id validation failure: {message}"));
            }
        },
        RegistrationValidationError::EmptyPassword => (PASSWORD, ErrorCode::EmptyPassword),
        RegistrationValidationError::PasswordTooShort { .. } => {
            (PASSWORD, ErrorCode::PasswordTooShort)
        }
    };
    field_error(field, code, message)
}

/// JSON extractor configuration that reports malformed bodies in the shared
/// error envelope instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        debug!(error = %err, "rejected request body");
        field_error(BODY, ErrorCode::MalformedBody, err.to_string()).into()
    })
}
