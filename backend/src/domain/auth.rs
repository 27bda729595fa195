//! Authentication primitives: login credentials and registration details.
//!
//! Handlers build these from raw strings before talking to a port, so the
//! services only ever see validated input. Passwords are held in
//! [`Zeroizing`] buffers.

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError, Username};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN: usize = 4;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use parcel_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "secret").unwrap();
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for a registration request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// Username or email failed validation.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.trim().is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password, to be hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", " secret ")]
    #[case("alice", "correct horse battery staple")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn registration_accepts_minimum_password() {
        let details = RegistrationDetails::try_from_parts(" ada ", "ada@example.com", "abcd")
            .expect("valid registration");
        assert_eq!(details.username().as_ref(), "ada");
        assert_eq!(details.email().as_ref(), "ada@example.com");
        assert_eq!(details.password(), "abcd");
    }

    #[rstest]
    #[case("ada", "ada@example.com", "", RegistrationValidationError::EmptyPassword)]
    #[case("ada", "ada@example.com", "    ", RegistrationValidationError::EmptyPassword)]
    #[case(
        "ada",
        "ada@example.com",
        "abc",
        RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN }
    )]
    #[case(
        "",
        "ada@example.com",
        "abcd",
        RegistrationValidationError::User(UserValidationError::EmptyUsername)
    )]
    #[case(
        "ada",
        "nope",
        "abcd",
        RegistrationValidationError::User(UserValidationError::InvalidEmail)
    )]
    fn registration_rejects_invalid_fields(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = RegistrationDetails::try_from_parts(username, email, password)
            .expect_err("invalid registration");
        assert_eq!(err, expected);
    }
}
