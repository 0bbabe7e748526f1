//! Authentication primitives: credentials, registrations, and identities.
//!
//! Inbound payload parsing stays outside the domain. Handlers call the
//! constructors here to validate raw strings before talking to a port.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{BloodType, EmailAddress, Role, User, UserId, UserName, UserValidationError};

/// Minimum accepted password length, counted in characters.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("please provide an email and password")]
    MissingCredentials,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("unknown blood type: {0}")]
    UnknownBloodType(String),
    #[error(transparent)]
    User(#[from] UserValidationError),
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased; it is not checked for shape so a
///   malformed address simply fails authentication.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use bloodbank::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() || password.is_empty() {
            return Err(CredentialsValidationError::MissingCredentials);
        }
        Ok(Self {
            email: normalised,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw registration fields as received by an inbound adapter.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationParts<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub blood_type: Option<&'a str>,
}

/// Validated account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: UserName,
    pub email: EmailAddress,
    password: Zeroizing<String>,
    pub role: Role,
    pub blood_type: Option<BloodType>,
}

impl Registration {
    /// Validate every registration field.
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, CredentialsValidationError> {
        let name = UserName::new(parts.name)?;
        let email = EmailAddress::new(parts.email)?;
        if parts.password.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        let role = parts.role.trim().parse::<Role>()?;
        let blood_type = parts
            .blood_type
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<BloodType>()
                    .map_err(|_| CredentialsValidationError::UnknownBloodType(raw.to_owned()))
            })
            .transpose()?;

        Ok(Self {
            name,
            email,
            password: Zeroizing::new(parts.password.to_owned()),
            role,
            blood_type,
        })
    }

    /// Plain-text password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Encoded password hash as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash read from storage or produced by a hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Verified caller identity carried by an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Signed bearer token returned to clients.
#[derive(Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: User,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn parts() -> RegistrationParts<'static> {
        RegistrationParts {
            name: "Ada Lovelace",
            email: "ada@example.com",
            password: "secret1",
            role: "donor",
            blood_type: Some("o-"),
        }
    }

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("ada@example.com", "")]
    fn login_requires_both_fields(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, CredentialsValidationError::MissingCredentials);
    }

    #[rstest]
    fn registration_normalises_fields(parts: RegistrationParts<'static>) {
        let registration = Registration::try_from_parts(parts).expect("valid registration");
        assert_eq!(registration.role, Role::Donor);
        assert_eq!(registration.blood_type, Some(BloodType::ONegative));
        assert_eq!(registration.password(), "secret1");
    }

    #[rstest]
    fn registration_rejects_short_password(parts: RegistrationParts<'static>) {
        let err = Registration::try_from_parts(RegistrationParts {
            password: "12345",
            ..parts
        })
        .expect_err("short password");
        assert_eq!(
            err,
            CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN }
        );
    }

    #[rstest]
    fn registration_rejects_unknown_role(parts: RegistrationParts<'static>) {
        let err = Registration::try_from_parts(RegistrationParts {
            role: "nurse",
            ..parts
        })
        .expect_err("unknown role");
        assert_eq!(
            err,
            CredentialsValidationError::User(UserValidationError::UnknownRole)
        );
    }

    #[rstest]
    fn registration_rejects_unknown_blood_type(parts: RegistrationParts<'static>) {
        let err = Registration::try_from_parts(RegistrationParts {
            blood_type: Some("C+"),
            ..parts
        })
        .expect_err("unknown blood type");
        assert_eq!(
            err,
            CredentialsValidationError::UnknownBloodType("C+".to_owned())
        );
    }

    #[rstest]
    fn blank_blood_type_is_treated_as_absent(parts: RegistrationParts<'static>) {
        let registration = Registration::try_from_parts(RegistrationParts {
            blood_type: Some("  "),
            ..parts
        })
        .expect("valid registration");
        assert_eq!(registration.blood_type, None);
    }

    #[rstest]
    fn secrets_are_redacted_in_debug_output() {
        assert_eq!(format!("{:?}", PasswordHash::new("$argon2id$...")), "PasswordHash(..)");
        assert_eq!(format!("{:?}", AccessToken::new("abc.def")), "AccessToken(..)");
    }
}
