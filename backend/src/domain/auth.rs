//! Authentication primitives: registration and login payloads.
//!
//! Handlers build these from raw strings before talking to a port, so every
//! service sees already-normalised values.

use zeroize::Zeroizing;

use super::user::{Email, Role, UserValidationError, Username};

/// Validation failures for registration and login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error("password must not be blank")]
    EmptyPassword,
    #[error("{0}")]
    User(#[from] UserValidationError),
}

impl CredentialsValidationError {
    /// Request field the failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPassword => "password",
            Self::User(inner) => inner.field(),
        }
    }
}

fn password(raw: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if raw.trim().is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Validated login credentials.
///
/// The password keeps caller whitespace and is wiped on drop.
///
/// # Examples
/// ```
/// use petapedia::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Budi@Example.com", "hunter2").unwrap();
/// assert_eq!(creds.email().as_ref(), "budi@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password_raw: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: password(password_raw)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: Email,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate raw registration fields. A missing role means
    /// [`Role::Customer`].
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password_raw: &str,
        role: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let role = match role {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };
        Ok(Self {
            username: Username::new(username)?,
            email: Email::new(email)?,
            password: password(password_raw)?,
            role,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
