//! Authentication primitives: usernames, session tokens and the payloads
//! sent to the signup, login and profile endpoints.
//!
//! Constructors validate raw string input before a service talks to the
//! story API, so adapters never see blank credentials.

use std::fmt;

use zeroize::Zeroizing;

/// Error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
    /// Display name was blank once trimmed.
    EmptyName,
    /// Session token was blank.
    EmptyToken,
    /// A profile update changed neither name nor password.
    EmptyProfileUpdate,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyToken => write!(f, "session token must not be empty"),
            Self::EmptyProfileUpdate => {
                write!(f, "profile update must change the name or the password")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Unique account identifier used in API paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LoginValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Opaque credential proving an authenticated user to the story API.
///
/// The value is zeroed on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a raw token string; blank tokens are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, LoginValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(LoginValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Raw token value for request bodies and query strings.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use snooze::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("hueter", "snooze").unwrap();
/// assert_eq!(creds.username().as_ref(), "hueter");
/// assert_eq!(creds.password(), "snooze");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account the credentials belong to.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Payload for creating a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    credentials: LoginCredentials,
    name: String,
}

impl SignupDetails {
    /// Validate signup input; the display name is trimmed.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, LoginValidationError> {
        let credentials = LoginCredentials::try_from_parts(username, password)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(LoginValidationError::EmptyName);
        }
        Ok(Self {
            credentials,
            name: name.to_owned(),
        })
    }

    /// Credentials for the new account.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Changes applied to the current user's profile.
///
/// At least one of name or password must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    password: Option<Zeroizing<String>>,
    name: Option<String>,
}

impl ProfileUpdate {
    /// Validate a profile update; blank values count as "unchanged".
    pub fn try_from_parts(
        password: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let password = password
            .filter(|value| !value.is_empty())
            .map(|value| Zeroizing::new(value.to_owned()));
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        if password.is_none() && name.is_none() {
            return Err(LoginValidationError::EmptyProfileUpdate);
        }
        Ok(Self { password, name })
    }

    /// New password, if the user is changing it.
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|value| value.as_str())
    }

    /// New display name, if the user is changing it.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
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
    #[case("  hueter  ", "secret")]
    #[case("alice", " padded password ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn signup_requires_a_name() {
        let err = SignupDetails::try_from_parts("alice", "pw", "  ").expect_err("blank name");
        assert_eq!(err, LoginValidationError::EmptyName);
    }

    #[rstest]
    fn signup_trims_the_name() {
        let details = SignupDetails::try_from_parts("alice", "pw", " Alice Liddell ")
            .expect("valid signup");
        assert_eq!(details.name(), "Alice Liddell");
        assert_eq!(details.credentials().username().as_ref(), "alice");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), Some("  "))]
    fn profile_update_needs_a_change(#[case] password: Option<&str>, #[case] name: Option<&str>) {
        let err = ProfileUpdate::try_from_parts(password, name).expect_err("no change");
        assert_eq!(err, LoginValidationError::EmptyProfileUpdate);
    }

    #[rstest]
    fn profile_update_keeps_only_supplied_fields() {
        let update = ProfileUpdate::try_from_parts(None, Some(" Bob ")).expect("name change");
        assert_eq!(update.name(), Some("Bob"));
        assert_eq!(update.password(), None);
    }

    #[rstest]
    fn session_tokens_are_redacted_in_debug_output() {
        let token = SessionToken::new("eyJhbGciOi.secret").expect("token");
        assert_eq!(token.expose(), "eyJhbGciOi.secret");
        assert!(!format!("{token:?}").contains("secret"));
    }

    #[rstest]
    fn blank_session_tokens_are_rejected() {
        assert_eq!(
            SessionToken::new(" ").expect_err("blank token"),
            LoginValidationError::EmptyToken
        );
    }
}
