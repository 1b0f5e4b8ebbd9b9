//! # Session Gate
//!
//! The login overlay shown at startup. It blocks every directory and composer
//! action until a login succeeds, then closes for good.
//!
//! Only the phone method checks its input (non-blank). Email and Google close
//! the gate unconditionally. Nothing is verified or stored.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    Phone,
    Email,
    Google,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 3] = [AuthMethod::Phone, AuthMethod::Email, AuthMethod::Google];

    pub fn label(&self) -> &'static str {
        match self {
            AuthMethod::Phone => "Телефон",
            AuthMethod::Email => "Email",
            AuthMethod::Google => "Google",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AuthMethod::Phone => 0,
            AuthMethod::Email => 1,
            AuthMethod::Google => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether this method shows a text field.
    pub fn has_field(&self) -> bool {
        !matches!(self, AuthMethod::Google)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Введите номер телефона")]
    EmptyPhone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    open: bool,
    method: AuthMethod,
    error: Option<LoginError>,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    pub fn new() -> Self {
        Self {
            open: true,
            method: AuthMethod::default(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn method(&self) -> AuthMethod {
        self.method
    }

    /// Last validation failure, cleared when the method changes.
    pub fn error(&self) -> Option<&LoginError> {
        self.error.as_ref()
    }

    pub fn select_method(&mut self, method: AuthMethod) {
        if self.method != method {
            self.method = method;
            self.error = None;
        }
    }

    /// Attempt login with the text of the active method's field.
    ///
    /// `Ok(true)` closes the gate; `Ok(false)` means it was already closed.
    pub fn login(&mut self, credential: &str) -> Result<bool, LoginError> {
        if !self.open {
            return Ok(false);
        }
        if self.method == AuthMethod::Phone && credential.trim().is_empty() {
            self.error = Some(LoginError::EmptyPhone);
            return Err(LoginError::EmptyPhone);
        }
        self.open = false;
        self.error = None;
        Ok(true)
    }
}
