use std::sync::LazyLock;

use regex::Regex;
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::Language;
use mindwell_types::api::{LoginRequest, RegisterRequest};

use crate::error::{Result, ValidationError};
use crate::navigation::{Route, Router, Tab};
use crate::session::Session;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("static regex")
});

// -- Login --

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> std::result::Result<LoginRequest, ValidationError> {
        let mut errors = ValidationError::default();
        let username = self.username.trim();
        if username.is_empty() {
            errors.push("username", "Username is required");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.finish(LoginRequest {
            username: username.to_lowercase(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub form: LoginForm,
}

impl LoginScreen {
    /// Validate, authenticate and move to the home tab.
    pub async fn submit<B: WellnessBackend>(
        &mut self,
        backend: &B,
        router: &mut Router,
    ) -> Result<Session> {
        let req = self.form.validate().inspect_err(|e| {
            warn!("Login form rejected: {}", e);
        })?;

        let resp = backend.login(&req).await.inspect_err(|e| {
            error!("Login failed: {}", e);
        })?;

        let session = Session::from(resp);
        info!("Signed in {}", session.user_id);
        self.form.password.clear();
        router.reset(Route::Tab(Tab::Home));
        Ok(session)
    }
}

// -- Create account --

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub display_name: String,
    pub anonymous_mode: bool,
    pub language: Language,
}

impl RegisterForm {
    pub fn validate(&self) -> std::result::Result<RegisterRequest, ValidationError> {
        let mut errors = ValidationError::default();

        let username = self.username.trim();
        let username_len = username.chars().count();
        if username.is_empty() {
            errors.push("username", "Username is required");
        } else if username_len < USERNAME_MIN {
            errors.push(
                "username",
                format!("Username must be at least {} characters", USERNAME_MIN),
            );
        } else if username_len > USERNAME_MAX {
            errors.push(
                "username",
                format!("Username must be at most {} characters", USERNAME_MAX),
            );
        } else if !USERNAME_RE.is_match(username) {
            errors.push(
                "username",
                "Username can only contain letters, numbers, and underscores",
            );
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.push("email", "Enter a valid email address");
        }

        for problem in password_problems(&self.password) {
            errors.push("password", problem);
        }

        if self.confirm_password != self.password {
            errors.push("confirm_password", "Passwords do not match");
        }

        let display_name = self.display_name.trim();
        errors.finish(RegisterRequest {
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            password: self.password.clone(),
            display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
            anonymous_mode: self.anonymous_mode,
            language_preference: self.language,
        })
    }
}

/// Password strength rules, matching what the backend enforces.
pub fn password_problems(password: &str) -> Vec<String> {
    if password.is_empty() {
        return vec!["Password is required".to_string()];
    }
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN {
        problems.push(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one number".to_string());
    }
    problems
}

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub form: RegisterForm,
}

impl RegisterScreen {
    /// Create the account. The backend signs the new user in straight away.
    pub async fn submit<B: WellnessBackend>(
        &mut self,
        backend: &B,
        router: &mut Router,
    ) -> Result<Session> {
        let req = self.form.validate().inspect_err(|e| {
            warn!("Registration form rejected: {}", e);
        })?;

        let resp = backend.register(&req).await.inspect_err(|e| {
            error!("Registration failed: {}", e);
        })?;

        let session = Session::from(resp);
        info!("Created account {}", session.user_id);
        self.form.password.clear();
        self.form.confirm_password.clear();
        router.reset(Route::Tab(Tab::Home));
        Ok(session)
    }
}

/// Forget the session and return to the login screen.
pub fn logout<B: WellnessBackend>(backend: &B, router: &mut Router, session: &mut Option<Session>) {
    if let Some(s) = session.take() {
        info!("Signed out {}", s.user_id);
    }
    backend.logout();
    router.reset(Route::Login);
}
