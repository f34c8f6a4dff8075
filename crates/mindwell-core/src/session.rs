use mindwell_types::api::AuthResponse;

/// The signed-in user, held in memory for the lifetime of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl Session {
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user_id: resp.user_id,
            username: resp.username,
            display_name: resp.display_name,
        }
    }
}
