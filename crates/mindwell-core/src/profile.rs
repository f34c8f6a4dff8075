use tracing::error;

use mindwell_client::WellnessBackend;
use mindwell_types::User;

use crate::error::Result;
use crate::session::Session;

pub fn streak_label(days: u32) -> String {
    match days {
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    }
}

#[derive(Debug, Default)]
pub struct ProfileScreen {
    user: Option<User>,
}

impl ProfileScreen {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub async fn load<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<&User> {
        let user = backend
            .get_user(&session.user_id)
            .await
            .inspect_err(|e| error!("Failed to load profile: {}", e))?;
        Ok(self.user.insert(user))
    }

    pub fn badge(&self) -> Option<&'static str> {
        self.user.as_ref().filter(|u| u.is_pro).map(|_| "PRO")
    }
}
