use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use tracing::info;

use mindwell_client::ApiClient;
use mindwell_core::auth::{LoginForm, LoginScreen, RegisterForm, RegisterScreen};
use mindwell_core::community::{ChatRoom, ChatTarget, CommunityScreen};
use mindwell_core::home::{MoodPicker, current_greeting, mood_summary};
use mindwell_core::journal::{JournalDraft, JournalScreen};
use mindwell_core::profile::{ProfileScreen, streak_label};
use mindwell_core::report::{CardAction, CardOutcome, ReportForm, SafeReportScreen};
use mindwell_core::support::{SupportForm, SupportScreen};
use mindwell_core::therapist::TherapistChat;
use mindwell_core::voice::VoiceInput;
use mindwell_core::{Alert, BottomNav, CoreError, Route, Router, Session, Tab};
use mindwell_types::{
    ChatTurn, Community, JournalEntry, Language, Message, Mood, ProfessionType, Professional,
    ReportType, Speaker,
};

use crate::recording::FileRecording;

pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct App {
    client: ApiClient,
    credentials: Credentials,
    language: Language,
    router: Router,
    session: Option<Session>,
}

/// Turn a screen error into the text its dialog would show.
fn fail(err: CoreError) -> anyhow::Error {
    let alert = Alert::from_error(&err);
    anyhow!("{}: {}", alert.title, alert.message)
}

fn show(alert: &Alert) {
    println!("{}", alert.title);
    println!("  {}", alert.message);
}

impl App {
    pub fn new(client: ApiClient, credentials: Credentials, language: Language) -> Self {
        Self {
            client,
            credentials,
            language,
            router: Router::default(),
            session: None,
        }
    }

    async fn sign_in(&mut self) -> anyhow::Result<Session> {
        if let Some(session) = &self.session {
            return Ok(session.clone());
        }
        let (Some(username), Some(password)) = (
            self.credentials.username.clone(),
            self.credentials.password.clone(),
        ) else {
            bail!(
                "this command needs --username and --password \
                 (or MINDWELL_USERNAME/MINDWELL_PASSWORD)"
            );
        };

        let mut screen = LoginScreen {
            form: LoginForm { username, password },
        };
        let session = screen
            .submit(&self.client, &mut self.router)
            .await
            .map_err(fail)?;
        self.session = Some(session.clone());
        Ok(session)
    }

    fn print_nav(&self) {
        if !BottomNav::visible(&self.router) {
            return;
        }
        let bar: Vec<String> = BottomNav::items(&self.router)
            .into_iter()
            .map(|item| {
                if item.active {
                    format!("[{} {}]", item.tab.icon(), item.tab.label())
                } else {
                    format!(" {} {} ", item.tab.icon(), item.tab.label())
                }
            })
            .collect();
        println!("{}", bar.join(" "));
    }

    pub async fn register(
        &mut self,
        email: String,
        display_name: Option<String>,
        anonymous: bool,
    ) -> anyhow::Result<()> {
        let username = self
            .credentials
            .username
            .clone()
            .context("--username is required to register")?;
        let password = self
            .credentials
            .password
            .clone()
            .context("--password is required to register")?;

        let mut screen = RegisterScreen {
            form: RegisterForm {
                username,
                email,
                confirm_password: password.clone(),
                password,
                display_name: display_name.unwrap_or_default(),
                anonymous_mode: anonymous,
                language: self.language,
            },
        };
        let session = screen
            .submit(&self.client, &mut self.router)
            .await
            .map_err(fail)?;
        println!("Welcome to MindWell, {}!", session.name());
        self.session = Some(session);
        Ok(())
    }

    pub async fn greet(&mut self) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        self.print_nav();
        println!("{}", current_greeting(Some(session.name())));
        println!("How are you feeling today?");
        for mood in Mood::ALL {
            println!("  {} {:<8} ({})", mood.emoji(), mood.label(), mood.as_str());
        }
        Ok(())
    }

    pub async fn mood(&mut self, mood: Mood, note: Option<String>) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let mut picker = MoodPicker::default();
        picker.select(mood);
        let alert = picker
            .submit(&self.client, &session, note)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn mood_history(&mut self, days: u32) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let summary = mood_summary(&self.client, &session, days)
            .await
            .map_err(fail)?;
        println!("Last {} days: {} check-ins", days, summary.total);
        println!(
            "Wellness score: {:.1}% ({} positive)",
            summary.wellness_score, summary.positive
        );
        if let Some(mood) = summary.most_common {
            println!("Most common mood: {}", mood);
        }
        Ok(())
    }

    async fn load_communities(&mut self) -> anyhow::Result<CommunityScreen> {
        self.sign_in().await?;
        self.router.select_tab(Tab::Community);
        let mut screen = CommunityScreen::default();
        screen.load(&self.client).await.map_err(fail)?;
        Ok(screen)
    }

    pub async fn communities(&mut self) -> anyhow::Result<()> {
        let screen = self.load_communities().await?;
        self.print_nav();
        print_communities("My communities", screen.my_communities());
        print_communities("Recommended", screen.recommended());
        Ok(())
    }

    pub async fn create_community(
        &mut self,
        name: &str,
        topic: &str,
        description: &str,
    ) -> anyhow::Result<()> {
        let mut screen = self.load_communities().await?;
        let alert = screen
            .create(&self.client, name, topic, description)
            .await
            .map_err(fail)?;
        show(&alert);
        print_communities("My communities", screen.my_communities());
        Ok(())
    }

    pub async fn join(&mut self, community_id: &str) -> anyhow::Result<()> {
        let mut screen = self.load_communities().await?;
        let session = self.sign_in().await?;
        let alert = screen
            .join(&self.client, &session, community_id)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn leave(&mut self, community_id: &str) -> anyhow::Result<()> {
        let mut screen = self.load_communities().await?;
        let session = self.sign_in().await?;
        let alert = screen
            .leave(&self.client, &session, community_id)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn community_chat(
        &mut self,
        community_id: String,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        self.sign_in().await?;
        self.router.select_tab(Tab::Community);
        self.router.push(Route::CommunityChat {
            community_id: community_id.clone(),
        });
        self.chat(ChatTarget::Community(community_id), message).await
    }

    pub async fn direct_chat(
        &mut self,
        user_id: String,
        message: Option<&str>,
    ) -> anyhow::Result<()> {
        self.chat(ChatTarget::Direct(user_id), message).await
    }

    async fn chat(&mut self, target: ChatTarget, message: Option<&str>) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let mut room = ChatRoom::new(target);
        room.open(&self.client).await.map_err(fail)?;
        if let Some(text) = message {
            room.send(&self.client, &session, text)
                .await
                .map_err(fail)?;
        }
        for m in room.messages() {
            print_message(m, &session);
        }
        if room.messages().is_empty() {
            println!("No messages yet. Say hello!");
        }
        Ok(())
    }

    pub async fn ask(&mut self, messages: &[String]) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        self.router.select_tab(Tab::Therapist);
        let mut chat = TherapistChat::new(self.language);
        for text in messages {
            chat.send(&self.client, &session, text)
                .await
                .map_err(fail)?;
        }
        print_therapist(&chat);
        Ok(())
    }

    pub async fn voice(&mut self, file: PathBuf) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        self.router.select_tab(Tab::Therapist);
        let mut chat = TherapistChat::new(self.language);
        let mut input = VoiceInput::new(FileRecording::new(file));

        chat.toggle_recording(&self.client, &mut input)
            .await
            .map_err(fail)?;
        let heard = chat
            .toggle_recording(&self.client, &mut input)
            .await
            .map_err(fail)?
            .unwrap_or_default();
        info!("Transcribed {} characters", heard.len());
        println!("Heard: {}", heard);

        chat.send_draft(&self.client, &session)
            .await
            .map_err(fail)?;
        print_therapist(&chat);
        Ok(())
    }

    pub fn hotlines(&mut self) {
        self.router.select_tab(Tab::SafeReport);
        let screen = SafeReportScreen::default();
        for card in screen.cards() {
            let action = match card.action {
                CardAction::Call { number } => number.to_string(),
                CardAction::Report => "mindwell report".to_string(),
            };
            println!("{:<20} {}", card.id, card.title);
            println!("{:<20} {} ({})", "", card.description, action);
        }
    }

    pub fn call(&mut self, card_id: &str, confirmed: bool) -> anyhow::Result<()> {
        let mut screen = SafeReportScreen::default();
        match screen.tap(card_id) {
            None => bail!("unknown hotline '{}', see `mindwell hotlines`", card_id),
            Some(CardOutcome::FormOpened) => {
                println!("Use `mindwell report <description>` to file a report.");
            }
            Some(CardOutcome::ConfirmCall(alert)) => {
                show(&alert);
                if confirmed {
                    if let Some(intent) = screen.confirm_call() {
                        println!("{}", intent.uri);
                    }
                } else {
                    screen.cancel_call();
                    println!("Re-run with --yes to dial.");
                }
            }
        }
        Ok(())
    }

    /// Anonymous reports are filed without signing in.
    pub async fn report(
        &mut self,
        description: String,
        report_type: ReportType,
        location: Option<String>,
        anonymous: bool,
    ) -> anyhow::Result<()> {
        let session = if anonymous {
            None
        } else {
            Some(self.sign_in().await?)
        };
        let mut screen = SafeReportScreen::default();
        screen.tap("report");
        screen.form = ReportForm {
            description,
            location: location.unwrap_or_default(),
            anonymous,
            report_type,
        };
        let alert = screen
            .submit(&self.client, session.as_ref())
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn profile(&mut self) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        self.router.select_tab(Tab::Profile);
        let mut screen = ProfileScreen::default();
        let user = screen
            .load(&self.client, &session)
            .await
            .map_err(fail)?;
        println!("{} (@{})", user.name(), user.username);
        if let Some(email) = &user.email {
            println!("  {}", email);
        }
        println!("  Streak: {}", streak_label(user.streak));
        if let Some(badge) = screen.badge() {
            println!("  {}", badge);
        }
        Ok(())
    }

    pub async fn journal(&mut self, all: bool) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let mut screen = JournalScreen::default();
        screen.load(&self.client, &session).await.map_err(fail)?;
        while all && screen.has_more() {
            let added = screen
                .load_more(&self.client, &session)
                .await
                .map_err(fail)?;
            if added == 0 {
                break;
            }
        }
        if screen.entries().is_empty() {
            println!("Your journal is empty. Try `mindwell prompts` for ideas.");
        }
        for entry in screen.entries() {
            print_entry(entry);
        }
        if screen.has_more() {
            println!(
                "Showing {} of {}; use --all for the rest.",
                screen.entries().len(),
                screen.total()
            );
        }
        Ok(())
    }

    pub async fn journal_write(&mut self, draft: JournalDraft) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let mut screen = JournalScreen::default();
        screen.draft = draft;
        let alert = screen
            .save(&self.client, &session, self.language)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn journal_delete(&mut self, entry_id: &str) -> anyhow::Result<()> {
        self.sign_in().await?;
        let mut screen = JournalScreen::default();
        let alert = screen
            .delete(&self.client, entry_id)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }

    pub async fn prompts(&mut self, mood: Option<Mood>) -> anyhow::Result<()> {
        self.sign_in().await?;
        let mut screen = JournalScreen::default();
        let prompts = screen
            .load_prompts(&self.client, mood, self.language)
            .await
            .map_err(fail)?;
        for prompt in prompts {
            println!("  - {}", prompt);
        }
        Ok(())
    }

    pub async fn professionals(
        &mut self,
        profession: Option<ProfessionType>,
    ) -> anyhow::Result<()> {
        self.sign_in().await?;
        let mut screen = SupportScreen::default();
        screen
            .load(&self.client, profession)
            .await
            .map_err(fail)?;
        if screen.professionals().is_empty() {
            println!("No professionals listed right now.");
        }
        for p in screen.professionals() {
            print_professional(p);
        }
        Ok(())
    }

    pub async fn request_support(
        &mut self,
        professional_id: &str,
        form: SupportForm,
    ) -> anyhow::Result<()> {
        let session = self.sign_in().await?;
        let mut screen = SupportScreen::default();
        screen.load(&self.client, None).await.map_err(fail)?;
        if !screen.select(professional_id) {
            bail!(
                "unknown professional '{}', see `mindwell professionals`",
                professional_id
            );
        }
        screen.form = form;
        let alert = screen
            .request(&self.client, &session)
            .await
            .map_err(fail)?;
        show(&alert);
        Ok(())
    }
}

fn print_entry(entry: &JournalEntry) {
    let mood = entry.mood.map(|m| format!(" {}", m.emoji())).unwrap_or_default();
    let title = entry.title.as_deref().unwrap_or("Untitled");
    println!(
        "{:<12} {} {}{}",
        entry.id,
        entry.created_at.format("%Y-%m-%d"),
        title,
        mood
    );
    let preview: String = entry.content.chars().take(72).collect();
    println!("{:<12} {}", "", preview);
}

fn print_professional(p: &Professional) {
    let badge = if p.verified { " (verified)" } else { "" };
    println!("  {:<12} {}{}, {}", p.id, p.name, badge, p.profession.label());
    if !p.credentials.is_empty() {
        println!("  {:<12} {}", "", p.credentials);
    }
}

fn print_communities(heading: &str, list: &[Community]) {
    println!("{}", heading);
    if list.is_empty() {
        println!("  (none)");
    }
    for c in list {
        let unread = if c.unread_count > 0 {
            format!(", {} unread", c.unread_count)
        } else {
            String::new()
        };
        println!("  {:<12} {} ({} members{})", c.id, c.name, c.member_count, unread);
    }
}

fn print_message(m: &Message, session: &Session) {
    let who = if m.sender_id == session.user_id {
        "you"
    } else {
        m.sender_id.as_str()
    };
    println!("[{}] {}: {}", m.timestamp.format("%H:%M"), who, m.content);
}

fn print_turn(turn: &ChatTurn) {
    let who = match turn.speaker {
        Speaker::User => "You",
        Speaker::Bot => "MindWell",
    };
    println!("{}: {}", who, turn.text);
}

fn print_therapist(chat: &TherapistChat) {
    for turn in chat.transcript() {
        print_turn(turn);
    }
    if let Some(support) = chat.support_message() {
        println!();
        println!("{}", support);
    }
    if !chat.suggestions().is_empty() {
        println!();
        println!("Try asking:");
        for s in chat.suggestions() {
            println!("  - {}", s);
        }
    }
}
