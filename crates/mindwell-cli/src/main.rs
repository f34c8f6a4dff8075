//! `mindwell`: drive the MindWell screens from a terminal.

mod commands;
mod recording;

use clap::{Parser, Subcommand};

use mindwell_client::{ApiClient, ClientConfig};
use mindwell_core::journal::JournalDraft;
use mindwell_core::support::SupportForm;
use mindwell_types::{Language, Mood, ProfessionType, ReportType, SupportChannel};

#[derive(Parser, Debug)]
#[command(name = "mindwell")]
#[command(about = "Command-line client for the MindWell wellness backend")]
struct Args {
    /// Backend base URL (overrides MINDWELL_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Reply language for the assistant (en or patois)
    #[arg(long)]
    language: Option<Language>,

    #[arg(short, long, env = "MINDWELL_USERNAME")]
    username: Option<String>,

    #[arg(short, long, env = "MINDWELL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        anonymous: bool,
    },
    /// Show the home greeting
    Greet,
    /// Log how you're feeling
    Mood {
        mood: Mood,
        #[arg(long)]
        note: Option<String>,
    },
    /// Summarise recent moods
    MoodHistory {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// List joined and recommended communities
    Communities,
    /// Start a new community and join it
    CreateCommunity {
        name: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        description: String,
    },
    Join {
        community_id: String,
    },
    Leave {
        community_id: String,
    },
    /// Show a community conversation, optionally posting a message first
    Chat {
        community_id: String,
        message: Option<String>,
    },
    /// Show a direct conversation, optionally sending a message first
    Dm {
        user_id: String,
        message: Option<String>,
    },
    /// Talk to the assistant; each message is sent in turn
    Ask {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Transcribe a recorded audio file and send it to the assistant
    Voice {
        file: std::path::PathBuf,
    },
    /// List emergency hotlines
    Hotlines,
    /// Print the dial link for a hotline
    Call {
        card_id: String,
        #[arg(long)]
        yes: bool,
    },
    /// File a safety report
    Report {
        description: String,
        #[arg(long = "type", default_value = "domestic")]
        report_type: ReportType,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        anonymous: bool,
    },
    Profile,
    /// List your journal entries, newest first
    Journal {
        /// Keep fetching pages until every entry is shown
        #[arg(long)]
        all: bool,
    },
    /// Write a journal entry
    JournalWrite {
        content: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        mood: Option<Mood>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Share the entry instead of keeping it private
        #[arg(long)]
        public: bool,
    },
    JournalDelete {
        entry_id: String,
    },
    /// Suggest something to write about
    Prompts {
        #[arg(long)]
        mood: Option<Mood>,
    },
    /// List professionals who can help
    Professionals {
        #[arg(long)]
        profession: Option<ProfessionType>,
    },
    /// Ask a professional to get in touch
    RequestSupport {
        professional_id: String,
        #[arg(long, default_value = "chat")]
        channel: SupportChannel,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        emergency: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindwell=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let env = ClientConfig::from_env()?;
    let config = ClientConfig::new(
        args.api_url.unwrap_or(env.base_url),
        env.timeout,
        args.language.unwrap_or(env.language),
    )?;
    let client = ApiClient::new(&config)?;
    tracing::debug!("Using backend at {}", client.base_url());

    let credentials = commands::Credentials {
        username: args.username,
        password: args.password,
    };
    let mut app = commands::App::new(client, credentials, config.language);

    match args.command {
        Command::Register {
            email,
            display_name,
            anonymous,
        } => app.register(email, display_name, anonymous).await,
        Command::Greet => app.greet().await,
        Command::Mood { mood, note } => app.mood(mood, note).await,
        Command::MoodHistory { days } => app.mood_history(days).await,
        Command::Communities => app.communities().await,
        Command::CreateCommunity {
            name,
            topic,
            description,
        } => app.create_community(&name, &topic, &description).await,
        Command::Join { community_id } => app.join(&community_id).await,
        Command::Leave { community_id } => app.leave(&community_id).await,
        Command::Chat {
            community_id,
            message,
        } => app.community_chat(community_id, message.as_deref()).await,
        Command::Dm { user_id, message } => app.direct_chat(user_id, message.as_deref()).await,
        Command::Ask { messages } => app.ask(&messages).await,
        Command::Voice { file } => app.voice(file).await,
        Command::Hotlines => {
            app.hotlines();
            Ok(())
        }
        Command::Call { card_id, yes } => app.call(&card_id, yes),
        Command::Report {
            description,
            report_type,
            location,
            anonymous,
        } => {
            app.report(description, report_type, location, anonymous)
                .await
        }
        Command::Profile => app.profile().await,
        Command::Journal { all } => app.journal(all).await,
        Command::JournalWrite {
            content,
            title,
            mood,
            tags,
            public,
        } => {
            let draft = JournalDraft {
                title: title.unwrap_or_default(),
                content,
                mood,
                tags,
                is_private: !public,
            };
            app.journal_write(draft).await
        }
        Command::JournalDelete { entry_id } => app.journal_delete(&entry_id).await,
        Command::Prompts { mood } => app.prompts(mood).await,
        Command::Professionals { profession } => app.professionals(profession).await,
        Command::RequestSupport {
            professional_id,
            channel,
            notes,
            emergency,
        } => {
            let form = SupportForm {
                channel,
                notes: notes.unwrap_or_default(),
                emergency,
                preferred_time: None,
            };
            app.request_support(&professional_id, form).await
        }
    }
}
