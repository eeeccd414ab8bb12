//! Tether application binary - composition root.
//!
//! Ties the conversation core together into a runnable walkthrough:
//! 1. Load configuration from TOML
//! 2. Open a session for the owner (the login gate)
//! 3. Import the history CSV if one exists
//! 4. Run the chat flows: contacts, drafts with emoji, voice input,
//!    an assistant exchange
//! 5. Export the updated history next to the original
//!
//! The real view layer is a web UI; this binary stands in for it and uses
//! the mock collaborator services, so it runs without any external endpoint.

mod cli;

use clap::Parser;

use tether_assist::{ApiKey, Assistant, MockCompletion};
use tether_core::config::TetherConfig;
use tether_core::emoji::EmojiCatalog;
use tether_speech::{AudioClip, AudioSource, MockTranscriber, Transcriber};
use tether_store::{Session, StoreError};

use cli::CliArgs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first so its log level can seed tracing.
    let config_file = args.resolve_config_path();
    let config = TetherConfig::load_or_default(&config_file);

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Tether v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    // Login.
    let mut session = Session::new(args.owner.clone())?;
    println!("Logged in as: {}", session.owner());

    // History import.
    let history_path = args.resolve_history_path(&config.history.csv_path);
    if history_path.exists() {
        let bytes = std::fs::read(&history_path)?;
        match session.import_history(&bytes) {
            Ok(count) => println!("Loaded {count} messages from {}", history_path.display()),
            Err(e) => tracing::warn!(error = %e, "History import failed; starting empty"),
        }
    } else {
        tracing::info!(path = %history_path.display(), "No history file; starting empty");
    }

    // Contacts.
    match session.add_contact("Emily", "wife", "family") {
        Ok(contact) => println!("Added contact: {} ({})", contact.name, contact.subtag),
        Err(StoreError::DuplicateContact(name)) => {
            tracing::debug!(name, "Contact already known from history");
        }
        Err(e) => return Err(e.into()),
    }
    for contact in session.contacts("family") {
        println!("Family contact: {} ({})", contact.name, contact.subtag);
    }

    // Compose a draft with an emoji and send it.
    let catalog = EmojiCatalog::builtin();
    let owner = session.owner().to_string();
    session.draft_mut().append_text("thinking of you ");
    session.draft_mut().append_emoji(&catalog, "heart");
    session.send_draft("Emily", "family", &owner)?;

    // Voice input feeds the next draft.
    if config.speech.enabled {
        let transcriber = MockTranscriber::new("see you at dinner tonight");
        let clip = AudioClip::new(AudioSource::Local, vec![0u8; 1024], &config.speech)?;
        match transcriber.transcribe(&clip) {
            Ok(text) => {
                session.draft_mut().append_text(&text);
                session.send_draft("Emily", "family", &owner)?;
            }
            Err(e) => tracing::warn!(error = %e, "Voice input unavailable"),
        }
    }

    // One assistant exchange on the owner's behalf. The token comes from a
    // user-supplied file, with an env fallback for local runs against the
    // mock endpoint.
    let key_text = match &args.api_key_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::env::var("TETHER_API_KEY").unwrap_or_else(|_| "local-dev-token".to_string()),
    };
    let assistant = Assistant::new(
        MockCompletion::new("\"doing okay today, love\""),
        ApiKey::from_text(&key_text)?,
        &config.assist,
    )?;
    assistant.exchange(&mut session, "Emily", "family", "how are you feeling?")?;

    // Render the thread the way the chat views do.
    println!("--- Thread with Emily ---");
    for record in session.thread("Emily") {
        println!("{} ({}): {}", record.sender, record.timestamp, record.message);
    }

    // Export next to the original history file.
    let bytes = session.export_history()?;
    let file_name = history_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "chat_history.csv".to_string());
    let export_path = history_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."))
        .join(tether_transfer::updated_file_name(&file_name));
    std::fs::write(&export_path, bytes)?;
    println!("History exported to {}", export_path.display());

    Ok(())
}
