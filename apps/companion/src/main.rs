use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use client_core::{NavigationParams, RecognitionError, Session, SpeechToText};
use shared::{
    domain::{Language, UserId},
    protocol::{AuthUser, ChatRole, SessionEvent, Toast},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod shell;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use shell::{parse_line, Line, HELP};

#[derive(Parser, Debug)]
#[command(name = "medime-companion", about = "Drive the companion session from a terminal")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    language: Option<Language>,
    /// Start signed out on the login screen.
    #[arg(long)]
    signed_out: bool,
}

/// A typed line standing in for one recognition result.
struct TypedTranscript(String);

#[async_trait]
impl SpeechToText for TypedTranscript {
    async fn listen(&self, _locale: &str) -> Result<String, RecognitionError> {
        if self.0.is_empty() {
            Err(RecognitionError::NoSpeech)
        } else {
            Ok(self.0.clone())
        }
    }
}

fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        let marker = if toast.is_destructive() { "!" } else { "*" };
        match &toast.description {
            Some(description) => println!("{marker} {} ({description})", toast.title),
            None => println!("{marker} {}", toast.title),
        }
    }
}

fn sign_in(session: &mut Session, user_id: &str, display_name: Option<String>) {
    let user = AuthUser {
        uid: UserId::from(user_id),
        display_name,
        email: None,
    };
    println!("signed in as {} [{}]", user.uid, user.initials());
    session.handle_auth_event(SessionEvent::SignedIn(user));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.config)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let mut session = Session::new(args.language.unwrap_or(settings.language));
    if !args.signed_out {
        sign_in(&mut session, &settings.user_id, settings.display_name.clone());
    }
    info!(language = session.language().code(), "companion session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("[{}] type :help for commands", session.visible_screen());

    while let Some(raw) = lines.next_line().await? {
        match parse_line(&raw) {
            Line::Transcript(text) => {
                let toasts = session.listen_once(&TypedTranscript(text)).await;
                print_toasts(&toasts);
                if let Some(message) = session.take_pending_chat_input() {
                    println!("chat> {message}");
                    session.push_chat_turn(ChatRole::User, message);
                }
            }
            Line::Go(screen) => session.navigate(screen, NavigationParams::new()),
            Line::Back => {
                if !session.back() {
                    println!("already at the first screen");
                }
            }
            Line::Login(name) => {
                let user_id = name
                    .as_deref()
                    .map(|n| n.to_ascii_lowercase().replace(' ', "-"))
                    .unwrap_or_else(|| settings.user_id.clone());
                sign_in(&mut session, &user_id, name.or_else(|| settings.display_name.clone()));
            }
            Line::Logout => session.handle_auth_event(SessionEvent::SignedOut),
            Line::ToggleLanguage => {
                let language = session.toggle_language();
                let direction = if language.is_rtl() { "rtl" } else { "ltr" };
                println!("language: {} ({direction})", language.code());
            }
            Line::State => println!("{}", serde_json::to_string_pretty(session.navigation())?),
            Line::Help => println!("{HELP}"),
            Line::Quit => break,
            Line::Invalid(reason) => println!("{reason}"),
        }
        println!("[{}]", session.visible_screen());
    }

    Ok(())
}
