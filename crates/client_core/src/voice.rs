//! Spoken-command dispatch.
//!
//! Transcripts come from an external speech-to-text capability. Matching is a
//! plain ordered substring check: the first rule with a matching pattern wins,
//! so rule order is part of the behavior.

use async_trait::async_trait;
use shared::domain::Screen;
use thiserror::Error;

use crate::i18n::{Phrase, Place};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRule {
    pub patterns: &'static [&'static str],
    pub target: Screen,
    pub notice: Phrase,
}

impl IntentRule {
    fn matches(&self, lower_transcript: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| lower_transcript.contains(pattern))
    }
}

const CHAT_EXIT_PATTERNS: &[&str] = &["exit", "go back"];

/// What a transcript asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutcome {
    Navigate { target: Screen, notice: Phrase },
    ForwardToChat(String),
    NotUnderstood,
}

#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<IntentRule>,
    chat_screen: Screen,
    chat_exit_target: Screen,
}

impl IntentMatcher {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self {
            rules,
            chat_screen: Screen::DoctorBot,
            chat_exit_target: Screen::Home,
        }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn resolve(&self, transcript: &str, current: Screen) -> VoiceOutcome {
        let lower = transcript.to_lowercase();

        if current == self.chat_screen {
            if CHAT_EXIT_PATTERNS
                .iter()
                .any(|pattern| lower.contains(pattern))
            {
                return VoiceOutcome::Navigate {
                    target: self.chat_exit_target,
                    notice: Phrase::NavigatingDashboard,
                };
            }
            return VoiceOutcome::ForwardToChat(transcript.to_string());
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| VoiceOutcome::Navigate {
                target: rule.target,
                notice: rule.notice.clone(),
            })
            .unwrap_or(VoiceOutcome::NotUnderstood)
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Navigation rules in tie-break order.
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule {
            patterns: &["go home", "dashboard"],
            target: Screen::Home,
            notice: Phrase::NavigatingDashboard,
        },
        IntentRule {
            patterns: &["schedule", "calendar"],
            target: Screen::CalendarView,
            notice: Phrase::OpeningSchedule,
        },
        IntentRule {
            patterns: &["medication"],
            target: Screen::MedicationManagerView,
            notice: Phrase::AccessingMedications,
        },
        IntentRule {
            patterns: &["family", "members"],
            target: Screen::FamilyList,
            notice: Phrase::NavigatingTo(Place::Family),
        },
        IntentRule {
            patterns: &["report"],
            target: Screen::ReportsListView,
            notice: Phrase::NavigatingTo(Place::MyReports),
        },
        IntentRule {
            patterns: &["doctor bot", "ai chat"],
            target: Screen::DoctorBot,
            notice: Phrase::OpeningDoctorBot,
        },
        IntentRule {
            patterns: &["add member"],
            target: Screen::AddMemberForm,
            notice: Phrase::OpeningAddMemberForm,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("microphone access not allowed")]
    NotAllowed,
    #[error("speech recognition unavailable")]
    Unsupported,
    #[error("speech recognition failed: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Maps recognizer error codes (`no-speech`, `not-allowed`, ...) onto variants.
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => RecognitionError::NoSpeech,
            "not-allowed" => RecognitionError::NotAllowed,
            other => RecognitionError::Other(other.to_string()),
        }
    }

    pub(crate) fn phrase(&self) -> Phrase {
        match self {
            RecognitionError::NoSpeech => Phrase::NoSpeechDetected,
            RecognitionError::NotAllowed => Phrase::MicrophoneAccessDenied,
            RecognitionError::Unsupported => Phrase::VoiceNotSupported,
            RecognitionError::Other(code) => Phrase::VoiceError(code.clone()),
        }
    }
}

/// One-shot speech recognition.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn listen(&self, locale: &str) -> Result<String, RecognitionError>;
}

pub struct MissingSpeechToText;

#[async_trait]
impl SpeechToText for MissingSpeechToText {
    async fn listen(&self, _locale: &str) -> Result<String, RecognitionError> {
        Err(RecognitionError::Unsupported)
    }
}

#[cfg(test)]
#[path = "tests/voice_tests.rs"]
mod tests;
