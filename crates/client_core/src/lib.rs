use chrono::Utc;
use serde::Serialize;
use shared::{
    domain::{Language, Screen},
    protocol::{AuthUser, ChatRole, ChatTurn, Insurance, OrderDetails, SessionEvent, Toast},
};
use tracing::{debug, info, warn};

pub mod i18n;
pub mod navigation;
pub mod voice;

pub use navigation::{
    NavigationError, NavigationParams, NavigationStore, ScreenTicket, SelectionContext,
};
pub use voice::{IntentMatcher, RecognitionError, SpeechToText, VoiceOutcome};

use i18n::Phrase;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatLog {
    turns: Vec<ChatTurn>,
    pending_input: Option<String>,
}

impl ChatLog {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn pending_input(&self) -> Option<&str> {
        self.pending_input.as_deref()
    }
}

/// Per-user application state handed to every screen handler.
///
/// Owns the navigation store; sign-in and sign-out start it over.
#[derive(Debug, Clone)]
pub struct Session {
    navigation: NavigationStore,
    matcher: IntentMatcher,
    user: Option<AuthUser>,
    language: Language,
    voice_active: bool,
    chat: ChatLog,
    bot_loading: bool,
    refill_cart: Vec<String>,
    last_order: Option<OrderDetails>,
    saved_insurance: Option<Insurance>,
    use_saved_insurance: bool,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self::with_matcher(language, IntentMatcher::default())
    }

    pub fn with_matcher(language: Language, matcher: IntentMatcher) -> Self {
        Self {
            navigation: NavigationStore::new(Screen::LoginView),
            matcher,
            user: None,
            language,
            voice_active: false,
            chat: ChatLog::default(),
            bot_loading: false,
            refill_cart: Vec::new(),
            last_order: None,
            saved_insurance: None,
            use_saved_insurance: true,
        }
    }

    pub fn navigation(&self) -> &NavigationStore {
        &self.navigation
    }

    pub fn current_screen(&self) -> Screen {
        self.navigation.current_screen()
    }

    pub fn selection(&self) -> &SelectionContext {
        self.navigation.selection()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn navigate(&mut self, screen: Screen, params: NavigationParams) {
        self.navigation.navigate(screen, params);
    }

    pub fn back(&mut self) -> bool {
        self.navigation.back()
    }

    pub fn update_selection(&mut self, params: NavigationParams) {
        self.navigation.update_selection(params);
    }

    pub fn handle_auth_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SignedIn(user) => {
                info!(uid = %user.uid, "signed in");
                self.user = Some(user);
                self.start_over(Screen::Home);
            }
            SessionEvent::SignedOut => {
                if let Some(user) = self.user.take() {
                    info!(uid = %user.uid, "signed out");
                }
                self.voice_active = false;
                self.start_over(Screen::LoginView);
            }
        }
    }

    fn start_over(&mut self, root: Screen) {
        self.navigation.reset_to(root);
        self.navigation.clear_selection();
        self.chat = ChatLog::default();
        self.bot_loading = false;
        self.refill_cart.clear();
        self.last_order = None;
        self.saved_insurance = None;
        self.use_saved_insurance = true;
    }

    /// The screen that actually renders, after the sign-in guard.
    pub fn visible_screen(&self) -> Screen {
        let current = self.current_screen();
        if self.is_signed_in() {
            return current;
        }
        if current.is_public() {
            current
        } else {
            Screen::LoginView
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    pub fn toast(&self, phrase: &Phrase) -> Toast {
        Toast::info(phrase.render(self.language))
    }

    pub fn is_voice_active(&self) -> bool {
        self.voice_active
    }

    pub fn start_voice_assistant(&mut self) {
        self.voice_active = true;
    }

    pub fn stop_voice_assistant(&mut self) {
        self.voice_active = false;
    }

    pub fn toggle_voice_assistant(&mut self) -> bool {
        self.voice_active = !self.voice_active;
        self.voice_active
    }

    /// Applies one transcript and returns the notices to display, in order.
    pub fn handle_transcript(&mut self, transcript: &str) -> Vec<Toast> {
        let mut toasts = vec![self.toast(&Phrase::CommandEcho(transcript.to_string()))];
        let outcome = self.matcher.resolve(transcript, self.current_screen());
        debug!(screen = %self.current_screen(), ?outcome, "voice command resolved");

        match outcome {
            VoiceOutcome::Navigate { target, notice } => {
                toasts.push(self.toast(&notice));
                self.navigation.navigate(target, NavigationParams::new());
            }
            VoiceOutcome::ForwardToChat(text) => {
                self.chat.pending_input = Some(text);
            }
            VoiceOutcome::NotUnderstood => {
                toasts.push(
                    Toast::destructive(Phrase::CommandNotUnderstood.render(self.language))
                        .with_description(Phrase::TryGoHomeOrShowSchedule.render(self.language)),
                );
            }
        }
        toasts
    }

    pub fn handle_recognition_error(&mut self, error: &RecognitionError) -> Toast {
        warn!(%error, "speech recognition error");
        self.voice_active = false;
        Toast::destructive(error.phrase().render(self.language))
    }

    /// Listens for a single command and applies it.
    pub async fn listen_once(&mut self, recognizer: &dyn SpeechToText) -> Vec<Toast> {
        self.start_voice_assistant();
        let heard = recognizer.listen(self.language.speech_locale()).await;
        self.stop_voice_assistant();
        match heard {
            Ok(transcript) => self.handle_transcript(&transcript),
            Err(error) => vec![self.handle_recognition_error(&error)],
        }
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn chat_turns(&self) -> &[ChatTurn] {
        self.chat.turns()
    }

    /// Hands a voice-forwarded message to the chat screen, at most once.
    pub fn take_pending_chat_input(&mut self) -> Option<String> {
        self.chat.pending_input.take()
    }

    pub fn push_chat_turn(&mut self, role: ChatRole, text: impl Into<String>) {
        self.chat.turns.push(ChatTurn {
            role,
            text: text.into(),
            sent_at: Utc::now(),
        });
    }

    pub fn is_bot_loading(&self) -> bool {
        self.bot_loading
    }

    pub fn set_bot_loading(&mut self, loading: bool) {
        self.bot_loading = loading;
    }

    pub fn cart(&self) -> &[String] {
        &self.refill_cart
    }

    /// Returns `false` when the medication is already in the cart.
    pub fn add_to_cart(&mut self, medication: impl Into<String>) -> bool {
        let medication = medication.into();
        if self.refill_cart.contains(&medication) {
            return false;
        }
        self.refill_cart.push(medication);
        true
    }

    pub fn remove_from_cart(&mut self, medication: &str) -> bool {
        let before = self.refill_cart.len();
        self.refill_cart.retain(|item| item != medication);
        self.refill_cart.len() != before
    }

    pub fn clear_cart(&mut self) {
        self.refill_cart.clear();
    }

    pub fn last_order(&self) -> Option<&OrderDetails> {
        self.last_order.as_ref()
    }

    /// Stores a placed order, then empties the cart and the pharmacy choice.
    pub fn record_order(&mut self, order: OrderDetails) {
        info!(
            order_number = order.order_number,
            items = order.medications.len(),
            "refill order placed"
        );
        self.last_order = Some(order);
        self.refill_cart.clear();
        self.navigation
            .update_selection(NavigationParams::new().clear_selected_pharmacy());
    }

    pub fn saved_insurance(&self) -> Option<&Insurance> {
        self.saved_insurance.as_ref()
    }

    pub fn set_saved_insurance(&mut self, insurance: Option<Insurance>) {
        self.saved_insurance = insurance;
    }

    pub fn uses_saved_insurance(&self) -> bool {
        self.use_saved_insurance
    }

    pub fn set_use_saved_insurance(&mut self, use_saved: bool) {
        self.use_saved_insurance = use_saved;
    }

    /// The insurance checkout should apply, if any.
    pub fn applied_insurance(&self) -> Option<&Insurance> {
        self.saved_insurance
            .as_ref()
            .filter(|_| self.use_saved_insurance)
    }

    pub fn ticket(&self) -> ScreenTicket {
        self.navigation.ticket()
    }

    /// Keeps a collaborator result only if the user has not navigated since
    /// `ticket` was taken. Late results are dropped.
    pub fn accept_result<T>(&self, ticket: ScreenTicket, value: T) -> Option<T> {
        if self.navigation.is_current(&ticket) {
            Some(value)
        } else {
            debug!(
                issued_on = %ticket.screen(),
                now_on = %self.current_screen(),
                "discarding late result"
            );
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
