use super::*;

fn target_of(outcome: VoiceOutcome) -> Option<Screen> {
    match outcome {
        VoiceOutcome::Navigate { target, .. } => Some(target),
        _ => None,
    }
}

#[test]
fn schedule_phrase_opens_calendar() {
    let matcher = IntentMatcher::default();
    let outcome = matcher.resolve("take me to my schedule", Screen::Home);
    assert_eq!(
        outcome,
        VoiceOutcome::Navigate {
            target: Screen::CalendarView,
            notice: Phrase::OpeningSchedule,
        }
    );
}

#[test]
fn gibberish_is_not_understood() {
    let matcher = IntentMatcher::default();
    assert_eq!(
        matcher.resolve("blah blah", Screen::FamilyList),
        VoiceOutcome::NotUnderstood
    );
}

#[test]
fn matching_ignores_case() {
    let matcher = IntentMatcher::default();
    assert_eq!(
        target_of(matcher.resolve("Show My MEDICATIONS", Screen::Home)),
        Some(Screen::MedicationManagerView)
    );
}

#[test]
fn first_rule_wins_on_overlap() {
    let matcher = IntentMatcher::default();
    // "dashboard" (rule 1) beats "calendar" (rule 2).
    assert_eq!(
        target_of(matcher.resolve("calendar on the dashboard", Screen::ProfileView)),
        Some(Screen::Home)
    );
    // "family" is checked before "report".
    assert_eq!(
        target_of(matcher.resolve("family report", Screen::Home)),
        Some(Screen::FamilyList)
    );
    // "schedule" shadows "doctor bot".
    assert_eq!(
        target_of(matcher.resolve("schedule with the doctor bot", Screen::Home)),
        Some(Screen::CalendarView)
    );
}

#[test]
fn add_members_is_captured_by_family_rule() {
    let matcher = IntentMatcher::default();
    assert_eq!(
        target_of(matcher.resolve("add members", Screen::Home)),
        Some(Screen::FamilyList)
    );
    assert_eq!(
        target_of(matcher.resolve("add member", Screen::Home)),
        Some(Screen::AddMemberForm)
    );
}

#[test]
fn chat_screen_exit_phrases_leave_chat() {
    let matcher = IntentMatcher::default();
    for phrase in ["go back", "please exit", "GO BACK now"] {
        assert_eq!(
            target_of(matcher.resolve(phrase, Screen::DoctorBot)),
            Some(Screen::Home),
            "{phrase}"
        );
    }
}

#[test]
fn chat_screen_forwards_everything_else() {
    let matcher = IntentMatcher::default();
    assert_eq!(
        matcher.resolve("I have a headache", Screen::DoctorBot),
        VoiceOutcome::ForwardToChat("I have a headache".to_string())
    );
    // navigation words are chat content while chatting
    assert_eq!(
        matcher.resolve("show my schedule", Screen::DoctorBot),
        VoiceOutcome::ForwardToChat("show my schedule".to_string())
    );
}

#[test]
fn chat_forwarding_keeps_the_transcript_verbatim() {
    let matcher = IntentMatcher::default();
    assert_eq!(
        matcher.resolve("  Is 500mg too much? ", Screen::DoctorBot),
        VoiceOutcome::ForwardToChat("  Is 500mg too much? ".to_string())
    );
}

#[test]
fn custom_rules_are_evaluated_in_given_order() {
    let matcher = IntentMatcher::new(vec![
        IntentRule {
            patterns: &["notification"],
            target: Screen::NotificationsView,
            notice: Phrase::NavigatingDashboard,
        },
        IntentRule {
            patterns: &["profile", "notification"],
            target: Screen::ProfileView,
            notice: Phrase::NavigatingDashboard,
        },
    ]);
    assert_eq!(matcher.rules().len(), 2);
    assert_eq!(
        target_of(matcher.resolve("open notifications", Screen::Home)),
        Some(Screen::NotificationsView)
    );
    assert_eq!(
        target_of(matcher.resolve("go home", Screen::Home)),
        None
    );
}

#[test]
fn recognizer_codes_map_to_variants() {
    assert_eq!(RecognitionError::from_code("no-speech"), RecognitionError::NoSpeech);
    assert_eq!(
        RecognitionError::from_code("not-allowed"),
        RecognitionError::NotAllowed
    );
    assert_eq!(
        RecognitionError::from_code("network"),
        RecognitionError::Other("network".into())
    );
}

#[tokio::test]
async fn missing_recognizer_reports_unsupported() {
    let err = MissingSpeechToText
        .listen("en-US")
        .await
        .expect_err("unsupported");
    assert_eq!(err, RecognitionError::Unsupported);
}
