//! User-facing notice text in the two supported languages.

use shared::domain::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrase {
    CommandEcho(String),
    NavigatingDashboard,
    OpeningSchedule,
    AccessingMedications,
    NavigatingTo(Place),
    OpeningDoctorBot,
    OpeningAddMemberForm,
    CommandNotUnderstood,
    TryGoHomeOrShowSchedule,
    NoSpeechDetected,
    MicrophoneAccessDenied,
    VoiceError(String),
    VoiceNotSupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Family,
    MyReports,
}

impl Place {
    fn render(self, language: Language) -> &'static str {
        match (self, language) {
            (Place::Family, Language::En) => "Family",
            (Place::Family, Language::Ar) => "العائلة",
            (Place::MyReports, Language::En) => "My Reports",
            (Place::MyReports, Language::Ar) => "تقاريري",
        }
    }
}

impl Phrase {
    pub fn render(&self, language: Language) -> String {
        match language {
            Language::En => self.render_en(),
            Language::Ar => self.render_ar(),
        }
    }

    fn render_en(&self) -> String {
        match self {
            Phrase::CommandEcho(text) => format!("Command: \"{text}\""),
            Phrase::NavigatingDashboard => "Navigating to Dashboard".into(),
            Phrase::OpeningSchedule => "Opening your schedule".into(),
            Phrase::AccessingMedications => "Accessing your medications".into(),
            Phrase::NavigatingTo(place) => {
                format!("Navigating to {}", place.render(Language::En))
            }
            Phrase::OpeningDoctorBot => "Opening DoctorBot".into(),
            Phrase::OpeningAddMemberForm => "Opening the add member form".into(),
            Phrase::CommandNotUnderstood => "Command not understood".into(),
            Phrase::TryGoHomeOrShowSchedule => "Try 'go home' or 'show schedule'".into(),
            Phrase::NoSpeechDetected => "No speech detected".into(),
            Phrase::MicrophoneAccessDenied => "Microphone access denied".into(),
            Phrase::VoiceError(code) => format!("Voice error: {code}"),
            Phrase::VoiceNotSupported => "Voice commands are not supported here".into(),
        }
    }

    fn render_ar(&self) -> String {
        match self {
            Phrase::CommandEcho(text) => format!("الأمر: \"{text}\""),
            Phrase::NavigatingDashboard => "الانتقال إلى لوحة التحكم".into(),
            Phrase::OpeningSchedule => "فتح جدولك".into(),
            Phrase::AccessingMedications => "الوصول إلى أدويتك".into(),
            Phrase::NavigatingTo(place) => {
                format!("الانتقال إلى {}", place.render(Language::Ar))
            }
            Phrase::OpeningDoctorBot => "فتح الطبيب الآلي".into(),
            Phrase::OpeningAddMemberForm => "فتح نموذج إضافة عضو".into(),
            Phrase::CommandNotUnderstood => "لم يتم فهم الأمر".into(),
            Phrase::TryGoHomeOrShowSchedule => "جرّب \"الرئيسية\" أو \"اعرض الجدول\"".into(),
            Phrase::NoSpeechDetected => "لم يتم اكتشاف أي كلام".into(),
            Phrase::MicrophoneAccessDenied => "تم رفض الوصول إلى الميكروفون".into(),
            Phrase::VoiceError(code) => format!("خطأ صوتي: {code}"),
            Phrase::VoiceNotSupported => "الأوامر الصوتية غير مدعومة هنا".into(),
        }
    }
}
