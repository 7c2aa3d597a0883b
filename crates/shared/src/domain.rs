use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(MemberId);
id_newtype!(DoctorId);
id_newtype!(ReportId);
id_newtype!(ScheduleItemId);
id_newtype!(PharmacyId);

macro_rules! screens {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Every full-page view the application can show.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Screen {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Screen {
            pub const ALL: &'static [Screen] = &[$(Screen::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Screen::$variant => $name,)+
                }
            }
        }
    };
}

screens! {
    Home => "home",
    ProfileView => "profile-view",
    CreateAccountView => "create-account-view",
    CalendarView => "calendar-view",
    DailyScheduleView => "daily-schedule-view",
    ScheduleDetailView => "schedule-detail-view",
    FamilyList => "family-list",
    AddMemberForm => "add-member-form",
    InvitationDetailView => "invitation-detail-view",
    MemberSummaryView => "member-summary-view",
    DoctorBot => "doctor-bot",
    MedicationManagerView => "medication-manager-view",
    AddMedicationForm => "add-medication-form",
    RefillCartView => "refill-cart-view",
    SelectPharmacyView => "select-pharmacy-view",
    RefillCheckoutView => "refill-checkout-view",
    RefillConfirmationView => "refill-confirmation-view",
    ScheduleDoctorView => "schedule-doctor-view",
    DoctorDetailsView => "doctor-details-view",
    AppointmentCheckoutView => "appointment-checkout-view",
    AppointmentConfirmationView => "appointment-confirmation-view",
    SelectLocationView => "select-location-view",
    SearchResultsView => "search-results-view",
    ReportsListView => "reports-list-view",
    ReportDetailView => "report-detail-view",
    NotificationsView => "notifications-view",
    ChatSummaryView => "chat-summary-view",
    AddAppointmentForm => "add-appointment-form",
    LoginView => "login-view",
}

impl Screen {
    /// Screens reachable without a signed-in user.
    pub fn is_public(self) -> bool {
        matches!(self, Screen::LoginView | Screen::CreateAccountView)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownScreen(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Locale handed to the speech recognizer.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ar => "ar-EG",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            _ => Err(DomainError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Country filter used by doctor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Egypt,
    Usa,
}

impl Country {
    pub fn as_str(self) -> &'static str {
        match self {
            Country::Egypt => "Egypt",
            Country::Usa => "USA",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Superadmin,
    Admin,
    Moderator,
}

impl AdminRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AdminRole::Superadmin => "superadmin",
            AdminRole::Admin => "admin",
            AdminRole::Moderator => "moderator",
        }
    }

    pub fn permissions(self) -> &'static [&'static str] {
        match self {
            AdminRole::Superadmin => &[
                "manage_users",
                "manage_doctors",
                "manage_patients",
                "manage_appointments",
                "view_analytics",
                "manage_admins",
                "system_settings",
            ],
            AdminRole::Admin => &[
                "manage_users",
                "manage_doctors",
                "manage_patients",
                "manage_appointments",
                "view_analytics",
            ],
            AdminRole::Moderator => &["view_analytics"],
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(AdminRole::Superadmin),
            "admin" => Ok(AdminRole::Admin),
            "moderator" => Ok(AdminRole::Moderator),
            _ => Err(DomainError::UnknownAdminRole(s.to_string())),
        }
    }
}
