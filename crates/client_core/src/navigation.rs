//! Screen history and the selection slots that parameterize the current screen.
//!
//! The store is a plain value owned by a [`crate::Session`]; every operation is a
//! synchronous `&mut self` call, so no partial update is ever observable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::domain::{Country, DoctorId, MemberId, PharmacyId, ReportId, Screen, ScheduleItemId};
use thiserror::Error;
use tracing::debug;

/// The "currently chosen" identifiers screens read to form their queries.
///
/// Every slot is independently optional; `None` means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub active_member_id: Option<MemberId>,
    pub viewing_member_id: Option<MemberId>,
    pub active_doctor_id: Option<DoctorId>,
    pub active_schedule_item_id: Option<ScheduleItemId>,
    pub active_report_id: Option<ReportId>,
    pub selected_pharmacy_id: Option<PharmacyId>,
    pub selected_day: Option<u32>,
    pub selected_date: Option<NaiveDate>,
    pub selected_appointment_time: Option<String>,
    pub selected_specialty: Option<String>,
    pub selected_country: Option<Country>,
    pub selected_city: Option<String>,
    pub selected_area: Option<String>,
}

/// Slot updates carried by a navigation.
///
/// An untouched slot leaves the selection as it was. A slot can be set to a
/// value or explicitly cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    active_member_id: Option<Option<MemberId>>,
    viewing_member_id: Option<Option<MemberId>>,
    active_doctor_id: Option<Option<DoctorId>>,
    active_schedule_item_id: Option<Option<ScheduleItemId>>,
    active_report_id: Option<Option<ReportId>>,
    selected_pharmacy_id: Option<Option<PharmacyId>>,
    selected_day: Option<Option<u32>>,
    selected_date: Option<Option<NaiveDate>>,
    selected_appointment_time: Option<Option<String>>,
    selected_specialty: Option<Option<String>>,
    selected_country: Option<Option<Country>>,
    selected_city: Option<Option<String>>,
    selected_area: Option<Option<String>>,
}

macro_rules! param_setters {
    ($($field:ident: $ty:ty => $set:ident, $clear:ident;)+) => {
        impl NavigationParams {
            $(
                pub fn $set(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(Some(value.into()));
                    self
                }

                pub fn $clear(mut self) -> Self {
                    self.$field = Some(None);
                    self
                }
            )+

            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }

            fn apply_to(self, selection: &mut SelectionContext) {
                $(
                    if let Some(value) = self.$field {
                        selection.$field = value;
                    }
                )+
            }
        }
    };
}

param_setters! {
    active_member_id: MemberId => active_member, clear_active_member;
    viewing_member_id: MemberId => viewing_member, clear_viewing_member;
    active_doctor_id: DoctorId => active_doctor, clear_active_doctor;
    active_schedule_item_id: ScheduleItemId => active_schedule_item, clear_active_schedule_item;
    active_report_id: ReportId => active_report, clear_active_report;
    selected_pharmacy_id: PharmacyId => selected_pharmacy, clear_selected_pharmacy;
    selected_day: u32 => selected_day, clear_selected_day;
    selected_date: NaiveDate => selected_date, clear_selected_date;
    selected_appointment_time: String => selected_appointment_time, clear_selected_appointment_time;
    selected_specialty: String => selected_specialty, clear_selected_specialty;
    selected_country: Country => selected_country, clear_selected_country;
    selected_city: String => selected_city, clear_selected_city;
    selected_area: String => selected_area, clear_selected_area;
}

impl NavigationParams {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Captures the screen position at the moment an async request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTicket {
    epoch: u64,
    screen: Screen,
}

impl ScreenTicket {
    pub fn screen(&self) -> Screen {
        self.screen
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("navigation history must contain at least one screen")]
    EmptyHistory,
}

/// Wire shape of a store; validated before it becomes a [`NavigationStore`].
#[derive(Deserialize)]
struct StoredNavigation {
    history: Vec<Screen>,
    #[serde(default)]
    selection: SelectionContext,
}

impl TryFrom<StoredNavigation> for NavigationStore {
    type Error = NavigationError;

    fn try_from(stored: StoredNavigation) -> Result<Self, Self::Error> {
        if stored.history.is_empty() {
            return Err(NavigationError::EmptyHistory);
        }
        Ok(Self {
            history: stored.history,
            selection: stored.selection,
            epoch: 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredNavigation")]
pub struct NavigationStore {
    history: Vec<Screen>,
    selection: SelectionContext,
    #[serde(skip)]
    epoch: u64,
}

impl NavigationStore {
    pub fn new(root: Screen) -> Self {
        Self {
            history: vec![root],
            selection: SelectionContext::default(),
            epoch: 0,
        }
    }

    pub fn current_screen(&self) -> Screen {
        // history is never empty: constructed or deserialized with one entry,
        // back() stops at one.
        self.history.last().copied().unwrap_or(Screen::Home)
    }

    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn navigate(&mut self, screen: Screen, params: NavigationParams) {
        let from = self.current_screen();
        params.apply_to(&mut self.selection);
        self.history.push(screen);
        self.epoch += 1;
        debug!(%from, to = %screen, depth = self.history.len(), "navigate");
    }

    /// Pops one entry. Returns `false` and leaves the store untouched at the root.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            debug!(screen = %self.current_screen(), "back at root ignored");
            return false;
        }
        let left = self.history.pop();
        self.epoch += 1;
        debug!(
            from = ?left,
            to = %self.current_screen(),
            depth = self.history.len(),
            "back"
        );
        true
    }

    pub fn reset_to(&mut self, screen: Screen) {
        self.history.clear();
        self.history.push(screen);
        self.epoch += 1;
        debug!(%screen, "history reset");
    }

    pub fn update_selection(&mut self, params: NavigationParams) {
        if params.is_empty() {
            return;
        }
        params.apply_to(&mut self.selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionContext::default();
    }

    pub fn ticket(&self) -> ScreenTicket {
        ScreenTicket {
            epoch: self.epoch,
            screen: self.current_screen(),
        }
    }

    /// True while no navigation happened since `ticket` was taken.
    pub fn is_current(&self, ticket: &ScreenTicket) -> bool {
        ticket.epoch == self.epoch
    }
}

impl Default for NavigationStore {
    fn default() -> Self {
        Self::new(Screen::LoginView)
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
