use super::*;

fn at_home() -> NavigationStore {
    NavigationStore::new(Screen::Home)
}

#[test]
fn current_screen_follows_the_last_navigation() {
    let mut store = at_home();
    let route = [
        Screen::CalendarView,
        Screen::ScheduleDetailView,
        Screen::FamilyList,
        Screen::FamilyList,
        Screen::MemberSummaryView,
    ];
    for screen in route {
        store.navigate(screen, NavigationParams::new());
        assert_eq!(store.current_screen(), screen);
        assert_eq!(store.history().last(), Some(&screen));
    }
    assert_eq!(store.history().len(), route.len() + 1);
}

#[test]
fn back_pops_exactly_one_entry() {
    let mut store = at_home();
    store.navigate(Screen::ReportsListView, NavigationParams::new());
    store.navigate(Screen::ReportDetailView, NavigationParams::new());

    assert!(store.back());
    assert_eq!(store.history(), &[Screen::Home, Screen::ReportsListView]);
    assert_eq!(store.current_screen(), Screen::ReportsListView);
}

#[test]
fn back_at_root_leaves_state_unchanged() {
    let mut store = at_home();
    store.update_selection(NavigationParams::new().active_report("rep-001"));
    let before = store.clone();

    assert!(!store.back());
    assert_eq!(store, before);
    assert!(!store.back());
    assert_eq!(store, before);
}

#[test]
fn selection_persists_across_navigations_without_params() {
    let mut store = at_home();
    store.navigate(
        Screen::DoctorDetailsView,
        NavigationParams::new().active_doctor("dr-emad"),
    );
    store.navigate(Screen::AppointmentCheckoutView, NavigationParams::new());

    assert_eq!(
        store.selection().active_doctor_id,
        Some(DoctorId::from("dr-emad"))
    );
}

#[test]
fn params_overwrite_only_the_slots_they_name() {
    let mut store = at_home();
    store.navigate(
        Screen::MemberSummaryView,
        NavigationParams::new()
            .viewing_member("ah-002")
            .active_doctor("dr-kamal")
            .selected_day(14u32),
    );
    store.navigate(
        Screen::ScheduleDoctorView,
        NavigationParams::new()
            .active_doctor("dr-fathy")
            .clear_viewing_member(),
    );

    let selection = store.selection();
    assert_eq!(selection.active_doctor_id, Some(DoctorId::from("dr-fathy")));
    assert_eq!(selection.viewing_member_id, None);
    assert_eq!(selection.selected_day, Some(14));
    assert_eq!(selection.active_report_id, None);
}

#[test]
fn back_does_not_restore_previous_selection() {
    let mut store = at_home();
    store.navigate(
        Screen::ReportDetailView,
        NavigationParams::new().active_report("rep-002"),
    );
    store.back();
    assert_eq!(
        store.selection().active_report_id,
        Some(ReportId::from("rep-002"))
    );
}

#[test]
fn reset_to_collapses_history_and_keeps_selection() {
    let mut store = at_home();
    store.navigate(
        Screen::SelectPharmacyView,
        NavigationParams::new().selected_pharmacy("ph2"),
    );
    store.navigate(Screen::RefillCheckoutView, NavigationParams::new());

    store.reset_to(Screen::Home);

    assert_eq!(store.history(), &[Screen::Home]);
    assert_eq!(store.current_screen(), Screen::Home);
    assert_eq!(
        store.selection().selected_pharmacy_id,
        Some(PharmacyId::from("ph2"))
    );
}

#[test]
fn round_trip_returns_to_root() {
    let mut store = at_home();
    store.navigate(Screen::CalendarView, NavigationParams::new());
    store.navigate(Screen::ScheduleDetailView, NavigationParams::new());
    store.back();
    store.back();

    assert_eq!(store.current_screen(), Screen::Home);
    assert_eq!(store.history(), &[Screen::Home]);
}

#[test]
fn ticket_goes_stale_on_any_screen_change() {
    let mut store = at_home();
    let ticket = store.ticket();
    assert!(store.is_current(&ticket));
    assert_eq!(ticket.screen(), Screen::Home);

    store.update_selection(NavigationParams::new().selected_day(3u32));
    assert!(store.is_current(&ticket));

    store.navigate(Screen::DoctorBot, NavigationParams::new());
    assert!(!store.is_current(&ticket));

    let on_bot = store.ticket();
    store.back();
    assert!(!store.is_current(&on_bot));

    let at_root = store.ticket();
    store.back();
    assert!(store.is_current(&at_root));
}

#[test]
fn selected_date_and_time_are_carried() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
    let mut store = at_home();
    store.navigate(
        Screen::AppointmentCheckoutView,
        NavigationParams::new()
            .selected_date(date)
            .selected_appointment_time("10:30 AM"),
    );
    assert_eq!(store.selection().selected_date, Some(date));
    assert_eq!(
        store.selection().selected_appointment_time.as_deref(),
        Some("10:30 AM")
    );
}

#[test]
fn empty_params_report_empty() {
    assert!(NavigationParams::new().is_empty());
    assert!(!NavigationParams::new().clear_active_member().is_empty());
}

#[test]
fn snapshot_serializes_screen_names() {
    let mut store = at_home();
    store.navigate(Screen::FamilyList, NavigationParams::new().active_member("aa-001"));
    let json = serde_json::to_value(&store).expect("json");
    assert_eq!(json["history"], serde_json::json!(["home", "family-list"]));
    assert_eq!(json["selection"]["active_member_id"], "aa-001");
}

#[test]
fn restored_store_keeps_history_and_selection() {
    let mut store = at_home();
    store.navigate(
        Screen::ScheduleDoctorView,
        NavigationParams::new()
            .selected_specialty("Cardiologist")
            .selected_country(Country::Egypt)
            .selected_city("Alexandria"),
    );
    let json = serde_json::to_string(&store).expect("json");

    let restored: NavigationStore = serde_json::from_str(&json).expect("restore");
    assert_eq!(restored.history(), store.history());
    assert_eq!(restored.selection(), store.selection());
    assert_eq!(restored.current_screen(), Screen::ScheduleDoctorView);
}

#[test]
fn empty_history_is_rejected_on_restore() {
    let result = serde_json::from_str::<NavigationStore>(r#"{"history":[],"selection":{}}"#);
    let err = result.expect_err("empty history must not load");
    assert!(err.to_string().contains("at least one screen"), "{err}");
}

#[test]
fn doctor_search_filters_are_independent_slots() {
    let mut store = at_home();
    store.update_selection(
        NavigationParams::new()
            .selected_specialty("Pediatrician")
            .selected_country(Country::Usa)
            .selected_city("Los Angeles")
            .selected_area("Any Area"),
    );
    store.update_selection(NavigationParams::new().clear_selected_area());

    let selection = store.selection();
    assert_eq!(selection.selected_specialty.as_deref(), Some("Pediatrician"));
    assert_eq!(selection.selected_country, Some(Country::Usa));
    assert_eq!(selection.selected_city.as_deref(), Some("Los Angeles"));
    assert_eq!(selection.selected_area, None);
}
