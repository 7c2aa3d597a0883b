use super::*;
use chrono::Duration;

fn sample_settings() -> SystemSettings {
    SystemSettings {
        maintenance_mode: false,
        allow_new_registrations: true,
        admin_email_domain: "medime-admin.com".into(),
        max_appointments_per_day: 50,
        notification_settings: NotificationSettings {
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            appointment_reminders: true,
            medication_reminders: true,
        },
        version: "1.0.0".into(),
        updated_by: "system".into(),
        updated_at: Utc::now(),
    }
}

fn sample_doctor(id: &str, price: i64) -> DoctorRecord {
    DoctorRecord {
        id: DoctorId::from(id),
        first_name: "Sarah".into(),
        last_name: "Johnson".into(),
        name: "Dr. Sarah Johnson".into(),
        specialty: "Cardiologist".into(),
        specialization: "Interventional Cardiology".into(),
        contact_number: "+1-555-0101".into(),
        email: "sarah.johnson@medime.com".into(),
        location: "New York".into(),
        address: "123 Medical Center Dr, New York, NY 10001".into(),
        hospital_affiliation: "New York General Hospital".into(),
        bio: "Board-certified cardiologist.".into(),
        education: "MD from Harvard Medical School".into(),
        experience: "15 years".into(),
        price,
        next_availability: Utc::now() + Duration::hours(24),
    }
}

fn new_admin(email: &str, role: AdminRole) -> NewAdmin {
    NewAdmin {
        email: email.into(),
        password: "Admin@123456".into(),
        first_name: "Super".into(),
        last_name: "Admin".into(),
        role,
        created_by: "system".into(),
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("medime.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn settings_document_is_overwritten_in_place() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.system_settings().await.expect("read").is_none());

    let mut settings = sample_settings();
    storage.put_system_settings(&settings).await.expect("write");
    settings.maintenance_mode = true;
    settings.max_appointments_per_day = 20;
    storage.put_system_settings(&settings).await.expect("rewrite");

    let stored = storage
        .system_settings()
        .await
        .expect("read")
        .expect("settings");
    assert!(stored.maintenance_mode);
    assert_eq!(stored.max_appointments_per_day, 20);
    assert_eq!(stored.notification_settings, settings.notification_settings);
    assert_eq!(stored.admin_email_domain, "medime-admin.com");
}

#[tokio::test]
async fn doctors_upsert_by_id() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .upsert_doctor(&sample_doctor("sample-doctor-1", 200))
        .await
        .expect("insert");
    storage
        .upsert_doctor(&sample_doctor("sample-doctor-1", 220))
        .await
        .expect("update");
    storage
        .upsert_doctor(&sample_doctor("sample-doctor-2", 150))
        .await
        .expect("insert second");

    let doctors = storage.list_doctors().await.expect("list");
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0].id, DoctorId::from("sample-doctor-1"));
    assert_eq!(doctors[0].price, 220);

    let missing = storage
        .doctor(&DoctorId::from("nobody"))
        .await
        .expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn admin_creation_is_idempotent_on_email() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .create_admin(&new_admin("Admin@MediMe-Admin.com", AdminRole::Superadmin))
        .await
        .expect("create");
    let AdminCreation::Created(record) = first else {
        panic!("expected a new admin");
    };
    assert_eq!(record.email, "admin@medime-admin.com");
    assert_eq!(record.permissions.len(), 7);
    assert!(record.active);
    assert_eq!(record.display_name(), "Super Admin");
    assert!(record.last_login.is_none());

    let second = storage
        .create_admin(&new_admin("admin@medime-admin.com", AdminRole::Moderator))
        .await
        .expect("second create");
    assert_eq!(second, AdminCreation::AlreadyExists);

    let stored = storage
        .admin_by_email("admin@medime-admin.com")
        .await
        .expect("lookup")
        .expect("admin");
    assert_eq!(stored.role, AdminRole::Superadmin);
}

#[tokio::test]
async fn admin_password_is_checked_against_salted_digest() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .create_admin(&new_admin("mod@medime-admin.com", AdminRole::Moderator))
        .await
        .expect("create");

    assert!(storage
        .verify_admin_password("mod@medime-admin.com", "Admin@123456")
        .await
        .expect("verify"));
    assert!(!storage
        .verify_admin_password("mod@medime-admin.com", "wrong")
        .await
        .expect("verify"));
    assert!(!storage
        .verify_admin_password("ghost@medime-admin.com", "Admin@123456")
        .await
        .expect("verify"));
}

#[tokio::test]
async fn audit_log_lists_newest_first() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for action in ["database_initialization", "doctor_updated"] {
        storage
            .log_audit_event(&AuditEvent {
                admin_id: "admin-1".into(),
                admin_email: "admin@medime-admin.com".into(),
                action: action.into(),
                resource_type: "system".into(),
                resource_id: None,
                details: Some(serde_json::json!({ "message": action })),
            })
            .await
            .expect("log");
    }

    let entries = storage.list_audit_events(10).await.expect("list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "doctor_updated");
    assert_eq!(
        entries[1].details,
        Some(serde_json::json!({ "message": "database_initialization" }))
    );

    let limited = storage.list_audit_events(1).await.expect("list");
    assert_eq!(limited.len(), 1);
}

#[test]
fn memory_urls_have_no_parent_dir() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert_eq!(
        sqlite_path("sqlite://data/medime.db?mode=rwc"),
        Some(PathBuf::from("data/medime.db"))
    );
}
