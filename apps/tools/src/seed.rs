//! Sample data for development databases.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use shared::domain::{AdminRole, DoctorId};
use storage::{
    AdminCreation, AuditEvent, DoctorRecord, NewAdmin, NotificationSettings, Storage,
    SystemSettings,
};
use tracing::info;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@medime-admin.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123456";

pub fn default_system_settings(now: DateTime<Utc>) -> SystemSettings {
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
        updated_at: now,
    }
}

pub fn sample_doctors(now: DateTime<Utc>) -> Vec<DoctorRecord> {
    vec![
        DoctorRecord {
            id: DoctorId::from("sample-doctor-1"),
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
            bio: "Board-certified cardiologist with 15 years of experience in interventional cardiology.".into(),
            education: "MD from Harvard Medical School".into(),
            experience: "15 years".into(),
            price: 200,
            next_availability: now + Duration::hours(24),
        },
        DoctorRecord {
            id: DoctorId::from("sample-doctor-2"),
            first_name: "Ahmed".into(),
            last_name: "Hassan".into(),
            name: "Dr. Ahmed Hassan".into(),
            specialty: "General Practitioner".into(),
            specialization: "Family Medicine".into(),
            contact_number: "+20-100-123-4567".into(),
            email: "ahmed.hassan@medime.com".into(),
            location: "Alexandria".into(),
            address: "456 Health St, Smouha, Alexandria, Egypt".into(),
            hospital_affiliation: "Alexandria Medical Center".into(),
            bio: "Experienced family medicine physician serving the Alexandria community.".into(),
            education: "MD from Alexandria University".into(),
            experience: "10 years".into(),
            price: 150,
            next_availability: now + Duration::hours(12),
        },
        DoctorRecord {
            id: DoctorId::from("sample-doctor-3"),
            first_name: "Maria".into(),
            last_name: "Garcia".into(),
            name: "Dr. Maria Garcia".into(),
            specialty: "Pediatrician".into(),
            specialization: "Child Development".into(),
            contact_number: "+1-555-0203".into(),
            email: "maria.garcia@medime.com".into(),
            location: "Los Angeles".into(),
            address: "789 Kids Care Ave, Los Angeles, CA 90001".into(),
            hospital_affiliation: "Children's Hospital LA".into(),
            bio: "Dedicated pediatrician specializing in child development and preventive care.".into(),
            education: "MD from UCLA Medical School".into(),
            experience: "12 years".into(),
            price: 175,
            next_availability: now + Duration::hours(48),
        },
    ]
}

pub async fn initialize_system_settings(storage: &Storage) -> Result<SystemSettings> {
    let settings = default_system_settings(Utc::now());
    storage.put_system_settings(&settings).await?;
    info!(version = %settings.version, "system settings written");
    Ok(settings)
}

pub async fn create_sample_doctors(storage: &Storage) -> Result<Vec<DoctorRecord>> {
    let doctors = sample_doctors(Utc::now());
    for doctor in &doctors {
        storage.upsert_doctor(doctor).await?;
        info!(doctor_id = %doctor.id, "sample doctor written");
    }
    Ok(doctors)
}

pub fn default_admin() -> NewAdmin {
    NewAdmin {
        email: DEFAULT_ADMIN_EMAIL.into(),
        password: DEFAULT_ADMIN_PASSWORD.into(),
        first_name: "Super".into(),
        last_name: "Admin".into(),
        role: AdminRole::Superadmin,
        created_by: "system".into(),
    }
}

#[derive(Debug)]
pub struct InitReport {
    pub settings: SystemSettings,
    pub doctors: Vec<DoctorRecord>,
    pub admin: AdminCreation,
    pub audit_entry_id: Option<i64>,
}

/// Full initialization: settings, doctors, default admin, then an audit entry
/// when the admin was created by this run.
pub async fn run_init(storage: &Storage, admin: &NewAdmin) -> Result<InitReport> {
    let settings = initialize_system_settings(storage).await?;
    let doctors = create_sample_doctors(storage).await?;
    let creation = storage.create_admin(admin).await?;

    let audit_entry_id = match &creation {
        AdminCreation::Created(record) => Some(
            storage
                .log_audit_event(&AuditEvent {
                    admin_id: record.id.clone(),
                    admin_email: record.email.clone(),
                    action: "database_initialization".into(),
                    resource_type: "system".into(),
                    resource_id: None,
                    details: Some(json!({ "message": "Database initialized successfully" })),
                })
                .await?,
        ),
        AdminCreation::AlreadyExists => None,
    };

    Ok(InitReport {
        settings,
        doctors,
        admin: creation,
        audit_entry_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_doctors_carry_relative_availability() {
        let now = Utc::now();
        let doctors = sample_doctors(now);
        assert_eq!(doctors.len(), 3);
        assert_eq!(doctors[1].next_availability - now, Duration::hours(12));
        assert_eq!(doctors[2].price, 175);
    }

    #[tokio::test]
    async fn init_runs_once_and_is_safe_to_repeat() {
        let storage = Storage::new("sqlite::memory:").await.expect("db");

        let first = run_init(&storage, &default_admin()).await.expect("init");
        assert!(matches!(first.admin, AdminCreation::Created(_)));
        assert!(first.audit_entry_id.is_some());
        assert_eq!(first.doctors.len(), 3);

        let second = run_init(&storage, &default_admin()).await.expect("re-init");
        assert_eq!(second.admin, AdminCreation::AlreadyExists);
        assert!(second.audit_entry_id.is_none());

        assert_eq!(storage.list_doctors().await.expect("doctors").len(), 3);
        assert_eq!(storage.list_audit_events(10).await.expect("audit").len(), 1);
        assert!(storage
            .verify_admin_password(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD)
            .await
            .expect("verify"));
    }
}
