use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use uuid::Uuid;

use shared::domain::{AdminRole, DoctorId};

const SETTINGS_DOCUMENT_ID: &str = "config";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub appointment_reminders: bool,
    pub medication_reminders: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSettings {
    pub maintenance_mode: bool,
    pub allow_new_registrations: bool,
    pub admin_email_domain: String,
    pub max_appointments_per_day: u32,
    pub notification_settings: NotificationSettings,
    pub version: String,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub specialty: String,
    pub specialization: String,
    pub contact_number: String,
    pub email: String,
    pub location: String,
    pub address: String,
    pub hospital_affiliation: String,
    pub bio: String,
    pub education: String,
    pub experience: String,
    pub price: i64,
    pub next_availability: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AdminRole,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Vec<String>,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl AdminRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCreation {
    Created(AdminRecord),
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub admin_id: String,
    pub admin_email: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct StoredAuditEntry {
    pub id: i64,
    pub admin_id: String,
    pub admin_email: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn put_system_settings(&self, settings: &SystemSettings) -> Result<()> {
        let notifications = serde_json::to_string(&settings.notification_settings)?;
        sqlx::query(
            r#"
            INSERT INTO system_settings (
                id, maintenance_mode, allow_new_registrations, admin_email_domain,
                max_appointments_per_day, notification_settings, version, updated_by, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                maintenance_mode = excluded.maintenance_mode,
                allow_new_registrations = excluded.allow_new_registrations,
                admin_email_domain = excluded.admin_email_domain,
                max_appointments_per_day = excluded.max_appointments_per_day,
                notification_settings = excluded.notification_settings,
                version = excluded.version,
                updated_by = excluded.updated_by,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(SETTINGS_DOCUMENT_ID)
        .bind(settings.maintenance_mode)
        .bind(settings.allow_new_registrations)
        .bind(&settings.admin_email_domain)
        .bind(i64::from(settings.max_appointments_per_day))
        .bind(notifications)
        .bind(&settings.version)
        .bind(&settings.updated_by)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await
        .context("failed to write system settings")?;
        Ok(())
    }

    pub async fn system_settings(&self) -> Result<Option<SystemSettings>> {
        let row = sqlx::query(
            r#"
            SELECT maintenance_mode, allow_new_registrations, admin_email_domain,
                   max_appointments_per_day, notification_settings, version, updated_by, updated_at
            FROM system_settings
            WHERE id = ?
            "#,
        )
        .bind(SETTINGS_DOCUMENT_ID)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let notifications: String = row.try_get("notification_settings")?;
        let max_appointments: i64 = row.try_get("max_appointments_per_day")?;
        Ok(Some(SystemSettings {
            maintenance_mode: row.try_get("maintenance_mode")?,
            allow_new_registrations: row.try_get("allow_new_registrations")?,
            admin_email_domain: row.try_get("admin_email_domain")?,
            max_appointments_per_day: u32::try_from(max_appointments)
                .context("max_appointments_per_day out of range")?,
            notification_settings: serde_json::from_str(&notifications)
                .context("malformed notification settings document")?,
            version: row.try_get("version")?,
            updated_by: row.try_get("updated_by")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }

    pub async fn upsert_doctor(&self, doctor: &DoctorRecord) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO doctors (
                id, first_name, last_name, name, specialty, specialization, contact_number,
                email, location, address, hospital_affiliation, bio, education, experience,
                price, next_availability, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?17)
            ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                name = excluded.name,
                specialty = excluded.specialty,
                specialization = excluded.specialization,
                contact_number = excluded.contact_number,
                email = excluded.email,
                location = excluded.location,
                address = excluded.address,
                hospital_affiliation = excluded.hospital_affiliation,
                bio = excluded.bio,
                education = excluded.education,
                experience = excluded.experience,
                price = excluded.price,
                next_availability = excluded.next_availability,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(doctor.id.as_str())
        .bind(&doctor.first_name)
        .bind(&doctor.last_name)
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(&doctor.specialization)
        .bind(&doctor.contact_number)
        .bind(&doctor.email)
        .bind(&doctor.location)
        .bind(&doctor.address)
        .bind(&doctor.hospital_affiliation)
        .bind(&doctor.bio)
        .bind(&doctor.education)
        .bind(&doctor.experience)
        .bind(doctor.price)
        .bind(doctor.next_availability)
        .bind(now)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to upsert doctor {}", doctor.id))?;
        Ok(())
    }

    pub async fn doctor(&self, doctor_id: &DoctorId) -> Result<Option<DoctorRecord>> {
        let row = sqlx::query("SELECT * FROM doctors WHERE id = ?")
            .bind(doctor_id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(doctor_from_row).transpose()
    }

    pub async fn list_doctors(&self) -> Result<Vec<DoctorRecord>> {
        let rows = sqlx::query("SELECT * FROM doctors ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(doctor_from_row).collect()
    }

    /// Inserts an admin unless the email is already registered.
    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<AdminCreation> {
        let id = Uuid::new_v4().to_string();
        let salt = Uuid::new_v4().simple().to_string();
        let password_hash = hash_password(&salt, &admin.password);
        let permissions: Vec<&str> = admin.role.permissions().to_vec();
        let now = Utc::now();

        let inserted = sqlx::query(
            r#"
            INSERT INTO admins (
                id, first_name, last_name, email, password_salt, password_hash,
                role, permissions, active, last_login, created_by, created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, NULL, ?9, ?10, ?10)
            ON CONFLICT(email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&id)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(normalize_email(&admin.email))
        .bind(&salt)
        .bind(&password_hash)
        .bind(admin.role.as_str())
        .bind(serde_json::to_string(&permissions)?)
        .bind(&admin.created_by)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to create admin {}", admin.email))?;

        if inserted.is_none() {
            return Ok(AdminCreation::AlreadyExists);
        }

        let record = self
            .admin_by_email(&admin.email)
            .await?
            .ok_or_else(|| anyhow!("admin {} vanished after insert", admin.email))?;
        Ok(AdminCreation::Created(record))
    }

    pub async fn admin_by_email(&self, email: &str) -> Result<Option<AdminRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, role, permissions, active,
                   last_login, created_by, created_at
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(admin_from_row).transpose()
    }

    pub async fn verify_admin_password(&self, email: &str, password: &str) -> Result<bool> {
        let row = sqlx::query("SELECT password_salt, password_hash FROM admins WHERE email = ?")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(false);
        };
        let salt: String = row.try_get("password_salt")?;
        let expected: String = row.try_get("password_hash")?;
        Ok(hash_password(&salt, password) == expected)
    }

    pub async fn log_audit_event(&self, event: &AuditEvent) -> Result<i64> {
        let details = event
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let rec = sqlx::query(
            r#"
            INSERT INTO audit_logs (
                admin_id, admin_email, action, resource_type, resource_id, details, ip_address, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, NULL, ?)
            RETURNING id
            "#,
        )
        .bind(&event.admin_id)
        .bind(&event.admin_email)
        .bind(&event.action)
        .bind(&event.resource_type)
        .bind(&event.resource_id)
        .bind(details)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("failed to append audit log entry")?;
        Ok(rec.get::<i64, _>(0))
    }

    /// Newest entries first.
    pub async fn list_audit_events(&self, limit: u32) -> Result<Vec<StoredAuditEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, admin_id, admin_email, action, resource_type, resource_id, details, created_at
            FROM audit_logs
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<StoredAuditEntry> {
                let details: Option<String> = row.try_get("details")?;
                Ok(StoredAuditEntry {
                    id: row.try_get("id")?,
                    admin_id: row.try_get("admin_id")?,
                    admin_email: row.try_get("admin_email")?,
                    action: row.try_get("action")?,
                    resource_type: row.try_get("resource_type")?,
                    resource_id: row.try_get("resource_id")?,
                    details: details
                        .as_deref()
                        .map(serde_json::from_str)
                        .transpose()
                        .context("malformed audit details")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }
}

fn doctor_from_row(row: &SqliteRow) -> Result<DoctorRecord> {
    Ok(DoctorRecord {
        id: DoctorId(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        name: row.try_get("name")?,
        specialty: row.try_get("specialty")?,
        specialization: row.try_get("specialization")?,
        contact_number: row.try_get("contact_number")?,
        email: row.try_get("email")?,
        location: row.try_get("location")?,
        address: row.try_get("address")?,
        hospital_affiliation: row.try_get("hospital_affiliation")?,
        bio: row.try_get("bio")?,
        education: row.try_get("education")?,
        experience: row.try_get("experience")?,
        price: row.try_get("price")?,
        next_availability: row.try_get("next_availability")?,
    })
}

fn admin_from_row(row: &SqliteRow) -> Result<AdminRecord> {
    let role: String = row.try_get("role")?;
    let permissions: String = row.try_get("permissions")?;
    Ok(AdminRecord {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        role: AdminRole::from_str(&role)?,
        permissions: serde_json::from_str(&permissions).context("malformed admin permissions")?,
        active: row.try_get("active")?,
        last_login: row.try_get("last_login")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
