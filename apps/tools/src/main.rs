use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::domain::AdminRole;
use storage::{AdminCreation, NewAdmin, Storage};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod config;
mod seed;

use config::{load_settings, normalize_database_url, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "medime-tools", about = "Seed and inspect a MediMe database")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Overrides the configured database URL.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Settings, sample doctors and the default super admin.
    Init,
    Settings,
    Doctors,
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "admin")]
        role: AdminRole,
    },
    ListDoctors,
    AuditLog {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

fn report_admin(creation: &AdminCreation, email: &str) {
    match creation {
        AdminCreation::Created(admin) => {
            println!(
                "created admin user: {} <{}> ({})",
                admin.display_name(),
                admin.email,
                admin.role
            );
            println!("  id: {}", admin.id);
        }
        AdminCreation::AlreadyExists => println!("admin user {email} already exists"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let raw_url = cli.database_url.unwrap_or(settings.database_url);
    let database_url = normalize_database_url(&raw_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(%database_url, %error, "failed to open SQLite database");
        error
    })?;

    match cli.command {
        Command::Init => {
            banner("MediMe database initialization");
            let report = seed::run_init(&storage, &seed::default_admin()).await?;
            println!("system settings initialized (version {})", report.settings.version);
            for doctor in &report.doctors {
                println!("created doctor: {}", doctor.name);
            }
            report_admin(&report.admin, seed::DEFAULT_ADMIN_EMAIL);
            if let Some(entry_id) = report.audit_entry_id {
                println!("audit entry recorded: {entry_id}");
            }
            banner("database initialization complete");
            println!("default admin credentials:");
            println!("  email: {}", seed::DEFAULT_ADMIN_EMAIL);
            println!("  password: {}", seed::DEFAULT_ADMIN_PASSWORD);
            println!("change the admin password immediately");
        }
        Command::Settings => {
            let settings = seed::initialize_system_settings(&storage).await?;
            println!("system settings initialized (version {})", settings.version);
        }
        Command::Doctors => {
            for doctor in seed::create_sample_doctors(&storage).await? {
                println!("created doctor: {}", doctor.name);
            }
        }
        Command::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let creation = storage
                .create_admin(&NewAdmin {
                    email: email.clone(),
                    password,
                    first_name,
                    last_name,
                    role,
                    created_by: "medime-tools".into(),
                })
                .await?;
            report_admin(&creation, &email);
        }
        Command::ListDoctors => {
            for doctor in storage.list_doctors().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    doctor.id,
                    doctor.name,
                    doctor.specialty,
                    doctor.location,
                    doctor.price
                );
            }
        }
        Command::AuditLog { limit } => {
            for entry in storage.list_audit_events(limit).await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.id,
                    entry.created_at.to_rfc3339(),
                    entry.admin_email,
                    entry.action,
                    entry.resource_type
                );
            }
        }
    }

    Ok(())
}
