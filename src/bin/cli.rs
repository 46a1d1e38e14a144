use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use coursegate::cli::create_developer;
use coursegate::cli::seeder::seed_database;
use coursegate::coursegate_config::StoreConfig;
use coursegate::coursegate_db::{CourseStore, MemoryStore, PgStore, UserStore};
use coursegate::logging::init_console_tracing;

#[derive(Parser)]
#[command(name = "coursegate-cli")]
#[command(about = "Coursegate CLI - Administrative tools for Coursegate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a developer account (the catalog manager role)
    CreateDeveloper {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the demo accounts and courses
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_console_tracing();

    let cli = Cli::parse();

    let (users, courses): (Arc<dyn UserStore>, Arc<dyn CourseStore>) =
        match StoreConfig::from_env() {
            StoreConfig::Postgres {
                url,
                max_connections,
            } => {
                let store = PgStore::connect(&url, max_connections).await?;
                (Arc::new(store.clone()), Arc::new(store))
            }
            StoreConfig::Memory => {
                eprintln!("⚠️  DATABASE_URL is not set; changes will not outlive this process.");
                let store = MemoryStore::new();
                (Arc::new(store.clone()), Arc::new(store))
            }
        };

    match cli.command {
        Commands::CreateDeveloper {
            name,
            email,
            password,
        } => handle_create_developer(users.as_ref(), name, email, password).await,
        Commands::Seed => handle_seed(users.as_ref(), courses.as_ref()).await,
    }
}

async fn handle_create_developer(
    users: &dyn UserStore,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    // Use provided values or prompt interactively
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    match create_developer(users, &name, &email, &password).await {
        Ok(user) => {
            println!("\n✅ Developer created successfully!");
            println!("   Email: {}", user.email);
            println!("   Name: {}", user.name);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating developer: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(users: &dyn UserStore, courses: &dyn CourseStore) -> anyhow::Result<()> {
    if let Err(e) = seed_database(users, courses).await {
        eprintln!("\n❌ Error seeding data: {}", e.error);
        std::process::exit(1);
    }
    Ok(())
}
