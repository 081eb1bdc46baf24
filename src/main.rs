use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::info;

use vetsoft::config::{Config, Overrides, DEFAULT_CONFIG_PATH};
use vetsoft::logging::init_logging;
use vetsoft::{
    create, list, setup_database, Client, EntityKind, FormData, Medicine, Pet, Product, Provider,
    Record, RecordError, Vet,
};

#[derive(Parser, Debug)]
#[command(name = "vetsoft", version, about = "Veterinary clinic records")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// SQLite database path (overrides config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database tables
    Init,

    /// Import a CSV file whose headers are field names
    Import { entity: EntityKind, csv: PathBuf },

    /// Print stored records as JSON lines
    List { entity: EntityKind },

    /// Create one record from name=value pairs
    Add {
        entity: EntityKind,
        #[arg(required = true)]
        fields: Vec<String>,
    },
}

/// Run a generic operation for the record type behind an EntityKind
macro_rules! dispatch {
    ($kind:expr, $func:ident ( $($arg:expr),* )) => {
        match $kind {
            EntityKind::Clients => $func::<Client>($($arg),*),
            EntityKind::Pets => $func::<Pet>($($arg),*),
            EntityKind::Medicines => $func::<Medicine>($($arg),*),
            EntityKind::Products => $func::<Product>($($arg),*),
            EntityKind::Providers => $func::<Provider>($($arg),*),
            EntityKind::Vets => $func::<Vet>($($arg),*),
        }
    };
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?.apply(Overrides {
        database: cli.database.clone(),
        port: None,
        log_level: cli.log_level.clone(),
    });
    init_logging(&config.logging);

    let conn = open_database(&config.database.path)?;

    match cli.command {
        Command::Init => {
            println!("✓ Database ready: {}", config.database.path.display());
        }
        Command::Import { entity, csv } => {
            dispatch!(entity, run_import(&conn, &csv))?;
        }
        Command::List { entity } => {
            dispatch!(entity, run_list(&conn))?;
        }
        Command::Add { entity, fields } => {
            let data = parse_pairs(&fields)?;
            dispatch!(entity, run_add(&conn, &data))?;
        }
    }

    Ok(())
}

fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    setup_database(&conn).context("Failed to set up database schema")?;
    info!(path = %path.display(), "database opened");
    Ok(conn)
}

fn run_import<R: Record>(conn: &Connection, csv_path: &Path) -> Result<()> {
    println!("📂 Importing {} from {}", R::TABLE, csv_path.display());

    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let mut inserted = 0;
    let mut rejected = 0;

    for result in rdr.records() {
        let row = result.context("Failed to read CSV row")?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let data: FormData = headers
            .iter()
            .zip(row.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        match create::<R>(conn, &data) {
            Ok(_) => inserted += 1,
            Err(RecordError::Validation { errors, .. }) => {
                rejected += 1;
                for (field, message) in errors {
                    println!("  line {}: {}: {}", line, field, message);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("✓ Inserted: {} {}", inserted, R::TABLE);
    println!("✓ Rejected: {}", rejected);

    Ok(())
}

fn run_list<R: Record>(conn: &Connection) -> Result<()> {
    for record in list::<R>(conn)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}

fn run_add<R: Record>(conn: &Connection, data: &FormData) -> Result<()> {
    match create::<R>(conn, data) {
        Ok(record) => {
            println!("✓ Created {} {}", R::ENTITY, record.id());
            Ok(())
        }
        Err(RecordError::Validation { errors, .. }) => {
            for (field, message) in &errors {
                eprintln!("❌ {}: {}", field, message);
            }
            bail!("{} not created", R::ENTITY)
        }
        Err(e) => Err(e.into()),
    }
}

/// `name=value` pairs from the command line
fn parse_pairs(pairs: &[String]) -> Result<FormData> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .with_context(|| format!("Expected name=value, got {:?}", pair))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let data = parse_pairs(&["name=Roma".to_string(), "breed=Golden Retriever".to_string()])
            .unwrap();
        assert_eq!(data["name"], "Roma");
        assert_eq!(data["breed"], "Golden Retriever");

        assert!(parse_pairs(&["name".to_string()]).is_err());
    }

    #[test]
    fn test_cli_accepts_singular_entity_names() {
        let cli = Cli::try_parse_from(["vetsoft", "list", "client"]).unwrap();
        assert!(matches!(cli.command, Command::List { entity: EntityKind::Clients }));
    }
}
