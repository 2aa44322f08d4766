//! `normas`: console registry of legal regulations.
//!
//! # Usage
//!
//! ```
//! normas                                  # interactive menu
//! normas --db ~/leyes.db list --json
//! normas search contrato laboral
//! normas add --kind Ley --number 20744 --date 13/05/1976 \
//!   --description "Contrato de trabajo" --category Laboral \
//!   --jurisdiction nacional --keywords "contrato,laboral"
//! ```

mod input;
mod render;
mod settings;
mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use normas_core::{
  jurisdiction::Jurisdiction,
  regulation::{Category, NewRegulation, RegistrationNumber, Regulation, RegulationKind},
  store::RegulationStore,
};
use normas_store_sqlite::SqliteStore;
use settings::Settings;
use shell::Shell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "normas", version, about = "Registro de normativas legales")]
struct Cli {
  /// Path to a TOML config file (`store_path`).
  #[arg(short, long, value_name = "FILE", default_value = "normas.toml")]
  config: PathBuf,

  /// SQLite database file; overrides the config file and `NORMAS_STORE_PATH`.
  #[arg(long, value_name = "PATH")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Run the interactive menu (default).
  Shell,

  /// Register a new regulation and print its registration number.
  Add {
    #[arg(long, value_parser = RegulationKind::parse)]
    kind:         RegulationKind,
    #[arg(long)]
    number:       String,
    #[arg(long)]
    date:         String,
    #[arg(long)]
    description:  String,
    #[arg(long, value_parser = Category::parse)]
    category:     Category,
    /// `Nacional` or `Provincial` (case-insensitive).
    #[arg(long)]
    jurisdiction: String,
    /// Comma-separated keywords.
    #[arg(long, default_value = "")]
    keywords:     String,
  },

  /// Regulations tagged with any of the given keywords (exact match).
  Search {
    #[arg(required = true)]
    keywords: Vec<String>,
    #[arg(long)]
    json:     bool,
  },

  /// Regulations with the given official number.
  Find {
    number: String,
    #[arg(long)]
    json:   bool,
  },

  /// Every regulation.
  List {
    #[arg(long)]
    json: bool,
  },

  /// Replace the description of a regulation.
  UpdateDescription {
    registration: RegistrationNumber,
    description:  String,
  },

  /// Delete a regulation and its keywords.
  Delete { registration: RegistrationNumber },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so they never interleave with the menu on stdout.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let store_path = match cli.db {
    Some(path) => settings::expand_tilde(&path),
    None => Settings::load(&cli.config)?.store_path,
  };

  let existed = store_path.exists();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command.unwrap_or(Command::Shell) {
    Command::Shell => {
      if existed {
        println!("Base de datos existente. Conectado a la base de datos.");
      } else {
        println!("Base de datos creada y tablas creadas.");
      }
      let stdin = tokio::io::BufReader::new(tokio::io::stdin());
      Shell::new(&store, stdin, tokio::io::stdout()).run().await?;
    }

    Command::Add {
      kind,
      number,
      date,
      description,
      category,
      jurisdiction,
      keywords,
    } => {
      let Some(jurisdiction) = Jurisdiction::parse_input(&jurisdiction) else {
        bail!("invalid jurisdiction {jurisdiction:?}: expected Nacional or Provincial");
      };
      let registration = store
        .insert_regulation(NewRegulation {
          kind,
          number,
          date,
          description,
          category,
          jurisdiction_id: jurisdiction.id().to_owned(),
          keywords: input::split_keywords(&keywords),
        })
        .await
        .context("failed to insert regulation")?;
      println!("{registration}");
    }

    Command::Search { keywords, json } => {
      let found = store
        .search_by_keywords(&keywords)
        .await
        .context("keyword search failed")?;
      print_regulations(&found, json)?;
    }

    Command::Find { number, json } => {
      let found = store
        .search_by_number(&number)
        .await
        .context("number search failed")?;
      print_regulations(&found, json)?;
    }

    Command::List { json } => {
      let all = store.list_all().await.context("listing failed")?;
      print_regulations(&all, json)?;
    }

    Command::UpdateDescription { registration, description } => {
      let changed = store
        .update_description(registration, description)
        .await
        .context("failed to update description")?;
      if !changed {
        tracing::warn!(registration, "no regulation with that registration number");
      }
    }

    Command::Delete { registration } => {
      let removed = store
        .delete_regulation(registration)
        .await
        .context("failed to delete regulation")?;
      if !removed {
        tracing::warn!(registration, "no regulation with that registration number");
      }
    }
  }

  Ok(())
}

fn print_regulations(regulations: &[Regulation], json: bool) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(regulations)?);
  } else {
    print!("{}", render::regulations(regulations));
  }
  Ok(())
}
