//! Student score book.
//!
//! Records three subject scores per student in a local SQLite file and
//! recommends a faculty track (Medicine, Engineering, Language) from them.
//! This binary is a thin presentation layer over [`scorebook::form`].

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scorebook::core::types::{RecordId, ScoreRecord};
use scorebook::core::validation::RawFields;
use scorebook::exit_codes;
use scorebook::form::{self, FormError};
use scorebook::io::config::{DEFAULT_CONFIG_FILE, ScorebookConfig, load_config, write_config};
use scorebook::io::store::SqliteScoreStore;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "scorebook",
    version,
    about = "Record student scores and recommend a faculty track"
)]
struct Cli {
    /// Config file holding the database location.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// SQLite database file (overrides `database_path` from the config).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file and create the database.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Add a new student record.
    Submit(SubmitArgs),
    /// Edit an existing record; omitted fields keep their stored values.
    Update {
        /// Record id, as shown by `list`.
        id: i64,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Delete a record.
    Delete {
        /// Record id, as shown by `list`.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show one record as editable form fields.
    Show {
        /// Record id, as shown by `list`.
        id: i64,
    },
    /// List all records, newest first.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    biology: String,
    #[arg(long)]
    physics: String,
    #[arg(long)]
    english: String,
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    biology: Option<String>,
    #[arg(long)]
    physics: Option<String>,
    #[arg(long)]
    english: Option<String>,
}

impl UpdateArgs {
    /// Overlay the provided values onto the pre-filled form.
    fn apply(self, mut raw: RawFields) -> RawFields {
        if let Some(name) = self.name {
            raw.student_name = name;
        }
        if let Some(biology) = self.biology {
            raw.biology = biology;
        }
        if let Some(physics) = self.physics {
            raw.physics = physics;
        }
        if let Some(english) = self.english {
            raw.english = english;
        }
        raw
    }
}

fn main() {
    if let Err(err) = scorebook::logging::init() {
        eprintln!("warning: {err:#}");
    }
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("error: {:#}", err);
            exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<FormError>() {
        Some(form_err) => form_err.exit_code(),
        None => exit_codes::STORAGE,
    }
}

fn run() -> Result<()> {
    let Cli {
        config,
        db,
        command,
    } = Cli::parse();
    match command {
        Command::Init { force } => cmd_init(&config, db, force),
        Command::Submit(args) => cmd_submit(&mut open_store(&config, db)?, args),
        Command::Update { id, fields } => {
            cmd_update(&mut open_store(&config, db)?, RecordId(id), fields)
        }
        Command::Delete { id, yes } => {
            cmd_delete(&mut open_store(&config, db)?, RecordId(id), yes)
        }
        Command::Show { id } => cmd_show(&open_store(&config, db)?, RecordId(id)),
        Command::List { json } => cmd_list(&open_store(&config, db)?, json),
    }
}

fn open_store(config_path: &Path, db_override: Option<PathBuf>) -> Result<SqliteScoreStore> {
    let db_path = database_path(config_path, db_override)?;
    SqliteScoreStore::open(&db_path)
}

fn database_path(config_path: &Path, db_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = db_override {
        return Ok(path);
    }
    let cfg = load_config(config_path).context("load config")?;
    let path = cfg.resolve_database_path(config_path);
    debug!(path = %path.display(), "database resolved from config");
    Ok(path)
}

fn cmd_init(config_path: &Path, db_override: Option<PathBuf>, force: bool) -> Result<()> {
    if force || !config_path.exists() {
        let mut cfg = ScorebookConfig::default();
        if let Some(db) = &db_override {
            // Absolute: later runs resolve relative paths against the config's directory.
            cfg.database_path = std::path::absolute(db)
                .with_context(|| format!("resolve database path {}", db.display()))?;
        }
        write_config(config_path, &cfg)?;
        println!("wrote {}", config_path.display());
    }
    let db_path = database_path(config_path, db_override)?;
    SqliteScoreStore::open(&db_path)?;
    println!("database ready at {}", db_path.display());
    Ok(())
}

fn cmd_submit(store: &mut SqliteScoreStore, args: SubmitArgs) -> Result<()> {
    let raw = RawFields::new(args.name, args.biology, args.physics, args.english);
    let submitted = form::submit(store, &raw)?;
    println!(
        "saved record {} (recommendation: {})",
        submitted.id, submitted.track
    );
    Ok(())
}

fn cmd_update(store: &mut SqliteScoreStore, id: RecordId, args: UpdateArgs) -> Result<()> {
    let selected = form::select(&*store, id)?;
    let selection = selected.selection;
    let raw = args.apply(selected.fields);
    let track = form::update(store, selection.require()?, &raw)?;
    println!("updated record {id} (recommendation: {track})");
    Ok(())
}

fn cmd_delete(store: &mut SqliteScoreStore, id: RecordId, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete record {id}? [y/N] "))? {
        println!("cancelled");
        return Ok(());
    }
    form::delete(store, id)?;
    println!("deleted record {id}");
    Ok(())
}

fn cmd_show(store: &SqliteScoreStore, id: RecordId) -> Result<()> {
    let selected = form::select(store, id)?;
    let fields = &selected.fields;
    println!("id: {id}");
    println!("name: {}", fields.student_name);
    println!("biology: {}", fields.biology);
    println!("physics: {}", fields.physics);
    println!("english: {}", fields.english);
    println!("recommendation: {}", selected.record.recommended_track);
    Ok(())
}

fn cmd_list(store: &SqliteScoreStore, json: bool) -> Result<()> {
    let records = form::refresh(store)?;
    if json {
        let payload = serde_json::to_string_pretty(&records).context("serialize records")?;
        println!("{payload}");
        return Ok(());
    }
    print!("{}", render_table(&records));
    Ok(())
}

fn render_table(records: &[ScoreRecord]) -> String {
    let name_width = records
        .iter()
        .map(|record| record.student_name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(4);
    let mut out = format!(
        "{:>4}  {:<name_width$}  {:>7}  {:>7}  {:>7}  {}\n",
        "ID", "Name", "Biology", "Physics", "English", "Track"
    );
    for record in records {
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>7}  {:>7}  {:>7}  {}\n",
            record.id,
            record.student_name,
            record.biology,
            record.physics,
            record.english,
            record.recommended_track
        ));
    }
    out
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorebook::core::types::Track;

    #[test]
    fn parse_submit() {
        let cli = Cli::parse_from([
            "scorebook",
            "submit",
            "--name",
            "Ana",
            "--biology",
            "90",
            "--physics",
            "70",
            "--english",
            "60",
        ]);
        match cli.command {
            Command::Submit(args) => {
                assert_eq!(args.name, "Ana");
                assert_eq!(args.english, "60");
            }
            _ => panic!("expected submit"),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn parse_delete_with_global_db() {
        let cli = Cli::parse_from(["scorebook", "delete", "7", "--yes", "--db", "x.db"]);
        assert!(matches!(cli.command, Command::Delete { id: 7, yes: true }));
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn update_args_overlay_only_given_fields() {
        let args = UpdateArgs {
            name: None,
            biology: Some("99".to_string()),
            physics: None,
            english: None,
        };
        let raw = args.apply(RawFields::new("Ana", "90", "70", "60"));
        assert_eq!(raw, RawFields::new("Ana", "99", "70", "60"));
    }

    #[test]
    fn table_lists_rows_in_given_order() {
        let records = vec![
            ScoreRecord {
                id: RecordId(2),
                student_name: "Budi".to_string(),
                biology: 10.0,
                physics: 95.5,
                english: 20.0,
                recommended_track: Track::Engineering,
            },
            ScoreRecord {
                id: RecordId(1),
                student_name: "Ana".to_string(),
                biology: 90.0,
                physics: 70.0,
                english: 60.0,
                recommended_track: Track::Medicine,
            },
        ];
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  ID  Name"));
        assert!(lines[1].contains("Budi") && lines[1].ends_with("Engineering"));
        assert!(lines[2].contains("Ana") && lines[2].ends_with("Medicine"));
    }
}
