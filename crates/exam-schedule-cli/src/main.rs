//! `examsched` CLI: build per-person exam session indices and export them
//! as `.ics` calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Build the student/proctor JSON and name lists from a schedule export
//! examsched build input.csv students.json student-names.txt proctors.json proctor-names.txt
//!
//! # Same, filling blank room/proctor cells from the row above first
//! examsched build --fill-down input.csv students.json student-names.txt proctors.json proctor-names.txt
//!
//! # Export one person's calendar
//! examsched export-ics student students.json "Student Name" student.ics
//! examsched export-ics proctor proctors.json "Proctor Name" proctor.ics --include-roster
//!
//! # Look up a person, or list every name in an index
//! examsched show proctor proctors.json "Proctor Name"
//! examsched names proctors.json
//!
//! # Only fill down blank cells
//! examsched fill-down input.csv filled.csv
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for pipeline counters.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use exam_schedule::backfill::{fill_down, FILL_DOWN_COLUMNS};
use exam_schedule::display::session_line;
use exam_schedule::{serialize_calendar, ExportOptions, PersonIndex, Role, ScheduleIndex, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "examsched",
    version,
    about = "Exam schedule indexer and calendar exporter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Student,
    Proctor,
}

impl From<Kind> for Role {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Student => Role::Student,
            Kind::Proctor => Role::Proctor,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build session indices and name lists from a schedule CSV
    Build {
        /// Schedule export (CSV with a header row)
        input: String,
        /// Output: sessions by student (JSON)
        students_json: String,
        /// Output: sorted student names, one per line
        student_names: String,
        /// Output: merged sessions by proctor (JSON)
        proctors_json: String,
        /// Output: sorted proctor names, one per line
        proctor_names: String,
        /// Fill blank location/minutes/room/proctor cells from the row above
        #[arg(long)]
        fill_down: bool,
    },
    /// Export one person's sessions as an iCalendar file
    ExportIcs {
        /// Which index the sessions file holds (used in the calendar title)
        kind: Kind,
        /// Sessions JSON written by `build`
        sessions: String,
        /// Person to export
        name: String,
        /// Output .ics file
        output: String,
        /// Include the full student roster in each event description
        #[arg(long)]
        include_roster: bool,
        /// IANA timezone for event times
        #[arg(long)]
        timezone: Option<String>,
        /// Domain part of event UIDs
        #[arg(long)]
        uid_namespace: Option<String>,
        /// Calendar display name (defaults to "<kind>: <name>")
        #[arg(long)]
        calendar_name: Option<String>,
        /// JSON file with export options; flags override its values
        #[arg(long)]
        options: Option<String>,
    },
    /// Print one person's sessions
    Show {
        kind: Kind,
        /// Sessions JSON written by `build`
        sessions: String,
        name: String,
    },
    /// Print every name in a sessions file, sorted
    Names {
        /// Sessions JSON written by `build`
        sessions: String,
    },
    /// Fill blank location/minutes/room/proctor cells from the row above
    FillDown {
        input: String,
        output: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            students_json,
            student_names,
            proctors_json,
            proctor_names,
            fill_down: backfill,
        } => {
            let mut table = read_table(&input)?;
            if backfill {
                fill_down(&mut table.rows, &FILL_DOWN_COLUMNS);
            }

            let index = ScheduleIndex::build(table.rows);

            write_output(&students_json, &index.students.to_json()?)?;
            write_output(&student_names, &index.students.name_list())?;
            write_output(&proctors_json, &index.proctors.to_json()?)?;
            write_output(&proctor_names, &index.proctors.name_list())?;

            info!(
                students = index.students.len(),
                proctors = index.proctors.len(),
                "wrote derived storage"
            );
        }
        Commands::ExportIcs {
            kind,
            sessions,
            name,
            output,
            include_roster,
            timezone,
            uid_namespace,
            calendar_name,
            options,
        } => {
            let index = read_index(&sessions)?;
            let found = index
                .lookup(&name)
                .with_context(|| format!("Cannot export calendar from {}", sessions))?;

            let mut export = match options {
                Some(path) => read_options(&path)?,
                None => ExportOptions::new(format!("{}: {}", Role::from(kind), name)),
            };
            if let Some(title) = calendar_name {
                export.calendar_name = title;
            }
            if let Some(tz) = timezone {
                export.timezone = tz;
            }
            if let Some(ns) = uid_namespace {
                export.uid_namespace = ns;
            }
            export.include_roster |= include_roster;

            let ics = serialize_calendar(&name, found, &export)
                .with_context(|| format!("Failed to build calendar for {}", name))?;
            write_output(&output, &ics)?;
            println!("Wrote {}", output);
        }
        Commands::Show {
            kind,
            sessions,
            name,
        } => {
            let index = read_index(&sessions)?;
            let found = index.lookup(&name)?;
            println!("{} ({}): {} session(s)", name, Role::from(kind), found.len());
            for session in found {
                println!("  {}", session_line(session));
            }
        }
        Commands::Names { sessions } => {
            let index = read_index(&sessions)?;
            println!("{}", index.name_list());
        }
        Commands::FillDown { input, output } => {
            let mut table = read_table(&input)?;
            let filled = fill_down(&mut table.rows, &FILL_DOWN_COLUMNS);
            let csv = table.to_csv_string()?;
            write_output(&output, &csv)?;
            info!(filled, "filled down blank cells");
        }
    }

    Ok(())
}

fn read_table(path: &str) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
    Table::read(BufReader::new(file)).with_context(|| format!("Failed to parse CSV: {}", path))
}

fn read_index(path: &str) -> Result<PersonIndex> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    PersonIndex::from_json(&json).with_context(|| format!("Failed to parse sessions: {}", path))
}

fn read_options(path: &str) -> Result<ExportOptions> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse options: {}", path))
}

fn write_output(path: &str, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path))
}
