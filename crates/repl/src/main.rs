mod commands;

use airline::{Airline, SeatAssignment, SeatRequest};
use anyhow::{Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use commands::{Command, HELP, REPORTS};
use common::{
    Config, DbError, RecordBatch, Tabular,
    pretty::{self, TableStyleKind},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use std::path::PathBuf;
use storage::Store;
use tracing::error;
use tracing_subscriber::EnvFilter;
use types::EntityKind;

const DEFAULT_DB_PATH: &str = "airline.db";
const HISTORY_FILE: &str = ".airline-repl-history";

#[derive(Parser, Debug)]
#[command(
    name = "airline-repl",
    about = "Interactive console for airline operations records"
)]
struct Args {
    /// SQLite database file, created if missing
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,
    /// Rows per page when showing tables
    #[arg(long, default_value_t = 10)]
    page_size: usize,
    /// Table rendering style
    #[arg(long, value_enum, default_value_t = CliTableStyle::Modern)]
    style: CliTableStyle,
    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
    /// Run one command and exit instead of starting the console
    #[arg(short = 'e', long = "execute")]
    execute: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliTableStyle {
    Modern,
    Ascii,
    Plain,
}

impl From<CliTableStyle> for TableStyleKind {
    fn from(value: CliTableStyle) -> Self {
        match value {
            CliTableStyle::Modern => TableStyleKind::Modern,
            CliTableStyle::Ascii => TableStyleKind::Ascii,
            CliTableStyle::Plain => TableStyleKind::Plain,
        }
    }
}

enum Outcome {
    Continue,
    Exit,
}

struct App<'c> {
    airline: Airline<'c>,
    editor: Option<DefaultEditor>,
    style: TableStyleKind,
    page_size: usize,
    json: bool,
}

impl<'c> App<'c> {
    fn new(store: &'c Store, args: &Args) -> Result<Self> {
        let airline = Airline::new(store)?;
        airline.create_tables()?;
        Ok(Self {
            airline,
            editor: None,
            style: args.style.into(),
            page_size: args.page_size,
            json: args.json,
        })
    }

    fn run_once(&mut self, line: &str) -> Result<()> {
        if let Some(command) = Command::parse(line)? {
            self.execute(command)?;
        }
        Ok(())
    }

    fn run_repl(&mut self, history_path: PathBuf) -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
        }
        self.editor = Some(editor);

        println!("Connected. Type `help` for commands.");

        let result = loop {
            let line = match self.read_line("airline> ") {
                Ok(line) => line,
                Err(err) => match err.downcast_ref::<ReadlineError>() {
                    Some(ReadlineError::Interrupted) => {
                        println!("^C");
                        continue;
                    }
                    Some(ReadlineError::Eof) => {
                        println!("Goodbye.");
                        break Ok(());
                    }
                    _ => break Err(err),
                },
            };
            if let Some(editor) = self.editor.as_mut() {
                editor.add_history_entry(line.as_str()).ok();
            }

            match self.handle_line(&line) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Exit) => {
                    println!("Goodbye.");
                    break Ok(());
                }
                Err(err) if is_fatal(&err) => {
                    error!(error = %err, "ending session");
                    eprintln!("fatal: {err}");
                    break Err(err);
                }
                Err(err) => eprintln!("error: {err}"),
            }
        };

        if let Some(mut editor) = self.editor.take() {
            let _ = editor.save_history(&history_path);
        }
        result
    }

    fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        match Command::parse(line)? {
            Some(Command::Quit) => Ok(Outcome::Exit),
            Some(command) => {
                self.execute(command)?;
                Ok(Outcome::Continue)
            }
            None => Ok(Outcome::Continue),
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Tables => self.show_tables(),
            Command::List(kind) => {
                let batch = self.airline.list(kind)?;
                self.show(&batch)
            }
            Command::Find { kind, label, value } => {
                let label = self.resolve_label(kind, &label)?;
                let batch = self.airline.entity_table(kind)?.get_batch(label, &value)?;
                self.show(&batch)
            }
            Command::Insert(kind) => self.insert(kind),
            Command::Update {
                kind,
                id,
                label,
                value,
            } => self.update(kind, id, label, value),
            Command::Delete { kind, label, value } => {
                let label = self.resolve_label(kind, &label)?;
                let batch = self
                    .airline
                    .entity_table(kind)?
                    .delete_and_return_batch(label, &value)?;
                self.show(&batch)
            }
            Command::AssignPilot { flight, pilot } => {
                let row = self.airline.assign_pilot(flight, pilot)?;
                self.show_records(&[row])
            }
            Command::AssignPassenger {
                flight,
                customer,
                seat,
            } => {
                let request = seat.map_or(SeatRequest::Next, SeatRequest::Exact);
                match self.airline.assign_passenger(flight, customer, request)? {
                    SeatAssignment::Seated(row) => self.show_records(&[row]),
                    SeatAssignment::FlightFull => {
                        println!("Flight {flight} is full.");
                        Ok(())
                    }
                }
            }
            Command::UnassignPilot { flight, pilot } => {
                let remaining = self.airline.unassign_pilot(flight, pilot)?;
                self.show_records(&remaining)
            }
            Command::UnassignPassenger { flight, customer } => {
                let remaining = self.airline.unassign_passenger(flight, customer)?;
                self.show_records(&remaining)
            }
            Command::Reseat {
                flight,
                customer,
                seat,
            } => {
                let request = seat.map_or(SeatRequest::Next, SeatRequest::Exact);
                match self.airline.reassign_seat(flight, customer, request)? {
                    SeatAssignment::Seated(row) => self.show_records(&[row]),
                    SeatAssignment::FlightFull => {
                        println!("Flight {flight} has no free seat.");
                        Ok(())
                    }
                }
            }
            Command::Crew(flight) => {
                let pilots = self.airline.crew(flight)?;
                self.show_records(&pilots)
            }
            Command::Passengers(flight) => {
                let customers = self.airline.passengers(flight)?;
                self.show_records(&customers)
            }
            Command::Stats { report, argument } => match report {
                Some(report) => self.stats(report, argument),
                None => {
                    println!("{REPORTS}");
                    Ok(())
                }
            },
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    /// Match a user-typed column name against the table's labels, ignoring
    /// case.
    fn resolve_label(&self, kind: EntityKind, typed: &str) -> Result<&'static str> {
        self.airline
            .schema(kind)
            .column_choices(true)
            .into_iter()
            .find(|label| label.eq_ignore_ascii_case(typed))
            .ok_or_else(|| anyhow!("table {kind} has no column '{typed}'"))
    }

    fn show_tables(&mut self) -> Result<()> {
        let mut batch = RecordBatch::new(vec![
            "Table".into(),
            "Columns".into(),
            "Settable".into(),
        ]);
        for kind in EntityKind::ALL {
            let schema = self.airline.schema(kind);
            batch.push_row(vec![
                kind.table_name().to_string(),
                schema.column_choices(true).join(", "),
                schema.column_choices(false).join(", "),
            ]);
        }
        self.show(&batch)
    }

    fn insert(&mut self, kind: EntityKind) -> Result<()> {
        let table = self.airline.entity_table(kind)?;
        let columns: Vec<_> = table
            .schema()
            .settable_columns()
            .map(|(label, column)| (label, column.insert_prompt.unwrap_or(label)))
            .collect();

        let mut values = Vec::with_capacity(columns.len());
        for (label, prompt) in columns {
            match self.ask_valid(kind, label, prompt)? {
                Some(value) => values.push(value),
                None => return Ok(()),
            }
        }

        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let batch = self.airline.entity_table(kind)?.insert_batch(&refs)?;
        self.show(&batch)
    }

    fn update(
        &mut self,
        kind: EntityKind,
        id: i64,
        label: Option<String>,
        value: Option<String>,
    ) -> Result<()> {
        self.airline.entity_table(kind)?;
        self.airline.require(kind, id)?;

        let label = match label {
            Some(typed) => self.resolve_label(kind, &typed)?,
            None => {
                let choices = self.airline.schema(kind).column_choices(false);
                let mut menu = String::from("Which column do you want to change?");
                for (idx, choice) in choices.iter().enumerate() {
                    menu.push_str(&format!("\n    {}. {choice}", idx + 1));
                }
                println!("{menu}");
                let Some(picked) = self.ask("column> ")? else {
                    return Ok(());
                };
                picked
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| choices.get(idx).copied())
                    .map_or_else(|| self.resolve_label(kind, &picked), Ok)?
            }
        };

        let value = match value {
            Some(value) => {
                self.airline.validate(kind, label, &value)?;
                value
            }
            None => {
                let prompt = self
                    .airline
                    .schema(kind)
                    .column(label)?
                    .update_prompt
                    .unwrap_or(label);
                match self.ask_valid(kind, label, prompt)? {
                    Some(value) => value,
                    None => return Ok(()),
                }
            }
        };

        let batch = self.airline.update(kind, id, label, &value)?;
        self.show(&batch)
    }

    fn stats(&mut self, report: u8, argument: Option<String>) -> Result<()> {
        let argument = match report {
            2 => Some(self.argument(argument, "Which destination?")?),
            4 | 5 => Some(self.argument(argument, "What's the ID of the pilot?")?),
            10 | 11 => Some(self.argument(argument, "What's the ID of the flight?")?),
            _ => None,
        };
        let as_of = chrono::Local::now()
            .format(catalog::validate::DATE_TIME_FORMAT)
            .to_string();
        let stats = self.airline.stats();

        let batch = match (report, argument.as_deref()) {
            (1, _) => RecordBatch::from_records(&stats.flights_per_week()?),
            (2, Some(destination)) => {
                RecordBatch::from_records(&stats.flights_per_month(destination)?)
            }
            (3, _) => RecordBatch::from_records(&stats.busiest_weekdays()?),
            (4, Some(raw)) => {
                let pilot = parse_id(raw)?;
                match stats.pilot_air_time(pilot, &as_of)? {
                    Some(time) => RecordBatch::from_records(&[time]),
                    None => {
                        println!("Pilot {pilot} has not completed any flights.");
                        return Ok(());
                    }
                }
            }
            (5, Some(raw)) => RecordBatch::from_records(&stats.pilot_weekdays(parse_id(raw)?)?),
            (6, _) => RecordBatch::from_records(&stats.popular_destinations()?),
            (7, _) => RecordBatch::from_records(&stats.upcoming_occupancy(&as_of)?),
            (8, _) => RecordBatch::from_records(&stats.pilots_by_flights()?),
            (9, _) => RecordBatch::from_records(&stats.customers_by_flights()?),
            (10, Some(raw)) => RecordBatch::from_records(&[stats.flight_load(parse_id(raw)?)?]),
            (11, Some(raw)) => {
                RecordBatch::from_records(&[stats.flight_crew_size(parse_id(raw)?)?])
            }
            (other, _) => bail!("report number must be between 1 and 11, got {other}"),
        };
        self.show(&batch)
    }

    fn argument(&mut self, given: Option<String>, prompt: &str) -> Result<String> {
        match given {
            Some(value) => Ok(value),
            None => {
                println!("{prompt}");
                self.ask("> ")?.ok_or_else(|| anyhow!("cancelled"))
            }
        }
    }

    /// Prompt until the value passes the column's validator. `None` when the
    /// user enters nothing.
    fn ask_valid(&mut self, kind: EntityKind, label: &str, prompt: &str) -> Result<Option<String>> {
        loop {
            println!("{prompt}");
            let Some(raw) = self.ask("> ")? else {
                return Ok(None);
            };
            match self.airline.validate(kind, label, &raw) {
                Ok(()) => return Ok(Some(raw)),
                Err(DbError::Validation(message)) => eprintln!("{message} Press Enter to cancel."),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// One trimmed line from the user, `None` if it is empty.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let line = self.read_line(prompt)?;
        let trimmed = line.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let editor = self
            .editor
            .as_mut()
            .ok_or_else(|| anyhow!("this command needs the interactive console"))?;
        Ok(editor.readline(prompt)?)
    }

    fn show_records<T: Tabular>(&mut self, records: &[T]) -> Result<()> {
        self.show(&RecordBatch::from_records(records))
    }

    fn show(&mut self, batch: &RecordBatch) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(batch)?);
            return Ok(());
        }
        if batch.is_empty() {
            println!("No rows.");
            return Ok(());
        }

        let pages = pretty::paginate(batch, self.page_size, self.style);
        let total = pages.len();
        for (idx, page) in pages.into_iter().enumerate() {
            println!("{page}");
            if idx + 1 < total && self.editor.is_some() {
                let more = self.read_line(&format!(
                    "-- page {} of {total}, Enter for more, q to stop -- ",
                    idx + 1
                ))?;
                if more.trim().eq_ignore_ascii_case("q") {
                    break;
                }
            }
        }
        Ok(())
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    catalog::validate::parse_unsigned(raw.trim())
        .ok_or_else(|| anyhow!("an ID must be a non negative integer, got '{raw}'"))
}

fn is_fatal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbError>().is_some_and(DbError::is_fatal)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::builder()
        .db_path(args.db.clone())
        .page_size(args.page_size)
        .build();

    let store = Store::open(&config)?;
    let result = {
        let mut app = App::new(&store, &args)?;
        match &args.execute {
            Some(line) => app.run_once(line),
            None => {
                let history_path = config
                    .db_path
                    .parent()
                    .map(|dir| dir.join(HISTORY_FILE))
                    .unwrap_or_else(|| PathBuf::from(HISTORY_FILE));
                app.run_repl(history_path)
            }
        }
    };
    store.close()?;
    result
}
