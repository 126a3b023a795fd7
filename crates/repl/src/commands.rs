//! Line parsing for the console.

use anyhow::{Result, anyhow, bail};
use catalog::validate::parse_unsigned;
use types::{EntityKind, RowId, SeatNumber};

pub const HELP: &str = "\
Available commands:
  tables                                   List tables and their columns
  list <table>                             Show every row
  find <table> <column> <value>            Rows whose column equals value
  insert <table>                           Add a row, prompting for each column
  update <table> <id> [column] [value]     Change one column of a row
  delete <table> <column> <value>          Delete matching rows
  assign-pilot <flight> <pilot>            Put a pilot on a flight
  assign-passenger <flight> <customer> [seat]
                                           Book a customer, next free seat by default
  unassign-pilot <flight> <pilot>          Take a pilot off a flight
  unassign-passenger <flight> <customer>   Take a passenger off a flight
  reseat <flight> <customer> [seat]        Move a passenger, next free seat by default
  crew <flight>                            Pilots on a flight
  passengers <flight>                      Customers on a flight
  stats <1-11> [argument]                  Reports (run `stats` for the list)
  help                                     Show this help
  quit                                     Exit

Column names with spaces must be quoted, e.g. find customers \"First Name\" Grace";

pub const REPORTS: &str = "\
Reports:
   1. Number of flights per week
   2. Number of flights to a destination per month   (destination)
   3. Days of the week ranked by customers
   4. A pilot's total time in the air                 (pilot id)
   5. A pilot's days of the week ranked by flights    (pilot id)
   6. Destinations ranked by popularity
   7. Upcoming flights ranked by seats taken
   8. Pilots ranked by number of flights
   9. Customers ranked by number of flights
  10. Number of passengers on a flight                (flight id)
  11. Number of pilots on a flight                    (flight id)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tables,
    List(EntityKind),
    Find {
        kind: EntityKind,
        label: String,
        value: String,
    },
    Insert(EntityKind),
    Update {
        kind: EntityKind,
        id: RowId,
        label: Option<String>,
        value: Option<String>,
    },
    Delete {
        kind: EntityKind,
        label: String,
        value: String,
    },
    AssignPilot {
        flight: RowId,
        pilot: RowId,
    },
    AssignPassenger {
        flight: RowId,
        customer: RowId,
        seat: Option<SeatNumber>,
    },
    UnassignPilot {
        flight: RowId,
        pilot: RowId,
    },
    UnassignPassenger {
        flight: RowId,
        customer: RowId,
    },
    Reseat {
        flight: RowId,
        customer: RowId,
        seat: Option<SeatNumber>,
    },
    Crew(RowId),
    Passengers(RowId),
    Stats {
        report: Option<u8>,
        argument: Option<String>,
    },
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let words = split_words(line)?;
        let Some((head, rest)) = words.split_first() else {
            return Ok(None);
        };
        let mut args = Args {
            command: head.as_str(),
            rest,
            pos: 0,
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "tables" => Command::Tables,
            "list" => Command::List(args.table()?),
            "find" => Command::Find {
                kind: args.table()?,
                label: args.word("column")?,
                value: args.remainder("value")?,
            },
            "insert" => Command::Insert(args.table()?),
            "update" => Command::Update {
                kind: args.table()?,
                id: args.id("id")?,
                label: args.optional(),
                value: args.remainder("value").ok(),
            },
            "delete" => Command::Delete {
                kind: args.table()?,
                label: args.word("column")?,
                value: args.remainder("value")?,
            },
            "assign-pilot" => Command::AssignPilot {
                flight: args.id("flight id")?,
                pilot: args.id("pilot id")?,
            },
            "assign-passenger" => Command::AssignPassenger {
                flight: args.id("flight id")?,
                customer: args.id("customer id")?,
                seat: args.optional_id("seat number")?,
            },
            "unassign-pilot" => Command::UnassignPilot {
                flight: args.id("flight id")?,
                pilot: args.id("pilot id")?,
            },
            "unassign-passenger" => Command::UnassignPassenger {
                flight: args.id("flight id")?,
                customer: args.id("customer id")?,
            },
            "reseat" => Command::Reseat {
                flight: args.id("flight id")?,
                customer: args.id("customer id")?,
                seat: args.optional_id("seat number")?,
            },
            "crew" => Command::Crew(args.id("flight id")?),
            "passengers" => Command::Passengers(args.id("flight id")?),
            "stats" => {
                let report = match args.optional() {
                    Some(raw) => {
                        let n = parse_number(&raw, "report number")?;
                        if !(1..=11).contains(&n) {
                            bail!("report number must be between 1 and 11");
                        }
                        Some(n as u8)
                    }
                    None => None,
                };
                Command::Stats {
                    report,
                    argument: args.remainder("argument").ok(),
                }
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}' (try `help`)"),
        };

        args.finish()?;
        Ok(Some(command))
    }
}

struct Args<'a> {
    command: &'a str,
    rest: &'a [String],
    pos: usize,
}

impl Args<'_> {
    fn optional(&mut self) -> Option<String> {
        let word = self.rest.get(self.pos).cloned();
        if word.is_some() {
            self.pos += 1;
        }
        word
    }

    fn word(&mut self, what: &str) -> Result<String> {
        self.optional()
            .ok_or_else(|| anyhow!("{} needs a {what}", self.command))
    }

    /// Every remaining word joined by single spaces.
    fn remainder(&mut self, what: &str) -> Result<String> {
        if self.pos >= self.rest.len() {
            bail!("{} needs a {what}", self.command);
        }
        let joined = self.rest[self.pos..].join(" ");
        self.pos = self.rest.len();
        Ok(joined)
    }

    fn table(&mut self) -> Result<EntityKind> {
        let name = self.word("table")?;
        EntityKind::from_table_name(&name)
            .ok_or_else(|| anyhow!("unknown table '{name}' (try `tables`)"))
    }

    fn id(&mut self, what: &str) -> Result<RowId> {
        let raw = self.word(what)?;
        parse_number(&raw, what)
    }

    fn optional_id(&mut self, what: &str) -> Result<Option<i64>> {
        self.optional()
            .map(|raw| parse_number(&raw, what))
            .transpose()
    }

    fn finish(&self) -> Result<()> {
        match self.rest.get(self.pos) {
            Some(extra) => bail!("unexpected argument '{extra}' for {}", self.command),
            None => Ok(()),
        }
    }
}

fn parse_number(raw: &str, what: &str) -> Result<i64> {
    parse_unsigned(raw).ok_or_else(|| anyhow!("{what} must be a non negative integer, got '{raw}'"))
}

/// Split on whitespace, keeping double-quoted runs together.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_words(r#"find customers "First Name" Grace"#).unwrap(),
            vec!["find", "customers", "First Name", "Grace"]
        );
        assert_eq!(split_words(r#"find x """#).unwrap(), vec!["find", "x", ""]);
        assert!(split_words(r#"find "oops"#).is_err());
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn parses_table_commands() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(
            Command::parse("LIST Flights").unwrap(),
            Some(Command::List(EntityKind::Flight))
        );
        assert_eq!(
            Command::parse("find flights Destination New York").unwrap(),
            Some(Command::Find {
                kind: EntityKind::Flight,
                label: "Destination".into(),
                value: "New York".into(),
            })
        );
        assert_eq!(
            Command::parse("update pilots 3").unwrap(),
            Some(Command::Update {
                kind: EntityKind::Pilot,
                id: 3,
                label: None,
                value: None,
            })
        );
        assert_eq!(
            Command::parse(r#"update pilots 3 "Last Name" Smith"#).unwrap(),
            Some(Command::Update {
                kind: EntityKind::Pilot,
                id: 3,
                label: Some("Last Name".into()),
                value: Some("Smith".into()),
            })
        );
    }

    #[test]
    fn parses_assignment_commands() {
        assert_eq!(
            Command::parse("assign-passenger 1 2").unwrap(),
            Some(Command::AssignPassenger {
                flight: 1,
                customer: 2,
                seat: None,
            })
        );
        assert_eq!(
            Command::parse("assign-passenger 1 2 14").unwrap(),
            Some(Command::AssignPassenger {
                flight: 1,
                customer: 2,
                seat: Some(14),
            })
        );
        assert_eq!(
            Command::parse("reseat 1 2").unwrap(),
            Some(Command::Reseat {
                flight: 1,
                customer: 2,
                seat: None,
            })
        );
        assert_eq!(
            Command::parse("reseat 1 2 7").unwrap(),
            Some(Command::Reseat {
                flight: 1,
                customer: 2,
                seat: Some(7),
            })
        );
        assert_eq!(
            Command::parse("stats 2 Lisbon").unwrap(),
            Some(Command::Stats {
                report: Some(2),
                argument: Some("Lisbon".into()),
            })
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("launch").is_err());
        assert!(Command::parse("list hangars").is_err());
        assert!(Command::parse("crew -1").is_err());
        assert!(Command::parse("crew 1 2").is_err());
        assert!(Command::parse("reseat 1").is_err());
        assert!(Command::parse("reseat 1 2 x").is_err());
        assert!(Command::parse("stats 12").is_err());
    }
}
