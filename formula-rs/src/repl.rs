//! The interactive mode: a small formula collection that lives for the length of the session.

use crate::{error::Error, output};
use formula_compute::similarity::compare;
use formula_compute::symbolic::CasEngine;
use formula_search::{find_similar, FormulaId, FormulaStore, FormulaUpdate, NewFormula, SearchOptions};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::str::FromStr;

/// The author recorded for formulas added in the REPL.
const REPL_AUTHOR: i64 = 1;

const HELP: &str = "\
commands:
  add <formula> # <legend> # <description>     store a formula
  update <id> <formula> [# <legend> [# <description>]]
                                                replace a stored formula
  delete <id>                                   remove a stored formula
  list                                          show the stored formulas
  find <formula>                                rank the stored formulas by similarity
  compare <formula> vs <formula>                compare two formulas
  help                                          show this message
  quit                                          leave
";

/// A command entered in the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        latex: String,
        legend: Option<String>,
        description: Option<String>,
    },
    Update {
        id: FormulaId,
        latex: String,
        legend: Option<String>,
        description: Option<String>,
    },
    Delete(FormulaId),
    List,
    Find(String),
    Compare(String, String),
    Help,
    Quit,
}

/// Splits `formula # legend # description`, dropping empty fields.
fn split_fields(rest: &str) -> (String, Option<String>, Option<String>) {
    let mut fields = rest.splitn(3, '#').map(str::trim);
    let latex = fields.next().unwrap_or_default().to_string();
    let mut next = || fields.next().filter(|field| !field.is_empty()).map(str::to_string);
    let legend = next();
    let description = next();
    (latex, legend, description)
}

fn parse_id(word: &str, usage: &str) -> Result<FormulaId, Error> {
    word.parse().map_err(|_| Error::Usage(usage.to_string()))
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "add" => {
                let (latex, legend, description) = split_fields(rest);
                Ok(Self::Add { latex, legend, description })
            },
            "update" => {
                let usage = "update <id> <formula> [# <legend> [# <description>]]";
                let (id, rest) = rest.split_once(char::is_whitespace)
                    .ok_or_else(|| Error::Usage(usage.to_string()))?;
                let (latex, legend, description) = split_fields(rest);
                Ok(Self::Update { id: parse_id(id, usage)?, latex, legend, description })
            },
            "delete" => Ok(Self::Delete(parse_id(rest, "delete <id>")?)),
            "list" => Ok(Self::List),
            "find" if !rest.is_empty() => Ok(Self::Find(rest.to_string())),
            "find" => Err(Error::Usage("find <formula>".to_string())),
            "compare" => match rest.split_once(" vs ") {
                Some((lhs, rhs)) => Ok(Self::Compare(lhs.trim().to_string(), rhs.trim().to_string())),
                None => Err(Error::Usage("compare <formula> vs <formula>".to_string())),
            },
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(Error::Usage(format!("unknown command `{}`, try `help`", name))),
        }
    }
}

/// The state of an interactive session.
pub struct Repl<'a> {
    engine: &'a CasEngine,
    options: &'a SearchOptions,
    json: bool,
    store: FormulaStore,
}

impl<'a> Repl<'a> {
    /// Creates a session with an empty formula store.
    pub fn new(engine: &'a CasEngine, options: &'a SearchOptions, json: bool) -> Self {
        Self { engine, options, json, store: FormulaStore::new() }
    }

    /// Runs a command, returning what should be printed. [`Command::Quit`] prints nothing; the
    /// caller is responsible for ending the session.
    pub fn execute(&mut self, command: Command) -> Result<String, Error> {
        match command {
            Command::Add { latex, legend, description } => {
                let mut new = NewFormula::new(latex, REPL_AUTHOR);
                new.legend = legend;
                new.description = description;
                let record = self.store.create(new).map_err(Error::Store)?;
                Ok(format!("added {}\n", output::record(record)))
            },
            Command::Update { id, latex, legend, description } => {
                let update = FormulaUpdate { latex, legend, description };
                let record = self.store.update(id, update).map_err(Error::Store)?;
                Ok(format!("updated {}\n", output::record(record)))
            },
            Command::Delete(id) => {
                let record = self.store.delete(id).map_err(Error::Store)?;
                Ok(format!("deleted {}\n", output::record(&record)))
            },
            Command::List if self.store.is_empty() => Ok("no formulas stored\n".to_string()),
            Command::List => Ok(self.store.list()
                .map(|record| output::record(record) + "\n")
                .collect()),
            Command::Find(query) => {
                let results = find_similar(self.engine, &self.store, &query, self.options)?;
                if self.json {
                    Ok(serde_json::to_string_pretty(&results)? + "\n")
                } else {
                    Ok(output::ranking(&results, self.store.len()))
                }
            },
            Command::Compare(lhs, rhs) => {
                let result = compare(self.engine, &lhs, &rhs, &self.options.compare)?;
                if self.json {
                    Ok(serde_json::to_string_pretty(&result)? + "\n")
                } else {
                    Ok(output::comparison(&result))
                }
            },
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// Reads and runs commands until `quit`, end of input, or an interrupt.
    pub fn run(&mut self) -> Result<(), Error> {
        let mut rl = DefaultEditor::new()?;
        println!("type `help` for a list of commands");

        loop {
            let input = match rl.readline("> ") {
                Ok(input) => input,
                Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
                Err(err) => return Err(err.into()),
            };
            if input.trim().is_empty() {
                continue;
            }

            rl.add_history_entry(&input)?;

            let result = input.parse::<Command>().and_then(|command| match command {
                Command::Quit => Ok(None),
                command => self.execute(command).map(Some),
            });
            match result {
                Ok(Some(output)) => print!("{}", output),
                Ok(None) => return Ok(()),
                Err(err) => {
                    if err.report_to_stderr("input").is_err() {
                        eprintln!("error: {}", err);
                    }
                },
            }
        }
    }
}
