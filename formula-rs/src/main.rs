mod error;
mod formulas;
mod output;
mod repl;

use clap::{ArgAction, Parser, Subcommand};
use error::Error;
use formula_compute::similarity::{compare, CompareOptions, DEFAULT_MIN_MATCH_SIZE};
use formula_compute::symbolic::{expr::{Assumptions, Formula}, CasEngine, Engine, SymExpr};
use formula_parser::parser::{ast::Expr as AstExpr, fmt::Latex, Parser as LatexParser};
use formula_search::{find_similar, SearchOptions, DEFAULT_TOP_K};
use repl::Repl;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{path::PathBuf, process::ExitCode, time::Duration};

#[derive(Parser)]
#[command(author, version, about = "Compare, search, and simplify LaTeX formulas")]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Give up on a comparison after this many milliseconds
    #[arg(long, value_name = "MS", global = true)]
    timeout_ms: Option<u64>,

    /// Attach assumptions to a symbol, such as `x=real,positive`. May be repeated
    #[arg(long = "assume", value_name = "SYMBOL=ASSUMPTIONS", value_parser = parse_assumption, global = true)]
    assumptions: Vec<(String, Assumptions)>,

    /// Smallest shared subexpression that counts toward the similarity score
    #[arg(long, value_name = "SIZE", default_value_t = DEFAULT_MIN_MATCH_SIZE, global = true)]
    min_match: usize,

    /// Number of results to show for `find`
    #[arg(long, value_name = "K", default_value_t = DEFAULT_TOP_K, global = true)]
    top: usize,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Without a command, start an interactive session
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two formulas
    Compare {
        first: String,
        second: String,
    },

    /// Rank the formulas in a file by how similar they are to a query
    Find {
        query: String,

        /// Formula list, one formula per line, with an optional `# legend`
        #[arg(short, long, value_name = "FILE")]
        formulas: PathBuf,
    },

    /// Simplify a formula
    Simplify {
        formula: String,

        /// List the rewrite steps that were applied
        #[arg(long)]
        steps: bool,
    },

    /// Print a formula as normalized LaTeX
    Latex {
        formula: String,
    },
}

/// Parses a `--assume` value, such as `x=real,positive`.
fn parse_assumption(arg: &str) -> Result<(String, Assumptions), String> {
    let (name, list) = arg.split_once('=')
        .ok_or_else(|| format!("expected `SYMBOL=ASSUMPTIONS`, got `{}`", arg))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing symbol name in `{}`", arg));
    }

    let assumptions = Assumptions::parse_list(list).map_err(|err| err.to_string())?;
    Ok((name.to_string(), assumptions))
}

impl Cli {
    fn search_options(&self) -> SearchOptions {
        let mut compare = CompareOptions::default().with_min_match_size(self.min_match);
        if let Some(ms) = self.timeout_ms {
            compare = compare.with_timeout(Duration::from_millis(ms));
        }
        for (name, assumptions) in &self.assumptions {
            compare = compare.with_assumptions(name.clone(), assumptions.clone());
        }

        SearchOptions::default()
            .with_top_k(self.top)
            .with_compare(compare)
    }
}

/// Simplifies a formula, simplifying each side of a relation separately. With `show_steps`, the
/// rewrite steps are listed after the result.
fn simplify_formula(engine: &CasEngine, input: &str, show_steps: bool) -> Result<String, Error> {
    let to_error = |error| Error::Formula { input: input.to_string(), error };
    let formula = engine.parse(input).map_err(to_error)?;

    let mut steps = Vec::new();
    let mut simplify = |expr: &SymExpr| -> Result<String, Error> {
        let (simplified, mut taken) = engine.simplify_with_steps(expr).map_err(to_error)?;
        steps.append(&mut taken);
        Ok(engine.render(&simplified))
    };
    let mut out = match formula {
        Formula::Expr(expr) => simplify(&expr)?,
        Formula::Relation { op, lhs, rhs } => {
            format!("{} {} {}", simplify(&lhs)?, op.latex(), simplify(&rhs)?)
        },
    };
    out.push('\n');

    if show_steps {
        if steps.is_empty() {
            out.push_str("already simplified\n");
        }
        for (idx, step) in steps.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, step));
        }
    }
    Ok(out)
}

/// Parses a formula and writes it back out as normalized LaTeX.
fn normalize_latex(input: &str) -> Result<String, Error> {
    let expr = LatexParser::new(input)
        .try_parse_full::<AstExpr>()
        .map_err(|error| Error::Formula { input: input.to_string(), error })?;
    Ok(format!("{}\n", expr.as_display()))
}

fn run(cli: Cli) -> Result<(), Error> {
    let engine = CasEngine::default();
    let options = cli.search_options();

    let Some(command) = cli.command else {
        return Repl::new(&engine, &options, cli.json).run();
    };

    let out = match command {
        Commands::Compare { first, second } => {
            let result = compare(&engine, &first, &second, &options.compare)?;
            if cli.json {
                serde_json::to_string_pretty(&result)? + "\n"
            } else {
                output::comparison(&result)
            }
        },
        Commands::Find { query, formulas } => {
            let store = formulas::load_store(&formulas)?;
            let results = find_similar(&engine, &store, &query, &options)?;
            if cli.json {
                serde_json::to_string_pretty(&results)? + "\n"
            } else {
                output::ranking(&results, store.len())
            }
        },
        Commands::Simplify { formula, steps } => simplify_formula(&engine, &formula, steps)?,
        Commands::Latex { formula } => normalize_latex(&formula)?,
    };
    print!("{}", out);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("could not set up logging: {}", err);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.report_to_stderr("input").is_err() {
                eprintln!("error: {}", err);
            }
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use formula_compute::symbolic::expr::Assumption;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_become_options() {
        let cli = Cli::parse_from([
            "formula", "-vv", "--timeout-ms", "250", "--assume", "x=real,positive", "--top", "3",
            "compare", "|x|", "x",
        ]);
        assert_eq!(cli.verbose, 2);

        let options = cli.search_options();
        assert_eq!(options.top_k, 3);
        assert_eq!(options.compare.timeout, Some(Duration::from_millis(250)));
        assert_eq!(options.compare.min_match_size, DEFAULT_MIN_MATCH_SIZE);
        assert_eq!(
            options.compare.assumptions["x"],
            Assumptions::new().with(Assumption::Real).with(Assumption::Positive),
        );
    }

    #[test]
    fn bad_assumptions() {
        assert!(parse_assumption("x").is_err());
        assert!(parse_assumption("=positive").is_err());
        assert!(parse_assumption("x=purple").is_err());
    }

    #[test]
    fn simplify_relation() {
        assert_eq!(simplify_formula(&CasEngine::default(), "x + x = 2 \\cdot 3", false).unwrap(), "2 x = 6\n");
    }

    #[test]
    fn simplify_with_steps() {
        let out = simplify_formula(&CasEngine::default(), "x + x", true).unwrap();
        assert_eq!(out, "2 x\n  1. combine like terms\n");

        let out = simplify_formula(&CasEngine::default(), "x", true).unwrap();
        assert_eq!(out, "x\nalready simplified\n");
    }

    #[test]
    fn latex_round_trip() {
        assert_eq!(normalize_latex("\\frac{a}{b} + \\sin 2x").unwrap(), "\\frac{a}{b} + \\sin\\left(2 x\\right)\n");
        assert!(matches!(normalize_latex("\\frac{a}{"), Err(Error::Formula { .. })));
    }
}
