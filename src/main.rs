// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use primpoly::output::{render, OutputFormat};
use primpoly::polynomial::Polynomial;
use primpoly::primitivity::{validate, PrimitivityTest, Search, SearchConfig, Statistics, Verdict};
use primpoly::{Error, Wide};
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  primpoly 2 4              x^4 + x + 1, 2
  primpoly -a 2 4           every primitive polynomial of degree 4 modulo 2
  primpoly -s 5 20          the first one of degree 20 modulo 5, with statistics
  primpoly -x 2 8           0x11d
  primpoly -t 2 4 --poly 'x^4 + x^3 + 1'
  echo 'x^4 + x^2 + 1' | primpoly -t 2 4

Logging goes to standard error: RUST_LOG=debug for the cascade's progress,
LOG_FORMAT=json for JSON lines.";

/// Find or test primitive polynomials of degree n modulo a prime p
#[derive(Parser, Debug)]
#[command(name = "primpoly", disable_help_flag = true, after_help = EXAMPLES)]
struct Cli {
    /// Test one polynomial for primitivity instead of searching
    #[arg(short = 't')]
    test: bool,

    /// List all primitive polynomials instead of just the first
    #[arg(short = 'a')]
    all: bool,

    /// Print statistics about the search
    #[arg(short = 's')]
    stats: bool,

    /// Double check each primitive polynomial found, or the -t verdict, by brute force (slow)
    #[arg(short = 'c')]
    confirm: bool,

    /// Print polynomials modulo 2 as hex bit masks
    #[arg(short = 'x')]
    hex: bool,

    /// Print help
    #[arg(short = 'h', short_alias = 'H', action = ArgAction::SetTrue)]
    help: bool,

    /// Polynomial to test with -t; read from standard input when absent
    #[arg(long, value_name = "POLYNOMIAL")]
    poly: Option<String>,

    /// Prime modulus
    #[arg(required_unless_present = "help")]
    p: Option<Wide>,

    /// Degree
    #[arg(required_unless_present = "help")]
    n: Option<usize>,
}

fn read_polynomial_text(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.poly {
        return Ok(text.clone());
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the polynomial from standard input")?;
    Ok(line.trim().to_string())
}

fn test_polynomial(cli: &Cli, test: &PrimitivityTest, format: OutputFormat) -> Result<()> {
    let text = read_polynomial_text(cli)?;
    let poly = Polynomial::parse(&text, test.modulus())?;
    if poly.degree() != test.degree() {
        return Err(Error::InvalidPolynomial {
            text,
            reason: format!("degree {} doesn't match n = {}", poly.degree(), test.degree()),
        }
        .into());
    }
    let verdict = if cli.confirm {
        test.check_and_confirm(&poly)?
    } else {
        test.check(&poly)?
    };
    let rendered = render(&poly, format)?;
    match verdict {
        Verdict::Primitive => println!("{} is primitive!", rendered),
        Verdict::Rejected(stage) => println!("{} is NOT primitive: fails \"{}\"", rendered, stage),
    }
    if cli.stats {
        let mut statistics = Statistics::new(test);
        statistics.record(verdict);
        println!("\n{}", statistics);
    }
    Ok(())
}

fn search(cli: &Cli, p: Wide, n: usize, format: OutputFormat) -> Result<()> {
    let config = SearchConfig {
        list_all: cli.all,
        confirm: cli.confirm,
        ..SearchConfig::new(p, n)
    };
    let mut search = Search::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if format == OutputFormat::Text {
        let noun = if cli.all { "polynomials" } else { "polynomial" };
        writeln!(out, "Primitive {} modulo {} of degree {}\n", noun, p, n)?;
    }
    search.run(|poly| -> Result<()> {
        writeln!(out, "{}", render(poly, format)?)?;
        Ok(())
    })?;
    if cli.stats {
        writeln!(out, "\n{}", search.statistics())?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let p = cli.p.context("missing p")?;
    let n = cli.n.context("missing n")?;
    validate(p, n)?;
    let format = if cli.hex {
        OutputFormat::HexMask
    } else {
        OutputFormat::Text
    };
    format.check_modulus(p)?;
    if cli.test {
        let test = PrimitivityTest::new(p, n)?;
        test_polynomial(cli, &test, format)
    } else {
        search(cli, p, n, format)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            process::exit(1);
        }
    };
    if cli.help {
        Cli::command().print_help()?;
        process::exit(1);
    }
    if let Err(err) = run(&cli) {
        if let Some(err) = err.downcast_ref::<Error>() {
            if err.is_internal() {
                tracing::error!("{}", err);
                eprintln!("primpoly: {}\nThis is a bug; please report it.", err);
                process::exit(1);
            }
        }
        return Err(err);
    }
    Ok(())
}
