//! Command line driver: builds two sets from whitespace-separated integers
//! and applies one operation to them.
//!
//! Input, in order: the backend tag (`0` tree, `1` array), the sizes of A and
//! B, the keys of A, the keys of B, then an operation code:
//! `1 x` tests whether x belongs to A, `2` prints the union, `3` prints the
//! intersection and `4 x` removes x from A before printing A.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::SplitWhitespace;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use intset::{Backend, Set};

#[derive(Parser)]
#[command(name = "intset", version)]
#[command(about = "Union, intersection and membership on integer sets", long_about = None)]
struct Cli {
    /// File to read the input from; standard input is read when omitted
    input: Option<PathBuf>,

    /// Do not echo both sets after they have been filled
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before the {0}")]
    MissingToken(&'static str),
    #[error("expected an integer for the {what}, found {token:?}")]
    InvalidInteger { what: &'static str, token: String },
    #[error("the {what} must not be negative, found {value}")]
    NegativeSize { what: &'static str, value: i64 },
    #[error(transparent)]
    Set(#[from] intset::Error),
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn next_int<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<T, DriverError> {
        let token = self.inner.next().ok_or(DriverError::MissingToken(what))?;
        token.parse().map_err(|_| DriverError::InvalidInteger {
            what,
            token: token.to_owned(),
        })
    }

    fn next_size(&mut self, what: &'static str) -> Result<usize, DriverError> {
        let value: i64 = self.next_int(what)?;
        usize::try_from(value).map_err(|_| DriverError::NegativeSize { what, value })
    }
}

fn fill(set: &mut Set, count: usize, tokens: &mut Tokens) -> Result<(), DriverError> {
    for _ in 0..count {
        let key = tokens.next_int("set element")?;
        if !set.insert(key) {
            tracing::debug!(key, "element not inserted");
        }
    }
    Ok(())
}

fn run<W: Write>(input: &str, quiet: bool, out: &mut W) -> Result<(), DriverError> {
    let mut tokens = Tokens::new(input);

    let backend = Backend::try_from(tokens.next_int::<i64>("backend tag")?)?;
    let size_a = tokens.next_size("size of A")?;
    let size_b = tokens.next_size("size of B")?;
    tracing::info!(%backend, size_a, size_b, "building sets");

    let mut a = Set::new(backend, size_a);
    let mut b = Set::new(backend, size_b);
    fill(&mut a, size_a, &mut tokens)?;
    fill(&mut b, size_b, &mut tokens)?;

    if !quiet {
        writeln!(out)?;
        writeln!(out, "insercoes feitas!")?;
        writeln!(out, "{}", a)?;
        writeln!(out)?;
        writeln!(out, "{}", b)?;
        writeln!(out)?;
    }

    let operation: i64 = tokens.next_int("operation code")?;
    match operation {
        1 => {
            let key = tokens.next_int("element to look up")?;
            if a.contains(key) {
                writeln!(out, "Pertence.")?;
            } else {
                writeln!(out, "Nao pertence.")?;
            }
        }
        2 => writeln!(out, "{}", a.union(&b)?)?,
        3 => writeln!(out, "{}", a.intersection(&b)?)?,
        4 => {
            let key = tokens.next_int("element to remove")?;
            if !a.remove(key) {
                writeln!(out, "elemento nao esta no conjunto")?;
            }
            writeln!(out, "{}", a)?;
        }
        _ => tracing::warn!(operation, "unknown operation code, nothing to do"),
    }
    Ok(())
}

fn execute(cli: &Cli) -> Result<(), DriverError> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&input, cli.quiet, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "intset=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "driver failed");
            eprintln!("intset: {}", error);
            ExitCode::FAILURE
        }
    }
}
