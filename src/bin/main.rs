#[macro_use]
extern crate log;

use std::env;
use std::io::{self, BufReader, BufWriter, IsTerminal, Write};

use clap::Parser;
use color_eyre::eyre::Result;
use surfer::prelude::*;

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if is_broken_pipe(&err) {
                std::process::exit(0)
            }
            error!("{err:?}");
            eprintln!("surf: {err}");
            std::process::exit(2)
        }
    }
}

fn is_broken_pipe(err: &color_eyre::Report) -> bool {
    let io_err = match err.downcast_ref::<SurferError>() {
        Some(SurferError::Io(io_err)) => Some(io_err),
        _ => err.downcast_ref::<io::Error>(),
    };
    io_err.is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn parse_args() -> SurferOptions {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("surf")));
    args.extend(
        env::var("SURFER_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    SurferOptions::parse_from(args)
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let opts = parse_args();
    debug!("options: {opts:?}");

    let matcher = Matcher::from_options(&opts)?;

    //------------------------------------------------------------------------------
    // read from pipe
    let stdin = io::stdin();
    let items = if stdin.is_terminal() {
        warn!("stdin is a terminal, no candidates to filter");
        Vec::new()
    } else {
        SurferItemReader::from_options(&opts).read_items(BufReader::new(stdin.lock()))?
    };

    filter(&opts, &matcher, &items)
}

fn filter(opts: &SurferOptions, matcher: &Matcher, items: &[String]) -> Result<i32> {
    let mut stdout = BufWriter::new(io::stdout().lock());
    let output_ending = opts.output_ending();

    // output query
    if opts.print_query {
        write!(stdout, "{}{}", opts.query(), output_ending)?;
    }

    let matched_items = matcher.rank(opts.query(), items);
    for item in matched_items.iter() {
        if opts.print_score {
            write!(stdout, "{:.3}\t", item.score)?;
        }
        write!(stdout, "{}", item.text)?;
        if opts.print_positions {
            let positions: Vec<String> = item.positions.iter().map(|p| p.to_string()).collect();
            write!(stdout, "\t{}", positions.join(","))?;
        }
        write!(stdout, "{output_ending}")?;
    }
    stdout.flush()?;

    Ok(if matched_items.is_empty() { 1 } else { 0 })
}
