//! Command-line driver
//!
//! Reads a program from a file or standard input, parses it and prints the
//! result in the configured format.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};

use crate::config::Config;
use crate::parser::Parser;
use crate::report;

/// Run the CLI with arguments taken from the process
pub fn run() -> Result<()> {
    let config = Config::from_args_and_env()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    for path in &config.config_files {
        log::debug!("Using config file {}", path.display());
    }

    run_with_config(&config, &mut io::stdout().lock())
}

/// Parse the configured input and write the report to `out`
pub fn run_with_config<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let parser = Parser::new().with_options(config.parse_options);

    let program = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open program: {}", path.display()))?;
            parser
                .parse(BufReader::new(file))
                .with_context(|| format!("Failed to parse program: {}", path.display()))?
        }
        None => parser
            .parse(io::stdin().lock())
            .context("Failed to parse program from standard input")?,
    };

    log::info!("Parsed {} lines", program.len());

    out.write_all(report::render(&program, config.format)?.as_bytes())?;
    out.flush()?;
    Ok(())
}
