use anyhow::Result;
use gcode_program_parser::cli;

fn main() -> Result<()> {
    cli::run()
}
