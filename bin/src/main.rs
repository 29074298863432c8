use anyhow::Result;

mod cli;
mod config;

fn main() -> Result<()> {
    cli::run()
}
