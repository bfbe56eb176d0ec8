//! Terminal front end: argument parsing, logging, the read loop, and
//! printing. The only layer that touches stdout, stderr, or exit codes.

mod print;
mod repl;
mod setup;

use hbnb::error::Result;
use repl::Session;
use setup::{init_context, init_logging, Cli};
use std::io::{self, IsTerminal};

use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let attended = console::user_attended() && io::stdin().is_terminal();
    let prompt = attended.then(|| ctx.config.prompt.clone());
    let session = Session::new(prompt, console::colors_enabled());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    session.run(&mut ctx.api, stdin.lock(), &mut stdout, &mut stderr)?;
    Ok(())
}
