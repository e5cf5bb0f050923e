//! Interactive prompt that dispatches the same subcommands as the CLI.

use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::Colorize;

use crate::commands::Context;
use crate::{Cli, Commands};

pub async fn run(ctx: &Context) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("stackpilot> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break, // EOF
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let words = line.split_whitespace();
        let cli = match Cli::try_parse_from(std::iter::once("stackpilot").chain(words)) {
            Ok(cli) => cli,
            Err(err) => {
                // clap renders its own usage and help output
                err.print()?;
                continue;
            }
        };

        if matches!(cli.command, Commands::Shell) {
            println!("already in a shell");
            continue;
        }

        if let Err(err) = crate::dispatch(cli.command, ctx).await {
            eprintln!("{}", err.to_string().red());
        }
    }
    Ok(())
}
