//! `fumen` command-line tool.
//!
//! Decodes fumen strings to JSON, encodes JSON pages back, previews a page in
//! the terminal and identifies pieces from cell indices.

use std::io::{self, IsTerminal, Read};

use anyhow::{anyhow, Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fumen::cli::{parse_args, Command, USAGE};
use fumen::core::infer_piece;
use fumen::term::{print_frame, PageView};
use fumen::{decode, encode_with, CodecConfig, Page};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    run(command)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FUMEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    debug!(?command, "running");
    match command {
        Command::Help => {
            println!("{USAGE}");
        }
        Command::Decode { fumen } => {
            let pages = decode(&fumen).context("decode failed")?;
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Command::Encode { wrap } => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading pages from stdin")?;
            let pages: Vec<Page> = serde_json::from_str(&input).context("parsing pages JSON")?;

            let mut config = CodecConfig::from_env();
            if let Some(wrap) = wrap {
                config.wrap_lines = wrap;
            }
            println!("{}", encode_with(&pages, &config).context("encode failed")?);
        }
        Command::Show {
            fumen,
            page,
            styled,
        } => {
            let pages = decode(&fumen).context("decode failed")?;
            let selected = pages
                .get(page - 1)
                .ok_or_else(|| anyhow!("page {} out of range (1..={})", page, pages.len()))?;
            let frame = PageView::default().render(selected);
            print_frame(&frame, styled && io::stdout().is_terminal())?;
        }
        Command::Infer { cells } => {
            let inferred = infer_piece(&cells).context("inference failed")?;
            println!("{}", serde_json::to_string_pretty(&inferred)?);
        }
    }
    Ok(())
}
