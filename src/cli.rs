//! Command-line argument parsing for the `fumen` binary.

use anyhow::{anyhow, Result};

pub const USAGE: &str = "\
usage:
  fumen decode <fumen>                 print pages as JSON
  fumen encode [--no-wrap]             read JSON pages from stdin, print a fumen
  fumen show <fumen> [--page N] [--plain]
                                       preview page N (1-based, default 1)
  fumen infer <a> <b> <c> <d>          identify the piece covering four cell indices

environment:
  FUMEN_LOG   log filter (default: warn)
  FUMEN_WRAP  0 disables ? markers in encoded output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Decode { fumen: String },
    Encode { wrap: Option<bool> },
    Show { fumen: String, page: usize, styled: bool },
    Infer { cells: Vec<usize> },
    Help,
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(name) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];

    match name.as_str() {
        "decode" => Ok(Command::Decode {
            fumen: single_fumen("decode", rest)?,
        }),
        "encode" => parse_encode_args(rest),
        "show" => parse_show_args(rest),
        "infer" => parse_infer_args(rest),
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => Err(anyhow!("unknown command: {}", other)),
    }
}

fn single_fumen(command: &str, args: &[String]) -> Result<String> {
    match args {
        [fumen] => Ok(fumen.clone()),
        [] => Err(anyhow!("{}: missing fumen argument", command)),
        [_, extra, ..] => Err(anyhow!("{}: unexpected argument: {}", command, extra)),
    }
}

fn parse_encode_args(args: &[String]) -> Result<Command> {
    let mut wrap = None;
    for arg in args {
        match arg.as_str() {
            "--no-wrap" => wrap = Some(false),
            "--wrap" => wrap = Some(true),
            other => return Err(anyhow!("encode: unknown argument: {}", other)),
        }
    }
    Ok(Command::Encode { wrap })
}

fn parse_show_args(args: &[String]) -> Result<Command> {
    let mut fumen = None;
    let mut page = 1usize;
    let mut styled = true;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--page" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("show: missing value for --page"))?;
                page = v
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| anyhow!("show: invalid --page value: {}", v))?;
            }
            "--plain" => styled = false,
            other if other.starts_with("--") => {
                return Err(anyhow!("show: unknown argument: {}", other));
            }
            other => {
                if fumen.replace(other.to_string()).is_some() {
                    return Err(anyhow!("show: unexpected argument: {}", other));
                }
            }
        }
        i += 1;
    }

    let fumen = fumen.ok_or_else(|| anyhow!("show: missing fumen argument"))?;
    Ok(Command::Show {
        fumen,
        page,
        styled,
    })
}

fn parse_infer_args(args: &[String]) -> Result<Command> {
    let cells = args
        .iter()
        .map(|v| {
            v.parse::<usize>()
                .map_err(|_| anyhow!("infer: invalid cell index: {}", v))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Command::Infer { cells })
}
