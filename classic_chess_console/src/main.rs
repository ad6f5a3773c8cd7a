#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod config;
mod input;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, anyhow};
use classic_chess::{Board, MoveStatus};
use clap::{Command, arg};
use config::ConsoleConfig;
use input::ConsoleCommand;


fn main() -> anyhow::Result<()> {
    let matches = Command::new("Classic chess")
        .version(clap::crate_version!())
        .about("Two-player chess in the terminal. Enter moves like 'e2 e4', or 'quit'.")
        .arg(
            arg!(--"config" <file> "Path to the configuration file: yaml-serialized ConsoleConfig.")
                .required(false),
        )
        .arg(
            arg!(--"pieces" <style> "How to draw pieces")
                .value_parser(["letters", "unicode"])
                .required(false),
        )
        .arg(arg!(--"no-color" "Do not shade board squares"))
        .arg(
            arg!(--"log-level" <level> "One of: off, error, warn, info, debug, trace")
                .required(false),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => config::read_config_file(Path::new(path))?,
        None => ConsoleConfig::default(),
    };
    if let Some(pieces) = matches.get_one::<String>("pieces") {
        config.pieces = pieces.parse()?;
    }
    if matches.get_flag("no-color") {
        config.colored = false;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.clone();
    }

    let level: log::LevelFilter = config
        .log_level
        .parse()
        .map_err(|_| anyhow!("Invalid log level '{}'", config.log_level))?;
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .parse_default_env()
        .init();

    run(&config)
}

fn prompt(board: &Board) -> io::Result<()> {
    print!("{} to move: ", board.active_force());
    io::stdout().flush()
}

fn run(config: &ConsoleConfig) -> anyhow::Result<()> {
    let mut board = Board::new();
    print!("{}", tui::render_board(&board, config));
    prompt(&board)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Reading input")?;
        match input::parse_command(&line) {
            Ok(ConsoleCommand::Quit) => return Ok(()),
            Ok(ConsoleCommand::Move { from, to }) => match board.try_turn(from, to) {
                Ok(outcome) => {
                    print!("{}", tui::render_board(&board, config));
                    match outcome.status {
                        MoveStatus::Normal => {}
                        MoveStatus::Check(force) => println!("Check to the {force} king!"),
                        MoveStatus::Checkmate(winner) => {
                            println!("Checkmate! The {winner} side wins.");
                            return Ok(());
                        }
                    }
                }
                Err(err) => println!("{err}. Try again."),
            },
            Err(err) => println!("{err:#}"),
        }
        prompt(&board)?;
    }
    println!();
    Ok(())
}
