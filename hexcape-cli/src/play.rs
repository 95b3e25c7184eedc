//! Play command - line-oriented interactive host
//!
//! Reads one command per line from stdin and drives a [`Session`], the same
//! way a graphical host would translate clicks.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};

use hexcape_core::{AbilityMode, ActionOutcome, Game, GameConfig, Hex, Session};

use crate::render::{render_board, LEGEND};

const HELP: &str = "\
commands (coordinates are axial q r):
  move q r               step toward a cell
  teleport q r           jump to an empty cell in range
  barrier q1 r1 q2 r2    wall off a line of cells
  mode move|barrier|teleport   toggle the click ability
  click q r              apply the selected ability
  wait                   pass the turn
  next                   start the next level
  show                   redraw the board
  help                   this text
  quit";

/// A parsed input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Hex),
    Teleport(Hex),
    Barrier(Hex, Hex),
    Mode(AbilityMode),
    Click(Hex),
    Wait,
    Next,
    Show,
    Help,
    Quit,
}

pub fn run(config: GameConfig) -> Result<()> {
    let board_radius = config.board_radius;
    let mut session = Session::new(Game::new(config)?);

    println!("{}\n", HELP);
    print_board(&session, board_radius);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(&mut session, command, board_radius);
        io::stdout().flush()?;
    }

    tracing::info!(
        level = session.game().level(),
        status = ?session.game().status(),
        "session ended"
    );
    Ok(())
}

fn execute(session: &mut Session, command: Command, board_radius: u32) {
    let outcome = match command {
        Command::Move(hex) => {
            session.select_mode(AbilityMode::Move);
            session.click(hex)
        }
        Command::Teleport(hex) => {
            session.select_mode(AbilityMode::Teleport);
            session.click(hex)
        }
        Command::Barrier(start, end) => {
            session.select_mode(AbilityMode::Barrier);
            match session.click(start) {
                None => session.click(end),
                rejected => {
                    session.select_mode(AbilityMode::Move);
                    rejected
                }
            }
        }
        Command::Mode(mode) => {
            session.toggle_ability_mode(mode);
            println!("mode: {:?}", session.mode());
            return;
        }
        Command::Click(hex) => session.click(hex),
        Command::Wait => Some(session.end_turn()),
        Command::Next => {
            session.next_level();
            None
        }
        Command::Show => None,
        Command::Help => {
            println!("{}", HELP);
            return;
        }
        Command::Quit => return,
    };

    match outcome {
        Some(ActionOutcome::Ignored(reason)) => println!("ignored: {:?}", reason),
        Some(ActionOutcome::Applied(_)) | None => {}
    }
    if let Some(start) = session.barrier_start() {
        println!("barrier starts at {}", start);
    }
    print_board(session, board_radius);
}

fn print_board(session: &Session, board_radius: u32) {
    print!("{}", render_board(&session.game().snapshot(), board_radius));
    println!("{}", LEGEND);
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let name = words.next().ok_or_else(|| anyhow!("empty command"))?;
    let args: Vec<&str> = words.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.len()) {
        ("move", 2) => Command::Move(parse_hex(&args[0..2])?),
        ("teleport", 2) => Command::Teleport(parse_hex(&args[0..2])?),
        ("barrier", 4) => Command::Barrier(parse_hex(&args[0..2])?, parse_hex(&args[2..4])?),
        ("click", 2) => Command::Click(parse_hex(&args[0..2])?),
        ("mode", 1) => Command::Mode(parse_mode(args[0])?),
        ("wait", 0) => Command::Wait,
        ("next", 0) => Command::Next,
        ("show", 0) => Command::Show,
        ("help", 0) => Command::Help,
        ("quit" | "exit", 0) => Command::Quit,
        (other, n) => bail!("unknown command `{}` with {} argument(s), try `help`", other, n),
    };
    Ok(command)
}

fn parse_hex(args: &[&str]) -> Result<Hex> {
    let q = args[0]
        .parse::<i32>()
        .with_context(|| format!("bad q coordinate `{}`", args[0]))?;
    let r = args[1]
        .parse::<i32>()
        .with_context(|| format!("bad r coordinate `{}`", args[1]))?;
    let Some(s) = q.checked_neg().and_then(|n| n.checked_sub(r)) else {
        bail!("coordinates {} {} are out of range", q, r);
    };
    Ok(Hex::new(q, r, s))
}

fn parse_mode(word: &str) -> Result<AbilityMode> {
    match word.to_ascii_lowercase().as_str() {
        "move" => Ok(AbilityMode::Move),
        "barrier" => Ok(AbilityMode::Barrier),
        "teleport" => Ok(AbilityMode::Teleport),
        other => bail!("unknown mode `{}`", other),
    }
}
