//! One interactive game driven by text commands.

use std::fmt;

use chess_rules::{
    ChessError, ChessResult, Color, DrawRules, Game, GameStatus, Move, Position, Square,
    move_to_san, parse_uci,
};
use serde::Serialize;
use tracing::debug;

use crate::config::CliConfig;

pub const HELP: &str = "\
commands:
  move <san|uci>   play a move, e.g. `move Nf3` or `move e7e8q` (the word `move` is optional)
  moves [square]   list legal moves, optionally only from one square
  undo             take back the last move
  restart          back to this game's starting position
  new              start a fresh game from the standard position
  fen <fen>        start a new game from a FEN position
  export           print the current position as FEN
  board            draw the board
  status           game status and result
  history          moves played so far in SAN
  pgn              numbered move list
  help             this text
  quit             leave";

/// Reply to one command line. Serialized with a `type` tag in JSON mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Moved {
        #[serde(rename = "move")]
        mv: Move,
        san: String,
        status: GameStatus,
        fen: String,
    },
    Undone {
        #[serde(rename = "move")]
        mv: Move,
        fen: String,
    },
    Position {
        fen: String,
        turn: Color,
        status: GameStatus,
        in_check: bool,
    },
    Moves {
        moves: Vec<String>,
    },
    Status {
        status: GameStatus,
        result: &'static str,
        in_check: bool,
    },
    History {
        moves: Vec<String>,
    },
    Pgn {
        movetext: String,
    },
    Board {
        diagram: String,
    },
    Help {
        text: &'static str,
    },
    Error {
        message: String,
    },
    Bye,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Moved { san, status, .. } => {
                write!(f, "{san}")?;
                if status.is_terminal() {
                    write!(f, " ({status})")?;
                }
                Ok(())
            }
            Response::Undone { mv, fen } => write!(f, "took back {mv}\n{fen}"),
            Response::Position {
                fen,
                turn,
                status,
                in_check,
            } => {
                write!(f, "{fen}\n{turn} to move, {status}")?;
                if *in_check {
                    write!(f, ", in check")?;
                }
                Ok(())
            }
            Response::Moves { moves } if moves.is_empty() => write!(f, "no legal moves"),
            Response::Moves { moves } | Response::History { moves } => {
                write!(f, "{}", moves.join(" "))
            }
            Response::Status {
                status,
                result,
                in_check,
            } => {
                write!(f, "{status} {result}")?;
                if *in_check {
                    write!(f, ", in check")?;
                }
                Ok(())
            }
            Response::Pgn { movetext } => write!(f, "{movetext}"),
            Response::Board { diagram } => write!(f, "{diagram}"),
            Response::Help { text } => write!(f, "{text}"),
            Response::Error { message } => write!(f, "error: {message}"),
            Response::Bye => write!(f, "bye"),
        }
    }
}

pub struct Session {
    game: Game,
    rules: DrawRules,
}

impl Session {
    pub fn new(config: &CliConfig) -> ChessResult<Self> {
        let game = match &config.start_fen {
            Some(fen) => Game::from_fen(fen)?,
            None => Game::new(),
        };
        Ok(Self {
            game: game.with_rules(config.rules),
            rules: config.rules,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run one command line. Blank lines produce no response.
    pub fn execute(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));
        if command.is_empty() {
            return None;
        }
        debug!(command, args = rest, "executing");

        let result = match command {
            "move" | "m" => self.play(rest),
            "moves" => self.list_moves(rest),
            "undo" => self
                .game
                .undo()
                .map(|mv| Response::Undone {
                    mv,
                    fen: self.game.export_position(),
                }),
            "restart" => {
                self.game.reset();
                Ok(self.position())
            }
            "new" => {
                self.game = Game::new().with_rules(self.rules);
                Ok(self.position())
            }
            "fen" if rest.is_empty() => Ok(self.position()),
            "fen" => Game::from_fen(rest).map(|game| {
                self.game = game.with_rules(self.rules);
                self.position()
            }),
            "export" => Ok(self.position()),
            "board" => Ok(Response::Board {
                diagram: diagram(self.game.position()),
            }),
            "status" => Ok(Response::Status {
                status: self.game.status(),
                result: self.game.result(),
                in_check: self.game.is_in_check(self.game.turn()),
            }),
            "history" => Ok(Response::History {
                moves: self.game.history_as_notation().to_vec(),
            }),
            "pgn" => Ok(Response::Pgn {
                movetext: self.game.pgn_movetext(),
            }),
            "help" | "?" => Ok(Response::Help { text: HELP }),
            "quit" | "exit" => Ok(Response::Bye),
            // A bare move without the `move` keyword.
            _ if rest.is_empty() => self.play(command),
            _ => {
                return Some(Response::Error {
                    message: format!("unknown command '{command}', try `help`"),
                });
            }
        };
        Some(result.unwrap_or_else(|err| Response::Error {
            message: err.to_string(),
        }))
    }

    fn play(&mut self, text: &str) -> ChessResult<Response> {
        if text.is_empty() {
            return Err(ChessError::InvalidNotation {
                text: String::new(),
                reason: "expected a move",
            });
        }
        let mv = if parse_uci(text).is_ok() {
            self.game.submit_uci(text)?
        } else {
            self.game.submit_san(text)?
        };
        let san = self
            .game
            .history_as_notation()
            .last()
            .cloned()
            .unwrap_or_default();
        Ok(Response::Moved {
            mv,
            san,
            status: self.game.status(),
            fen: self.game.export_position(),
        })
    }

    fn list_moves(&self, from: &str) -> ChessResult<Response> {
        let from = if from.is_empty() {
            None
        } else {
            Some(from.parse::<Square>()?)
        };
        let pos = self.game.position();
        let moves = self
            .game
            .legal_moves(from)
            .map(|mv| move_to_san(pos, mv))
            .collect();
        Ok(Response::Moves { moves })
    }

    fn position(&self) -> Response {
        Response::Position {
            fen: self.game.export_position(),
            turn: self.game.turn(),
            status: self.game.status(),
            in_check: self.game.is_in_check(self.game.turn()),
        }
    }
}

/// Eight ranks of FEN letters with `.` for empty squares, White at the bottom.
fn diagram(pos: &Position) -> String {
    let mut out = String::with_capacity(200);
    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            out.push(' ');
            out.push(
                pos.piece_at(Square::at(file, rank))
                    .map_or('.', |pc| pc.to_fen_char()),
            );
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
