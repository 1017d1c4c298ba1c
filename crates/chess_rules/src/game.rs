//! A game in progress: position history, cached legal moves and status.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Position;
use crate::error::{ChessError, ChessResult};
use crate::movegen::legal_moves_into;
use crate::san::{check_suffix, parse_san, san_body};
use crate::types::*;
use crate::uci::parse_uci;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByRepetition
                | GameStatus::DrawByFiftyMove
                | GameStatus::DrawByInsufficientMaterial
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawByRepetition => "draw by repetition",
            GameStatus::DrawByFiftyMove => "draw by fifty-move rule",
            GameStatus::DrawByInsufficientMaterial => "draw by insufficient material",
        };
        f.write_str(text)
    }
}

/// Thresholds for the automatic draws. A zero threshold disables that rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// Half-moves without a capture or pawn move before the game is drawn.
    pub fifty_move_halfmoves: u32,
    /// Occurrences of one position signature that draw the game.
    pub repetition_count: u32,
    pub insufficient_material: bool,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            fifty_move_halfmoves: 100,
            repetition_count: 3,
            insufficient_material: true,
        }
    }
}

/// One game from an initial position.
///
/// `positions[0]` is the initial position and `positions[i + 1]` follows
/// `moves[i]`. Every mutation validates completely before touching any of
/// this, so a rejected call leaves the game as it was.
#[derive(Clone, Debug)]
pub struct Game {
    rules: DrawRules,
    positions: Vec<Position>,
    moves: Vec<Move>,
    notation: Vec<String>,
    repetitions: HashMap<String, u32>,
    legal: Vec<Move>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_position(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Game::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(initial: Position) -> Self {
        let mut game = Game {
            rules: DrawRules::default(),
            positions: vec![initial],
            moves: Vec::new(),
            notation: Vec::new(),
            repetitions: HashMap::new(),
            legal: Vec::with_capacity(64),
            status: GameStatus::InProgress,
        };
        game.restart_history();
        game
    }

    /// Replace the draw thresholds and re-evaluate the current status.
    pub fn with_rules(mut self, rules: DrawRules) -> Self {
        self.rules = rules;
        self.refresh();
        self
    }

    pub fn rules(&self) -> DrawRules {
        self.rules
    }

    // ---- queries ----

    pub fn position(&self) -> &Position {
        &self.positions[self.positions.len() - 1]
    }

    pub fn initial_position(&self) -> &Position {
        &self.positions[0]
    }

    /// The position after `ply` half-moves; 0 is the initial position.
    pub fn position_at(&self, ply: usize) -> Option<&Position> {
        self.positions.get(ply)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Color {
        self.position().side_to_move()
    }

    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// SAN of every move played, with check and mate suffixes.
    pub fn history_as_notation(&self) -> &[String] {
        &self.notation
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.position().in_check(color)
    }

    pub fn export_position(&self) -> String {
        self.position().to_fen()
    }

    /// Legal moves of the current position, optionally only those leaving
    /// `from`. A finished game yields nothing, drawn positions included.
    pub fn legal_moves(&self, from: Option<Square>) -> impl Iterator<Item = Move> + '_ {
        let playable = if self.status.is_terminal() {
            &[][..]
        } else {
            &self.legal[..]
        };
        playable
            .iter()
            .copied()
            .filter(move |m| from.is_none_or(|sq| m.from == sq))
    }

    /// PGN result token.
    pub fn result(&self) -> &'static str {
        match self.status {
            GameStatus::InProgress => "*",
            GameStatus::Checkmate => match self.turn() {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            _ => "1/2-1/2",
        }
    }

    /// Numbered move list followed by the result, e.g. `1. e4 e5 2. Nf3 *`.
    pub fn pgn_movetext(&self) -> String {
        let mut out = String::new();
        for (ply, san) in self.notation.iter().enumerate() {
            let before = &self.positions[ply];
            let number = before.fullmove_number();
            match before.side_to_move() {
                Color::White => out.push_str(&format!("{number}. ")),
                Color::Black if ply == 0 => out.push_str(&format!("{number}... ")),
                Color::Black => {}
            }
            out.push_str(san);
            out.push(' ');
        }
        out.push_str(self.result());
        out
    }

    // ---- mutations ----

    /// Play the legal move from `from` to `to`. `promotion` is required
    /// exactly when the move promotes.
    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Move> {
        let mv = self
            .resolve(from, to, promotion)
            .map_err(|err| self.rejected(err))?;
        self.commit(mv);
        Ok(mv)
    }

    /// Play a move written in SAN, e.g. `Nf3`, `exd6`, `O-O`, `e8=Q+`.
    pub fn submit_san(&mut self, text: &str) -> ChessResult<Move> {
        let mv = self
            .ensure_in_progress()
            .and_then(|()| parse_san(self.position(), text))
            .map_err(|err| self.rejected(err))?;
        self.commit(mv);
        Ok(mv)
    }

    /// Play a move in coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn submit_uci(&mut self, text: &str) -> ChessResult<Move> {
        let (from, to, promotion) = self
            .ensure_in_progress()
            .and_then(|()| parse_uci(text))
            .map_err(|err| self.rejected(err))?;
        self.submit_move(from, to, promotion)
    }

    /// Take back the last half-move. Allowed after the game has ended.
    pub fn undo(&mut self) -> ChessResult<Move> {
        let Some(mv) = self.moves.pop() else {
            return Err(ChessError::NothingToUndo);
        };
        if let Some(undone) = self.positions.pop() {
            let signature = undone.signature();
            if let Some(count) = self.repetitions.get_mut(&signature) {
                *count -= 1;
                if *count == 0 {
                    self.repetitions.remove(&signature);
                }
            }
        }
        self.notation.pop();
        self.refresh();
        debug!(mv = %mv, ply = self.moves.len(), "move taken back");
        Ok(mv)
    }

    /// Return to the initial position, discarding all moves.
    pub fn reset(&mut self) {
        self.positions.truncate(1);
        self.moves.clear();
        self.notation.clear();
        self.restart_history();
        debug!(fen = %self.position(), "game reset");
    }

    // ---- internals ----

    fn ensure_in_progress(&self) -> ChessResult<()> {
        if self.status.is_terminal() {
            return Err(ChessError::GameOver(self.status));
        }
        Ok(())
    }

    fn resolve(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Move> {
        self.ensure_in_progress()?;
        let mut candidates = self.legal_moves(Some(from)).filter(|m| m.to == to).peekable();
        let Some(&first) = candidates.peek() else {
            return Err(ChessError::IllegalMove { from, to });
        };
        let invalid = ChessError::InvalidPromotion {
            from,
            to,
            requested: promotion,
        };
        match (first.promotion(), promotion) {
            (None, None) => Ok(first),
            (None, Some(_)) | (Some(_), None) => Err(invalid),
            (Some(_), Some(kind)) if !kind.is_promotion_target() => Err(invalid),
            (Some(_), Some(kind)) => candidates
                .find(|m| m.promotion() == Some(kind))
                .ok_or(invalid),
        }
    }

    fn rejected(&self, err: ChessError) -> ChessError {
        debug!(error = %err, fen = %self.position(), "move rejected");
        err
    }

    fn commit(&mut self, mv: Move) {
        let before = self.position();
        let body = san_body(before, mv, &self.legal);
        let next = before.apply(mv);
        *self.repetitions.entry(next.signature()).or_insert(0) += 1;
        self.positions.push(next);
        self.moves.push(mv);
        self.refresh();

        let mut san = body;
        if let Some(suffix) = check_suffix(self.position(), &self.legal) {
            san.push(suffix);
        }
        debug!(mv = %mv, san = %san, ply = self.moves.len(), "move accepted");
        self.notation.push(san);

        if self.status.is_terminal() {
            info!(
                status = %self.status,
                result = self.result(),
                plies = self.moves.len(),
                "game over"
            );
        }
    }

    fn restart_history(&mut self) {
        self.repetitions.clear();
        self.repetitions.insert(self.positions[0].signature(), 1);
        self.refresh();
    }

    /// Recompute the legal move cache and the status of the current position.
    fn refresh(&mut self) {
        let mut legal = std::mem::take(&mut self.legal);
        legal_moves_into(self.position(), &mut legal);
        self.legal = legal;
        self.status = self.evaluate_status();
    }

    /// Checkmate, then stalemate, then the configured draw rules in order.
    fn evaluate_status(&self) -> GameStatus {
        let pos = self.position();
        let rules = &self.rules;
        if self.legal.is_empty() {
            return if pos.in_check(pos.side_to_move()) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            };
        }
        if rules.fifty_move_halfmoves > 0 && pos.halfmove_clock() >= rules.fifty_move_halfmoves {
            return GameStatus::DrawByFiftyMove;
        }
        let seen = self.repetitions.get(&pos.signature()).copied().unwrap_or(0);
        if rules.repetition_count > 0 && seen >= rules.repetition_count {
            return GameStatus::DrawByRepetition;
        }
        if rules.insufficient_material && pos.is_insufficient_material() {
            return GameStatus::DrawByInsufficientMaterial;
        }
        GameStatus::InProgress
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
