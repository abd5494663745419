//! Board module - game orchestration
//!
//! The board ties the grid, the falling piece, the pending next piece and the
//! score together. Gameplay advances only through [`Board::tick`] and the piece
//! requests in [`Board::apply_action`].
//!
//! A tick moves the active piece down one row. When it cannot move, the piece is
//! locked into the grid and the slot is left empty; the following tick promotes
//! the next piece, unless it already collides at its spawn position, in which case
//! the game is over for good.

use tracing::{debug, info};

use crate::grid::{Grid, Occupancy};
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::{GameAction, GridPos, MoveDir, PieceKind, Rgb, RotateDir};

/// Where the board is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is falling
    Active,
    /// The last piece locked; the next tick spawns (or ends the game)
    Locking,
    /// Spawn was blocked. Terminal.
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing; the game is over
    Idle,
    /// The active piece fell one row
    Fell,
    /// The active piece could not fall and was locked into the grid
    Locked { points: u32 },
    /// The next piece became active
    Spawned(PieceKind),
    /// The next piece collided at spawn; the game ended with this score
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Option<Piece>,
    next: Piece,
    score: u32,
    game_over: bool,
    rng: SimpleRng,
}

impl Board {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let active = rng.next_kind();
        let next = rng.next_kind();
        Self::from_rng(rng, active, next)
    }

    /// Create a game whose first two pieces are fixed. Later pieces are drawn
    /// from `seed`.
    pub fn with_pieces(seed: u32, active: PieceKind, next: PieceKind) -> Self {
        Self::from_rng(SimpleRng::new(seed), active, next)
    }

    fn from_rng(rng: SimpleRng, active: PieceKind, next: PieceKind) -> Self {
        Self {
            grid: Grid::new(),
            active: Some(Piece::spawn(active)),
            next: Piece::spawn(next),
            score: 0,
            game_over: false,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.active.is_some() {
            Phase::Active
        } else {
            Phase::Locking
        }
    }

    /// True outside the grid, otherwise the grid's occupancy at `pos`
    pub fn is_filled_safe(&self, pos: GridPos) -> bool {
        self.grid.is_filled_safe(pos)
    }

    /// Fill a grid cell directly, for scripted setups.
    ///
    /// Refused (returns false) off the grid or under the active piece.
    pub fn fill(&mut self, pos: GridPos, color: Rgb) -> bool {
        if let Some(active) = &self.active {
            if active.occupied_cells().any(|cell| cell == pos) {
                return false;
            }
        }
        self.grid.fill(pos, color)
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        if self.active.is_none() {
            return self.spawn_next();
        }

        if self.try_move(MoveDir::Down) {
            return TickOutcome::Fell;
        }

        TickOutcome::Locked {
            points: self.lock_piece(),
        }
    }

    /// Copy the active piece into the grid and award its score.
    ///
    /// Returns the points awarded; 0 if there was no active piece.
    pub fn lock_piece(&mut self) -> u32 {
        let Some(piece) = self.active.take() else {
            return 0;
        };

        for block in piece.blocks() {
            self.grid.place(block);
        }

        let points = piece.lock_score();
        self.score += points;
        debug!(
            kind = piece.kind().as_str(),
            x = piece.origin().x,
            y = piece.origin().y,
            points,
            score = self.score,
            "piece locked"
        );
        points
    }

    /// Promote the next piece, or end the game if it has no room
    fn spawn_next(&mut self) -> TickOutcome {
        if self.next.is_collided(&self.grid, GridPos::ZERO) {
            self.game_over = true;
            info!(score = self.score, "game over");
            return TickOutcome::GameOver { score: self.score };
        }

        let fresh = Piece::spawn(self.rng.next_kind());
        let piece = std::mem::replace(&mut self.next, fresh);
        let kind = piece.kind();
        debug!(
            kind = kind.as_str(),
            next = self.next.kind().as_str(),
            "piece spawned"
        );
        self.active = Some(piece);
        TickOutcome::Spawned(kind)
    }

    /// Move the active piece if the game is running
    pub fn try_move(&mut self, dir: MoveDir) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.try_move(dir, &self.grid)
    }

    /// Rotate the active piece if the game is running
    pub fn try_rotate(&mut self, dir: RotateDir) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.try_rotate(dir, &self.grid)
    }

    /// Apply a game action. Returns true if anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(MoveDir::Left),
            GameAction::MoveRight => self.try_move(MoveDir::Right),
            GameAction::SoftDrop => self.try_move(MoveDir::Down),
            GameAction::RotateLeft => self.try_rotate(RotateDir::Left),
            GameAction::RotateRight => self.try_rotate(RotateDir::Right),
            GameAction::Tick => self.tick() != TickOutcome::Idle,
        }
    }
}

impl Occupancy for Board {
    fn is_filled_safe(&self, pos: GridPos) -> bool {
        self.grid.is_filled_safe(pos)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1)
    }
}
