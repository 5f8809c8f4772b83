// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Move selection: shuffle the four directions, take the first one that stays on
// the board and out of every snake body. No lookahead, nothing kept between turns.
// For more info see docs.battlesnake.com

use log::{info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::{DebugLogEntry, DebugLogger};
use crate::types::{Battlesnake, Board, Coord, Direction, Game, MoveResponse};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    /// Shared across requests; each move holds the lock only for one shuffle
    rng: Mutex<StdRng>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// The generator is seeded from `selection.rng_seed` when present, otherwise from the OS.
    /// Debug logging starts disabled; see [`Bot::with_debug_logger`].
    pub fn new(config: Config) -> Self {
        let rng = match config.selection.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Bot {
            config,
            rng: Mutex::new(rng),
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Replaces the debug logger used to record each turn
    pub fn with_debug_logger(mut self, debug_logger: DebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let customization = &self.config.customization;
        json!({
            "apiversion": customization.apiversion,
            "author": customization.author,
            "color": customization.color,
            "head": customization.head,
            "tail": customization.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes) as {}",
            game.id,
            board.width,
            board.height,
            board.snakes.len(),
            you.name
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, you: &Battlesnake) {
        info!("GAME OVER {} after {} turns as {}", game.id, turn, you.name);
    }

    /// Picks the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `MoveResponse` - The chosen direction plus the configured shout, if any
    pub fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> MoveResponse {
        let safe = {
            let mut rng = self.rng.lock();
            Self::first_safe_move(board, you, &mut *rng)
        };

        let chosen_move = match safe {
            Some(dir) => {
                info!("Turn {}: Chose {}", turn, dir.as_str());
                dir
            }
            None => {
                let fallback = self.config.selection.fallback_direction;
                warn!(
                    "Turn {}: No safe move from {:?}, falling back to {}",
                    turn,
                    Self::head_of(you),
                    fallback.as_str()
                );
                fallback
            }
        };

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_move(DebugLogEntry::new(
                &game.id,
                *turn,
                &you.id,
                chosen_move,
                board.clone(),
            ));
        }

        MoveResponse {
            direction: chosen_move,
            shout: self.config.selection.shout.clone(),
        }
    }

    /// Chooses a move for `you`, returning `fallback` when no candidate is safe
    ///
    /// Candidates are visited in a fresh random order drawn from `rng`, so ties
    /// between safe moves are broken randomly. The fallback is not checked.
    pub fn choose_move<R: Rng + ?Sized>(
        board: &Board,
        you: &Battlesnake,
        fallback: Direction,
        rng: &mut R,
    ) -> Direction {
        Self::first_safe_move(board, you, rng).unwrap_or(fallback)
    }

    /// First safe direction in a shuffled visiting order, if any
    pub fn first_safe_move<R: Rng + ?Sized>(
        board: &Board,
        you: &Battlesnake,
        rng: &mut R,
    ) -> Option<Direction> {
        let head = Self::head_of(you);
        let mut candidates = Direction::all();
        candidates.shuffle(rng);

        candidates
            .iter()
            .copied()
            .find(|dir| Self::is_safe(&dir.apply(&head), board, you))
    }

    /// All safe directions in fixed up/down/left/right order
    pub fn safe_moves(board: &Board, you: &Battlesnake) -> Vec<Direction> {
        let head = Self::head_of(you);
        Direction::all()
            .iter()
            .copied()
            .filter(|dir| Self::is_safe(&dir.apply(&head), board, you))
            .collect()
    }

    /// A coordinate is safe when it is on the board and unoccupied
    pub fn is_safe(coord: &Coord, board: &Board, you: &Battlesnake) -> bool {
        !Self::is_out_of_bounds(coord, board.width, board.height)
            && !Self::is_collision(coord, board, you)
    }

    /// Checks if a coordinate is out of bounds
    pub fn is_out_of_bounds(coord: &Coord, board_width: i32, board_height: i32) -> bool {
        coord.x < 0 || coord.x >= board_width || coord.y < 0 || coord.y >= board_height
    }

    /// Checks if a coordinate lies on any segment of any snake, ours included
    pub fn is_collision(coord: &Coord, board: &Board, you: &Battlesnake) -> bool {
        board
            .snakes
            .iter()
            .any(|snake| snake.body.contains(coord))
            || you.body.contains(coord)
    }

    /// Head is the first body segment; the `head` field covers an empty body
    fn head_of(you: &Battlesnake) -> Coord {
        you.body.first().copied().unwrap_or(you.head)
    }
}
