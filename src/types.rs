// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(format!("Invalid direction '{}'", other)),
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

/// Body of the POST /move response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shout: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direction_apply_offsets() {
        let origin = Coord { x: 5, y: 5 };
        assert_eq!(Direction::Up.apply(&origin), Coord { x: 5, y: 6 });
        assert_eq!(Direction::Down.apply(&origin), Coord { x: 5, y: 4 });
        assert_eq!(Direction::Left.apply(&origin), Coord { x: 4, y: 5 });
        assert_eq!(Direction::Right.apply(&origin), Coord { x: 6, y: 5 });
    }

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" up ".parse::<Direction>(), Ok(Direction::Up));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_minimal_payload_decodes() {
        // Only the fields the engine is guaranteed to send
        let payload = json!({
            "game": {"id": "g1", "timeout": 500},
            "turn": 3,
            "board": {
                "height": 11,
                "width": 11,
                "food": [{"x": 1, "y": 1}],
                "snakes": [{
                    "id": "s1", "name": "me", "health": 90,
                    "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}],
                    "head": {"x": 5, "y": 5}, "length": 2, "shout": ""
                }]
            },
            "you": {
                "id": "s1", "name": "me", "health": 90,
                "body": [{"x": 5, "y": 5}, {"x": 5, "y": 4}],
                "head": {"x": 5, "y": 5}, "length": 2
            }
        });

        let state: GameState = serde_json::from_value(payload).unwrap();
        assert_eq!(state.turn, 3);
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.shout, None);
        assert_eq!(state.board.snakes[0].shout.as_deref(), Some(""));
    }

    #[test]
    fn test_move_response_omits_missing_shout() {
        let response = MoveResponse {
            direction: Direction::Right,
            shout: None,
        };
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"move": "right"}));

        let response = MoveResponse {
            direction: Direction::Up,
            shout: Some("hiss".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"move": "up", "shout": "hiss"})
        );
    }
}
