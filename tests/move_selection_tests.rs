// Integration tests for move selection
//
// Board scenarios run through the public Bot API with seeded generators so
// every failure is reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wary_snake::bot::Bot;
use wary_snake::config::Config;
use wary_snake::types::{Battlesnake, Board, Coord, Direction, Game};

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 80,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
    Board {
        height,
        width,
        food: vec![Coord { x: 0, y: 0 }],
        snakes,
        hazards: vec![],
    }
}

fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: Default::default(),
        timeout: 500,
        source: "test".to_string(),
    }
}

/// Walls of other snakes around (5, 5) leaving only `open` free
fn boxed_in_except(open: Direction) -> (Board, Battlesnake) {
    let me = snake("me", &[(5, 5)]);
    let blockers: Vec<Battlesnake> = Direction::all()
        .iter()
        .filter(|&&dir| dir != open)
        .enumerate()
        .map(|(i, dir)| {
            let cell = dir.apply(&Coord { x: 5, y: 5 });
            snake(&format!("blocker-{}", i), &[(cell.x, cell.y)])
        })
        .collect();

    let mut snakes = vec![me.clone()];
    snakes.extend(blockers);
    (board(11, 11, snakes), me)
}

#[test]
fn test_interior_head_stays_on_board() {
    for width in 3..9 {
        for height in 3..9 {
            for x in 1..width - 1 {
                for y in 1..height - 1 {
                    let me = snake("me", &[(x, y)]);
                    let b = board(width, height, vec![me.clone()]);
                    let mut rng = StdRng::seed_from_u64((width * 100 + height * 10 + x + y) as u64);

                    let dir = Bot::choose_move(&b, &me, Direction::Left, &mut rng);
                    let next = dir.apply(&me.body[0]);
                    assert!(
                        !Bot::is_out_of_bounds(&next, width, height),
                        "{}x{} head ({}, {}) moved {} off the board",
                        width,
                        height,
                        x,
                        y,
                        dir
                    );
                }
            }
        }
    }
}

#[test]
fn test_uniquely_safe_direction_always_wins() {
    for open in Direction::all() {
        let (b, me) = boxed_in_except(open);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                Bot::choose_move(&b, &me, Direction::Left, &mut rng),
                open,
                "seed {} ignored the only safe move",
                seed
            );
        }
    }
}

#[test]
fn test_wall_and_body_leave_one_exit() {
    // Head on the left wall, neck below, another snake to the right: only up remains
    let me = snake("me", &[(0, 5), (0, 4), (0, 3)]);
    let other = snake("other", &[(1, 5), (2, 5), (3, 5)]);
    let b = board(11, 11, vec![me.clone(), other]);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(Bot::choose_move(&b, &me, Direction::Left, &mut rng), Direction::Up);
    }
}

#[test]
fn test_one_by_one_board_returns_fallback() {
    let me = snake("me", &[(0, 0)]);
    let b = board(1, 1, vec![me.clone()]);
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(Bot::choose_move(&b, &me, Direction::Left, &mut rng), Direction::Left);
}

#[test]
fn test_surrounded_returns_fallback_even_if_unsafe() {
    let me = snake("me", &[(5, 5), (4, 5)]);
    let others = vec![
        snake("a", &[(5, 6), (5, 7)]),
        snake("b", &[(6, 5), (7, 5)]),
        snake("c", &[(5, 4), (5, 3)]),
    ];
    let mut snakes = vec![me.clone()];
    snakes.extend(others);
    let b = board(11, 11, snakes);
    let mut rng = StdRng::seed_from_u64(5);

    // Left is our own neck, yet it is the fallback
    assert!(Bot::safe_moves(&b, &me).is_empty());
    assert_eq!(Bot::choose_move(&b, &me, Direction::Left, &mut rng), Direction::Left);
}

#[test]
fn test_never_returns_down_into_own_neck() {
    let me = snake("me", &[(5, 5), (5, 4)]);
    let b = board(11, 11, vec![me.clone()]);
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..500 {
        let dir = Bot::choose_move(&b, &me, Direction::Left, &mut rng);
        assert_ne!(dir, Direction::Down);
        assert!(Bot::safe_moves(&b, &me).contains(&dir));
    }
}

#[test]
fn test_repeated_calls_are_each_safe() {
    let me = snake("me", &[(2, 2), (2, 1), (1, 1), (1, 2)]);
    let other = snake("other", &[(3, 3), (3, 2), (4, 2)]);
    let b = board(5, 5, vec![me.clone(), other]);
    let safe = Bot::safe_moves(&b, &me);
    assert_eq!(safe, vec![Direction::Up]);

    let mut rng = StdRng::seed_from_u64(77);
    let first = Bot::choose_move(&b, &me, Direction::Left, &mut rng);
    let second = Bot::choose_move(&b, &me, Direction::Left, &mut rng);
    assert!(safe.contains(&first));
    assert!(safe.contains(&second));
}

#[test]
fn test_bot_get_move_with_seeded_config() {
    let mut config = Config::default_hardcoded();
    config.selection.rng_seed = Some(11);
    let bot = Bot::new(config);

    let me = snake("me", &[(5, 5), (5, 4)]);
    let b = board(11, 11, vec![me.clone()]);

    for turn in 0..100 {
        let response = bot.get_move(&game(), &turn, &b, &me);
        assert_ne!(response.direction, Direction::Down);
        assert_eq!(response.shout, None);
    }
}
