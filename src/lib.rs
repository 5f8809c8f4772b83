// Library exports for Battlesnake bot
// This allows the replay tool, the server binary and the tests to share the core bot logic

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod handler;
pub mod replay;
pub mod types;
