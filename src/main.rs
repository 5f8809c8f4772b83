use log::info;
use std::env;

use wary_snake::bot::Bot;
use wary_snake::config::Config;
use wary_snake::debug_logger::DebugLogger;
use wary_snake::handler;

#[rocket::launch]
async fn rocket() -> _ {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    // Load configuration once at startup
    let config = Config::load_or_default();

    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable, so it takes precedence over the configured default.
    let port = config.server.resolve_port(env::var("PORT").ok().as_deref());
    let address = config.server.address.clone();

    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config).with_debug_logger(debug_logger);

    info!("Starting Battlesnake Server at http://{}:{}...", address, port);

    handler::build_rocket(bot, &address, port)
}
