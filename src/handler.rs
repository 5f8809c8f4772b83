// HTTP handler bindings for Battlesnake API endpoints
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Extracting Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses
//
// A payload that does not decode is answered with 400 and a JSON error body;
// it never takes the server down.

use log::warn;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::response::status::BadRequest;
use rocket::serde::json::{self, Json};
use rocket::{Build, Request, Rocket};
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::types::{GameState, MoveResponse};

/// Value of the `Server` header on every response
pub const SERVER_HEADER: &str = "battlesnake/github/wary-snake";

type Payload<'r> = Result<Json<GameState>, json::Error<'r>>;

/// Turns a decode failure into the 400 response body
fn invalid_input(endpoint: &str, err: json::Error<'_>) -> BadRequest<Json<Value>> {
    warn!("Rejected {} payload: {}", endpoint, err);
    BadRequest(Json(json!({ "error": format!("invalid game state: {}", err) })))
}

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts - allows initialization logic
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(
    bot: &rocket::State<Bot>,
    start_req: Payload<'_>,
) -> Result<Status, BadRequest<Json<Value>>> {
    let start_req = start_req.map_err(|e| invalid_input("/start", e))?;
    bot.start(
        &start_req.game,
        &start_req.turn,
        &start_req.board,
        &start_req.you,
    );

    Ok(Status::Ok)
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Payload<'_>,
) -> Result<Json<MoveResponse>, BadRequest<Json<Value>>> {
    let move_req = move_req.map_err(|e| invalid_input("/move", e))?;
    let response = bot.get_move(
        &move_req.game,
        &move_req.turn,
        &move_req.board,
        &move_req.you,
    );

    Ok(Json(response))
}

/// POST /end endpoint
/// Called when a game ends - allows cleanup and logging
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(
    bot: &rocket::State<Bot>,
    end_req: Payload<'_>,
) -> Result<Status, BadRequest<Json<Value>>> {
    let end_req = end_req.map_err(|e| invalid_input("/end", e))?;
    bot.end(&end_req.game, &end_req.turn, &end_req.board, &end_req.you);

    Ok(Status::Ok)
}

/// Fallback for errors raised before a route runs (unknown path, wrong content type)
#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<Value>) {
    warn!("{} {} -> {}", req.method(), req.uri(), status);
    (
        status,
        Json(json!({ "error": status.reason().unwrap_or("request failed") })),
    )
}

/// Assembles the Rocket instance serving `bot` on the given socket
pub fn build_rocket(bot: Bot, address: &str, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", address.to_string()))
        .merge(("port", port));

    rocket::custom(figment)
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", SERVER_HEADER);
            })
        }))
        .mount("/", routes![index, start, get_move, end])
        .register("/", catchers![default_catcher])
}
