use crate::application::CsvToMovesUseCase;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::response::{relay_failure, relay_response};
use crate::infrastructure::task_api::ItemsMoveClient;
use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Header the front end puts the upstream API key in.
pub const CLIENT_API_KEY_HEADER: &str = "x-api-key";

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

/// Bounded in-memory log served at `/api/logs`; oldest entries drop first.
pub struct LogBuffer {
    entries: Mutex<Vec<LogEntry>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, level: &str, source: &str, message: &str) -> LogEntry {
        match level {
            "ERROR" => tracing::error!(source, "{}", message),
            "WARN" => tracing::warn!(source, "{}", message),
            _ => tracing::info!(source, "{}", message),
        }

        let entry = LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level.to_string(),
            source: source.to_string(),
            message: message.to_string(),
        };
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.push(entry.clone());
        if entries.len() > self.capacity {
            let overflow = entries.len() - self.capacity;
            entries.drain(..overflow);
        }
        entry
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

pub struct HttpState {
    pub client: Arc<dyn ItemsMoveClient>,
    pub transformer: CsvToMovesUseCase,
    pub logs: Arc<LogBuffer>,
}

impl HttpState {
    pub fn new(client: Arc<dyn ItemsMoveClient>, logs: Arc<LogBuffer>) -> Self {
        Self {
            client,
            transformer: CsvToMovesUseCase::new(),
            logs,
        }
    }
}

#[derive(Deserialize)]
struct TransformQuery {
    #[serde(default)]
    force: bool,
}

async fn relay_move(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<Value>,
) -> HttpResponse {
    let request_id = Uuid::new_v4().to_string();

    let api_key = req
        .headers()
        .get(CLIENT_API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());
    let Some(api_key) = api_key else {
        data.logs
            .push("WARN", "Relay", &format!("[{}] Rejected: missing API key", request_id));
        return HttpResponse::BadRequest()
            .insert_header(("x-request-id", request_id))
            .json(json!({ "error": "API key is required. Please enter your API key." }));
    };

    let move_count = payload
        .get("moves")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    data.logs.push(
        "INFO",
        "Relay",
        &format!("[{}] Forwarding {} moves upstream", request_id, move_count),
    );

    let (status, body) = match data.client.move_items(api_key, &payload).await {
        Ok(reply) => {
            let level = if reply.is_success() { "INFO" } else { "ERROR" };
            data.logs.push(
                level,
                "Relay",
                &format!("[{}] Upstream answered HTTP {}", request_id, reply.status),
            );
            relay_response(&reply)
        }
        Err(e) => {
            data.logs.push(
                "ERROR",
                "Relay",
                &format!("[{}] Upstream call failed: {}", request_id, e),
            );
            relay_failure(e.message())
        }
    };

    HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY))
        .insert_header(("x-request-id", request_id))
        .json(body)
}

#[post("/transform")]
async fn transform(
    data: web::Data<HttpState>,
    query: web::Query<TransformQuery>,
    body: String,
) -> impl Responder {
    match data.transformer.execute(&body, query.force) {
        Ok(batch) => {
            data.logs.push(
                "INFO",
                "Transform",
                &format!("Built batch with {} moves (force={})", batch.len(), batch.force),
            );
            HttpResponse::Ok().json(batch)
        }
        Err(e) => {
            let message = e.message();
            data.logs.push(
                "ERROR",
                "Transform",
                &format!("Error processing CSV: {}", message),
            );
            HttpResponse::BadRequest()
                .json(json!({ "error": format!("Error processing CSV: {}", message) }))
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK", "message": "Server is running" }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(data.logs.snapshot())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest()
                .json(json!({ "error": format!("Invalid JSON body: {}", err) }));
            InternalError::from_response(err, response).into()
        })
}

/// Routes of the relay, shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(
            web::resource(vec!["/move", "/api/items/move"]).route(web::put().to(relay_move)),
        )
        .service(transform)
        .service(health)
        .service(web::scope("/api").service(get_logs));
}

pub fn start_server(config: &AppConfig, client: Arc<dyn ItemsMoveClient>) -> std::io::Result<Server> {
    let logs = Arc::new(LogBuffer::new(config.log_capacity));
    let state = web::Data::new(HttpState::new(client, logs.clone()));

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Browser front end is served from another origin

        App::new().wrap(cors).app_data(state.clone()).configure(configure)
    })
    .bind(config.bind_address())?
    .run();

    logs.push(
        "INFO",
        "Server",
        &format!("Server running on http://{}:{}", config.host, config.port),
    );
    logs.push(
        "INFO",
        "Server",
        &format!("Health check: http://{}:{}/health", config.host, config.port),
    );

    Ok(server)
}
