// HTTP API server for browser and external front ends: manual command
// submission and free-text chat over the same session layer
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::command::{registry, CommandForm, CommandKind, ValueType};
use crate::dispatch::Outcome;
use crate::error::ChainPilotResult;
use crate::session::{ConversationEntry, Session};

/// Submissions are serialized through this lock, which is what enforces the
/// single in-flight slot for HTTP clients: later requests queue in arrival
/// order until the pending one settles.
type AppState = Arc<Mutex<Session>>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandApiRequest {
    pub kind: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatApiRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatApiResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub value_type: &'static str,
    pub placeholder: &'static str,
    pub default: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CommandDescriptor {
    pub kind: &'static str,
    pub label: String,
    pub description: &'static str,
    pub gas_hint: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

pub struct ApiServer {
    session: AppState,
}

impl ApiServer {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn start(&self, host: &str, port: u16) -> ChainPilotResult<()> {
        let app = self.create_router();
        let addr = format!("{}:{}", host, port);

        info!("Starting chainpilot API server on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn create_router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            // Manual command mode
            .route("/api/v1/commands", get(list_commands_handler))
            .route("/api/v1/command", post(command_handler))
            // Chat mode
            .route("/api/v1/chat", post(chat_handler))
            // Session
            .route("/api/v1/address", get(address_handler))
            .route("/api/v1/conversation", get(conversation_handler))
            // Browser front ends talk to this directly
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.session))
    }
}

pub async fn start_api_server(host: &str, port: u16, session: Session) -> ChainPilotResult<()> {
    ApiServer::new(session).start(host, port).await
}

async fn health_handler() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

async fn list_commands_handler() -> Json<ApiResponse<Vec<CommandDescriptor>>> {
    let commands = CommandKind::ALL
        .into_iter()
        .map(|kind| CommandDescriptor {
            kind: kind.wire_name(),
            label: kind.label(),
            description: registry::description(kind),
            gas_hint: registry::gas_hint(kind),
            fields: registry::fields(kind)
                .iter()
                .map(|spec| FieldDescriptor {
                    name: spec.name,
                    label: spec.label,
                    required: spec.required,
                    value_type: match spec.value_type {
                        ValueType::Text => "string",
                        ValueType::Integer => "integer",
                    },
                    placeholder: spec.placeholder,
                    default: spec.default,
                })
                .collect(),
        })
        .collect();

    Json(ApiResponse::success(commands))
}

async fn command_handler(
    State(session): State<AppState>,
    Json(request): Json<CommandApiRequest>,
) -> Json<ApiResponse<Outcome>> {
    let kind: CommandKind = match request.kind.parse() {
        Ok(kind) => kind,
        Err(e) => return Json(ApiResponse::error(e.to_string())),
    };

    let mut form = CommandForm::with_kind(kind);
    for (name, value) in &request.fields {
        if let Err(e) = form.set_field(name, value.clone()) {
            return Json(ApiResponse::error(e.to_string()));
        }
    }
    let command = match form.build_command() {
        Ok(command) => command,
        Err(e) => return Json(ApiResponse::error(e.to_string())),
    };

    let mut session = session.lock().await;
    let outcome = session.submit_command(command).await;
    Json(ApiResponse::success(outcome))
}

async fn chat_handler(
    State(session): State<AppState>,
    Json(request): Json<ChatApiRequest>,
) -> Json<ApiResponse<ChatApiResponse>> {
    if request.message.trim().is_empty() {
        return Json(ApiResponse::error("Message must not be empty".to_string()));
    }

    let mut session = session.lock().await;
    let entry = session.submit_chat(request.message.trim()).await;
    Json(ApiResponse::success(ChatApiResponse {
        reply: entry.text.clone(),
        outcome: entry.outcome.clone(),
    }))
}

async fn address_handler(State(session): State<AppState>) -> Json<ApiResponse<Outcome>> {
    let mut session = session.lock().await;
    let outcome = session
        .submit_command(crate::command::AgentCommand::GetAgentAddress)
        .await;
    Json(ApiResponse::success(outcome))
}

async fn conversation_handler(
    State(session): State<AppState>,
) -> Json<ApiResponse<Vec<ConversationEntry>>> {
    let session = session.lock().await;
    let entries: Vec<ConversationEntry> = session.conversation().entries().cloned().collect();
    Json(ApiResponse::success(entries))
}
