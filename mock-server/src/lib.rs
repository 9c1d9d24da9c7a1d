use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const STATE_SERVER_UP: &str = "Server is up";
pub const STATE_SERVER_DOWN: &str = "Server is down";
pub const STATE_SERVER_BROKEN: &str = "Server is broken";
pub const STATE_USER_EXISTS: &str = "A user exists";
pub const STATE_NO_USERS: &str = "No users exist";

const DEFAULT_USER_NAME: &str = "john smith";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ServerHealth {
    #[default]
    Up,
    /// Reports `down` with a 503.
    Down,
    /// Fails every request with an empty 5xx.
    Broken,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Default, Debug)]
pub struct ProviderState {
    pub health: ServerHealth,
    pub users: HashMap<String, User>,
}

#[derive(Deserialize)]
pub struct StateSetup {
    pub state: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

#[derive(Deserialize)]
struct UserQuery {
    id: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("unknown provider state: {0}")]
    UnknownState(String),
    #[error("state `{state}` requires variable `{name}`")]
    MissingVariable { state: String, name: &'static str },
}

impl IntoResponse for SetupError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

pub type Db = Arc<RwLock<ProviderState>>;

/// Handle to a running provider's state. Clones share the same state.
#[derive(Clone, Default)]
pub struct Provider {
    db: Db,
}

impl Provider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/users", get(get_user_by_query))
            .route("/users/{id}", get(get_user))
            .route("/_state", post(setup_state))
            .with_state(self.db.clone())
    }

    /// Apply a named provider state. `"A user exists"` reads `userId`
    /// from `variables`.
    pub async fn setup(
        &self,
        state: &str,
        variables: &HashMap<String, String>,
    ) -> Result<(), SetupError> {
        apply_state(&self.db, state, variables).await
    }

    pub async fn health(&self) -> ServerHealth {
        self.db.read().await.health
    }
}

pub fn app() -> Router {
    Provider::new().router()
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Provider::new()).await
}

pub async fn serve(listener: TcpListener, provider: Provider) -> Result<(), std::io::Error> {
    axum::serve(listener, provider.router()).await
}

async fn apply_state(
    db: &Db,
    state: &str,
    variables: &HashMap<String, String>,
) -> Result<(), SetupError> {
    let mut current = db.write().await;
    match state {
        STATE_SERVER_UP => current.health = ServerHealth::Up,
        STATE_SERVER_DOWN => current.health = ServerHealth::Down,
        STATE_SERVER_BROKEN => current.health = ServerHealth::Broken,
        STATE_USER_EXISTS => {
            let user_id = variables.get("userId").ok_or_else(|| SetupError::MissingVariable {
                state: state.to_string(),
                name: "userId",
            })?;
            current.users.insert(
                user_id.clone(),
                User {
                    user_id: user_id.clone(),
                    name: DEFAULT_USER_NAME.to_string(),
                },
            );
        }
        STATE_NO_USERS => current.users.clear(),
        other => return Err(SetupError::UnknownState(other.to_string())),
    }
    info!(state, "provider state applied");
    Ok(())
}

async fn health(State(db): State<Db>) -> Response {
    match db.read().await.health {
        ServerHealth::Up => Json(Health { status: "up" }).into_response(),
        ServerHealth::Down => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health { status: "down" })).into_response()
        }
        ServerHealth::Broken => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    find_user(&db, &id).await
}

async fn get_user_by_query(
    State(db): State<Db>,
    Query(query): Query<UserQuery>,
) -> Result<Json<User>, StatusCode> {
    let id = query.id.ok_or(StatusCode::BAD_REQUEST)?;
    find_user(&db, &id).await
}

async fn find_user(db: &Db, id: &str) -> Result<Json<User>, StatusCode> {
    let current = db.read().await;
    if current.health == ServerHealth::Broken {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    current.users.get(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn setup_state(
    State(db): State<Db>,
    Json(input): Json<StateSetup>,
) -> Result<StatusCode, SetupError> {
    apply_state(&db, &input.state, &input.variables).await?;
    Ok(StatusCode::NO_CONTENT)
}
