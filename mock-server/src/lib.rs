use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub plan: String,
}

/// In-memory backend state. Cars and reservations are stored as raw JSON so
/// the double preserves whatever shape a client sends, including mixed-typed
/// `userId` values in old reservation records.
#[derive(Default)]
pub struct AppState {
    users: HashMap<i64, UserRecord>,
    cars: HashMap<i64, Value>,
    reservations: HashMap<i64, Value>,
    next_id: i64,
}

impl AppState {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<AppState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(AppState::default()));
    Router::new()
        .route("/auth", post(register))
        .route("/auth/login", post(login))
        .route("/admin_user/login", post(admin_login))
        .route("/cars", get(list_cars).post(create_car))
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation).put(update_reservation),
        )
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/upload", post(upload_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn issue_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}

// --- auth ---

#[derive(Deserialize)]
struct RegisterInput {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    plan: String,
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterInput>,
) -> (StatusCode, Json<Value>) {
    let mut state = db.write().await;
    if state.users.values().any(|u| u.email == input.email) {
        return reject(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let id = state.next();
    let user = UserRecord {
        id,
        name: input.name,
        email: input.email,
        password: input.password,
        plan: input.plan,
    };
    state.users.insert(id, user.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "plan": user.plan,
            "token": issue_token(),
        })),
    )
}

#[derive(Deserialize)]
struct LoginInput {
    email: String,
    password: String,
}

async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> (StatusCode, Json<Value>) {
    let state = db.read().await;
    match state
        .users
        .values()
        .find(|u| u.email == input.email && u.password == input.password)
    {
        Some(user) => (
            StatusCode::OK,
            Json(json!({
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "plan": user.plan,
                "token": issue_token(),
            })),
        ),
        None => reject(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

#[derive(Deserialize)]
struct AdminLoginInput {
    username: String,
    password: String,
}

async fn admin_login(Json(input): Json<AdminLoginInput>) -> (StatusCode, Json<Value>) {
    if input.username == ADMIN_USERNAME && input.password == ADMIN_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({
                "id": 1000,
                "name": "Administrator",
                "email": "admin@certiweb.com",
                "role": "admin",
                "token": issue_token(),
            })),
        )
    } else {
        reject(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

// --- cars ---

async fn list_cars(State(db): State<Db>) -> Json<Vec<Value>> {
    let state = db.read().await;
    Json(state.cars.values().cloned().collect())
}

async fn create_car(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if bearer_token(&headers).is_none() {
        return reject(StatusCode::UNAUTHORIZED, "Missing authorization token");
    }
    let mut state = db.write().await;
    let id = state.next();
    if let Some(obj) = input.as_object_mut() {
        obj.insert("id".to_string(), json!(id));
    }
    state.cars.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

// --- reservations ---

async fn list_reservations(State(db): State<Db>) -> Json<Vec<Value>> {
    let state = db.read().await;
    Json(state.reservations.values().cloned().collect())
}

async fn create_reservation(
    State(db): State<Db>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = db.write().await;
    let id = state.next();
    if let Some(obj) = input.as_object_mut() {
        obj.insert("id".to_string(), json!(id));
    }
    state.reservations.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn get_reservation(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    db.read()
        .await
        .reservations
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Reservation not found"))
}

async fn update_reservation(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut state = db.write().await;
    let record = state
        .reservations
        .get_mut(&id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Reservation not found"))?;
    if let (Some(target), Some(patch)) = (record.as_object_mut(), input.as_object()) {
        for (key, value) in patch {
            if key != "id" {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(Json(record.clone()))
}

// --- users ---

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<RegisterInput>,
) -> (StatusCode, Json<Value>) {
    let mut state = db.write().await;
    let id = state.next();
    let user = UserRecord {
        id,
        name: input.name,
        email: input.email,
        password: input.password,
        plan: input.plan,
    };
    state.users.insert(id, user.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "password": user.password,
            "plan": user.plan,
        })),
    )
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let state = db.read().await;
    state
        .users
        .get(&id)
        .map(|user| {
            Json(json!({
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "plan": user.plan,
            }))
        })
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))
}

// --- image host double ---

async fn upload_image(
    Query(params): Query<HashMap<String, String>>,
    _body: Bytes,
) -> (StatusCode, Json<Value>) {
    if params.get("key").map_or(true, String::is_empty) {
        return reject(StatusCode::BAD_REQUEST, "Missing API key");
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "url": "https://images.certiweb.test/mock/car.png",
                "display_url": "https://images.certiweb.test/mock/car.png",
                "delete_url": "https://images.certiweb.test/mock/car/delete",
            }
        })),
    )
}
