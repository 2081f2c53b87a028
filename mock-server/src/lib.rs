use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: u64,
}

const CATALOG: &[(&str, &str, &str, u64)] = &[
    ("61c0c5a71d1f82001bdaaa6d", "Fluorescent bun R2-D3", "bun", 988),
    ("61c0c5a71d1f82001bdaaa6c", "Crater bun N-200i", "bun", 1255),
    ("61c0c5a71d1f82001bdaaa6f", "Meat of immortal mollusks Protostomia", "main", 1337),
    ("61c0c5a71d1f82001bdaaa71", "Bio-cutlet from Martian Magnolia", "main", 424),
    ("61c0c5a71d1f82001bdaaa72", "Spicy-X sauce", "sauce", 90),
    ("61c0c5a71d1f82001bdaaa76", "Mineral rings", "main", 300),
];

pub fn catalog() -> Vec<Ingredient> {
    CATALOG
        .iter()
        .map(|&(id, name, kind, price)| Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            price,
        })
        .collect()
}

/// Body for register and login. Every field is optional so a missing one
/// becomes a 403/401 reply instead of an extractor rejection.
#[derive(Deserialize, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateOrder {
    pub ingredients: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
struct Account {
    email: String,
    password: String,
    name: String,
}

#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, Account>,
    /// access token -> email
    sessions: HashMap<String, String>,
    orders: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/orders", post(create_order))
        .route("/api/ingredients", get(ingredients))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "success": false, "message": message })))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

fn issue_tokens(store: &mut Store, account: &Account) -> Reply {
    let access_token = format!("Bearer {}", Uuid::new_v4().simple());
    let refresh_token = Uuid::new_v4().simple().to_string();
    store
        .sessions
        .insert(access_token.clone(), account.email.clone());
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "user": { "email": account.email, "name": account.name },
            "accessToken": access_token,
            "refreshToken": refresh_token,
        })),
    )
}

async fn register(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply {
    let (Some(email), Some(password), Some(name)) = (
        non_empty(input.email),
        non_empty(input.password),
        non_empty(input.name),
    ) else {
        return failure(
            StatusCode::FORBIDDEN,
            "Email, password and name are required fields",
        );
    };

    let mut store = db.write().await;
    if store.users.contains_key(&email) {
        tracing::debug!(%email, "duplicate registration");
        return failure(StatusCode::FORBIDDEN, "User already exists");
    }
    let account = Account {
        email: email.clone(),
        password,
        name,
    };
    store.users.insert(email, account.clone());
    tracing::info!(email = %account.email, "registered user");
    issue_tokens(&mut store, &account)
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply {
    let mut store = db.write().await;
    let account = match (input.email, input.password) {
        (Some(email), Some(password)) => store
            .users
            .get(&email)
            .filter(|account| account.password == password)
            .cloned(),
        _ => None,
    };
    match account {
        Some(account) => issue_tokens(&mut store, &account),
        None => failure(StatusCode::UNAUTHORIZED, "email or password are incorrect"),
    }
}

async fn create_order(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateOrder>,
) -> Reply {
    let mut store = db.write().await;
    let owner = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|token| store.sessions.get(token))
        .and_then(|email| store.users.get(email))
        .cloned();
    let Some(owner) = owner else {
        return failure(StatusCode::UNAUTHORIZED, "You should be authorised");
    };

    let ids = input.ingredients.unwrap_or_default();
    if ids.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Ingredient ids must be provided");
    }
    let catalog = catalog();
    let mut picked = Vec::with_capacity(ids.len());
    for id in &ids {
        match catalog.iter().find(|ingredient| &ingredient.id == id) {
            Some(ingredient) => picked.push(ingredient),
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "One or more ids provided are incorrect",
                )
            }
        }
    }

    store.orders += 1;
    let number = store.orders;
    let price: u64 = picked.iter().map(|ingredient| ingredient.price).sum();
    let name = burger_name(&picked);
    tracing::info!(number, owner = %owner.email, "order placed");
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "name": name,
            "order": {
                "number": number,
                "ingredients": picked,
                "owner": { "name": owner.name, "email": owner.email },
                "status": "done",
                "price": price,
            },
        })),
    )
}

/// "Spicy-X Mineral burger": first word of each distinct ingredient.
fn burger_name(picked: &[&Ingredient]) -> String {
    let mut words: Vec<&str> = Vec::new();
    for ingredient in picked {
        let word = ingredient.name.split_whitespace().next().unwrap_or("");
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    words.push("burger");
    words.join(" ")
}

async fn ingredients() -> Json<Value> {
    Json(json!({ "success": true, "data": catalog() }))
}
