//! Typed layer over the Stellar Burgers endpoints.
//!
//! # Design
//! The wire DTOs mirror the service's JSON but are defined independently from
//! the mock-server crate; the end-to-end suites catch schema drift. Every
//! endpoint method returns the raw `ApiResponse` because callers assert on the
//! status code before choosing which DTO to decode the body into.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{ApiResponse, Headers};

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const ORDERS: &str = "/api/orders";
pub const INGREDIENTS: &str = "/api/ingredients";

/// Registration payload. All three fields are required by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterUser {
    pub fn credentials(&self) -> LoginUser {
        LoginUser {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
}

/// Successful body of both register and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOrder {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub number: u64,
    /// Everything else the service attaches to an order (ingredients, owner,
    /// price) is kept unparsed.
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub success: bool,
    pub name: String,
    pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub price: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Ingredient>,
}

/// Failure body: `{"success": false, "message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Endpoint calls against one `ApiClient`.
#[derive(Debug, Clone, Copy)]
pub struct StellarBurgers<'a> {
    client: &'a ApiClient,
}

impl<'a> StellarBurgers<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn register(&self, user: &RegisterUser) -> Result<ApiResponse, ApiError> {
        self.register_raw(to_json(user)?)
    }

    /// Register with an arbitrary body, e.g. one with a field left out.
    pub fn register_raw(&self, body: Value) -> Result<ApiResponse, ApiError> {
        self.client.post(REGISTER, None, Some(body), None)
    }

    pub fn login(&self, credentials: &LoginUser) -> Result<ApiResponse, ApiError> {
        self.client.post(LOGIN, None, Some(to_json(credentials)?), None)
    }

    /// Place an order. `access_token` is sent verbatim as `Authorization`,
    /// the way the service hands it out (`Bearer ...`).
    pub fn create_order(
        &self,
        order: &CreateOrder,
        access_token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let headers = access_token
            .map(|token| Headers::from([("Authorization".to_string(), token.to_string())]));
        self.client.post(ORDERS, None, Some(to_json(order)?), headers)
    }

    pub fn ingredients(&self) -> Result<ApiResponse, ApiError> {
        self.client.get(INGREDIENTS, None, None)
    }

    /// Ids of the first `count` catalog ingredients. Empty when the catalog
    /// request does not return 200.
    pub fn ingredient_ids(&self, count: usize) -> Result<Vec<String>, ApiError> {
        let response = self.ingredients()?;
        if response.status != 200 {
            return Ok(Vec::new());
        }
        let catalog: IngredientsResponse = response.json()?;
        Ok(catalog.data.into_iter().take(count).map(|i| i.id).collect())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::Serialization)
}
