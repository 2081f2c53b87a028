//! Blocking API client for the Stellar Burgers food-ordering service.
//!
//! # Overview
//! `ApiClient` issues GET/POST/PUT/DELETE requests against one base URL and
//! returns every response as data, whatever its status code. `StellarBurgers`
//! adds typed calls for registration, login, ordering and the ingredient
//! catalog on top of it.
//!
//! # Design
//! - One `ureq::Agent` per client, so cookies and keep-alive connections carry
//!   across calls on that client and never leak to another.
//! - Only transport failures are `Err`. HTTP error codes are left to the
//!   caller's assertions, and JSON bodies are parsed on demand.
//! - DTOs are defined independently from the mock-server crate; the
//!   end-to-end suites catch schema drift.

pub mod burgers;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod testdata;

pub use burgers::{
    AuthResponse, CreateOrder, ErrorResponse, Ingredient, IngredientsResponse, LoginUser, Order,
    OrderResponse, RegisterUser, StellarBurgers, User,
};
pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{ApiRequest, ApiResponse, Form, Headers, HttpMethod, Params, Payload};
