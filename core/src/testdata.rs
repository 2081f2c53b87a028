//! Random user data for end-to-end runs.

use rand::Rng;

use crate::burgers::RegisterUser;

pub const DEFAULT_RANDOM_LEN: usize = 10;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercase ASCII letters and digits.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// A user that is, with overwhelming probability, not registered yet.
pub fn unique_user() -> RegisterUser {
    RegisterUser {
        email: format!("test_{}@example.com", random_string(8)),
        password: random_string(12),
        name: format!("TestUser_{}", random_string(6)),
    }
}

/// Fixed credentials shared across runs.
pub fn existing_user() -> RegisterUser {
    RegisterUser {
        email: "existing_user@example.com".to_string(),
        password: "password123".to_string(),
        name: "ExistingUser".to_string(),
    }
}
