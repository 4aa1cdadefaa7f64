//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the user store and the credential hasher.

pub mod auth;
pub mod user;

pub use auth::AuthService;
pub use user::UserService;
