//! Authentication layer

pub mod user_auth;
