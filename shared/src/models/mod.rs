//! Domain models shared between the API service and clients

pub mod customer;
pub mod delivery;
pub mod product;
pub mod store;
pub mod user;
