//! Database access layer

pub mod auto_deliveries;
pub mod customers;
pub mod delivery_configs;
pub mod products;
pub mod stores;
pub mod templates;
pub mod users;
pub mod variants;
