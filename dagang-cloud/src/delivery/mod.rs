//! Product delivery core
//!
//! Resolution, ledger consumption, and message rendering for fulfilling
//! digital product deliveries. The pieces are split so the selection and
//! consumption rules stay pure and unit-testable; only
//! [`fulfillment::fulfill`] touches the database.

pub mod fulfillment;
pub mod ledger;
pub mod resolver;
pub mod template;
