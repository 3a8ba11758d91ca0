//! Route handlers for the JSON API.
//!
//! Handlers are thin adapters: they lock the shared store, call into the
//! pure modules, and wrap the result in a JSON response. Route paths live in
//! [crate::endpoints] and are wired up in [crate::routing].

pub mod customers;
pub mod fraud;
pub mod statistics;
pub mod system;
pub mod transactions;
