//! Core types and trait definitions for the Cadence habit tracker.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The aggregation and streak engines are pure functions; everything that
//! touches persisted state goes through the [`store::HabitStore`] trait.

pub mod activity;
pub mod checkin;
pub mod error;
pub mod habit;
pub mod report;
pub mod store;
pub mod streak;
pub mod summary;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
