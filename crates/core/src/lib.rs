//! Scheduling and voting domain for the datepoll bot.
//!
//! A [`models::Schedule`] aggregate holds candidate dates and per-user votes.
//! [`service::ScheduleService`] applies the user-facing operations on top of
//! any [`store::ScheduleStore`] implementation.

pub mod errors;
pub mod mock;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;
