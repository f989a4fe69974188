pub mod auth;
pub mod config;
pub mod schedule;
pub mod suggest;
pub mod tasks;
