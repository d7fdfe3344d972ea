//! # Quill Web Server
//!
//! Server-rendered blogging platform: visitors read posts, registered users
//! comment, and the single administrator edits and deletes.

pub mod config;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod views;
