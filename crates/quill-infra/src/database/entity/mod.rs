//! SeaORM entities and their conversions to/from domain types.

pub mod comment;
pub mod post;
pub mod user;
