#![forbid(unsafe_code)]

mod client;
mod engine;
mod error;
mod schema;

pub use client::*;
pub use engine::*;
pub use error::*;
pub use schema::*;
