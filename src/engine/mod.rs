// src/engine/mod.rs
pub mod filter;
pub mod resolve;
pub mod types;

pub use filter::matches;
pub use resolve::Resolver;
pub use types::{Resolution, Source, Unresolved};
