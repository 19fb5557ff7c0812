mod auth;
pub mod client;
pub mod types;
mod videos;

pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
