//! Refresh-token repository module.

mod r#trait;
pub use r#trait::TokenRepository;

mod memory;
pub use memory::InMemoryTokenRepository;

#[cfg(test)]
mod tests;
