//! Security event repository module.

mod r#trait;
pub use r#trait::SecurityEventRepository;

mod noop;
pub use noop::NoOpSecurityEventRepository;

mod mock;
pub use mock::MockSecurityEventRepository;
