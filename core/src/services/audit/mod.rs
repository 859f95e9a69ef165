//! Asynchronous security-event emission.

mod sink;

pub use sink::AuditSink;
