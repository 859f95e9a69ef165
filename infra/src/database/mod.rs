//! Database module - MySQL implementations using SQLx.

pub mod connection;
pub mod mysql;
