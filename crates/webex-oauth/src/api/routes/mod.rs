//! Route handlers

pub mod callback;
pub mod index;
