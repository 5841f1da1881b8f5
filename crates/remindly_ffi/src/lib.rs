//! Flutter bridge surface for Remindly.

pub mod api;
