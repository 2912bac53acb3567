#![forbid(unsafe_code)]

//! Core: environment probe, sizing, handler tables, and inbound props.

pub mod clock;
pub mod container;
pub mod diff;
pub mod dimensions;
pub mod env;
pub mod error;
pub mod events;
pub mod props;
pub mod spec_doc;
