//! Core library for the ledger-tools command line application.
//!
//! Two tools are built on it. The colorizer backs up a target workbook,
//! reads the order identifiers listed on two reference sheets, classifies
//! every target row by membership and writes a copy with the matched rows
//! filled ([`ledger::tools::colorize`]). The inspector prints the structure of
//! every workbook in a directory without touching it
//! ([`ledger::tools::inspect`]). Workbook IO lives under
//! [`ledger::tools::io`], the in-memory sheet model in
//! [`ledger::tools::model`] and the decision table in
//! [`ledger::tools::classify`].

pub mod ledger;

pub use ledger::tools::{
    Result, ToolError, classify, colorize, config, error, inspect, io, model,
};
