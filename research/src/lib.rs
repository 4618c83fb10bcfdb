//! Boundary of the backtest: CSV ingestion, layered configuration and
//! result export around the `anubis_elo` engine.

pub mod config;
pub mod record_csv;
pub mod report;
