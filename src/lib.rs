//! Sales dashboard: load a sales spreadsheet, explore it, fit an OLS model
//! and predict units sold.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod regression;
pub mod state;
pub mod ui;
pub mod views;
