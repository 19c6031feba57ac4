//! ConsultDesk Library
//!
//! Core library for the ConsultDesk consultant workstation: portal client,
//! headless page controllers and the Dioxus views built on them.

pub mod app;
pub mod controller;
pub mod service;
pub mod storage;
pub mod types;
pub mod ui;
