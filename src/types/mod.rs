//! Shared type definitions
//!
//! This module contains the data types shared by controllers, the service
//! client and the UI.

pub mod client;
pub mod message;

pub use client::{ClientId, ClientTag};
pub use message::{Message, MessageId, MessageKind};
