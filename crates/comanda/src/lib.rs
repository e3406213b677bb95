//! # Comanda
//!
//! WhatsApp ordering bot for a single restaurant: catalog browsing, cart,
//! compass-zone batching of deliveries ("tandas") and courier tracking,
//! built as two actors on top of [`session_hub`].

pub mod catalog;
pub mod clients;
pub mod config;
pub mod dispatch_actor;
pub mod geo;
pub mod lifecycle;
pub mod model;
pub mod session_actor;
pub mod whatsapp;
