//! # Domain Model
//!
//! Pure data structures for the ordering domain: products, cart lines,
//! orders and couriers. Everything here is plain state; behavior that needs
//! coordination (batching, assignment, conversation flow) lives in the
//! actors that own these values.

pub mod cart;
pub mod courier;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLine};
pub use courier::{Courier, CourierId, CourierStats};
pub use order::{Order, OrderCode, OrderDraft, OrderReceipt, TandaId};
pub use product::Product;
