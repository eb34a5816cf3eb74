//! Outbound collaborator clients
//!
//! Each external dependency sits behind an object-safe trait so the
//! dispatch engine can be exercised against in-memory fakes.

pub mod email;
pub mod identity;
pub mod whatsapp;

pub use email::{EmailTransport, HttpEmailTransport};
pub use identity::{HttpIdentityProvider, IdentityProvider, IdentityUser};
pub use whatsapp::{HttpWhatsAppTransport, WhatsAppTransport};
