/// Contact form module - Gateway

mod client;
mod form;

pub use client::{ContactClient, ContactOutcome};
pub use form::{ContactError, ContactForm};
