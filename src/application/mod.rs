//! Application layer containing the payment pipeline.
//!
//! `PaymentGateway` is the entry point. It threads one request through the
//! stages defined in the sibling modules, each returning `Result` so the first
//! failure short-circuits the rest.

pub mod assembler;
pub mod composer;
pub mod destination;
pub mod gateway;
