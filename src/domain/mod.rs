//! Domain layer: request, asset, memo and operation types plus the ports the
//! pipeline talks to. Nothing in here performs IO.

pub mod asset;
pub mod destination;
pub mod keys;
pub mod memo;
pub mod operation;
pub mod ports;
pub mod request;
pub mod transaction;
