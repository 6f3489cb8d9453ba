pub mod envelope;
pub mod federation;
pub mod horizon;
pub mod in_memory;
