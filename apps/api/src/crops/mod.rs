// Crop reference data: record type, store capability and HTTP handlers.

pub mod handlers;
pub mod models;
pub mod pg;
pub mod reference;
pub mod store;
