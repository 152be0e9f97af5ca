// src/models/mod.rs

pub mod envelope;
pub mod lenient;
pub mod paper;
pub mod quiz;
pub mod transaction;
