// src/handlers/mod.rs

pub mod health;
pub mod quiz;
pub mod results;
pub mod transactions;
