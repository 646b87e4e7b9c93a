//! Prediction Backend Module
//!
//! HTTP client for the engine maintenance prediction API.

pub mod client;


pub use client::{BackendClient, BackendConfig, BatchPrediction, SinglePrediction};
