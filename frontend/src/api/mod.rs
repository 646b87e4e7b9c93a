//! API Module - HTTP page handlers for the operator UI

pub mod pages;

#[cfg(test)]
mod tests;

pub use pages::AppState;
