//! Logic Module - form handling, backend client, batch tables and rendering

pub mod backend;
pub mod batch;
pub mod form;
pub mod render;
