//! Request handlers, one module per resource.

pub mod debug;
pub mod images;
pub mod stories;
pub mod upload;
