// Shared utility functions

pub mod content;

pub use content::*;
