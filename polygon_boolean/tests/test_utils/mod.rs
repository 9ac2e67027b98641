#![allow(dead_code)]
mod pgon_modifiers;
mod pgon_test_properties;

pub use pgon_modifiers::*;
pub use pgon_test_properties::*;
