//! Windows utility helpers

pub mod string_conv;
