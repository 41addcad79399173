//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and the integer pixel rectangle
//! - RGBA colors
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;
