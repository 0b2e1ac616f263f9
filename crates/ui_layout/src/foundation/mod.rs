//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and pixel rounding
//! - Handle-based collections for the element arena
//! - Logger initialization

pub mod math;
pub mod collections;
pub mod logging;
