//! API Routes
//!
//! Route handlers organized by functionality.

pub mod analyze;
pub mod developers;
pub mod health;
pub mod team;
