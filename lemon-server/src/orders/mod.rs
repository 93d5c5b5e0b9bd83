//! Orders
//!
//! - [`workflow`] - placement and role-dispatched order operations
//! - [`money`] - decimal arithmetic for totals and price checks

pub mod money;
pub mod workflow;
