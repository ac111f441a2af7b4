//! Background Tasks
//!
//! Recurring maintenance tasks that run independently of request
//! traffic.

mod sweeper;

pub use sweeper::spawn_sweeper;
