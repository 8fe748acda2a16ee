//! Handler modules for application messages.
//!
//! Each module adds `impl App` methods for one concern; `notify` and
//! `helpers` hold free functions they share.

mod browse;
mod compile;
pub mod helpers;
pub mod notify;
mod options;
