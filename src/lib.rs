#![forbid(unsafe_code)]

//! distclean — build-output janitor that sweeps files with forbidden name
//! fragments out of `dist` trees.
//!
//! The sweep is deliberately simple: walk the output directory (and its `esm`
//! child, a second time), lowercase each filename, and delete every regular
//! file whose name contains a forbidden fragment such as `ap2` or `a2a`.
//! Deletion failures are collected and reported, never fatal.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use distclean::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use distclean::core::config::Config;
//! use distclean::sweep::{SweepConfig, Sweeper};
//! ```

pub mod prelude;

pub mod core;
pub mod sweep;
