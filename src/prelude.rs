//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use distclean::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{DistcleanError, Result};

// Sweep
pub use crate::sweep::patterns::{DEFAULT_FORBIDDEN, ForbiddenSet};
pub use crate::sweep::{SweepConfig, SweepEvent, SweepFailure, SweepReport, Sweeper};
