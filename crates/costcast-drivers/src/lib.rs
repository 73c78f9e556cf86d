//! # costcast-drivers
//!
//! The two pure building blocks underneath every scenario:
//!
//! ```text
//!   cost ──fte_from_cost──▶ FTE ──(scenario edits)──▶ FTE′ ──cost_from_fte──▶ cost′
//!                    ▲                                              ▲
//!                    └──────── alpha, beta(t) = project_beta ───────┘
//! ```
//!
//! - [`driver`]: calibration and the `cost = alpha + beta × FTE` relation
//! - [`ramp`]: how quickly an effect phases in (`step`, `linear`, `exp`)

#![deny(unsafe_code)]

pub mod driver;
pub mod error;
pub mod ramp;

pub use driver::{calibrate, cost_from_fte, fte_from_cost, monthly_rate, project_beta, CostModel};
pub use error::{DriverError, DriverResult};
pub use ramp::{factor, profile, profile_factor, EXP_STEEPNESS};
