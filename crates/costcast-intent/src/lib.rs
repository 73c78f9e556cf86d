//! # costcast-intent
//!
//! Turns a classified what-if request ([`ScenarioIntent`]) into scenario
//! parameters via a fixed set of templates:
//!
//! | Trigger                         | Template                           |
//! |---------------------------------|------------------------------------|
//! | `keep_cost_flat` tag            | cost target at 0%                  |
//! | `keep_fte_flat` tag             | growth offset cancelling hiring    |
//! | `hold` direction                | flat cost target or hiring freeze  |
//! | `constraint` / `target`         | cost target (or headcount target)  |
//! | `policy`                        | headcount delta or growth offset   |
//! | `shock`                         | temporary cost level impact        |
//! | `mix_shift`                     | per-head rate multiplier           |
//! | `productivity` / `attrition` / `relocation` | headcount templates    |
//! | `other`                         | clarification                      |
//!
//! The output still has to pass the bounds validator before it is applied.
//!
//! [`ScenarioIntent`]: costcast_types::ScenarioIntent

#![deny(unsafe_code)]

pub mod compiler;
pub mod config;
pub mod template;

pub use compiler::{CompileContext, IntentCompiler};
pub use config::{CompilerConfig, SeverityDefaults};
pub use template::{default_templates, Draft, ParamTemplate, TemplateInput};
