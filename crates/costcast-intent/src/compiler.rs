//! Intent compiler: classified request in, scenario parameters out.
//!
//! ## Pipeline
//!
//! ```text
//! ScenarioIntent
//!   → lag from baseline start      (before start: clarify, lag 0)
//!   → horizon check                (beyond: clarify, no-op params)
//!   → magnitude                    (explicit, currency ÷ level, or severity default)
//!   → first matching template
//!   → CompileResult
//! ```
//!
//! Compilation never fails. Anything the compiler cannot resolve degrades
//! to the no-op parameter set with `needs_clarification` raised.

use chrono::NaiveDate;
use costcast_types::{
    add_months, months_between, CompileResult, Direction, MagnitudeUnit, ScenarioIntent,
    ScenarioParams,
};
use tracing::{debug, info, warn};

use crate::config::CompilerConfig;
use crate::template::{default_templates, ParamTemplate, TemplateInput};

/// Where the compiled scenario will be applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompileContext {
    /// First month of the baseline series.
    pub baseline_start: NaiveDate,
    /// Months the baseline covers.
    pub horizon_months: usize,
    /// Typical monthly cost, for converting currency magnitudes.
    pub baseline_level: Option<f64>,
}

impl CompileContext {
    pub fn new(baseline_start: NaiveDate, horizon_months: usize) -> Self {
        Self {
            baseline_start,
            horizon_months,
            baseline_level: None,
        }
    }

    pub fn with_baseline_level(mut self, level: f64) -> Self {
        self.baseline_level = Some(level);
        self
    }
}

/// Compiles [`ScenarioIntent`]s into [`CompileResult`]s.
pub struct IntentCompiler {
    templates: Vec<Box<dyn ParamTemplate>>,
    config: CompilerConfig,
}

impl Default for IntentCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl IntentCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            templates: default_templates(),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile one intent.
    pub fn compile(&self, intent: &ScenarioIntent, ctx: &CompileContext) -> CompileResult {
        let mut assumptions = self.config.base_assumptions();
        let mut question: Option<String> = None;

        let requested = intent
            .timing
            .start
            .map(|start| months_between(ctx.baseline_start, start))
            .unwrap_or(0);

        let lag = if requested < 0 {
            warn!(requested, "intent starts before the baseline");
            question = Some(format!(
                "The requested start is {} month(s) before the baseline begins in {}. \
                 Should the change start at the beginning of the baseline instead?",
                -requested,
                ctx.baseline_start.format("%Y-%m")
            ));
            assumptions.push("Start moved to the first month of the baseline".into());
            0
        } else {
            requested
        };

        let within_horizon = usize::try_from(lag)
            .ok()
            .filter(|&l| l < ctx.horizon_months)
            .and_then(|l| u32::try_from(l).ok());
        let Some(lag_months) = within_horizon else {
            warn!(lag, horizon = ctx.horizon_months, "intent starts beyond the horizon");
            let question = format!(
                "The requested start is {lag} months out, beyond the {}-month horizon. \
                 Should it start earlier?",
                ctx.horizon_months
            );
            return finish(
                intent,
                ScenarioParams::default(),
                "No change: the requested start falls outside the forecast horizon".into(),
                assumptions,
                Some(question),
            );
        };

        let start = add_months(ctx.baseline_start, lag_months).unwrap_or(ctx.baseline_start);
        let pct = self.resolve_pct(intent, ctx, &mut assumptions);

        let input = TemplateInput {
            intent,
            config: &self.config,
            lag_months,
            start,
            pct,
        };
        let matched = self
            .templates
            .iter()
            .find_map(|t| t.draft(&input).map(|draft| (t.name(), draft)));

        let Some((template, draft)) = matched else {
            info!(intent_type = %intent.intent_type, "no template for intent; asking for clarification");
            return finish(
                intent,
                ScenarioParams::default(),
                format!(
                    "Could not map a '{}' request onto a scenario",
                    intent.intent_type
                ),
                assumptions,
                Some(self.config.clarifying_question.clone()),
            );
        };

        info!(template, lag_months, pct, "compiled intent");
        assumptions.extend(draft.assumptions);

        match draft.builder.build() {
            Ok(params) => finish(intent, params, draft.summary, assumptions, question),
            Err(err) => {
                warn!(template, error = %err, "template produced invalid parameters");
                assumptions.push(format!("Template output was unusable: {err}"));
                finish(
                    intent,
                    ScenarioParams::default(),
                    "No change: the request could not be turned into valid parameters".into(),
                    assumptions,
                    Some(self.config.clarifying_question.clone()),
                )
            }
        }
    }

    /// Signed fractional magnitude for the intent.
    fn resolve_pct(
        &self,
        intent: &ScenarioIntent,
        ctx: &CompileContext,
        assumptions: &mut Vec<String>,
    ) -> f64 {
        if intent.direction == Direction::Hold {
            if intent.magnitude.is_some() {
                assumptions.push("Direction is hold: the stated size is read as no change".into());
            }
            return 0.0;
        }
        let default = self.config.severity_defaults.for_severity(intent.severity);
        let raw = match intent.magnitude {
            Some(m) if m.unit == MagnitudeUnit::Pct => m.value,
            Some(m) if m.unit == MagnitudeUnit::Currency => {
                match ctx.baseline_level.filter(|level| *level > 0.0) {
                    Some(level) => {
                        let value = m.value / level;
                        assumptions.push(format!(
                            "{:.0} per month read as {:.1}% of the baseline level",
                            m.value,
                            value * 100.0
                        ));
                        value
                    }
                    None => {
                        assumptions.push(format!(
                            "No baseline level to convert a currency amount; using the {} default of {:.0}%",
                            intent.severity,
                            default * 100.0
                        ));
                        default
                    }
                }
            }
            // `fte` sizes are handled by the templates; percentage paths fall back.
            _ => {
                assumptions.push(format!(
                    "No percentage given; using the {} default of {:.0}%",
                    intent.severity,
                    default * 100.0
                ));
                default
            }
        };
        let signed = intent.direction.signed(raw);
        debug!(raw, signed, "resolved magnitude");
        signed
    }
}

/// Assemble the result, folding in the interpreter's own clarification.
fn finish(
    intent: &ScenarioIntent,
    params: ScenarioParams,
    summary: String,
    assumptions: Vec<String>,
    question: Option<String>,
) -> CompileResult {
    let needs_clarification = question.is_some() || intent.needs_clarification;
    CompileResult {
        params,
        summary,
        assumptions,
        needs_clarification,
        clarifying_question: question.or_else(|| intent.clarifying_question.clone()),
    }
}
