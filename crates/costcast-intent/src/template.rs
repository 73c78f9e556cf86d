//! Parameter templates: one per kind of what-if request.
//!
//! Templates are tried in order; the first that recognises the intent
//! produces a [`Draft`]. Constraint tags come before intent types, so a
//! `keep_cost_flat` tag wins over whatever the request was classified as.

use chrono::NaiveDate;
use costcast_types::{
    constraints, Direction, Driver, ImpactMode, IntentType, MagnitudeUnit, RampShape,
    ScenarioIntent, ScenarioParams, ScenarioParamsBuilder,
};

use crate::config::CompilerConfig;

// ── Template Input / Draft ─────────────────────────────────────────────

/// Everything a template needs, already resolved by the compiler.
#[derive(Clone, Debug)]
pub struct TemplateInput<'a> {
    pub intent: &'a ScenarioIntent,
    pub config: &'a CompilerConfig,
    /// Months from the baseline start to the requested start.
    pub lag_months: u32,
    /// First month of the change.
    pub start: NaiveDate,
    /// Signed fractional magnitude (explicit, converted, or severity default).
    pub pct: f64,
}

impl TemplateInput<'_> {
    /// Builder with lag and event window pre-filled.
    fn base(&self) -> ScenarioParamsBuilder {
        ScenarioParams::builder()
            .lag_months(self.lag_months)
            .event_duration_months(self.intent.timing.duration_months)
    }

    fn ramp_months(&self) -> u32 {
        self.intent.timing.ramp_months.unwrap_or(0)
    }

    /// Requested ramp, but never shorter than `min`.
    fn ramp_at_least(&self, min: u32) -> u32 {
        self.ramp_months().max(min)
    }

    /// Signed headcount from an `fte` magnitude.
    fn fte_abs(&self) -> Option<f64> {
        self.intent
            .magnitude
            .filter(|m| m.unit == MagnitudeUnit::Fte)
            .map(|m| self.intent.direction.signed(m.value))
    }

    fn is_decrease(&self, value: f64) -> bool {
        value < 0.0 || self.intent.direction == Direction::Decrease
    }

    fn month(&self) -> String {
        self.start.format("%Y-%m").to_string()
    }
}

/// A template's proposal: parameters still to be built, plus how to
/// describe them.
#[derive(Clone, Debug)]
pub struct Draft {
    pub builder: ScenarioParamsBuilder,
    pub summary: String,
    pub assumptions: Vec<String>,
}

impl Draft {
    fn new(builder: ScenarioParamsBuilder, summary: String) -> Self {
        Self {
            builder,
            summary,
            assumptions: Vec::new(),
        }
    }

    fn assume(mut self, assumption: impl Into<String>) -> Self {
        self.assumptions.push(assumption.into());
        self
    }
}

fn pct(value: f64) -> String {
    format!("{:+.1}%", value * 100.0)
}

// ── Param Template Trait ───────────────────────────────────────────────

/// Maps one kind of intent onto scenario parameters.
pub trait ParamTemplate: Send + Sync {
    /// `None` when this template does not handle the intent.
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft>;

    /// Template name for tracing.
    fn name(&self) -> &str;
}

// ── Shared shapes ──────────────────────────────────────────────────────

fn cost_target(input: &TemplateInput<'_>, target: f64) -> Draft {
    let no_layoffs = input.intent.has_constraint(constraints::NO_LAYOFFS);
    let min_ramp = if no_layoffs && input.is_decrease(target) {
        input.config.no_layoffs_min_ramp_months
    } else {
        input.config.min_ramp_months
    };
    let onset = input.ramp_at_least(min_ramp);
    let builder = input
        .base()
        .driver(Driver::CostTarget)
        .cost_target_pct(Some(target))
        .onset_duration_months(onset)
        .shape(RampShape::Linear);
    let draft = Draft::new(
        builder,
        format!(
            "Cost target of {} against the {} level, phased in linearly over {onset} months",
            pct(target),
            input.month()
        ),
    );
    if no_layoffs && input.is_decrease(target) {
        draft.assume(format!(
            "No layoffs: the reduction comes through attrition over at least {min_ramp} months"
        ))
    } else {
        draft
    }
}

fn fte_abs_change(input: &TemplateInput<'_>, abs: f64, min_ramp: u32) -> Draft {
    let onset = input.ramp_at_least(min_ramp);
    let builder = input
        .base()
        .driver(Driver::Fte)
        .fte_delta_abs(Some(abs))
        .onset_duration_months(onset)
        .shape(RampShape::Linear);
    Draft::new(
        builder,
        format!(
            "Headcount change of {abs:+.0} FTE from {}, phased in over {onset} months",
            input.month()
        ),
    )
}

fn hiring_freeze(input: &TemplateInput<'_>) -> Draft {
    let offset = -input.config.baseline_fte_growth;
    let builder = input
        .base()
        .driver(Driver::Fte)
        .growth_delta_pp_per_year(offset);
    Draft::new(
        builder,
        format!("Hiring freeze from {}: headcount held flat", input.month()),
    )
    .assume(format!(
        "Holding headcount flat offsets the baseline growth of {} per year",
        pct(input.config.baseline_fte_growth)
    ))
}

// ── Constraint templates ───────────────────────────────────────────────

/// `keep_cost_flat` → cost target at 0%.
pub struct KeepCostFlatTemplate;

impl ParamTemplate for KeepCostFlatTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        input
            .intent
            .has_constraint(constraints::KEEP_COST_FLAT)
            .then(|| cost_target(input, 0.0))
    }

    fn name(&self) -> &str {
        "keep_cost_flat"
    }
}

/// `keep_fte_flat` → cancel baseline headcount growth.
pub struct KeepFteFlatTemplate;

impl ParamTemplate for KeepFteFlatTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        input
            .intent
            .has_constraint(constraints::KEEP_FTE_FLAT)
            .then(|| hiring_freeze(input))
    }

    fn name(&self) -> &str {
        "keep_fte_flat"
    }
}

/// `constraint` intents: a sized constraint is a target, an unsized one a
/// hiring freeze.
pub struct ConstraintTemplate;

impl ParamTemplate for ConstraintTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Constraint {
            return None;
        }
        if input.intent.magnitude.is_none() {
            return Some(hiring_freeze(input));
        }
        Some(targeted(input))
    }

    fn name(&self) -> &str {
        "constraint"
    }
}

/// `hold` on a target, constraint, policy or relocation: keep things where
/// they are. Headcount requests freeze hiring, the rest hold cost flat.
pub struct HoldTemplate;

impl ParamTemplate for HoldTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.direction != Direction::Hold {
            return None;
        }
        let fte_sized = input
            .intent
            .magnitude
            .is_some_and(|m| m.unit == MagnitudeUnit::Fte);
        match input.intent.intent_type {
            IntentType::Policy | IntentType::Relocation => Some(hiring_freeze(input)),
            IntentType::Constraint if input.intent.magnitude.is_none() => None,
            IntentType::Target | IntentType::Constraint if fte_sized => Some(hiring_freeze(input)),
            IntentType::Target | IntentType::Constraint => Some(cost_target(input, 0.0)),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "hold"
    }
}

/// `target` intents → cost target (or headcount target for `fte` sizes).
pub struct TargetTemplate;

impl ParamTemplate for TargetTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        (input.intent.intent_type == IntentType::Target).then(|| targeted(input))
    }

    fn name(&self) -> &str {
        "target"
    }
}

fn targeted(input: &TemplateInput<'_>) -> Draft {
    match input.fte_abs() {
        Some(abs) => {
            let no_layoffs = input.intent.has_constraint(constraints::NO_LAYOFFS);
            let min_ramp = if no_layoffs && input.is_decrease(abs) {
                input.config.no_layoffs_min_ramp_months
            } else {
                input.config.min_ramp_months
            };
            fte_abs_change(input, abs, min_ramp)
        }
        None => cost_target(input, input.pct),
    }
}

// ── Type templates ─────────────────────────────────────────────────────

/// `policy` → explicit headcount delta, or a growth offset when unsized.
pub struct PolicyTemplate;

impl ParamTemplate for PolicyTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Policy {
            return None;
        }
        if let Some(abs) = input.fte_abs() {
            return Some(fte_abs_change(input, abs, 0));
        }
        let onset = input.ramp_months();
        if input.intent.magnitude.is_some() {
            let builder = input
                .base()
                .driver(Driver::Fte)
                .fte_delta_pct(Some(input.pct))
                .onset_duration_months(onset)
                .shape(RampShape::Linear);
            return Some(Draft::new(
                builder,
                format!(
                    "Headcount policy of {} from {}, phased in over {onset} months",
                    pct(input.pct),
                    input.month()
                ),
            ));
        }
        let builder = input
            .base()
            .driver(Driver::Fte)
            .growth_delta_pp_per_year(input.pct)
            .onset_duration_months(onset)
            .shape(RampShape::Linear);
        Some(Draft::new(
            builder,
            format!(
                "Headcount growth shifted by {} per year from {}",
                pct(input.pct),
                input.month()
            ),
        ))
    }

    fn name(&self) -> &str {
        "policy"
    }
}

/// `shock` → temporary cost level impact.
pub struct ShockTemplate;

impl ParamTemplate for ShockTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Shock {
            return None;
        }
        let duration = input
            .intent
            .timing
            .duration_months
            .unwrap_or(input.config.default_shock_duration_months);
        // The ramp window applies on the way in and on the way out.
        let ramp = input.intent.timing.ramp_months;
        let shape = if ramp.is_some() {
            RampShape::Linear
        } else {
            RampShape::Step
        };
        let builder = input
            .base()
            .driver(Driver::Cost)
            .impact_mode(ImpactMode::Level)
            .impact_magnitude(input.pct)
            .event_duration_months(Some(duration))
            .onset_duration_months(ramp.unwrap_or(0))
            .recovery_duration_months(ramp)
            .shape(shape);
        let draft = Draft::new(
            builder,
            format!(
                "Cost shock of {} from {} lasting {duration} months",
                pct(input.pct),
                input.month()
            ),
        );
        Some(if input.intent.timing.duration_months.is_none() {
            draft.assume(format!("Shock assumed to last {duration} months"))
        } else {
            draft
        })
    }

    fn name(&self) -> &str {
        "shock"
    }
}

/// `mix_shift` → per-head rate multiplier.
pub struct MixShiftTemplate;

impl ParamTemplate for MixShiftTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::MixShift {
            return None;
        }
        let multiplier = (1.0 + input.pct).max(0.01);
        let builder = input
            .base()
            .driver(Driver::Cost)
            .beta_multiplier(Some(multiplier));
        let draft = Draft::new(
            builder,
            format!(
                "Staff mix shift changing cost per FTE by {} from {}",
                pct(multiplier - 1.0),
                input.month()
            ),
        );
        Some(match input.intent.timing.ramp_months.filter(|m| *m > 0) {
            Some(ramp) => draft.assume(format!(
                "The new cost per FTE applies in full from {}; the {ramp}-month ramp is not modelled",
                input.month()
            )),
            None => draft,
        })
    }

    fn name(&self) -> &str {
        "mix_shift"
    }
}

/// `productivity` → the same work with fewer heads.
pub struct ProductivityTemplate;

impl ParamTemplate for ProductivityTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Productivity {
            return None;
        }
        let delta = -input.pct.abs();
        let onset = input.ramp_at_least(input.config.min_ramp_months);
        let builder = input
            .base()
            .driver(Driver::Fte)
            .fte_delta_pct(Some(delta))
            .onset_duration_months(onset)
            .shape(RampShape::Linear);
        Some(
            Draft::new(
                builder,
                format!(
                    "Productivity gain reducing headcount need by {} over {onset} months from {}",
                    pct(delta),
                    input.month()
                ),
            )
            .assume("Productivity gains are realised as lower headcount, not higher output"),
        )
    }

    fn name(&self) -> &str {
        "productivity"
    }
}

/// `attrition` → lower headcount growth.
pub struct AttritionTemplate;

impl ParamTemplate for AttritionTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Attrition {
            return None;
        }
        let delta = -input.pct.abs();
        let builder = input
            .base()
            .driver(Driver::Fte)
            .growth_delta_pp_per_year(delta)
            .onset_duration_months(input.ramp_months());
        Some(
            Draft::new(
                builder,
                format!(
                    "Extra attrition of {} per year from {}",
                    pct(delta),
                    input.month()
                ),
            )
            .assume("Leavers are not backfilled"),
        )
    }

    fn name(&self) -> &str {
        "attrition"
    }
}

/// `relocation` → headcount moved in or out, phased.
pub struct RelocationTemplate;

impl ParamTemplate for RelocationTemplate {
    fn draft(&self, input: &TemplateInput<'_>) -> Option<Draft> {
        if input.intent.intent_type != IntentType::Relocation {
            return None;
        }
        let min_ramp = input.config.min_ramp_months;
        if let Some(abs) = input.fte_abs() {
            return Some(fte_abs_change(input, abs, min_ramp));
        }
        let onset = input.ramp_at_least(min_ramp);
        let builder = input
            .base()
            .driver(Driver::Fte)
            .fte_delta_pct(Some(input.pct))
            .onset_duration_months(onset)
            .shape(RampShape::Linear);
        Some(Draft::new(
            builder,
            format!(
                "Relocation changing headcount by {} over {onset} months from {}",
                pct(input.pct),
                input.month()
            ),
        ))
    }

    fn name(&self) -> &str {
        "relocation"
    }
}

/// Templates in precedence order.
pub fn default_templates() -> Vec<Box<dyn ParamTemplate>> {
    vec![
        Box::new(KeepCostFlatTemplate),
        Box::new(KeepFteFlatTemplate),
        Box::new(HoldTemplate),
        Box::new(ConstraintTemplate),
        Box::new(TargetTemplate),
        Box::new(PolicyTemplate),
        Box::new(ShockTemplate),
        Box::new(MixShiftTemplate),
        Box::new(ProductivityTemplate),
        Box::new(AttritionTemplate),
        Box::new(RelocationTemplate),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use costcast_types::{Magnitude, Timing};

    fn run(intent: &ScenarioIntent, pct: f64) -> Option<(String, ScenarioParams, Draft)> {
        let config = CompilerConfig::default();
        let input = TemplateInput {
            intent,
            config: &config,
            lag_months: 2,
            start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            pct,
        };
        default_templates().iter().find_map(|t| {
            t.draft(&input).map(|d| {
                let params = d.builder.clone().build().unwrap();
                (t.name().to_string(), params, d)
            })
        })
    }

    #[test]
    fn constraint_tag_beats_intent_type() {
        let intent = ScenarioIntent::new(IntentType::Shock)
            .with_constraint(constraints::KEEP_COST_FLAT);
        let (name, params, _) = run(&intent, 0.1).unwrap();
        assert_eq!(name, "keep_cost_flat");
        assert_eq!(params.driver(), Driver::CostTarget);
        assert_eq!(params.cost_target_pct(), Some(0.0));
        assert_eq!(params.lag_months(), 2);
    }

    #[test]
    fn no_layoffs_decrease_ramps_for_a_year() {
        let intent = ScenarioIntent::new(IntentType::Target)
            .with_constraint(constraints::NO_LAYOFFS)
            .with_direction(Direction::Decrease)
            .with_magnitude(Magnitude::pct(0.1));
        let (_, params, draft) = run(&intent, -0.1).unwrap();
        assert_eq!(params.onset_duration_months(), 12);
        assert_eq!(params.shape(), RampShape::Linear);
        assert_eq!(draft.assumptions.len(), 1);
    }

    #[test]
    fn cost_target_ramp_has_a_floor() {
        let intent = ScenarioIntent::new(IntentType::Constraint)
            .with_magnitude(Magnitude::pct(-0.05))
            .with_timing(Timing {
                ramp_months: Some(2),
                ..Timing::default()
            });
        let (_, params, _) = run(&intent, -0.05).unwrap();
        assert_eq!(params.onset_duration_months(), 6);
    }

    #[test]
    fn unsized_constraint_is_a_hiring_freeze() {
        let intent = ScenarioIntent::new(IntentType::Constraint);
        let (_, params, _) = run(&intent, 0.05).unwrap();
        assert_eq!(params.driver(), Driver::Fte);
        assert_eq!(params.growth_delta_pp_per_year(), -0.03);
    }

    #[test]
    fn policy_with_fte_magnitude_is_absolute() {
        let intent = ScenarioIntent::new(IntentType::Policy)
            .with_direction(Direction::Decrease)
            .with_magnitude(Magnitude::fte(40.0));
        let (_, params, _) = run(&intent, -0.05).unwrap();
        assert_eq!(params.fte_delta_abs(), Some(-40.0));
        assert!(params.fte_delta_pct().is_none());
    }

    #[test]
    fn shock_defaults_to_a_year() {
        let intent = ScenarioIntent::new(IntentType::Shock);
        let (_, params, draft) = run(&intent, 0.2).unwrap();
        assert_eq!(params.event_duration_months(), Some(12));
        assert_eq!(params.impact_magnitude(), 0.2);
        assert_eq!(params.shape(), RampShape::Step);
        assert!(params.recovery_duration_months().is_none());
        assert!(!draft.assumptions.is_empty());
    }

    #[test]
    fn mix_shift_multiplier_stays_positive() {
        let intent = ScenarioIntent::new(IntentType::MixShift);
        let (_, params, _) = run(&intent, -1.5).unwrap();
        assert_eq!(params.beta_multiplier(), Some(0.01));
        let (_, params, _) = run(&intent, 0.1).unwrap();
        assert!((params.beta_multiplier().unwrap() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn productivity_and_attrition_always_reduce() {
        let (_, p, _) = run(&ScenarioIntent::new(IntentType::Productivity), 0.1).unwrap();
        assert_eq!(p.fte_delta_pct(), Some(-0.1));
        assert_eq!(p.onset_duration_months(), 6);
        let (_, p, _) = run(&ScenarioIntent::new(IntentType::Attrition), 0.05).unwrap();
        assert_eq!(p.growth_delta_pp_per_year(), -0.05);
    }

    #[test]
    fn relocation_keeps_sign() {
        let (_, p, _) = run(&ScenarioIntent::new(IntentType::Relocation), -0.2).unwrap();
        assert_eq!(p.fte_delta_pct(), Some(-0.2));
        assert_eq!(p.onset_duration_months(), 6);
    }

    #[test]
    fn hold_target_keeps_cost_flat() {
        let intent = ScenarioIntent::new(IntentType::Target)
            .with_direction(Direction::Hold)
            .with_magnitude(Magnitude::pct(0.1));
        let (name, params, _) = run(&intent, 0.0).unwrap();
        assert_eq!(name, "hold");
        assert_eq!(params.driver(), Driver::CostTarget);
        assert_eq!(params.cost_target_pct(), Some(0.0));
    }

    #[test]
    fn hold_on_headcount_freezes_hiring() {
        let policy = ScenarioIntent::new(IntentType::Policy).with_direction(Direction::Hold);
        let (name, params, _) = run(&policy, 0.0).unwrap();
        assert_eq!(name, "hold");
        assert_eq!(params.growth_delta_pp_per_year(), -0.03);
        assert!(params.fte_delta_pct().is_none());

        let target = ScenarioIntent::new(IntentType::Target)
            .with_direction(Direction::Hold)
            .with_magnitude(Magnitude::fte(40.0));
        let (_, params, _) = run(&target, 0.0).unwrap();
        assert_eq!(params.driver(), Driver::Fte);
        assert!(params.fte_delta_abs().is_none());
    }

    #[test]
    fn shock_ramp_applies_in_and_out() {
        let intent = ScenarioIntent::new(IntentType::Shock).with_timing(Timing {
            ramp_months: Some(6),
            ..Timing::default()
        });
        let (_, params, _) = run(&intent, 0.2).unwrap();
        assert_eq!(params.onset_duration_months(), 6);
        assert_eq!(params.recovery_duration_months(), Some(6));
        assert_eq!(params.shape(), RampShape::Linear);
    }

    #[test]
    fn mix_shift_applies_in_full_and_says_so() {
        let intent = ScenarioIntent::new(IntentType::MixShift).with_timing(Timing {
            ramp_months: Some(4),
            ..Timing::default()
        });
        let (_, params, draft) = run(&intent, 0.2).unwrap();
        assert_eq!(params.onset_duration_months(), 0);
        assert_eq!(draft.assumptions.len(), 1);
        assert!(draft.assumptions[0].contains("4-month ramp"));

        let (_, _, draft) = run(&ScenarioIntent::new(IntentType::MixShift), 0.2).unwrap();
        assert!(draft.assumptions.is_empty());
    }

    #[test]
    fn other_has_no_template() {
        assert!(run(&ScenarioIntent::new(IntentType::Other), 0.1).is_none());
    }
}
