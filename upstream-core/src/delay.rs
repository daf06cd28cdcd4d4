//! Header driven delay simulation
//!
//! A request passes through two independent stages:
//!
//! 1. **Fixed delay**: `X-Delay` applied with probability `X-Delay-Percent / 100`
//! 2. **Slowdown**: `X-Slowdown` applied when the server started after the
//!    instant given in `X-Slowdown-From`
//!
//! Each stage yields [`DelayStage::NoOp`] or [`DelayStage::Apply`]; the
//! resulting [`DelayPlan`] is awaited as a single timed suspension of the
//! request task. The slowdown compares `X-Slowdown-From` against the server
//! start time, not the request time.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::{CoreError, CoreResult, FormatKind};

/// Probability used when `X-Delay-Percent` is absent or unparsable
pub const DEFAULT_DELAY_PERCENT: u8 = 100;

/// Outcome of a single delay stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelayStage {
    #[default]
    NoOp,
    Apply(Duration),
}

impl DelayStage {
    pub fn duration(&self) -> Duration {
        match self {
            DelayStage::NoOp => Duration::ZERO,
            DelayStage::Apply(duration) => *duration,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, DelayStage::NoOp)
    }
}

/// Delay instructions carried by a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayDirective {
    pub fixed_delay: Option<Duration>,
    pub delay_probability_percent: u8,
    pub slowdown_delay: Option<Duration>,
    pub slowdown_active_from: Option<DateTime<FixedOffset>>,
}

impl Default for DelayDirective {
    fn default() -> Self {
        Self {
            fixed_delay: None,
            delay_probability_percent: DEFAULT_DELAY_PERCENT,
            slowdown_delay: None,
            slowdown_active_from: None,
        }
    }
}

impl DelayDirective {
    /// Build a directive from raw header values.
    ///
    /// Empty values count as absent. The slowdown is only parsed when both of
    /// its values are present.
    pub fn from_header_values(
        delay: Option<&str>,
        delay_percent: Option<&str>,
        slowdown: Option<&str>,
        slowdown_from: Option<&str>,
    ) -> CoreResult<Self> {
        let fixed_delay = present(delay).map(parse_duration).transpose()?;
        let delay_probability_percent = parse_percent(present(delay_percent));

        let (slowdown_delay, slowdown_active_from) =
            match (present(slowdown), present(slowdown_from)) {
                (Some(slowdown), Some(from)) => {
                    let from = DateTime::parse_from_rfc3339(from.trim()).map_err(|e| {
                        CoreError::invalid_format(FormatKind::Timestamp, from, e.to_string())
                    })?;
                    (Some(parse_duration(slowdown)?), Some(from))
                }
                _ => (None, None),
            };

        Ok(Self {
            fixed_delay,
            delay_probability_percent,
            slowdown_delay,
            slowdown_active_from,
        })
    }

    /// Directive that always applies `delay`
    pub fn fixed(delay: Duration) -> Self {
        Self {
            fixed_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fixed_delay.is_none() && self.slowdown_delay.is_none()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_percent(value: Option<&str>) -> u8 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(|percent| percent.clamp(0, 100) as u8)
        .unwrap_or(DEFAULT_DELAY_PERCENT)
}

/// Fixed delay stage for a roll drawn uniformly from `[0, 100)`
pub fn evaluate_fixed_delay(directive: &DelayDirective, roll: u8) -> DelayStage {
    match directive.fixed_delay {
        Some(delay) if roll < directive.delay_probability_percent => DelayStage::Apply(delay),
        _ => DelayStage::NoOp,
    }
}

/// Slowdown stage; active when the server started strictly after the anchor
pub fn evaluate_slowdown(directive: &DelayDirective, started_at: DateTime<Utc>) -> DelayStage {
    match (directive.slowdown_delay, directive.slowdown_active_from) {
        (Some(delay), Some(from)) if started_at > from => DelayStage::Apply(delay),
        _ => DelayStage::NoOp,
    }
}

/// Combined outcome of both stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayPlan {
    pub fixed: DelayStage,
    pub slowdown: DelayStage,
}

impl DelayPlan {
    pub fn total(&self) -> Duration {
        self.fixed.duration() + self.slowdown.duration()
    }

    pub fn is_noop(&self) -> bool {
        self.fixed.is_noop() && self.slowdown.is_noop()
    }
}

/// Evaluates delay directives against the server start time
#[derive(Debug, Clone, Copy)]
pub struct DelaySimulator {
    started_at: DateTime<Utc>,
}

impl DelaySimulator {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }

    /// Simulator anchored at the current instant
    pub fn started_now() -> Self {
        Self::new(Utc::now())
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Plan the delay using the supplied random source for the percent roll
    pub fn plan_with<R: Rng + ?Sized>(&self, directive: &DelayDirective, rng: &mut R) -> DelayPlan {
        let fixed = if directive.fixed_delay.is_some() {
            evaluate_fixed_delay(directive, rng.random_range(0..100u8))
        } else {
            DelayStage::NoOp
        };

        DelayPlan {
            fixed,
            slowdown: evaluate_slowdown(directive, self.started_at),
        }
    }

    /// Plan the delay with the thread-local random source
    pub fn plan(&self, directive: &DelayDirective) -> DelayPlan {
        self.plan_with(directive, &mut rand::rng())
    }

    /// Plan and wait out the delay, returning what was applied.
    ///
    /// The wait always runs to completion; there is no internal timeout.
    pub async fn apply(&self, directive: &DelayDirective) -> DelayPlan {
        let plan = self.plan(directive);
        if !plan.is_noop() {
            debug!(
                fixed = ?plan.fixed.duration(),
                slowdown = ?plan.slowdown.duration(),
                "Delaying response by {:?}",
                plan.total()
            );
            tokio::time::sleep(plan.total()).await;
        }
        plan
    }
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::started_now()
    }
}
