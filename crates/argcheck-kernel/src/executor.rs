//! Sequential check executor.
//!
//! Runs a [`CheckPlan`] one step at a time: every pre-check, then every
//! post-check, then exactly one delivery. Between steps the executor yields
//! to the runtime, and a validator's future is awaited to completion before
//! the next step starts, so checks never overlap and never reorder. The loop
//! is flat; the stack does not grow with the number of steps.
//!
//! A failed step does not stop the run. Post-checks run even when pre-checks
//! failed, so the caller sees every problem in one pass.

use std::fmt;

use tracing::Instrument;

use argcheck_types::{ArgMap, ErrorReport, Verdict};

use crate::checks::run_step;
use crate::plan::{CheckPlan, CheckStep};

/// Where a validation call is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Compiling,
    RunningPreChecks,
    RunningPostChecks,
    Delivered,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Compiling => "compiling",
            Phase::RunningPreChecks => "pre-checks",
            Phase::RunningPostChecks => "post-checks",
            Phase::Delivered => "delivered",
        };
        f.write_str(name)
    }
}

/// State owned by one in-flight validation call.
///
/// Only the executor mutates it; nothing here is shared between calls.
#[derive(Debug)]
pub struct CheckContext<'a> {
    args: &'a ArgMap,
    values: ArgMap,
    errors: ErrorReport,
    phase: Phase,
    steps_run: usize,
}

impl<'a> CheckContext<'a> {
    pub fn new(args: &'a ArgMap, values: ArgMap) -> Self {
        Self {
            args,
            values,
            errors: ErrorReport::new(),
            phase: Phase::Compiling,
            steps_run: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn errors(&self) -> &ErrorReport {
        &self.errors
    }

    pub fn values(&self) -> &ArgMap {
        &self.values
    }

    pub fn steps_run(&self) -> usize {
        self.steps_run
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
    }

    async fn run(&mut self, steps: &[CheckStep<'_>]) {
        for step in steps {
            tracing::trace!(arg = step.arg, check = %step.kind, "running check");
            let result = run_step(step, self.args, &mut self.values).await;
            self.steps_run += 1;

            if let Err(messages) = result {
                tracing::debug!(arg = step.arg, check = %step.kind, ?messages, "check failed");
                self.errors.extend(step.arg, messages);
            }

            tokio::task::yield_now().await;
        }
    }

    /// Hand over the result. Consumes the context, so it happens once.
    fn deliver(mut self) -> Verdict {
        self.enter(Phase::Delivered);
        if self.errors.is_empty() {
            tracing::debug!(values = self.values.len(), "validation passed");
            Ok(self.values)
        } else {
            tracing::debug!(
                args = self.errors.len(),
                messages = self.errors.message_count(),
                "validation failed"
            );
            Err(self.errors)
        }
    }
}

/// Run a compiled plan against `args` and deliver the verdict.
pub async fn execute(plan: CheckPlan<'_>, args: &ArgMap) -> Verdict {
    let span = tracing::debug_span!(
        "argcheck",
        pre = plan.pre.len(),
        post = plan.post.len()
    );

    async move {
        let CheckPlan { pre, post, values } = plan;
        let mut ctx = CheckContext::new(args, values);

        ctx.enter(Phase::RunningPreChecks);
        ctx.run(&pre).await;

        ctx.enter(Phase::RunningPostChecks);
        ctx.run(&post).await;

        ctx.deliver()
    }
    .instrument(span)
    .await
}
