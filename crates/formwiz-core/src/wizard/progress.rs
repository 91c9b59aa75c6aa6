//! Per-step completion ratios.
//!
//! Purely informational: progress never gates navigation and is independent
//! of `Wizard::is_step_accessible`.

use serde::Serialize;

use crate::wizard::navigation::Wizard;

/// Completion summary for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepProgress {
    pub step: usize,
    pub section: Option<String>,
    pub filled: usize,
    pub required: usize,
    pub ratio: f64,
    pub accessible: bool,
}

impl Wizard {
    /// Filled required fields / required fields for a step; 0 when the step
    /// has no required fields.
    pub fn progress(&self, step: usize) -> f64 {
        let (filled, required) = self.required_counts(step);
        ratio(filled, required)
    }

    /// Completion across the required fields of every step.
    pub fn overall_progress(&self) -> f64 {
        let (filled, required) = (1..=self.step_count())
            .map(|step| self.required_counts(step))
            .fold((0, 0), |(f, r), (sf, sr)| (f + sf, r + sr));
        ratio(filled, required)
    }

    /// Progress of every step, in order.
    pub fn progress_report(&self) -> Vec<StepProgress> {
        (1..=self.step_count())
            .map(|step| {
                let (filled, required) = self.required_counts(step);
                StepProgress {
                    step,
                    section: self.schema().section_for_step(step).map(str::to_string),
                    filled,
                    required,
                    ratio: ratio(filled, required),
                    accessible: self.is_step_accessible(step),
                }
            })
            .collect()
    }

    fn required_counts(&self, step: usize) -> (usize, usize) {
        self.step_fields(step)
            .filter(|(field, _)| field.required)
            .fold((0, 0), |(filled, required), (_, key)| {
                let is_filled = !self.value(key).trim().is_empty();
                (filled + usize::from(is_filled), required + 1)
            })
    }
}

fn ratio(filled: usize, required: usize) -> f64 {
    if required == 0 {
        0.0
    } else {
        filled as f64 / required as f64
    }
}
