/// Answers whether the form step at an index holds a complete record.
pub trait CompletenessCheck {
    fn is_complete(&self, index: usize) -> bool;
}

impl<F> CompletenessCheck for F
where
    F: Fn(usize) -> bool,
{
    fn is_complete(&self, index: usize) -> bool {
        self(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("step {index} is incomplete; fill every field before moving forward")]
    IncompleteStep { index: usize },
}

/// Wizard position over `step_count` form steps followed by one summary step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNavigator {
    current: usize,
    terminal: usize,
}

impl StepNavigator {
    pub fn new(step_count: usize) -> Self {
        Self {
            current: 0,
            terminal: step_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn terminal(&self) -> usize {
        self.terminal
    }

    pub fn is_terminal(&self) -> bool {
        self.current == self.terminal
    }

    /// Moves one step forward once the current step is complete. A no-op on
    /// the summary step.
    pub fn advance<C: CompletenessCheck>(&mut self, check: &C) -> Result<usize, NavigationError> {
        self.request(1, check)
    }

    pub fn retreat(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// Applies a signed step delta. Forward moves gate on the current step
    /// only; the result is clamped to `[0, terminal]`.
    pub fn request<C: CompletenessCheck>(
        &mut self,
        delta: i32,
        check: &C,
    ) -> Result<usize, NavigationError> {
        if delta > 0 && self.current < self.terminal && !check.is_complete(self.current) {
            return Err(NavigationError::IncompleteStep {
                index: self.current,
            });
        }

        let target = self.current as i64 + i64::from(delta);
        self.current = target.clamp(0, self.terminal as i64) as usize;
        Ok(self.current)
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Share of the wizard behind the user, counting the summary step.
    pub fn progress_pct(&self) -> f32 {
        self.current as f32 / (self.terminal + 1) as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(result: bool) -> impl Fn(usize) -> bool {
        move |_| result
    }

    #[test]
    fn advance_blocks_on_incomplete_step() {
        let mut navigator = StepNavigator::new(7);
        let err = navigator
            .advance(&always(false))
            .expect_err("incomplete step blocks");
        assert_eq!(err, NavigationError::IncompleteStep { index: 0 });
        assert_eq!(navigator.current(), 0);
    }

    #[test]
    fn advance_moves_forward_and_stops_at_terminal() {
        let mut navigator = StepNavigator::new(2);
        assert_eq!(navigator.advance(&always(true)), Ok(1));
        assert_eq!(navigator.advance(&always(true)), Ok(2));
        assert!(navigator.is_terminal());
        assert_eq!(navigator.advance(&always(false)), Ok(2));
        assert_eq!(navigator.current(), 2);
    }

    #[test]
    fn retreat_never_goes_below_zero() {
        let mut navigator = StepNavigator::new(3);
        assert_eq!(navigator.retreat(), 0);
        navigator.advance(&always(true)).expect("advance");
        assert_eq!(navigator.retreat(), 0);
    }

    #[test]
    fn request_clamps_large_deltas() {
        let mut navigator = StepNavigator::new(3);
        assert_eq!(navigator.request(10, &always(true)), Ok(3));
        assert_eq!(navigator.request(-10, &always(false)), Ok(0));
        assert_eq!(navigator.request(0, &always(false)), Ok(0));
    }

    #[test]
    fn request_only_checks_the_current_step() {
        let mut navigator = StepNavigator::new(4);
        let only_first = |index: usize| index == 0;
        assert_eq!(navigator.request(2, &only_first), Ok(2));
        assert_eq!(
            navigator.request(1, &only_first),
            Err(NavigationError::IncompleteStep { index: 2 })
        );
    }

    #[test]
    fn progress_counts_summary_step() {
        let mut navigator = StepNavigator::new(7);
        assert_eq!(navigator.progress_pct(), 0.0);
        navigator.request(7, &always(true)).expect("jump");
        assert!((navigator.progress_pct() - 87.5).abs() < f32::EPSILON);
        navigator.reset();
        assert_eq!(navigator.current(), 0);
    }
}
