//! First-run onboarding flow.
//!
//! Three steps: a welcome screen, picking the first goal, and a closing
//! screen whose confirmation marks onboarding as complete.

use serde::{Deserialize, Serialize};

use crate::duration::HoursMinutes;
use crate::error::{Result, ValidationError};
use crate::progress::ProgressState;
use crate::storage::StateStore;

/// Step of the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    SetFirstGoal,
    Finished,
}

impl OnboardingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::SetFirstGoal => "set_first_goal",
            OnboardingStep::Finished => "finished",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Welcome to ZeroScreen!",
            OnboardingStep::SetFirstGoal => "Set Your First Goal",
            OnboardingStep::Finished => "Good Job!",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => {
                "Your screen relief journey begins here. We will guide you through reducing \
                 your screen time in a fun, competitive way!"
            }
            OnboardingStep::SetFirstGoal => {
                "Setting your first goal is important, so take it seriously! Check your \
                 screen time trends and set your goal to something a little lower than that \
                 to start."
            }
            OnboardingStep::Finished => {
                "You're doing great. Once you are done using screens for the day, just log \
                 your time and your score will update. Be competitive, reduce your screen \
                 usage, and have fun!"
            }
        }
    }
}

/// Picker value shown when the first goal is requested: 2h 30m.
pub fn default_first_goal() -> HoursMinutes {
    HoursMinutes::new(2, 30).unwrap_or_default()
}

/// Drives a [`ProgressState`] through the onboarding steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    completed: bool,
}

impl OnboardingFlow {
    /// Begin onboarding. A state that already finished onboarding starts
    /// (and stays) at [`OnboardingStep::Finished`].
    pub fn start<S: StateStore>(state: &ProgressState<S>) -> Self {
        if state.onboarding_complete() {
            Self {
                step: OnboardingStep::Finished,
                completed: true,
            }
        } else {
            Self {
                step: OnboardingStep::Welcome,
                completed: false,
            }
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Move from the welcome screen to goal setting.
    ///
    /// # Errors
    /// Returns a validation error outside [`OnboardingStep::Welcome`].
    pub fn advance(&mut self) -> Result<OnboardingStep> {
        self.expect_step(OnboardingStep::Welcome, "advance")?;
        self.step = OnboardingStep::SetFirstGoal;
        Ok(self.step)
    }

    /// Store the first goal and move to the closing screen.
    ///
    /// # Errors
    /// Returns a validation error outside [`OnboardingStep::SetFirstGoal`],
    /// or whatever [`ProgressState::set_goal_hm`] returns.
    pub fn submit_goal<S: StateStore>(
        &mut self,
        state: &mut ProgressState<S>,
        goal: HoursMinutes,
    ) -> Result<OnboardingStep> {
        self.expect_step(OnboardingStep::SetFirstGoal, "submit a goal")?;
        state.set_goal_hm(goal)?;
        self.step = OnboardingStep::Finished;
        Ok(self.step)
    }

    /// Confirm the closing screen, marking onboarding complete.
    ///
    /// # Errors
    /// Returns a validation error outside [`OnboardingStep::Finished`], or
    /// the store's error if persisting fails.
    pub fn finish<S: StateStore>(&mut self, state: &mut ProgressState<S>) -> Result<()> {
        self.expect_step(OnboardingStep::Finished, "finish")?;
        state.complete_onboarding()?;
        self.completed = true;
        Ok(())
    }

    fn expect_step(&self, expected: OnboardingStep, action: &'static str) -> Result<()> {
        if self.step != expected {
            return Err(ValidationError::WrongOnboardingStep {
                action,
                step: self.step.as_str(),
            }
            .into());
        }
        Ok(())
    }
}
