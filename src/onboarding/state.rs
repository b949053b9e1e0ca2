//! Onboarding wizard state — step index plus the accumulated draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::UserProfileDraft;

/// Step indices of the wizard.
///
/// The step counter is a plain integer with no clamping: retreating from
/// step 0 or advancing past the last step is allowed, and any index above
/// [`step::LAST`] counts as the completed region.
pub mod step {
    /// Basic info: name, age, risk tolerance, report complexity.
    pub const BASIC_INFO: i32 = 0;
    /// Interest tags and report delivery days.
    pub const INTERESTS: i32 = 1;
    /// Last defined step; anything beyond it is completion.
    pub const LAST: i32 = INTERESTS;
}

/// A snapshot of wizard progress and collected data.
///
/// Published as a whole on every mutation; observers never see a
/// partially-updated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingState {
    /// Current step index. Unbounded in both directions.
    pub current_step: i32,
    /// The draft accumulated so far.
    pub user_data: UserProfileDraft,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            current_step: step::BASIC_INFO,
            user_data: UserProfileDraft::default(),
        }
    }
}

impl OnboardingState {
    /// Whether the data required by the current step has been supplied.
    ///
    /// Steps outside the defined range are never valid. Pure read, no side
    /// effects.
    pub fn is_current_step_valid(&self) -> bool {
        match self.current_step {
            step::BASIC_INFO => self.user_data.has_basic_info(),
            step::INTERESTS => self.user_data.has_interests_and_days(),
            _ => false,
        }
    }

    /// Whether the wizard has moved past the last defined step.
    pub fn is_complete(&self) -> bool {
        self.current_step > step::LAST
    }

    /// The state one step forward, draft untouched.
    pub fn advanced(self) -> Self {
        Self {
            current_step: self.current_step + 1,
            ..self
        }
    }

    /// The state one step back, draft untouched.
    pub fn retreated(self) -> Self {
        Self {
            current_step: self.current_step - 1,
            ..self
        }
    }
}

/// Direction of a step change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Advance,
    Retreat,
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
        };
        write!(f, "{s}")
    }
}

/// A recorded step change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepTransition {
    pub kind: TransitionKind,
    /// Step index before the change.
    pub from: i32,
    /// Step index after the change.
    pub to: i32,
    /// When the change happened.
    pub at: DateTime<Utc>,
}
