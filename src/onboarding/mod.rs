//! Onboarding wizard core — first-launch profile collection.
//!
//! A new user walks a two-step wizard: basic info (name, age, risk
//! tolerance, report complexity), then interest tags and report delivery
//! days. The controller holds the single source of truth, publishes every
//! state change to observers, and answers per-step validity and overall
//! completion. The rendering layer observes and calls; it never mutates
//! state directly.

pub mod controller;
pub mod model;
pub mod state;

pub use controller::{OnboardingController, OnboardingStatus};
pub use model::UserProfileDraft;
pub use state::{step, OnboardingState, StepTransition, TransitionKind};
