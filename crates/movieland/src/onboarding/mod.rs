//! Guided tours: the main-screen banner and the detail-screen location flow.

mod general;
mod location;

pub use general::{
    OnboardingEffect, OnboardingMachine, OnboardingProgressed, OnboardingStage, OnboardingState,
    OnboardingTrigger, RATE_FIVE_TARGET,
};
pub use location::{
    LocationEffect, LocationMachine, LocationStage, LocationState, LocationStep, LocationTrigger,
};
