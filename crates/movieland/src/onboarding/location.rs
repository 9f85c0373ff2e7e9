use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStage {
    HowToClose,
    ExplainSection,
    ExplainLocationNeed,
    AskForLocation,
}

impl LocationStage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HowToClose,
            Self::ExplainSection,
            Self::ExplainLocationNeed,
            Self::AskForLocation,
        ]
    }

    pub fn count() -> usize {
        Self::ordered().len()
    }

    pub fn step(self) -> usize {
        Self::ordered()
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or(Self::count())
    }

    pub fn from_step(step: usize) -> Option<Self> {
        Self::ordered().get(step).copied()
    }

    /// Text shown in the detail screen's bottom panel.
    pub fn message(self, username: Option<&str>, location_granted: bool) -> String {
        match self {
            Self::HowToClose => {
                let greeting = match username.filter(|name| !name.trim().is_empty()) {
                    Some(name) => format!("Hello again, {} 👋🏻!", name.trim()),
                    None => "Hello again 👋🏻!".to_string(),
                };
                format!("{greeting}\n\nSWIPE down to dismiss me.\n\n⬇️⬇️⬇️\n\n(But come back for more.)")
            }
            Self::ExplainSection => "Here you can find the closest theatres where you can watch this movie.\n\nAnd you can BUY a ticket right here! \n\n👆".to_string(),
            Self::ExplainLocationNeed => "But to do that, I'll need to access your location when you're using the app.\n\nIs that okay 🙈?".to_string(),
            Self::AskForLocation if location_granted => {
                "Alright!\n\nYou're all set up now.\n\nGoodbye for now. 🙂".to_string()
            }
            Self::AskForLocation => "Well, if you don't want to share your location, then I refuse to stay here any longer! \n\n Good Day! 👿\n\n(If you change your mind TAP HERE)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "stage", rename_all = "snake_case")]
pub enum LocationState {
    Active(LocationStage),
    Complete,
}

impl LocationState {
    pub fn steps(self) -> usize {
        match self {
            Self::Active(stage) => stage.step(),
            Self::Complete => LocationStage::count(),
        }
    }

    fn from_steps(steps: usize) -> Self {
        LocationStage::from_step(steps).map_or(Self::Complete, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationTrigger {
    PanelTapped { location_granted: bool },
    PermissionResolved { granted: bool },
    DetailDismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationEffect {
    RequestPermission,
    OpenSystemSettings,
    PurchaseTicket,
}

/// Result of feeding one trigger to the location machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationStep {
    pub advanced: bool,
    pub effects: Vec<LocationEffect>,
}

impl LocationStep {
    fn ignored() -> Self {
        Self::default()
    }

    fn effect(effect: LocationEffect) -> Self {
        Self {
            advanced: false,
            effects: vec![effect],
        }
    }
}

/// Onboarding shown on the movie detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationMachine {
    state: LocationState,
}

impl Default for LocationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationMachine {
    pub fn new() -> Self {
        Self {
            state: LocationState::Active(LocationStage::HowToClose),
        }
    }

    pub fn at_step(steps: usize) -> Self {
        Self {
            state: LocationState::from_steps(steps),
        }
    }

    pub fn state(&self) -> LocationState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.state.steps()
    }

    pub fn stage(&self) -> Option<LocationStage> {
        match self.state {
            LocationState::Active(stage) => Some(stage),
            LocationState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == LocationState::Complete
    }

    pub fn message(&self, username: Option<&str>, location_granted: bool) -> Option<String> {
        self.stage()
            .map(|stage| stage.message(username, location_granted))
    }

    pub fn apply(&mut self, trigger: LocationTrigger) -> LocationStep {
        use LocationStage as S;
        use LocationTrigger as T;

        let Some(stage) = self.stage() else {
            return match trigger {
                T::PanelTapped { .. } => LocationStep::effect(LocationEffect::PurchaseTicket),
                _ => LocationStep::ignored(),
            };
        };

        match (stage, trigger) {
            (S::HowToClose | S::ExplainSection, T::PanelTapped { .. }) => {
                self.advance(Vec::new())
            }
            (S::ExplainLocationNeed, T::PanelTapped { .. }) => {
                LocationStep::effect(LocationEffect::RequestPermission)
            }
            (S::AskForLocation, T::PanelTapped { location_granted }) => {
                let effects = if location_granted {
                    Vec::new()
                } else {
                    vec![LocationEffect::OpenSystemSettings]
                };
                self.advance(effects)
            }
            (S::ExplainLocationNeed, T::PermissionResolved { granted }) => {
                debug!(granted, "location permission resolved");
                self.advance(Vec::new())
            }
            (S::HowToClose, T::DetailDismissed) => self.advance(Vec::new()),
            _ => {
                debug!(?stage, ?trigger, "location trigger ignored");
                LocationStep::ignored()
            }
        }
    }

    fn advance(&mut self, effects: Vec<LocationEffect>) -> LocationStep {
        let from = self.steps();
        self.state = LocationState::from_steps(from + 1);
        info!(
            from,
            to = self.steps(),
            complete = self.is_complete(),
            "location onboarding advanced"
        );
        LocationStep {
            advanced: true,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(granted: bool) -> LocationTrigger {
        LocationTrigger::PanelTapped {
            location_granted: granted,
        }
    }

    #[test]
    fn third_tap_requests_permission_without_advancing() {
        let mut machine = LocationMachine::new();
        assert!(machine.apply(tap(false)).advanced);
        assert!(machine.apply(tap(false)).advanced);
        assert_eq!(machine.steps(), 2);

        let third = machine.apply(tap(false));
        assert!(!third.advanced);
        assert_eq!(third.effects, vec![LocationEffect::RequestPermission]);
        assert_eq!(machine.stage(), Some(LocationStage::ExplainLocationNeed));
    }

    #[test]
    fn permission_result_only_counts_while_explaining() {
        let mut machine = LocationMachine::new();
        let early = machine.apply(LocationTrigger::PermissionResolved { granted: true });
        assert_eq!(early, LocationStep::default());
        assert_eq!(machine.steps(), 0);

        let mut machine = LocationMachine::at_step(2);
        assert!(machine
            .apply(LocationTrigger::PermissionResolved { granted: false })
            .advanced);
        assert_eq!(machine.stage(), Some(LocationStage::AskForLocation));
    }

    #[test]
    fn denied_permission_opens_settings_then_completes() {
        let mut machine = LocationMachine::at_step(3);
        let step = machine.apply(tap(false));
        assert!(step.advanced);
        assert_eq!(step.effects, vec![LocationEffect::OpenSystemSettings]);
        assert!(machine.is_complete());
        assert_eq!(machine.steps(), LocationStage::count());

        let mut machine = LocationMachine::at_step(3);
        let step = machine.apply(tap(true));
        assert!(step.advanced);
        assert!(step.effects.is_empty());
    }

    #[test]
    fn completed_machine_turns_taps_into_purchases() {
        let mut machine = LocationMachine::at_step(4);
        assert!(machine.message(None, true).is_none());

        let step = machine.apply(tap(true));
        assert!(!step.advanced);
        assert_eq!(step.effects, vec![LocationEffect::PurchaseTicket]);
        assert_eq!(
            machine.apply(LocationTrigger::DetailDismissed),
            LocationStep::default()
        );
    }

    #[test]
    fn dismissing_only_advances_from_how_to_close() {
        let mut machine = LocationMachine::new();
        assert!(machine.apply(LocationTrigger::DetailDismissed).advanced);
        assert_eq!(machine.stage(), Some(LocationStage::ExplainSection));
        assert!(!machine.apply(LocationTrigger::DetailDismissed).advanced);
        assert_eq!(machine.steps(), 1);
    }

    #[test]
    fn messages_reflect_name_and_permission() {
        let greeting = LocationStage::HowToClose.message(Some("Ada"), false);
        assert!(greeting.starts_with("Hello again, Ada"));
        assert!(LocationStage::HowToClose
            .message(None, false)
            .starts_with("Hello again 👋🏻!"));

        let denied = LocationStage::AskForLocation.message(None, false);
        let granted = LocationStage::AskForLocation.message(None, true);
        assert!(denied.contains("TAP HERE"));
        assert!(granted.contains("all set up"));
    }
}
