use crate::discovery::FilterPanelExtent;
use serde::Serialize;
use tracing::{debug, info};

/// Ratings needed before the `RateFive` stage lets go.
pub const RATE_FIVE_TARGET: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    Greet,
    Explain,
    LearnToRate,
    RateFive,
    ScrollToBottom,
    AfterScrolling,
    SettingsPrompt,
    ToSettings,
    ShowSignUp,
    SayGoodbye,
}

impl OnboardingStage {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Greet,
            Self::Explain,
            Self::LearnToRate,
            Self::RateFive,
            Self::ScrollToBottom,
            Self::AfterScrolling,
            Self::SettingsPrompt,
            Self::ToSettings,
            Self::ShowSignUp,
            Self::SayGoodbye,
        ]
    }

    pub fn count() -> usize {
        Self::ordered().len()
    }

    /// Zero-based step this stage corresponds to.
    pub fn step(self) -> usize {
        Self::ordered()
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or(Self::count())
    }

    pub fn from_step(step: usize) -> Option<Self> {
        Self::ordered().get(step).copied()
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Greet => "\n\nHello Stranger! 🤗 \n\n Welcome to MovieLand 🎬 \n\nIf you're wondering: \n'What should I watch tonight?'\n\n TAP ME to find out more.",
            Self::Explain => "MovieLand uses colaborative item-to-item filtering. \n\nThe more you rate, the better I can suggest movies you might enjoy, and help you avoid the ones that you won't.",
            Self::LearnToRate => "To start, TAP and HOLD a movie below to rate it.\n\nEach rating helps me improve what I show you in your Top Picks.",
            Self::RateFive => "Good job! 👌\n\nNow rate a few more to get us going.",
            Self::ScrollToBottom => "Great! You're a pro 😎!\n\nSCROLL to the bottom, to find the movies you've already rated. \n\nThey'll be on a grey background.",
            Self::AfterScrolling => "If you want to find specific movies to rate, or a specific genre then\n\nDRAG me down.\n\n⬇️",
            Self::SettingsPrompt => "Awesome 👌.\n\nAnd if you want to see how many movies you've already rated, \n\nDRAG me down again.\n(But this time, put some muscle into it!)",
            Self::ToSettings => "Here you can view your progress and change your recommender system.\n\nBut for me to remember that... 🤔",
            Self::ShowSignUp => "You'll need to \n\nSIGN UP\n\nso that I can sync your recommendations across devices.",
            Self::SayGoodbye => "Keep on rating to help me help you find your perfect movie!\n\nEnjoy the show(s) 🍿",
        }
    }

    /// Side effects requested when the user arrives at this stage.
    pub fn entry_effects(self) -> Vec<OnboardingEffect> {
        match self {
            Self::AfterScrolling | Self::ToSettings => vec![OnboardingEffect::Feedback],
            Self::ShowSignUp => vec![OnboardingEffect::RevealSignUp],
            Self::SayGoodbye => vec![OnboardingEffect::CollapseFilters],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "stage", rename_all = "snake_case")]
pub enum OnboardingState {
    Active(OnboardingStage),
    Complete,
}

impl OnboardingState {
    pub fn steps(self) -> usize {
        match self {
            Self::Active(stage) => stage.step(),
            Self::Complete => OnboardingStage::count(),
        }
    }

    fn from_steps(steps: usize) -> Self {
        OnboardingStage::from_step(steps).map_or(Self::Complete, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingTrigger {
    BannerTapped,
    /// A rating was committed; `total_rated` counts distinct rated movies.
    MovieRated { total_rated: usize },
    ScrolledToBottom,
    FilterPanelExpanded(FilterPanelExtent),
    SignUpCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingEffect {
    /// Haptic tap, or a system sound where haptics are unavailable.
    Feedback,
    RevealSignUp,
    CollapseFilters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingProgressed {
    pub from: OnboardingStage,
    pub to: OnboardingState,
    pub steps: usize,
    pub effects: Vec<OnboardingEffect>,
}

/// The main-screen onboarding banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingMachine {
    state: OnboardingState,
}

impl Default for OnboardingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingMachine {
    pub fn new() -> Self {
        Self {
            state: OnboardingState::Active(OnboardingStage::Greet),
        }
    }

    /// Resumes at `steps`; anything at or past the last stage is complete.
    pub fn at_step(steps: usize) -> Self {
        Self {
            state: OnboardingState::from_steps(steps),
        }
    }

    pub fn state(&self) -> OnboardingState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.state.steps()
    }

    pub fn stage(&self) -> Option<OnboardingStage> {
        match self.state {
            OnboardingState::Active(stage) => Some(stage),
            OnboardingState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == OnboardingState::Complete
    }

    /// Banner text, or `None` once the banner should be hidden.
    pub fn message(&self) -> Option<&'static str> {
        self.stage().map(OnboardingStage::message)
    }

    /// Whether `trigger` moves the user on from `stage`.
    pub fn accepts(stage: OnboardingStage, trigger: OnboardingTrigger) -> bool {
        use OnboardingStage as S;
        use OnboardingTrigger as T;

        match (stage, trigger) {
            (S::Greet | S::Explain | S::ToSettings | S::SayGoodbye, T::BannerTapped) => true,
            (S::LearnToRate, T::MovieRated { .. }) => true,
            (S::RateFive, T::MovieRated { total_rated }) => total_rated >= RATE_FIVE_TARGET,
            (S::ScrollToBottom, T::ScrolledToBottom) => true,
            (S::AfterScrolling, T::FilterPanelExpanded(FilterPanelExtent::Compact)) => true,
            (S::SettingsPrompt, T::FilterPanelExpanded(FilterPanelExtent::Full)) => true,
            (S::ShowSignUp, T::SignUpCompleted) => true,
            _ => false,
        }
    }

    /// Feeds a trigger through the transition table. Triggers the current
    /// stage does not listen for leave the machine untouched.
    pub fn apply(&mut self, trigger: OnboardingTrigger) -> Option<OnboardingProgressed> {
        let stage = self.stage()?;
        if !Self::accepts(stage, trigger) {
            debug!(?stage, ?trigger, "onboarding trigger ignored");
            return None;
        }
        self.advance()
    }

    /// Moves one stage forward regardless of trigger. No-op once complete.
    fn advance(&mut self) -> Option<OnboardingProgressed> {
        let from = self.stage()?;
        let to = OnboardingState::from_steps(from.step() + 1);
        self.state = to;

        let effects = match to {
            OnboardingState::Active(stage) => stage.entry_effects(),
            OnboardingState::Complete => Vec::new(),
        };

        info!(?from, ?to, steps = to.steps(), "onboarding advanced");
        Some(OnboardingProgressed {
            from,
            to,
            steps: to.steps(),
            effects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_at(stage: OnboardingStage) -> OnboardingMachine {
        OnboardingMachine::at_step(stage.step())
    }

    #[test]
    fn starts_at_greet_with_message() {
        let machine = OnboardingMachine::new();
        assert_eq!(machine.steps(), 0);
        assert_eq!(machine.stage(), Some(OnboardingStage::Greet));
        assert!(machine.message().expect("message").contains("TAP ME"));
    }

    #[test]
    fn banner_taps_stop_at_learn_to_rate() {
        let mut machine = OnboardingMachine::new();
        assert!(machine.apply(OnboardingTrigger::BannerTapped).is_some());
        assert!(machine.apply(OnboardingTrigger::BannerTapped).is_some());
        assert_eq!(machine.stage(), Some(OnboardingStage::LearnToRate));

        assert!(machine.apply(OnboardingTrigger::BannerTapped).is_none());
        assert!(machine.apply(OnboardingTrigger::BannerTapped).is_none());
        assert_eq!(machine.steps(), 2);
    }

    #[test]
    fn rate_five_waits_for_the_target() {
        let mut machine = machine_at(OnboardingStage::LearnToRate);
        assert!(machine
            .apply(OnboardingTrigger::MovieRated { total_rated: 1 })
            .is_some());
        assert_eq!(machine.stage(), Some(OnboardingStage::RateFive));

        for total_rated in 2..RATE_FIVE_TARGET {
            assert!(machine
                .apply(OnboardingTrigger::MovieRated { total_rated })
                .is_none());
        }
        let progressed = machine
            .apply(OnboardingTrigger::MovieRated {
                total_rated: RATE_FIVE_TARGET,
            })
            .expect("fifth rating advances");
        assert_eq!(
            progressed.to,
            OnboardingState::Active(OnboardingStage::ScrollToBottom)
        );
    }

    #[test]
    fn one_trigger_advances_at_most_one_stage() {
        let mut machine = machine_at(OnboardingStage::LearnToRate);
        machine.apply(OnboardingTrigger::MovieRated { total_rated: 9 });
        assert_eq!(machine.stage(), Some(OnboardingStage::RateFive));
    }

    #[test]
    fn filter_panel_extents_gate_their_stages() {
        let mut machine = machine_at(OnboardingStage::AfterScrolling);
        assert!(machine
            .apply(OnboardingTrigger::FilterPanelExpanded(FilterPanelExtent::Full))
            .is_none());
        let progressed = machine
            .apply(OnboardingTrigger::FilterPanelExpanded(
                FilterPanelExtent::Compact,
            ))
            .expect("compact extent advances");
        assert_eq!(progressed.effects, Vec::<OnboardingEffect>::new());

        assert!(machine
            .apply(OnboardingTrigger::FilterPanelExpanded(
                FilterPanelExtent::Compact
            ))
            .is_none());
        let progressed = machine
            .apply(OnboardingTrigger::FilterPanelExpanded(FilterPanelExtent::Full))
            .expect("full extent advances");
        assert_eq!(
            progressed.to,
            OnboardingState::Active(OnboardingStage::ToSettings)
        );
        assert_eq!(progressed.effects, vec![OnboardingEffect::Feedback]);
    }

    #[test]
    fn entry_effects_fire_on_the_right_stages() {
        let mut machine = machine_at(OnboardingStage::ScrollToBottom);
        let progressed = machine
            .apply(OnboardingTrigger::ScrolledToBottom)
            .expect("scroll advances");
        assert_eq!(progressed.effects, vec![OnboardingEffect::Feedback]);

        let mut machine = machine_at(OnboardingStage::ToSettings);
        let progressed = machine
            .apply(OnboardingTrigger::BannerTapped)
            .expect("tap advances");
        assert_eq!(progressed.effects, vec![OnboardingEffect::RevealSignUp]);

        let progressed = machine
            .apply(OnboardingTrigger::SignUpCompleted)
            .expect("sign up advances");
        assert_eq!(progressed.effects, vec![OnboardingEffect::CollapseFilters]);
    }

    #[test]
    fn sign_up_outside_its_stage_is_ignored() {
        let mut machine = OnboardingMachine::new();
        assert!(machine.apply(OnboardingTrigger::SignUpCompleted).is_none());
        assert_eq!(machine.steps(), 0);
    }

    #[test]
    fn goodbye_tap_completes_and_hides_banner() {
        let mut machine = machine_at(OnboardingStage::SayGoodbye);
        let progressed = machine
            .apply(OnboardingTrigger::BannerTapped)
            .expect("goodbye tap advances");
        assert_eq!(progressed.to, OnboardingState::Complete);
        assert_eq!(progressed.steps, OnboardingStage::count());
        assert!(machine.is_complete());
        assert!(machine.message().is_none());

        assert!(machine.apply(OnboardingTrigger::BannerTapped).is_none());
        assert!(machine.advance().is_none());
        assert_eq!(machine.steps(), 10);
    }

    #[test]
    fn steps_past_the_end_are_complete() {
        assert!(OnboardingMachine::at_step(10).is_complete());
        assert!(OnboardingMachine::at_step(25).is_complete());
        assert_eq!(
            OnboardingMachine::at_step(3).stage(),
            Some(OnboardingStage::RateFive)
        );
    }

    #[test]
    fn every_stage_has_a_distinct_message() {
        let mut messages: Vec<&str> = OnboardingStage::ordered()
            .into_iter()
            .map(OnboardingStage::message)
            .collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), OnboardingStage::count());
    }
}
