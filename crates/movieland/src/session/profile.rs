use serde::Serialize;

/// Decorative recommender choice shown in the user panel. It does not change
/// how movies are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderSystem {
    #[default]
    Ninja,
    Pirate,
    Viking,
    Wizard,
}

impl RecommenderSystem {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ninja, Self::Pirate, Self::Viking, Self::Wizard]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ninja => "ninja",
            Self::Pirate => "pirate",
            Self::Viking => "viking",
            Self::Wizard => "wizard",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Ninja => "It works by finding the similarities and differences among all movies in the system based on all users' ratings.",
            Self::Pirate => "It is not personalized to your ratings, but instead recommends the top-rated content.",
            Self::Viking => "It works by turning all users' ratings data into a small set of factors that capture the essential preference aspects of a movie or a user.",
            Self::Wizard => "It is best for new MovieLand users. It uses your movie group selection to determine which movies to recommend.",
        }
    }

    /// The next system in the tap-to-cycle order, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::Ninja => Self::Pirate,
            Self::Pirate => Self::Viking,
            Self::Viking => Self::Wizard,
            Self::Wizard => Self::Ninja,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|system| system.name().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    name: Option<String>,
    shows_sign_up: bool,
    recommender: RecommenderSystem,
}

impl UserProfile {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn shows_sign_up(&self) -> bool {
        self.shows_sign_up
    }

    pub fn recommender(&self) -> RecommenderSystem {
        self.recommender
    }

    pub fn greeting(&self) -> Option<String> {
        self.name.as_ref().map(|name| format!("Hello, {name}!"))
    }

    /// Settings text listing progress and the active recommender.
    pub fn summary(&self, rated: usize) -> String {
        format!(
            "You've rated {rated} movies.\nYou're using the {} recommender. 🔄\n\n{}",
            self.recommender.name().to_uppercase(),
            self.recommender.description()
        )
    }

    pub(crate) fn reveal_sign_up(&mut self) {
        self.shows_sign_up = true;
    }

    pub(crate) fn sign_up(&mut self, username: String) {
        self.name = Some(username);
        self.shows_sign_up = false;
    }

    pub(crate) fn set_recommender(&mut self, recommender: RecommenderSystem) -> bool {
        if self.recommender == recommender {
            return false;
        }
        self.recommender = recommender;
        true
    }
}
