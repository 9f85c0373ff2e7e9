use super::profile::RecommenderSystem;
use crate::discovery::{FilterPanelExtent, Genre, GenreToggle, MovieId};
use crate::onboarding::{OnboardingStage, OnboardingState};
use serde::Serialize;

/// Everything the render layer can report back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Search text edited; `None` and `""` both clear the search.
    QueryChanged(Option<String>),
    GenreToggled(Genre),
    MovieRated { movie: MovieId, rating: f64 },
    BannerTapped,
    /// The movie list came to rest at its bottom edge.
    ScrolledToBottom,
    /// The list moved down; closes the filter panel and the quick details popup.
    ListScrolled,
    /// A pull past the threshold; opens the panel one level further.
    FilterPulled,
    FilterExpandedTo(FilterPanelExtent),
    SignUpCompleted { username: String },
    RecommenderCycled,
    RecommenderSelected(RecommenderSystem),
    QuickDetailsOpened(MovieId),
    QuickDetailsDismissed,
    DetailOpened(MovieId),
    /// Bottom panel of the detail screen tapped, optionally on a theatre.
    DetailPanelTapped { theatre: Option<String> },
    DetailDismissed,
    LocationPermissionResult { granted: bool },
    /// Clock tick used to fire pending deadlines.
    Tick,
}

/// Side effects the render layer is asked to carry out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SessionEffect {
    OnboardingAdvanced {
        from: OnboardingStage,
        to: OnboardingState,
    },
    /// Haptic tap, or a system sound where haptics are unavailable.
    Feedback,
    SignUpRevealed,
    FilterPanelMoved { extent: FilterPanelExtent },
    GenreToggled { genre: Genre, toggle: GenreToggle },
    LocationOnboardingAdvanced { steps: usize },
    RequestLocationPermission,
    OpenSystemSettings,
    TicketPurchaseRequested(TicketOffer),
    QuickDetailsClosed,
    DetailClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketOffer {
    pub movie: String,
    pub theatre: String,
    pub prompt: String,
}

impl TicketOffer {
    pub fn new(movie: &str, theatre: &str) -> Self {
        Self {
            movie: movie.to_string(),
            theatre: theatre.to_string(),
            prompt: format!("So, you're trying to see {movie} at the wonderful {theatre} theatre?"),
        }
    }
}

/// What handling one event did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionOutcome {
    pub effects: Vec<SessionEffect>,
    /// Whether the view model needs to be rebuilt.
    pub changed: bool,
}

impl SessionOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            effects: Vec::new(),
            changed: true,
        }
    }

    pub fn is_noop(&self) -> bool {
        !self.changed && self.effects.is_empty()
    }

    pub(crate) fn push(&mut self, effect: SessionEffect) {
        self.effects.push(effect);
        self.changed = true;
    }

    pub(crate) fn merge(&mut self, other: SessionOutcome) {
        self.changed |= other.changed;
        self.effects.extend(other.effects);
    }
}
