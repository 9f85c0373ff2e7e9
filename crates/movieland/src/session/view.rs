use super::profile::RecommenderSystem;
use crate::discovery::{
    DisplayMode, FilterPanelExtent, GenreFilterChip, Movie, MovieDetails, MovieId, Section,
};
use crate::onboarding::OnboardingStage;
use serde::Serialize;

/// Read-only snapshot of the main screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub banner: Option<BannerView>,
    pub mode: DisplayMode,
    pub rows: Vec<SectionRow>,
    pub filter_panel: FilterPanelView,
    pub user: UserPanelView,
    pub quick_details: Option<QuickDetailsView>,
}

impl SessionView {
    pub fn row(&self, section: Section) -> Option<&SectionRow> {
        self.rows.iter().find(|row| row.section == section)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    pub stage: OnboardingStage,
    pub steps: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRow {
    pub section: Section,
    pub label: &'static str,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub year: u16,
    pub image_name: String,
    pub predicted_rating: f64,
    pub actual_rating: Option<f64>,
}

impl MovieCard {
    pub(crate) fn new(id: MovieId, movie: &Movie) -> Self {
        Self {
            id,
            title: movie.title().to_string(),
            year: movie.details().year,
            image_name: movie.image_name().to_string(),
            predicted_rating: movie.predicted_rating(),
            actual_rating: movie.actual_rating(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPanelView {
    pub extent: FilterPanelExtent,
    pub table_offset: f64,
    pub query: Option<String>,
    pub selected: Vec<GenreFilterChip>,
    pub deselected: Vec<GenreFilterChip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPanelView {
    pub greeting: Option<String>,
    pub rated_count: usize,
    pub shows_sign_up: bool,
    pub recommender: RecommenderSystem,
    pub summary: String,
}

/// Popup opened by pressing and holding a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickDetailsView {
    pub movie: MovieId,
    pub title: String,
    pub year: u16,
    pub length_minutes: u16,
    pub admission_rating: &'static str,
    pub description: String,
    /// Actual rating when set, otherwise the prediction.
    pub displayed_rating: f64,
    /// True while showing a prediction, rendered greyed out.
    pub muted: bool,
    pub auto_dismiss_pending: bool,
}

impl QuickDetailsView {
    pub(crate) fn new(id: MovieId, movie: &Movie, auto_dismiss_pending: bool) -> Self {
        let details = movie.details();
        let (displayed_rating, muted) = match movie.actual_rating() {
            Some(rating) => (rating, false),
            None => (movie.predicted_rating(), true),
        };

        Self {
            movie: id,
            title: details.title.clone(),
            year: details.year,
            length_minutes: details.length_minutes,
            admission_rating: details.admission_rating.label(),
            description: details.description.clone(),
            displayed_rating,
            muted,
            auto_dismiss_pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theatre {
    pub name: &'static str,
    pub distance_miles: f64,
}

/// Theatres offered once the user shares their location.
pub const NEARBY_THEATRES: [Theatre; 3] = [
    Theatre {
        name: "Village East",
        distance_miles: 1.4,
    },
    Theatre {
        name: "AMC Loews",
        distance_miles: 0.8,
    },
    Theatre {
        name: "Lincoln Plaza",
        distance_miles: 5.7,
    },
];

pub(crate) const LOCATION_DISABLED_MESSAGE: &str =
    "Location Services are disabled. \n\nTAP to Go to General > Settings \nto adjust your settings.";

/// The full-screen movie detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub movie: MovieId,
    pub details: MovieDetails,
    pub genres: Vec<&'static str>,
    pub actual_rating: Option<f64>,
    pub predicted_rating: f64,
    /// Location onboarding text, or the disabled notice once onboarding is done.
    pub panel_message: Option<String>,
    pub location_granted: bool,
    pub theatres: Vec<Theatre>,
}
