use super::domain::{Genre, Movie, MovieId};
use super::query::QueryEngine;
use super::sections::{SectionClassifier, SectionMap};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayModeKind {
    Default,
    Search,
    GenreFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    Default,
    Search { query: String },
    GenreFilter { genres: Vec<Genre> },
}

impl DisplayMode {
    pub fn kind(&self) -> DisplayModeKind {
        match self {
            Self::Default => DisplayModeKind::Default,
            Self::Search { .. } => DisplayModeKind::Search,
            Self::GenreFilter { .. } => DisplayModeKind::GenreFilter,
        }
    }
}

/// Decides which movies the main screen lists and keeps the section map current.
///
/// The last trigger wins: a query switches to search, a chip switches to the
/// genre filter, and the other input is kept but not applied.
#[derive(Debug, Clone)]
pub struct DisplayModeController {
    mode: DisplayModeKind,
    active_query: Option<String>,
    active_genres: Vec<Genre>,
    sections: SectionMap,
}

impl DisplayModeController {
    pub fn new(movies: &[Movie]) -> Self {
        Self {
            mode: DisplayModeKind::Default,
            active_query: None,
            active_genres: Vec::new(),
            sections: SectionClassifier::classify(movies),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        match self.mode {
            DisplayModeKind::Default => DisplayMode::Default,
            DisplayModeKind::Search => DisplayMode::Search {
                query: self.active_query.clone().unwrap_or_default(),
            },
            DisplayModeKind::GenreFilter => DisplayMode::GenreFilter {
                genres: self.active_genres.clone(),
            },
        }
    }

    pub fn kind(&self) -> DisplayModeKind {
        self.mode
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    pub fn active_genres(&self) -> &[Genre] {
        &self.active_genres
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Empty and absent queries both return to the full catalog.
    pub fn query_changed(&mut self, movies: &[Movie], query: Option<&str>) -> DisplayModeKind {
        match query.filter(|text| !text.is_empty()) {
            Some(text) => {
                self.active_query = Some(text.to_string());
                self.switch(DisplayModeKind::Search);
            }
            None => {
                self.active_query = None;
                self.switch(DisplayModeKind::Default);
            }
        }

        self.recompute(movies);
        self.mode
    }

    /// Returns false when the genre was already part of the filter.
    pub fn genre_selected(&mut self, movies: &[Movie], genre: Genre) -> bool {
        if self.active_genres.contains(&genre) {
            debug!(%genre, "genre already active, ignoring selection");
            return false;
        }

        self.active_genres.push(genre);
        self.switch(DisplayModeKind::GenreFilter);
        self.recompute(movies);
        true
    }

    /// Returns false when the genre was not part of the filter.
    pub fn genre_deselected(&mut self, movies: &[Movie], genre: Genre) -> bool {
        let Some(position) = self.active_genres.iter().position(|active| *active == genre) else {
            debug!(%genre, "genre not active, ignoring deselection");
            return false;
        };

        self.active_genres.remove(position);
        if self.active_genres.is_empty() {
            self.switch(DisplayModeKind::Default);
        } else {
            self.switch(DisplayModeKind::GenreFilter);
        }
        self.recompute(movies);
        true
    }

    /// Stores the rating and refreshes the current mode so the movie moves to
    /// `AlreadyRated` straight away. Unknown ids are ignored.
    pub fn movie_rated(&mut self, movies: &mut [Movie], id: MovieId, rating: f64) -> bool {
        let Some(movie) = movies.get_mut(id.0) else {
            debug!(movie = id.0, "rating for unknown movie ignored");
            return false;
        };

        movie.rate(rating);
        self.recompute(movies);
        true
    }

    pub fn recompute(&mut self, movies: &[Movie]) {
        self.sections = match self.mode {
            DisplayModeKind::Default => SectionClassifier::classify(movies),
            DisplayModeKind::Search => match self.active_query.as_deref() {
                Some(query) => QueryEngine::search(movies, query),
                None => SectionClassifier::classify(movies),
            },
            DisplayModeKind::GenreFilter => {
                QueryEngine::filter_by_genres(movies, &self.active_genres)
            }
        };
    }

    fn switch(&mut self, next: DisplayModeKind) {
        if self.mode != next {
            debug!(from = ?self.mode, to = ?next, "display mode changed");
            self.mode = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::domain::{sample_details, Jitter, Section};

    fn catalog() -> Vec<Movie> {
        let mut drama = sample_details("Slow River");
        drama.genres = vec![Genre::Drama];
        drama.year = 2001;
        let mut war = sample_details("Iron Coast");
        war.genres = vec![Genre::War, Genre::History];
        war.year = 1999;
        let mut comedy = sample_details("Loud Neighbors");
        comedy.genres = vec![Genre::Comedy];
        comedy.year = 2019;

        vec![
            Movie::new(drama, "drama", Jitter::Down),
            Movie::new(war, "war", Jitter::Flat),
            Movie::new(comedy, "comedy", Jitter::Up),
        ]
    }

    #[test]
    fn starts_in_default_mode_with_full_catalog() {
        let movies = catalog();
        let controller = DisplayModeController::new(&movies);
        assert_eq!(controller.mode(), DisplayMode::Default);
        assert_eq!(controller.sections().len(), 3);
    }

    #[test]
    fn query_switches_between_search_and_default() {
        let movies = catalog();
        let mut controller = DisplayModeController::new(&movies);

        assert_eq!(
            controller.query_changed(&movies, Some("River")),
            DisplayModeKind::Search
        );
        assert_eq!(controller.sections().ids().collect::<Vec<_>>(), vec![MovieId(0)]);
        assert_eq!(
            controller.mode(),
            DisplayMode::Search {
                query: "River".to_string()
            }
        );

        assert_eq!(
            controller.query_changed(&movies, Some("")),
            DisplayModeKind::Default
        );
        assert_eq!(controller.sections().len(), 3);

        controller.query_changed(&movies, Some("2019"));
        assert_eq!(controller.query_changed(&movies, None), DisplayModeKind::Default);
        assert!(controller.active_query().is_none());
    }

    #[test]
    fn genre_selection_filters_and_last_deselect_restores_default() {
        let movies = catalog();
        let mut controller = DisplayModeController::new(&movies);

        assert!(controller.genre_selected(&movies, Genre::History));
        assert_eq!(controller.kind(), DisplayModeKind::GenreFilter);
        assert_eq!(controller.sections().ids().collect::<Vec<_>>(), vec![MovieId(1)]);

        assert!(controller.genre_selected(&movies, Genre::Comedy));
        assert_eq!(controller.sections().len(), 2);

        assert!(controller.genre_deselected(&movies, Genre::History));
        assert_eq!(controller.kind(), DisplayModeKind::GenreFilter);
        assert_eq!(controller.sections().ids().collect::<Vec<_>>(), vec![MovieId(2)]);

        assert!(controller.genre_deselected(&movies, Genre::Comedy));
        assert_eq!(controller.kind(), DisplayModeKind::Default);
        assert_eq!(controller.sections().len(), 3);
    }

    #[test]
    fn stray_genre_events_are_no_ops() {
        let movies = catalog();
        let mut controller = DisplayModeController::new(&movies);

        assert!(!controller.genre_deselected(&movies, Genre::Horror));
        assert_eq!(controller.kind(), DisplayModeKind::Default);

        assert!(controller.genre_selected(&movies, Genre::Drama));
        assert!(!controller.genre_selected(&movies, Genre::Drama));
        assert_eq!(controller.active_genres(), &[Genre::Drama]);
    }

    #[test]
    fn rating_keeps_mode_and_moves_movie() {
        let mut movies = catalog();
        let mut controller = DisplayModeController::new(&movies);
        controller.genre_selected(&movies, Genre::War);

        assert!(controller.movie_rated(&mut movies, MovieId(1), 4.5));
        assert_eq!(controller.kind(), DisplayModeKind::GenreFilter);
        assert_eq!(controller.sections().get(Section::AlreadyRated), &[MovieId(1)]);
        assert!(controller.sections().get(Section::TopPicks).is_empty());
        assert_eq!(movies[1].actual_rating(), Some(4.5));
    }

    #[test]
    fn rating_in_search_mode_keeps_the_query_applied() {
        let mut movies = catalog();
        let mut controller = DisplayModeController::new(&movies);
        controller.query_changed(&movies, Some("coast"));

        controller.movie_rated(&mut movies, MovieId(1), 3.0);
        assert_eq!(controller.sections().len(), 1);
        assert_eq!(
            controller.sections().section_of(MovieId(1)),
            Some(Section::AlreadyRated)
        );
    }

    #[test]
    fn rating_unknown_movie_is_ignored() {
        let mut movies = catalog();
        let mut controller = DisplayModeController::new(&movies);
        assert!(!controller.movie_rated(&mut movies, MovieId(42), 3.0));
    }
}
