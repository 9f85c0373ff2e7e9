use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rating a movie can carry, canonical or predicted.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Genre {
    Action,
    Adventure,
    Horror,
    ScienceFiction,
    Comedy,
    Drama,
    Documentary,
    Tragedy,
    Independent,
    War,
    Western,
    Fantasy,
    Romance,
    Thriller,
    FilmNoir,
    Mystery,
    Crime,
    Musical,
    Animation,
    Children,
    Music,
    Family,
    History,
}

impl Genre {
    pub const ALL: [Self; 23] = [
        Self::Action,
        Self::Adventure,
        Self::Horror,
        Self::ScienceFiction,
        Self::Comedy,
        Self::Drama,
        Self::Documentary,
        Self::Tragedy,
        Self::Independent,
        Self::War,
        Self::Western,
        Self::Fantasy,
        Self::Romance,
        Self::Thriller,
        Self::FilmNoir,
        Self::Mystery,
        Self::Crime,
        Self::Musical,
        Self::Animation,
        Self::Children,
        Self::Music,
        Self::Family,
        Self::History,
    ];

    pub fn count() -> usize {
        Self::ALL.len()
    }

    /// Canonical name used for chip ordering and dataset matching.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Adventure => "adventure",
            Self::Horror => "horror",
            Self::ScienceFiction => "scienceFiction",
            Self::Comedy => "comedy",
            Self::Drama => "drama",
            Self::Documentary => "documentary",
            Self::Tragedy => "tragedy",
            Self::Independent => "independent",
            Self::War => "war",
            Self::Western => "western",
            Self::Fantasy => "fantasy",
            Self::Romance => "romance",
            Self::Thriller => "thriller",
            Self::FilmNoir => "filmNoir",
            Self::Mystery => "mystery",
            Self::Crime => "crime",
            Self::Musical => "musical",
            Self::Animation => "animation",
            Self::Children => "children",
            Self::Music => "music",
            Self::Family => "family",
            Self::History => "history",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Horror => "Horror",
            Self::ScienceFiction => "Science Fiction",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Documentary => "Documentary",
            Self::Tragedy => "Tragedy",
            Self::Independent => "Independent",
            Self::War => "War",
            Self::Western => "Western",
            Self::Fantasy => "Fantasy",
            Self::Romance => "Romance",
            Self::Thriller => "Thriller",
            Self::FilmNoir => "Film Noir",
            Self::Mystery => "Mystery",
            Self::Crime => "Crime",
            Self::Musical => "Musical",
            Self::Animation => "Animation",
            Self::Children => "Children",
            Self::Music => "Music",
            Self::Family => "Family",
            Self::History => "History",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row a movie is listed under on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Rate,
    TopPicks,
    Recent,
    AlreadyRated,
}

impl Section {
    pub const fn ordered() -> [Self; 4] {
        [Self::Rate, Self::TopPicks, Self::Recent, Self::AlreadyRated]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rate => "Rate",
            Self::TopPicks => "Top Picks",
            Self::Recent => "Recent",
            Self::AlreadyRated => "Already Rated",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Rate => 0,
            Self::TopPicks => 1,
            Self::Recent => 2,
            Self::AlreadyRated => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdmissionRating {
    #[serde(rename = "PG13")]
    Pg13,
    #[serde(rename = "R")]
    R,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "PG")]
    Pg,
}

impl AdmissionRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::G => "G",
            Self::Pg => "PG",
        }
    }
}

/// The single pseudo-random draw made when a movie enters the catalog.
///
/// It nudges the predicted rating by half a star and picks the starting
/// section, so both always agree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    Down,
    Flat,
    Up,
}

impl Jitter {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(-1i8..=1) {
            -1 => Self::Down,
            0 => Self::Flat,
            _ => Self::Up,
        }
    }

    pub const fn offset(self) -> f64 {
        match self {
            Self::Down => -0.5,
            Self::Flat => 0.0,
            Self::Up => 0.5,
        }
    }

    pub const fn initial_section(self) -> Section {
        match self {
            Self::Down => Section::Rate,
            Self::Flat => Section::TopPicks,
            Self::Up => Section::Recent,
        }
    }
}

/// Position of a movie inside the loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub usize);

/// Descriptive fields that identify a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub title: String,
    pub year: u16,
    pub length_minutes: u16,
    pub languages: Vec<String>,
    pub cast: Vec<String>,
    pub director: String,
    pub genres: Vec<Genre>,
    pub rating: f64,
    pub description: String,
    pub admission_rating: AdmissionRating,
}

#[derive(Debug, Clone)]
pub struct Movie {
    details: MovieDetails,
    image_name: String,
    predicted_rating: f64,
    actual_rating: Option<f64>,
    section: Section,
}

impl Movie {
    pub fn new(details: MovieDetails, image_name: impl Into<String>, jitter: Jitter) -> Self {
        let predicted_rating = (details.rating + jitter.offset()).clamp(0.0, MAX_RATING);

        Self {
            details,
            image_name: image_name.into(),
            predicted_rating,
            actual_rating: None,
            section: jitter.initial_section(),
        }
    }

    pub fn details(&self) -> &MovieDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn predicted_rating(&self) -> f64 {
        self.predicted_rating
    }

    pub fn actual_rating(&self) -> Option<f64> {
        self.actual_rating
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.details.genres.contains(&genre)
    }

    /// Records the user's rating. Once rated a movie stays in `AlreadyRated`.
    pub(crate) fn rate(&mut self, rating: f64) {
        self.actual_rating = Some(rating);
        self.section = Section::AlreadyRated;
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.details == other.details
    }
}

#[cfg(test)]
pub(crate) fn sample_details(title: &str) -> MovieDetails {
    MovieDetails {
        title: title.to_string(),
        year: 2019,
        length_minutes: 120,
        languages: vec!["English".to_string()],
        cast: vec!["Jane Doe".to_string()],
        director: "John Roe".to_string(),
        genres: vec![Genre::Drama],
        rating: 4.0,
        description: "A sample entry.".to_string(),
        admission_rating: AdmissionRating::Pg13,
    }
}
