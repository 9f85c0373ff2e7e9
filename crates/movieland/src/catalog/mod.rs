mod normalizer;
mod parser;

pub use normalizer::genre_for;

use crate::discovery::{Jitter, Movie, MovieId};
use rand::Rng;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_DATASET: &str = include_str!("../../data/movies.json");

/// Loading failures. Any of these means the dataset is unusable.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read movie dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid movie dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("movie record {index} is malformed: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// Every movie known to the app, in dataset order.
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
}

impl MovieCatalog {
    /// The dataset compiled into the crate.
    pub fn bundled<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_DATASET.as_bytes(), rng)
    }

    pub fn from_path<P: AsRef<Path>, R: Rng + ?Sized>(
        path: P,
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file), rng)
    }

    /// Parses a dataset and draws each movie's jitter from `rng`, in order.
    pub fn from_reader<Rd: Read, R: Rng + ?Sized>(
        reader: Rd,
        rng: &mut R,
    ) -> Result<Self, CatalogError> {
        let records = parser::parse_records(reader)?;
        let mut dropped = 0usize;

        let movies: Vec<Movie> = records
            .into_iter()
            .map(|record| {
                if !record.dropped_genres.is_empty() {
                    debug!(
                        title = %record.details.title,
                        genres = ?record.dropped_genres,
                        "dropping unrecognised genres"
                    );
                    dropped += record.dropped_genres.len();
                }
                Movie::new(record.details, record.image_name, Jitter::draw(&mut *rng))
            })
            .collect();

        info!(
            movies = movies.len(),
            dropped_genres = dropped,
            "movie catalog loaded"
        );
        Ok(Self { movies })
    }

    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub(crate) fn movies_mut(&mut self) -> &mut [Movie] {
        &mut self.movies
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive title lookup, folding case the same way search does.
    pub fn find_by_title(&self, title: &str) -> Option<MovieId> {
        let wanted = title.to_lowercase();
        self.movies
            .iter()
            .position(|movie| movie.title().to_lowercase() == wanted)
            .map(MovieId)
    }

    pub fn rated_count(&self) -> usize {
        self.movies
            .iter()
            .filter(|movie| movie.actual_rating().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::domain::sample_details;
    use crate::discovery::{AdmissionRating, Genre, Jitter, Section};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn dataset(genres: &str, admission: &str, rating: &str) -> String {
        format!(
            r#"{{"movies": [{{
                "title": "Night Train",
                "year": 1987,
                "length": 104,
                "languages": ["English", "French"],
                "cast": ["Ada Brook"],
                "director": "Max Hale",
                "genres": {genres},
                "rating": {rating},
                "description": "A long ride.",
                "admissionRating": "{admission}",
                "imageName": "night-train"
            }}]}}"#
        )
    }

    #[test]
    fn parses_records_and_keeps_known_genres() {
        let json = dataset(
            r#"[" Thriller", "MYSTERY", "science fiction", "film-noir", "space opera", "thriller"]"#,
            "PG13",
            "4.2",
        );
        let catalog = MovieCatalog::from_reader(Cursor::new(json), &mut rng()).expect("loads");

        assert_eq!(catalog.len(), 1);
        let movie = catalog.get(MovieId(0)).expect("movie present");
        assert_eq!(movie.title(), "Night Train");
        assert_eq!(movie.details().length_minutes, 104);
        assert_eq!(movie.details().admission_rating, AdmissionRating::Pg13);
        assert_eq!(
            movie.details().genres,
            vec![
                Genre::Thriller,
                Genre::Mystery,
                Genre::ScienceFiction,
                Genre::FilmNoir
            ]
        );
        assert_eq!(movie.image_name(), "night-train");
        assert!(movie.actual_rating().is_none());
        assert_ne!(movie.section(), Section::AlreadyRated);
    }

    #[test]
    fn prediction_follows_the_drawn_section() {
        let json = dataset(r#"["drama"]"#, "R", "3.0");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let catalog = MovieCatalog::from_reader(Cursor::new(json.clone()), &mut rng)
                .expect("loads");
            let movie = &catalog.movies()[0];
            let expected = match movie.section() {
                Section::Rate => 2.5,
                Section::TopPicks => 3.0,
                Section::Recent => 3.5,
                Section::AlreadyRated => panic!("fresh movie cannot be rated"),
            };
            assert_eq!(movie.predicted_rating(), expected);
        }
    }

    #[test]
    fn missing_fields_are_fatal() {
        let json = r#"{"movies": [{"title": "Half a Record", "year": 2001}]}"#;
        let error = MovieCatalog::from_reader(Cursor::new(json), &mut rng())
            .expect_err("missing fields rejected");
        assert!(matches!(error, CatalogError::Json(_)), "got {error:?}");
    }

    #[test]
    fn unknown_admission_rating_is_fatal() {
        let json = dataset(r#"["drama"]"#, "NC17", "3.0");
        let error = MovieCatalog::from_reader(Cursor::new(json), &mut rng())
            .expect_err("unknown admission rating rejected");
        assert!(matches!(error, CatalogError::Json(_)), "got {error:?}");
    }

    #[test]
    fn out_of_range_rating_is_fatal() {
        let json = dataset(r#"["drama"]"#, "G", "7.5");
        let error = MovieCatalog::from_reader(Cursor::new(json), &mut rng())
            .expect_err("rating rejected");
        match error {
            CatalogError::InvalidRecord { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("7.5"));
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = MovieCatalog::from_path("./does-not-exist.json", &mut rng())
            .expect_err("expected io error");
        assert!(matches!(error, CatalogError::Io(_)), "got {error:?}");
    }

    #[test]
    fn bundled_dataset_loads() {
        let catalog = MovieCatalog::bundled(&mut rng()).expect("bundled dataset is valid");
        assert!(catalog.len() >= 12);
        assert_eq!(catalog.rated_count(), 0);
        assert!(catalog
            .movies()
            .iter()
            .all(|movie| !movie.details().genres.is_empty()));
    }

    #[test]
    fn lookups_by_title_ignore_case() {
        let catalog = MovieCatalog::bundled(&mut rng()).expect("bundled dataset is valid");
        let first = catalog.movies()[0].clone();
        assert_eq!(
            catalog.find_by_title(&first.title().to_uppercase()),
            Some(MovieId(0))
        );
        assert_eq!(catalog.find_by_title("No Such Movie"), None);
    }

    #[test]
    fn title_lookup_folds_non_ascii_case() {
        let catalog = MovieCatalog::from_movies(vec![
            Movie::new(sample_details("Heat"), "heat", Jitter::Flat),
            Movie::new(sample_details("Amélie"), "amelie", Jitter::Up),
        ]);
        assert_eq!(catalog.find_by_title("AMÉLIE"), Some(MovieId(1)));
        assert_eq!(catalog.find_by_title("amélie"), Some(MovieId(1)));
    }

    #[test]
    fn normalize_strips_case_padding_and_separators() {
        assert_eq!(
            normalizer::normalize_for_tests("\u{feff}  Science-Fiction "),
            "sciencefiction"
        );
        assert_eq!(normalizer::normalize_for_tests("Film_Noir"), "filmnoir");
    }
}
