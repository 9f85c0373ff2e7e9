use super::domain::{Genre, Movie, MovieId};
use super::sections::{SectionClassifier, SectionMap};

/// Field a search query matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    TitleWord,
    DirectorWord,
    Year,
    CastMember,
    Language,
}

pub struct QueryEngine;

impl QueryEngine {
    /// Search results partitioned into sections.
    pub fn search(movies: &[Movie], query: &str) -> SectionMap {
        SectionClassifier::classify_ids(movies, Self::matching(movies, query))
    }

    /// Catalog entries matching `query`, each listed once in catalog order.
    pub fn matching(movies: &[Movie], query: &str) -> Vec<MovieId> {
        let query = query.to_lowercase();
        movies
            .iter()
            .enumerate()
            .filter(|(_, movie)| Self::match_field(movie, &query).is_some())
            .map(|(index, _)| MovieId(index))
            .collect()
    }

    /// First field a lowercased query matches on, checked title first.
    pub fn match_field(movie: &Movie, query: &str) -> Option<MatchField> {
        let details = movie.details();

        if details
            .title
            .split(' ')
            .any(|word| word.to_lowercase() == query)
        {
            return Some(MatchField::TitleWord);
        }
        if details
            .director
            .split(' ')
            .any(|word| word.to_lowercase() == query)
        {
            return Some(MatchField::DirectorWord);
        }
        if details.year.to_string() == query {
            return Some(MatchField::Year);
        }
        if details
            .cast
            .iter()
            .any(|member| member.to_lowercase() == query)
        {
            return Some(MatchField::CastMember);
        }
        if details
            .languages
            .iter()
            .any(|language| language.to_lowercase() == query)
        {
            return Some(MatchField::Language);
        }

        None
    }

    /// Movies sharing at least one genre with `genres`. No genres, no movies.
    pub fn filter_by_genres(movies: &[Movie], genres: &[Genre]) -> SectionMap {
        let ids = movies
            .iter()
            .enumerate()
            .filter(|(_, movie)| genres.iter().any(|genre| movie.has_genre(*genre)))
            .map(|(index, _)| MovieId(index));
        SectionClassifier::classify_ids(movies, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::domain::{sample_details, Jitter, MovieDetails};

    fn movie(configure: impl FnOnce(&mut MovieDetails)) -> Movie {
        let mut details = sample_details("Placeholder");
        configure(&mut details);
        Movie::new(details, "poster", Jitter::Flat)
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(|d| {
                d.title = "The Dark Harbor".to_string();
                d.year = 2019;
                d.director = "Ana Lopez".to_string();
                d.cast = vec!["Sam Vale".to_string(), "Ivy North".to_string()];
                d.languages = vec!["English".to_string(), "Spanish".to_string()];
                d.genres = vec![Genre::Thriller, Genre::Crime];
            }),
            movie(|d| {
                d.title = "Harbor Lights".to_string();
                d.year = 2004;
                d.director = "Kenji Mori".to_string();
                d.cast = vec!["Ivy North".to_string()];
                d.languages = vec!["Japanese".to_string()];
                d.genres = vec![Genre::Romance];
            }),
            movie(|d| {
                d.title = "2019".to_string();
                d.year = 2012;
                d.director = "Lars Berg".to_string();
                d.cast = vec!["Tom Ash".to_string()];
                d.languages = vec!["Swedish".to_string()];
                d.genres = vec![Genre::ScienceFiction];
            }),
            movie(|d| {
                d.title = "Quiet Fields".to_string();
                d.year = 2019;
                d.director = "Ruth Lopez".to_string();
                d.cast = vec!["Sam Vale".to_string()];
                d.languages = vec!["English".to_string()];
                d.genres = vec![Genre::Drama, Genre::History];
            }),
        ]
    }

    #[test]
    fn title_words_match_case_insensitively() {
        let movies = catalog();
        assert_eq!(
            QueryEngine::matching(&movies, "HARBOR"),
            vec![MovieId(0), MovieId(1)]
        );
        assert!(QueryEngine::matching(&movies, "harb").is_empty());
    }

    #[test]
    fn director_surname_matches_whole_word() {
        let movies = catalog();
        assert_eq!(
            QueryEngine::matching(&movies, "lopez"),
            vec![MovieId(0), MovieId(3)]
        );
    }

    #[test]
    fn year_search_unions_literal_title_matches() {
        let movies = catalog();
        let found = QueryEngine::matching(&movies, "2019");
        assert_eq!(found, vec![MovieId(0), MovieId(2), MovieId(3)]);
        assert_eq!(
            QueryEngine::match_field(&movies[2], "2019"),
            Some(MatchField::TitleWord)
        );
        assert_eq!(
            QueryEngine::match_field(&movies[3], "2019"),
            Some(MatchField::Year)
        );
    }

    #[test]
    fn cast_requires_full_name() {
        let movies = catalog();
        assert_eq!(
            QueryEngine::matching(&movies, "ivy north"),
            vec![MovieId(0), MovieId(1)]
        );
        assert!(QueryEngine::matching(&movies, "ivy").is_empty());
    }

    #[test]
    fn language_matches() {
        let movies = catalog();
        assert_eq!(QueryEngine::matching(&movies, "english"), vec![MovieId(0), MovieId(3)]);
        assert_eq!(QueryEngine::matching(&movies, "Japanese"), vec![MovieId(1)]);
    }

    #[test]
    fn movies_matching_several_fields_are_listed_once() {
        let mut movies = catalog();
        movies.push(movie(|d| {
            d.title = "Sam Vale".to_string();
            d.director = "Sam Vale".to_string();
            d.cast = vec!["Sam Vale".to_string()];
        }));
        let found = QueryEngine::search(&movies, "sam vale");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn empty_genre_filter_yields_nothing() {
        let movies = catalog();
        assert!(QueryEngine::filter_by_genres(&movies, &[]).is_empty());
    }

    #[test]
    fn genre_filter_keeps_intersecting_movies() {
        let movies = catalog();
        let requested = [Genre::Crime, Genre::History];
        let map = QueryEngine::filter_by_genres(&movies, &requested);
        let ids: Vec<MovieId> = map.ids().collect();
        assert_eq!(ids.len(), 2);
        for id in ids {
            assert!(requested.iter().any(|genre| movies[id.0].has_genre(*genre)));
        }
    }
}
