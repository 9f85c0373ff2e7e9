use super::normalizer::genre_for;
use super::CatalogError;
use crate::discovery::{AdmissionRating, Genre, MovieDetails};
use crate::discovery::domain::MAX_RATING;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct MovieRecord {
    pub(crate) details: MovieDetails,
    pub(crate) image_name: String,
    pub(crate) dropped_genres: Vec<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<MovieRecord>, CatalogError> {
    let dataset: Dataset = serde_json::from_reader(reader)?;

    dataset
        .movies
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index))
        .collect()
}

#[derive(Debug, Deserialize)]
struct Dataset {
    movies: Vec<MovieRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRow {
    title: String,
    year: u16,
    length: u16,
    languages: Vec<String>,
    cast: Vec<String>,
    director: String,
    genres: Vec<String>,
    rating: f64,
    description: String,
    admission_rating: AdmissionRating,
    image_name: String,
}

impl MovieRow {
    fn into_record(self, index: usize) -> Result<MovieRecord, CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                index,
                reason: "title is empty".to_string(),
            });
        }
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::InvalidRecord {
                index,
                reason: format!("rating {} is outside 0-{MAX_RATING}", self.rating),
            });
        }

        let mut genres: Vec<Genre> = Vec::with_capacity(self.genres.len());
        let mut dropped_genres = Vec::new();
        for raw in self.genres {
            match genre_for(&raw) {
                Some(genre) if !genres.contains(&genre) => genres.push(genre),
                Some(_) => {}
                None => dropped_genres.push(raw),
            }
        }

        Ok(MovieRecord {
            details: MovieDetails {
                title: self.title,
                year: self.year,
                length_minutes: self.length,
                languages: self.languages,
                cast: self.cast,
                director: self.director,
                genres,
                rating: self.rating,
                description: self.description,
                admission_rating: self.admission_rating,
            },
            image_name: self.image_name,
            dropped_genres,
        })
    }
}
