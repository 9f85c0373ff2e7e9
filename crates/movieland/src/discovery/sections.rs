use super::domain::{Movie, MovieId, Section};
use rand::seq::SliceRandom;
use rand::Rng;

/// Movies grouped by section, each bucket in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    buckets: [Vec<MovieId>; 4],
}

impl SectionMap {
    pub fn get(&self, section: Section) -> &[MovieId] {
        &self.buckets[section.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Non-empty sections in display order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, &[MovieId])> + '_ {
        Section::ordered()
            .into_iter()
            .map(|section| (section, self.get(section)))
            .filter(|(_, ids)| !ids.is_empty())
    }

    pub fn section_of(&self, id: MovieId) -> Option<Section> {
        Section::ordered()
            .into_iter()
            .find(|section| self.get(*section).contains(&id))
    }

    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.buckets.iter().flatten().copied()
    }

    /// Order in which a section should be rendered right now.
    ///
    /// `TopPicks` is reshuffled on every call and the shuffle is never stored
    /// back into the map.
    pub fn display_order<R: Rng + ?Sized>(&self, section: Section, rng: &mut R) -> Vec<MovieId> {
        let mut ids = self.get(section).to_vec();
        if section == Section::TopPicks {
            ids.shuffle(rng);
        }
        ids
    }

    fn push(&mut self, section: Section, id: MovieId) {
        self.buckets[section.index()].push(id);
    }
}

pub struct SectionClassifier;

impl SectionClassifier {
    pub fn classify(movies: &[Movie]) -> SectionMap {
        Self::classify_ids(movies, (0..movies.len()).map(MovieId))
    }

    /// Groups the given catalog entries; ids outside the catalog are skipped.
    pub fn classify_ids<I>(movies: &[Movie], ids: I) -> SectionMap
    where
        I: IntoIterator<Item = MovieId>,
    {
        let mut map = SectionMap::default();
        for id in ids {
            if let Some(movie) = movies.get(id.0) {
                map.push(movie.section(), id);
            }
        }
        map
    }
}
