use super::domain::Genre;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenreFilterChip {
    pub genre: Genre,
    pub selected: bool,
}

impl GenreFilterChip {
    pub const fn new(genre: Genre) -> Self {
        Self {
            genre,
            selected: false,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.genre.name()
    }
}

/// Direction a chip moved when toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreToggle {
    Selected,
    Deselected,
}

/// The two chip rows of the filter panel.
///
/// Unselected chips are kept alphabetical by name; selected chips keep the
/// order they were picked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCatalog {
    deselected: Vec<GenreFilterChip>,
    selected: Vec<GenreFilterChip>,
}

impl Default for GenreCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreCatalog {
    pub fn new() -> Self {
        let mut deselected: Vec<GenreFilterChip> =
            Genre::ALL.into_iter().map(GenreFilterChip::new).collect();
        sort_alphabetically(&mut deselected);

        Self {
            deselected,
            selected: Vec::new(),
        }
    }

    pub fn deselected(&self) -> &[GenreFilterChip] {
        &self.deselected
    }

    pub fn selected(&self) -> &[GenreFilterChip] {
        &self.selected
    }

    pub fn selected_genres(&self) -> Vec<Genre> {
        self.selected.iter().map(|chip| chip.genre).collect()
    }

    pub fn is_selected(&self, genre: Genre) -> bool {
        self.selected.iter().any(|chip| chip.genre == genre)
    }

    pub fn toggle(&mut self, genre: Genre) -> GenreToggle {
        if self.deselect(genre) {
            GenreToggle::Deselected
        } else {
            self.select(genre);
            GenreToggle::Selected
        }
    }

    /// Moves a chip to the selected row. Returns false if it already was there.
    pub fn select(&mut self, genre: Genre) -> bool {
        let Some(position) = self.deselected.iter().position(|chip| chip.genre == genre) else {
            return false;
        };
        let mut chip = self.deselected.remove(position);
        chip.selected = true;
        self.selected.push(chip);
        true
    }

    /// Moves a chip back to the alphabetical row. Returns false if it was not selected.
    pub fn deselect(&mut self, genre: Genre) -> bool {
        let Some(position) = self.selected.iter().position(|chip| chip.genre == genre) else {
            return false;
        };
        let mut chip = self.selected.remove(position);
        chip.selected = false;
        self.deselected.push(chip);
        sort_alphabetically(&mut self.deselected);
        true
    }
}

fn sort_alphabetically(chips: &mut [GenreFilterChip]) {
    chips.sort_by(|a, b| a.name().cmp(b.name()));
}
