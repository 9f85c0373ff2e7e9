mod display;
pub mod domain;
mod genres;
mod panel;
mod query;
mod sections;

pub use display::{DisplayMode, DisplayModeController, DisplayModeKind};
pub use domain::{AdmissionRating, Genre, Jitter, Movie, MovieDetails, MovieId, Section};
pub use genres::{GenreCatalog, GenreFilterChip, GenreToggle};
pub use panel::{FilterPanelExtent, COMPACT_PANEL_HEIGHT, FULL_PANEL_HEIGHT, TABLE_TOP_OFFSET};
pub use query::{MatchField, QueryEngine};
pub use sections::{SectionClassifier, SectionMap};
