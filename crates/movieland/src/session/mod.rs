//! The single owner of a user's browsing state.
//!
//! The render layer feeds [`SessionEvent`]s into [`Session::handle`], carries
//! out the returned [`SessionEffect`]s and redraws from [`Session::view`]
//! whenever the outcome reports a change.

mod event;
mod profile;
mod view;

pub use event::{SessionEffect, SessionEvent, SessionOutcome, TicketOffer};
pub use profile::{RecommenderSystem, UserProfile};
pub use view::{
    BannerView, DetailView, FilterPanelView, MovieCard, QuickDetailsView, SectionRow,
    SessionView, Theatre, UserPanelView, NEARBY_THEATRES,
};

use crate::catalog::{CatalogError, MovieCatalog};
use crate::config::{AppConfig, SessionConfig};
use crate::discovery::domain::MAX_RATING;
use crate::discovery::{
    DisplayModeController, FilterPanelExtent, Genre, GenreCatalog, GenreToggle, MovieId,
};
use crate::onboarding::{
    LocationEffect, LocationMachine, LocationStep, LocationTrigger, OnboardingEffect,
    OnboardingMachine, OnboardingStage, OnboardingTrigger, RATE_FIVE_TARGET,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info, warn};
use view::LOCATION_DISABLED_MESSAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuickDetails {
    movie: MovieId,
    dismiss_at: Option<Instant>,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    catalog: MovieCatalog,
    display: DisplayModeController,
    genres: GenreCatalog,
    onboarding: OnboardingMachine,
    location: LocationMachine,
    profile: UserProfile,
    filter_panel: FilterPanelExtent,
    quick_details: Option<QuickDetails>,
    detail: Option<MovieId>,
    location_granted: bool,
    rng: StdRng,
}

impl Session {
    pub fn new(catalog: MovieCatalog, config: SessionConfig, rng: StdRng) -> Self {
        let display = DisplayModeController::new(catalog.movies());

        Self {
            config,
            catalog,
            display,
            genres: GenreCatalog::new(),
            onboarding: OnboardingMachine::new(),
            location: LocationMachine::new(),
            profile: UserProfile::default(),
            filter_panel: FilterPanelExtent::default(),
            quick_details: None,
            detail: None,
            location_granted: false,
            rng,
        }
    }

    /// Loads the configured catalog, seeding the random source when a seed
    /// is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let mut rng = match config.catalog.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let catalog = match &config.catalog.path {
            Some(path) => MovieCatalog::from_path(path, &mut rng)?,
            None => MovieCatalog::bundled(&mut rng)?,
        };

        Ok(Self::new(catalog, config.session.clone(), rng))
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    pub fn display(&self) -> &DisplayModeController {
        &self.display
    }

    pub fn genres(&self) -> &GenreCatalog {
        &self.genres
    }

    pub fn onboarding(&self) -> &OnboardingMachine {
        &self.onboarding
    }

    pub fn location(&self) -> &LocationMachine {
        &self.location
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn filter_panel(&self) -> FilterPanelExtent {
        self.filter_panel
    }

    pub fn location_granted(&self) -> bool {
        self.location_granted
    }

    pub fn open_detail(&self) -> Option<MovieId> {
        self.detail
    }

    pub fn quick_details_movie(&self) -> Option<MovieId> {
        self.quick_details.map(|popup| popup.movie)
    }

    pub fn quick_details_deadline(&self) -> Option<Instant> {
        self.quick_details.and_then(|popup| popup.dismiss_at)
    }

    pub fn handle(&mut self, event: SessionEvent) -> SessionOutcome {
        self.handle_at(event, Instant::now())
    }

    /// Handles `event` as if it happened at `now`. Deadlines that have
    /// already passed fire before the event itself is applied.
    pub fn handle_at(&mut self, event: SessionEvent, now: Instant) -> SessionOutcome {
        let mut outcome = self.fire_deadlines(now);

        let handled = match event {
            SessionEvent::QueryChanged(query) => self.query_changed(query.as_deref()),
            SessionEvent::GenreToggled(genre) => self.genre_toggled(genre),
            SessionEvent::MovieRated { movie, rating } => self.movie_rated(movie, rating, now),
            SessionEvent::BannerTapped => self.advance_onboarding(OnboardingTrigger::BannerTapped),
            SessionEvent::ScrolledToBottom => {
                self.advance_onboarding(OnboardingTrigger::ScrolledToBottom)
            }
            SessionEvent::ListScrolled => self.list_scrolled(),
            SessionEvent::FilterPulled => self.filter_expanded_to(self.filter_panel.pulled()),
            SessionEvent::FilterExpandedTo(extent) => self.filter_expanded_to(extent),
            SessionEvent::SignUpCompleted { username } => self.sign_up_completed(&username),
            SessionEvent::RecommenderCycled => {
                self.recommender_selected(self.profile.recommender().next())
            }
            SessionEvent::RecommenderSelected(system) => self.recommender_selected(system),
            SessionEvent::QuickDetailsOpened(movie) => self.quick_details_opened(movie),
            SessionEvent::QuickDetailsDismissed => self.close_quick_details(),
            SessionEvent::DetailOpened(movie) => self.detail_opened(movie),
            SessionEvent::DetailPanelTapped { theatre } => {
                self.detail_panel_tapped(theatre.as_deref())
            }
            SessionEvent::DetailDismissed => self.detail_dismissed(),
            SessionEvent::LocationPermissionResult { granted } => {
                self.location_permission_resolved(granted)
            }
            SessionEvent::Tick => SessionOutcome::unchanged(),
        };

        outcome.merge(handled);
        outcome
    }

    /// Builds the main-screen view model. `TopPicks` is reshuffled on every
    /// call.
    pub fn view(&mut self) -> SessionView {
        let movies = self.catalog.movies();
        let sections = self.display.sections();

        let rows = sections
            .sections()
            .map(|(section, _)| SectionRow {
                section,
                label: section.label(),
                movies: sections
                    .display_order(section, &mut self.rng)
                    .into_iter()
                    .filter_map(|id| movies.get(id.0).map(|movie| MovieCard::new(id, movie)))
                    .collect(),
            })
            .collect();

        let rated = self.catalog.rated_count();

        SessionView {
            banner: self.banner(rated),
            mode: self.display.mode(),
            rows,
            filter_panel: FilterPanelView {
                extent: self.filter_panel,
                table_offset: self.filter_panel.table_offset(),
                query: self.display.active_query().map(str::to_string),
                selected: self.genres.selected().to_vec(),
                deselected: self.genres.deselected().to_vec(),
            },
            user: UserPanelView {
                greeting: self.profile.greeting(),
                rated_count: rated,
                shows_sign_up: self.profile.shows_sign_up(),
                recommender: self.profile.recommender(),
                summary: self.profile.summary(rated),
            },
            quick_details: self.quick_details.and_then(|popup| {
                self.catalog.get(popup.movie).map(|movie| {
                    QuickDetailsView::new(popup.movie, movie, popup.dismiss_at.is_some())
                })
            }),
        }
    }

    /// View model of the open detail screen, if any.
    pub fn detail_view(&self) -> Option<DetailView> {
        let id = self.detail?;
        let movie = self.catalog.get(id)?;

        let panel_message = match self.location.message(self.profile.name(), self.location_granted) {
            Some(message) => Some(message),
            None if !self.location_granted => Some(LOCATION_DISABLED_MESSAGE.to_string()),
            None => None,
        };
        let theatres = if self.location_granted {
            NEARBY_THEATRES.to_vec()
        } else {
            Vec::new()
        };

        Some(DetailView {
            movie: id,
            details: movie.details().clone(),
            genres: movie.details().genres.iter().map(|genre| genre.label()).collect(),
            actual_rating: movie.actual_rating(),
            predicted_rating: movie.predicted_rating(),
            panel_message,
            location_granted: self.location_granted,
            theatres,
        })
    }

    fn banner(&self, rated: usize) -> Option<BannerView> {
        let stage = self.onboarding.stage()?;
        let mut message = stage.message().to_string();
        if stage == OnboardingStage::RateFive {
            message.push_str(&format!("\n\nMovies rated: {rated}/{RATE_FIVE_TARGET}"));
        }

        Some(BannerView {
            stage,
            steps: self.onboarding.steps(),
            message,
        })
    }

    fn fire_deadlines(&mut self, now: Instant) -> SessionOutcome {
        match self.quick_details {
            Some(QuickDetails {
                dismiss_at: Some(deadline),
                movie,
            }) if deadline <= now => {
                debug!(movie = movie.0, "quick details auto-dismissed");
                self.close_quick_details()
            }
            _ => SessionOutcome::unchanged(),
        }
    }

    fn query_changed(&mut self, query: Option<&str>) -> SessionOutcome {
        self.display.query_changed(self.catalog.movies(), query);
        SessionOutcome::changed()
    }

    fn genre_toggled(&mut self, genre: Genre) -> SessionOutcome {
        let toggle = self.genres.toggle(genre);
        let applied = match toggle {
            GenreToggle::Selected => self.display.genre_selected(self.catalog.movies(), genre),
            GenreToggle::Deselected => self.display.genre_deselected(self.catalog.movies(), genre),
        };
        if !applied {
            warn!(%genre, ?toggle, "genre chips and active filter disagreed");
        }

        let mut outcome = SessionOutcome::changed();
        outcome.push(SessionEffect::GenreToggled { genre, toggle });
        outcome
    }

    fn movie_rated(&mut self, movie: MovieId, rating: f64, now: Instant) -> SessionOutcome {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            warn!(movie = movie.0, rating, "rating outside 0-5 ignored");
            return SessionOutcome::unchanged();
        }
        if !self
            .display
            .movie_rated(self.catalog.movies_mut(), movie, rating)
        {
            warn!(movie = movie.0, "rating for unknown movie ignored");
            return SessionOutcome::unchanged();
        }

        if let Some(popup) = self.quick_details.as_mut().filter(|popup| popup.movie == movie) {
            popup.dismiss_at = Some(now + self.config.quick_details_dismiss);
        }

        let total_rated = self.catalog.rated_count();
        debug!(movie = movie.0, rating, total_rated, "movie rated");

        let trigger = OnboardingTrigger::MovieRated { total_rated };
        let learning = self.onboarding.stage() == Some(OnboardingStage::LearnToRate);
        let mut outcome = SessionOutcome::changed();
        outcome.merge(self.advance_onboarding(trigger));
        // The rating that finishes learnToRate also counts toward rateFive.
        if learning {
            outcome.merge(self.advance_onboarding(trigger));
        }
        outcome
    }

    fn advance_onboarding(&mut self, trigger: OnboardingTrigger) -> SessionOutcome {
        let mut outcome = SessionOutcome::unchanged();
        let Some(progressed) = self.onboarding.apply(trigger) else {
            return outcome;
        };

        outcome.push(SessionEffect::OnboardingAdvanced {
            from: progressed.from,
            to: progressed.to,
        });
        for effect in progressed.effects {
            match effect {
                OnboardingEffect::Feedback => outcome.push(SessionEffect::Feedback),
                OnboardingEffect::RevealSignUp => {
                    self.profile.reveal_sign_up();
                    outcome.push(SessionEffect::SignUpRevealed);
                }
                OnboardingEffect::CollapseFilters => {
                    outcome.merge(self.move_filter_panel(FilterPanelExtent::Collapsed));
                }
            }
        }
        outcome
    }

    fn move_filter_panel(&mut self, extent: FilterPanelExtent) -> SessionOutcome {
        let mut outcome = SessionOutcome::unchanged();
        if self.filter_panel != extent {
            debug!(from = ?self.filter_panel, to = ?extent, "filter panel moved");
            self.filter_panel = extent;
            outcome.push(SessionEffect::FilterPanelMoved { extent });
        }
        outcome
    }

    fn filter_expanded_to(&mut self, extent: FilterPanelExtent) -> SessionOutcome {
        let mut outcome = self.move_filter_panel(extent);
        if extent.is_open() {
            outcome.merge(self.advance_onboarding(OnboardingTrigger::FilterPanelExpanded(extent)));
        }
        outcome
    }

    fn list_scrolled(&mut self) -> SessionOutcome {
        let mut outcome = self.move_filter_panel(FilterPanelExtent::Collapsed);
        outcome.merge(self.close_quick_details());
        outcome
    }

    fn sign_up_completed(&mut self, username: &str) -> SessionOutcome {
        let username = username.trim();
        if username.is_empty() {
            warn!("sign-up without a username ignored");
            return SessionOutcome::unchanged();
        }
        if !self.profile.shows_sign_up() {
            debug!("sign-up is not offered yet, ignoring");
            return SessionOutcome::unchanged();
        }

        self.profile.sign_up(username.to_string());
        info!(username, "user signed up");

        let mut outcome = SessionOutcome::changed();
        outcome.merge(self.advance_onboarding(OnboardingTrigger::SignUpCompleted));
        outcome
    }

    fn recommender_selected(&mut self, system: RecommenderSystem) -> SessionOutcome {
        if self.profile.set_recommender(system) {
            debug!(recommender = system.name(), "recommender changed");
            SessionOutcome::changed()
        } else {
            SessionOutcome::unchanged()
        }
    }

    fn quick_details_opened(&mut self, movie: MovieId) -> SessionOutcome {
        if self.quick_details.is_some() {
            debug!(movie = movie.0, "quick details already showing");
            return SessionOutcome::unchanged();
        }
        if self.catalog.get(movie).is_none() {
            warn!(movie = movie.0, "quick details for unknown movie ignored");
            return SessionOutcome::unchanged();
        }

        self.quick_details = Some(QuickDetails {
            movie,
            dismiss_at: None,
        });
        SessionOutcome::changed()
    }

    fn close_quick_details(&mut self) -> SessionOutcome {
        let mut outcome = SessionOutcome::unchanged();
        if self.quick_details.take().is_some() {
            outcome.push(SessionEffect::QuickDetailsClosed);
        }
        outcome
    }

    fn detail_opened(&mut self, movie: MovieId) -> SessionOutcome {
        // A tap while the popup is up only closes the popup.
        if self.quick_details.is_some() {
            return self.close_quick_details();
        }
        if self.catalog.get(movie).is_none() {
            warn!(movie = movie.0, "detail for unknown movie ignored");
            return SessionOutcome::unchanged();
        }

        self.detail = Some(movie);
        SessionOutcome::changed()
    }

    fn detail_panel_tapped(&mut self, theatre: Option<&str>) -> SessionOutcome {
        let Some(movie) = self.detail else {
            debug!("detail panel tapped with no detail open");
            return SessionOutcome::unchanged();
        };

        let step = self.location.apply(LocationTrigger::PanelTapped {
            location_granted: self.location_granted,
        });
        let mut outcome = self.location_outcome(&step);

        if step.effects.contains(&LocationEffect::PurchaseTicket) {
            if !self.location_granted {
                outcome.push(SessionEffect::OpenSystemSettings);
            } else if let Some(offer) = self.ticket_offer(movie, theatre) {
                info!(movie = %offer.movie, theatre = %offer.theatre, "ticket purchase requested");
                outcome.push(SessionEffect::TicketPurchaseRequested(offer));
            } else {
                debug!(?theatre, "panel tap without a listed theatre");
            }
        }
        outcome
    }

    fn ticket_offer(&self, movie: MovieId, theatre: Option<&str>) -> Option<TicketOffer> {
        let theatre = theatre?;
        let listed = NEARBY_THEATRES
            .iter()
            .find(|candidate| candidate.name.eq_ignore_ascii_case(theatre.trim()))?;
        let movie = self.catalog.get(movie)?;
        Some(TicketOffer::new(movie.title(), listed.name))
    }

    fn detail_dismissed(&mut self) -> SessionOutcome {
        if self.detail.take().is_none() {
            debug!("detail dismissed with no detail open");
            return SessionOutcome::unchanged();
        }

        let step = self.location.apply(LocationTrigger::DetailDismissed);
        let mut outcome = SessionOutcome::unchanged();
        outcome.push(SessionEffect::DetailClosed);
        outcome.merge(self.location_outcome(&step));
        outcome
    }

    fn location_permission_resolved(&mut self, granted: bool) -> SessionOutcome {
        let flipped = self.location_granted != granted;
        self.location_granted = granted;

        let step = self.location.apply(LocationTrigger::PermissionResolved { granted });
        let mut outcome = self.location_outcome(&step);
        outcome.changed |= flipped;
        outcome
    }

    /// Maps location machine output onto session effects. Ticket purchases
    /// need the open movie, so callers handle them.
    fn location_outcome(&self, step: &LocationStep) -> SessionOutcome {
        let mut outcome = SessionOutcome::unchanged();
        if step.advanced {
            outcome.push(SessionEffect::LocationOnboardingAdvanced {
                steps: self.location.steps(),
            });
        }
        for effect in &step.effects {
            match effect {
                LocationEffect::RequestPermission => {
                    outcome.push(SessionEffect::RequestLocationPermission)
                }
                LocationEffect::OpenSystemSettings => {
                    outcome.push(SessionEffect::OpenSystemSettings)
                }
                LocationEffect::PurchaseTicket => {}
            }
        }
        outcome
    }
}
