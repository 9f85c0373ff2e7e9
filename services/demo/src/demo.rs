use movieland::discovery::{DisplayMode, Genre, MovieId, Section};
use movieland::error::AppError;
use movieland::onboarding::{OnboardingStage, OnboardingState};
use movieland::session::{
    Session, SessionEffect, SessionEvent, SessionOutcome, SessionView, NEARBY_THEATRES,
};
use tracing::info;

const DEMO_USERNAME: &str = "movie-buff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Output {
    json: bool,
}

impl Output {
    pub(crate) fn new(json: bool) -> Self {
        Self { json }
    }

    fn step(&self, label: &str, outcome: &SessionOutcome) {
        if self.json {
            return;
        }
        let effects: Vec<String> = outcome.effects.iter().map(describe_effect).collect();
        if effects.is_empty() {
            println!("- {label}");
        } else {
            println!("- {label} -> {}", effects.join(", "));
        }
    }

    fn apply(&self, session: &mut Session, label: &str, event: SessionEvent) {
        let outcome = session.handle(event);
        self.step(label, &outcome);
    }

    fn finish(&self, session: &mut Session) -> Result<(), AppError> {
        let view = session.view();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            render_view(&view);
        }
        Ok(())
    }
}

pub(crate) fn run_walkthrough(session: &mut Session, output: Output) -> Result<(), AppError> {
    if !output.json {
        println!("MovieLand walkthrough ({} movies)", session.catalog().len());
    }

    output.apply(session, "tap banner", SessionEvent::BannerTapped);
    output.apply(session, "tap banner", SessionEvent::BannerTapped);

    let unrated: Vec<MovieId> = (0..session.catalog().len())
        .map(MovieId)
        .filter(|id| {
            session
                .catalog()
                .get(*id)
                .is_some_and(|movie| movie.actual_rating().is_none())
        })
        .take(5)
        .collect();
    for (position, id) in unrated.into_iter().enumerate() {
        let title = session
            .catalog()
            .get(id)
            .map(|movie| movie.title().to_string())
            .unwrap_or_default();
        let rating = 3.0 + (position % 3) as f64;
        session.handle(SessionEvent::QuickDetailsOpened(id));
        output.apply(
            session,
            &format!("rate {title} {rating:.1}"),
            SessionEvent::MovieRated { movie: id, rating },
        );
        output.apply(session, "dismiss quick details", SessionEvent::QuickDetailsDismissed);
    }

    output.apply(session, "scroll to bottom", SessionEvent::ScrolledToBottom);
    output.apply(session, "pull filter panel", SessionEvent::FilterPulled);
    output.apply(session, "pull filter panel again", SessionEvent::FilterPulled);
    output.apply(session, "tap banner", SessionEvent::BannerTapped);
    output.apply(
        session,
        &format!("sign up as {DEMO_USERNAME}"),
        SessionEvent::SignUpCompleted {
            username: DEMO_USERNAME.to_string(),
        },
    );
    output.apply(session, "tap banner", SessionEvent::BannerTapped);
    output.apply(session, "switch recommender", SessionEvent::RecommenderCycled);

    let featured = MovieId(0);
    output.apply(session, "open detail", SessionEvent::DetailOpened(featured));
    output.apply(session, "swipe detail away", SessionEvent::DetailDismissed);
    output.apply(session, "open detail", SessionEvent::DetailOpened(featured));
    output.apply(
        session,
        "tap detail panel",
        SessionEvent::DetailPanelTapped { theatre: None },
    );
    output.apply(
        session,
        "tap detail panel",
        SessionEvent::DetailPanelTapped { theatre: None },
    );
    output.apply(
        session,
        "grant location",
        SessionEvent::LocationPermissionResult { granted: true },
    );
    output.apply(
        session,
        "tap detail panel",
        SessionEvent::DetailPanelTapped { theatre: None },
    );
    output.apply(
        session,
        "pick a theatre",
        SessionEvent::DetailPanelTapped {
            theatre: Some(NEARBY_THEATRES[0].name.to_string()),
        },
    );
    output.apply(session, "close detail", SessionEvent::DetailDismissed);

    info!(
        onboarding_steps = session.onboarding().steps(),
        location_steps = session.location().steps(),
        rated = session.catalog().rated_count(),
        "walkthrough finished"
    );
    output.finish(session)
}

pub(crate) fn run_search(
    session: &mut Session,
    query: &str,
    output: Output,
) -> Result<(), AppError> {
    let outcome = session.handle(SessionEvent::QueryChanged(Some(query.to_string())));
    output.step(&format!("search '{query}'"), &outcome);
    output.finish(session)
}

pub(crate) fn run_genres(
    session: &mut Session,
    genres: &[Genre],
    output: Output,
) -> Result<(), AppError> {
    for genre in genres {
        if session.genres().is_selected(*genre) {
            continue;
        }
        let outcome = session.handle(SessionEvent::GenreToggled(*genre));
        output.step(&format!("select {}", genre.label()), &outcome);
    }
    output.finish(session)
}

fn describe_effect(effect: &SessionEffect) -> String {
    match effect {
        SessionEffect::OnboardingAdvanced { from, to } => match to {
            OnboardingState::Active(stage) => format!("onboarding {from:?} => {stage:?}"),
            OnboardingState::Complete => format!("onboarding {from:?} => complete"),
        },
        SessionEffect::Feedback => "feedback".to_string(),
        SessionEffect::SignUpRevealed => "sign-up shown".to_string(),
        SessionEffect::FilterPanelMoved { extent } => format!("filter panel {extent:?}"),
        SessionEffect::GenreToggled { genre, toggle } => format!("{} {toggle:?}", genre.label()),
        SessionEffect::LocationOnboardingAdvanced { steps } => {
            format!("location onboarding step {steps}")
        }
        SessionEffect::RequestLocationPermission => "location permission requested".to_string(),
        SessionEffect::OpenSystemSettings => "open settings".to_string(),
        SessionEffect::TicketPurchaseRequested(offer) => offer.prompt.clone(),
        SessionEffect::QuickDetailsClosed => "quick details closed".to_string(),
        SessionEffect::DetailClosed => "detail closed".to_string(),
    }
}

fn render_view(view: &SessionView) {
    println!();
    if let Some(banner) = &view.banner {
        println!(
            "Onboarding {}/{}: {}",
            banner.steps + 1,
            OnboardingStage::count(),
            single_line(&banner.message)
        );
    }

    match &view.mode {
        DisplayMode::Default => println!("Showing the full catalog"),
        DisplayMode::Search { query } => println!("Search results for '{query}'"),
        DisplayMode::GenreFilter { genres } => {
            let labels: Vec<&str> = genres.iter().map(|genre| genre.label()).collect();
            println!("Filtered by {}", labels.join(", "));
        }
    }

    if view.rows.is_empty() {
        println!("  (no movies)");
    }
    for row in &view.rows {
        println!("{} ({})", row.label, row.movies.len());
        for card in &row.movies {
            let rating = match card.actual_rating {
                Some(actual) => format!("rated {actual:.1}"),
                None => format!("predicted {:.1}", card.predicted_rating),
            };
            let marker = if row.section == Section::TopPicks { "*" } else { "-" };
            println!("  {marker} {} ({}) {rating}", card.title, card.year);
        }
    }

    println!(
        "{} | {}",
        view.user.greeting.as_deref().unwrap_or("Not signed up"),
        single_line(&view.user.summary)
    );
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
