//! # Landing Page
//!
//! `GET /` renders the catalog's landing markdown and game list. Catalog
//! failures degrade the page instead of failing the request: the error is
//! logged and a fallback paragraph or an empty list is shown.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use s42_catalog::{CachedCatalog, GameEntry};
use s42_core::GameId;

use crate::state::AppState;
use crate::views::{self, GameCard, PlayLink, LANDING_FALLBACK};

/// Build the landing page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// GET /: Landing page.
async fn home(State(state): State<AppState>) -> Html<String> {
    let Some(catalog) = &state.catalog else {
        return Html(views::home_page(LANDING_FALLBACK, &[]));
    };

    let (landing, games) = tokio::join!(catalog.landing_html(), catalog.games());

    let landing = landing.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "landing page content unavailable");
        LANDING_FALLBACK.to_string()
    });
    let games = games.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "game list unavailable");
        Vec::new()
    });

    let mut cards = Vec::with_capacity(games.len());
    for entry in games {
        cards.push(game_card(&state, catalog, entry).await);
    }

    Html(views::home_page(&landing, &cards))
}

async fn game_card(state: &AppState, catalog: &CachedCatalog, entry: GameEntry) -> GameCard {
    let play = match GameId::new(entry.file_folder.as_str()) {
        Ok(game) => {
            let builds = state.builds.list_builds(&game).await.len();
            (builds > 0).then_some(PlayLink { game, builds })
        }
        Err(_) => None,
    };
    GameCard {
        image_url: entry.image_url(catalog.client().base_url()),
        title: entry.name,
        description: entry.description,
        play,
    }
}
