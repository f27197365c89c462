//! # HTML Views
//!
//! Server-rendered pages. Every interpolated value goes through
//! [`escape_html`], and values placed in query strings additionally through
//! [`encode_component`]. The landing page's catalog content is the only
//! pre-rendered HTML accepted, and the markdown renderer escapes raw HTML.

use std::fmt::Write;

use s42_core::GameId;

/// One game tile on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCard {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Set when the game has a valid storage id and at least one build.
    pub play: Option<PlayLink>,
}

/// Link target of a playable game tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayLink {
    pub game: GameId,
    pub builds: usize,
}

/// Paragraph shown when the catalog content could not be loaded.
pub const LANDING_FALLBACK: &str =
    "<p>Studio42 builds and experiments. Content is temporarily unavailable.</p>";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a query-string value.
pub fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

fn play_href(game: &GameId, build: Option<&str>) -> String {
    let mut href = format!("/play?id={}", encode_component(game.as_str()));
    if let Some(build) = build {
        let _ = write!(href, "&build={}", encode_component(build));
    }
    href
}

/// Landing page: rendered catalog markdown followed by the game list.
pub fn home_page(landing_html: &str, games: &[GameCard]) -> String {
    let mut body = String::from("<main>\n");
    body.push_str(landing_html);
    body.push_str("\n<section class=\"games\">\n");
    for card in games {
        body.push_str("<article class=\"game\">\n");
        if let Some(src) = &card.image_url {
            let _ = writeln!(
                body,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(src),
                escape_html(&card.title)
            );
        }
        let _ = writeln!(body, "<h2>{}</h2>", escape_html(&card.title));
        let _ = writeln!(body, "<p>{}</p>", escape_html(&card.description));
        if let Some(play) = &card.play {
            let _ = writeln!(
                body,
                "<a href=\"{}\">Play</a> <span class=\"builds\">{} build{}</span>",
                escape_html(&play_href(&play.game, None)),
                play.builds,
                if play.builds == 1 { "" } else { "s" }
            );
        }
        body.push_str("</article>\n");
    }
    body.push_str("</section>\n</main>");
    layout("Studio42", &body)
}

/// Upload form posting a multipart `game` field to `/uploadFile`.
pub fn upload_page(game: &GameId, auth: &str) -> String {
    let action = format!(
        "/uploadFile?id={}&auth={}",
        encode_component(game.as_str()),
        encode_component(auth)
    );
    let body = format!(
        "<main>\n<h1>Upload a build of {game}</h1>\n\
         <form enctype=\"multipart/form-data\" action=\"{action}\" method=\"post\">\n\
         <input type=\"file\" name=\"game\" accept=\".zip\">\n\
         <input type=\"submit\" value=\"Upload\">\n</form>\n</main>",
        game = escape_html(game.as_str()),
        action = escape_html(&action),
    );
    layout(&format!("Upload {game}"), &body)
}

/// Play page: the selected build in an iframe plus links to every build.
pub fn play_page(game: &GameId, builds: &[String], selected: &str) -> String {
    let mut body = format!("<main>\n<h1>{}</h1>\n<nav class=\"builds\">\n<ul>\n", escape_html(game.as_str()));
    for build in builds {
        let class = if build == selected { " class=\"selected\"" } else { "" };
        let _ = writeln!(
            body,
            "<li{class}><a href=\"{}\">Build {}</a></li>",
            escape_html(&play_href(game, Some(build))),
            escape_html(build)
        );
    }
    let _ = write!(
        body,
        "</ul>\n</nav>\n<iframe src=\"/games/{}/{}/index.html\" title=\"{} build {}\" \
         width=\"960\" height=\"600\" allowfullscreen></iframe>\n</main>",
        encode_component(game.as_str()),
        encode_component(selected),
        escape_html(game.as_str()),
        escape_html(selected)
    );
    layout(&format!("{game} build {selected}"), &body)
}

/// Empty state for a game that has no published builds.
pub fn no_builds_page(game: &GameId) -> String {
    let body = format!(
        "<main>\n<h1>{}</h1>\n<p>No builds available yet.</p>\n<p><a href=\"/\">Back</a></p>\n</main>",
        escape_html(game.as_str())
    );
    layout(&format!("{game}: no builds"), &body)
}
