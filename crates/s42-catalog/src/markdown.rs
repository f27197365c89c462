//! Markdown to HTML conversion for catalog content.
//!
//! Raw HTML blocks and inline tags in the source are emitted as escaped
//! text. Tables, strikethrough and footnotes are enabled.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render CommonMark to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
