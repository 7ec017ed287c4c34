use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use serde::Serialize;

use crate::episode::{Episode, EpisodeListing};
use crate::error::PageError;

const SITE_NAME: &str = "Podcastr";

/// Wires play buttons to the page's player.
///
/// The player object itself is provided by the configured player script;
/// this only forwards clicks to `player.play(episode)` and
/// `player.playList(list, index)`.
const PLAYER_BRIDGE: &str = r#"<script>
(function () {
  var data = JSON.parse(document.getElementById("podcastr-data").textContent);
  document.addEventListener("click", function (event) {
    var button = event.target.closest("[data-play]");
    if (!button || !window.player) return;
    if (button.dataset.play === "episode") {
      window.player.play(data);
    } else {
      window.player.playList(data, Number(button.dataset.index));
    }
  });
})();
</script>"#;

/// Page chrome shared by every generated page
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// URL of the script providing the `player` object, if any
    pub player_script: Option<String>,
}

impl Layout {
    fn wrap<T: Serialize + ?Sized>(&self, title: &str, data: &T, body: &str) -> Result<String, PageError> {
        let mut html = String::with_capacity(body.len() + 1024);

        html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(html, "<title>{}</title>", text(title));
        if let Some(src) = &self.player_script {
            let _ = writeln!(html, "<script src=\"{}\" defer></script>", attr(src));
        }
        html.push_str("</head>\n<body>\n<main>\n");
        html.push_str(body);
        html.push_str("</main>\n");
        let _ = writeln!(
            html,
            "<script id=\"podcastr-data\" type=\"application/json\">{}</script>",
            embed_json(data)?
        );
        html.push_str(PLAYER_BRIDGE);
        html.push_str("\n</body>\n</html>\n");

        Ok(html)
    }
}

/// Serialize data for a `<script>` element without letting it close the element
fn embed_json<T: Serialize + ?Sized>(data: &T) -> Result<String, PageError> {
    Ok(serde_json::to_string(data)?.replace('<', "\\u003c"))
}

fn thumbnail(episode: &Episode, width: u32, height: u32) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\" style=\"object-fit: cover\">",
        attr(&episode.thumbnail),
        attr(&episode.title),
        width,
        height
    )
}

fn play_list_button(index: usize, alt: &str) -> String {
    format!(
        "<button type=\"button\" data-play=\"list\" data-index=\"{}\"><img src=\"/play-green.svg\" alt=\"{}\"></button>",
        index,
        attr(alt)
    )
}

/// Render the home page: two highlighted episodes followed by a table of the rest
pub fn render_home(listing: &EpisodeListing, layout: &Layout) -> Result<String, PageError> {
    let mut body = String::new();

    body.push_str("<div class=\"homePage\">\n<section class=\"latestEpisodes\">\n");
    body.push_str("<h2>Últimos lançamentos</h2>\n<ul>\n");
    for (index, episode) in listing.latest.iter().enumerate() {
        let _ = write!(
            body,
            "<li>{}<div class=\"episodeDetails\"><a href=\"{}\">{}</a><p>{}</p><span>{}</span><span>{}</span></div>{}</li>\n",
            thumbnail(episode, 192, 192),
            attr(&episode.href()),
            text(&episode.title),
            text(&episode.members),
            text(&episode.published_at),
            text(&episode.duration_as_string),
            play_list_button(index, "Toca episódio"),
        );
    }
    body.push_str("</ul>\n</section>\n");

    body.push_str("<section class=\"allEpisodes\">\n<h2>Todos episódios</h2>\n");
    body.push_str("<table cellspacing=\"0\">\n<thead><tr><th></th><th>Podcast</th><th>Integrantes</th><th>Data</th><th>Duração</th><th></th></tr></thead>\n<tbody>\n");
    for (index, episode) in listing.rest.iter().enumerate() {
        let _ = write!(
            body,
            "<tr><td style=\"width: 72px\">{}</td><td><a href=\"{}\">{}</a></td><td>{}</td><td style=\"width: 100px\">{}</td><td>{}</td><td>{}</td></tr>\n",
            thumbnail(episode, 120, 120),
            attr(&episode.href()),
            text(&episode.title),
            text(&episode.members),
            text(&episode.published_at),
            text(&episode.duration_as_string),
            play_list_button(index + listing.latest.len(), "Tocar episódio"),
        );
    }
    body.push_str("</tbody>\n</table>\n</section>\n</div>\n");

    layout.wrap(&format!("Home | {SITE_NAME}"), &listing.playlist(), &body)
}

/// Render a single episode's detail page
///
/// The description is upstream HTML and is inserted as-is.
pub fn render_episode(episode: &Episode, layout: &Layout) -> Result<String, PageError> {
    let mut body = String::new();

    body.push_str("<div class=\"episode\">\n<div class=\"thumbnailContainer\">\n");
    body.push_str("<a href=\"/\"><button type=\"button\"><img src=\"/arrow-left.svg\" alt=\"Voltar\"></button></a>\n");
    body.push_str(&thumbnail(episode, 700, 160));
    body.push_str("\n<button type=\"button\" data-play=\"episode\"><img src=\"/play.svg\" alt=\"Tocar episódio\"></button>\n</div>\n");

    let _ = write!(
        body,
        "<header><h1>{}</h1><span>{}</span><span>{}</span><span>{}</span></header>\n",
        text(&episode.title),
        text(&episode.members),
        text(&episode.published_at),
        text(&episode.duration_as_string),
    );
    let _ = write!(
        body,
        "<div class=\"description\">{}</div>\n</div>\n",
        episode.description.as_deref().unwrap_or_default()
    );

    layout.wrap(&format!("{} | {SITE_NAME}", episode.title), episode, &body)
}
