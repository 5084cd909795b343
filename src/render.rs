//! HTML rendering: accent colors, cards, and the gallery document.

use crate::models::EntityRecord;
use crate::sanitize::escape_html;

/// Accent color for a category. Unknown categories get the neutral color.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "normal" => "#F5F5F5",
        "fire" => "#FDDFDF",
        "grass" => "#DEFDE0",
        "electric" => "#FCF7DE",
        "ice" => "#DEF3FD",
        "water" => "#DEF3FD",
        "ground" => "#F4E7DA",
        "rock" => "#D5D5D4",
        "fairy" => "#FCEAFF",
        "poison" => "#98D7A5",
        "bug" => "#F8D5A3",
        "ghost" => "#CAC0F7",
        "dragon" => "#97B3E6",
        "psychic" => "#EAEDA1",
        "fighting" => "#E6E0D4",
        _ => "#F5F5F5",
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render one record as a card list item.
///
/// The card shows the first category's accent color, the image, the
/// capitalized name prefixed with the id, and the category label (a single
/// name or all names joined with `" | "`). All interpolated text is
/// HTML-escaped.
pub fn render_card(record: &EntityRecord) -> String {
    let first = record.categories.first().map(String::as_str).unwrap_or("");
    let label = if record.categories.len() > 1 {
        record.categories.join(" | ")
    } else {
        first.to_string()
    };

    format!(
        concat!(
            "<li class=\"card {first}\" style=\"--type-color: {color}\">",
            "<img src=\"{img}\" alt=\"{name}\" class=\"card-image\">",
            "<h2>{id}. {display}</h2>",
            "<p>{label}</p>",
            "</li>"
        ),
        first = escape_html(first),
        color = category_color(first),
        img = escape_html(&record.image_url),
        name = escape_html(&record.name),
        id = escape_html(&record.id),
        display = escape_html(&capitalize(&record.name)),
        label = escape_html(&label),
    )
}

/// Render a batch of records as concatenated cards, in input order.
pub fn render_cards(records: &[EntityRecord]) -> String {
    records.iter().map(render_card).collect()
}

/// Render the full gallery document around an initial batch of cards.
///
/// When `next_url` is given, the page embeds a sentinel element and a small
/// script that requests the next page from that URL whenever the sentinel
/// nears the viewport, and stops once the feed reports it is done.
pub fn render_document(records: &[EntityRecord], next_url: Option<&str>) -> String {
    let cards = render_cards(records);
    let loader = match next_url {
        Some(url) => format!(
            concat!(
                "<div data-js=\"feed-sentinel\"></div>\n",
                "<script>\n",
                "const list = document.querySelector('[data-js=\"creature-list\"]');\n",
                "const sentinel = document.querySelector('[data-js=\"feed-sentinel\"]');\n",
                "let done = false, loading = false;\n",
                "const observer = new IntersectionObserver(async ([entry]) => {{\n",
                "  if (!entry.isIntersecting || done || loading) return;\n",
                "  loading = true;\n",
                "  const page = await fetch('{url}').then((r) => r.json());\n",
                "  list.insertAdjacentHTML('beforeend', page.html);\n",
                "  done = page.done;\n",
                "  loading = false;\n",
                "  if (done) observer.disconnect();\n",
                "}}, {{ rootMargin: '500px' }});\n",
                "observer.observe(sentinel);\n",
                "</script>"
            ),
            url = escape_html(url)
        ),
        None => String::new(),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>Creature Gallery</title>\n",
            "</head>\n",
            "<body>\n",
            "<ul data-js=\"creature-list\">{cards}</ul>\n",
            "{loader}\n",
            "</body>\n",
            "</html>\n"
        ),
        cards = cards,
        loader = loader,
    )
}
