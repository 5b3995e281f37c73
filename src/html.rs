//! HTML rendering of the results grid and the details page.
//!
//! Every piece of text that comes from the API or the user goes through
//! [`escape_html`] before it is put into markup.

use std::fmt::Write;

use crate::{
    details::DetailsView,
    list::ListView,
    types::{author, book::Book},
};

pub const HOME_PAGE: &str = "index.html";
const NO_IMAGE: &str = r#"<div class="no-image muted">No Image</div>"#;
const NO_IMAGE_ONERROR: &str =
    r#"this.parentElement.innerHTML='&lt;div class=&quot;no-image muted&quot;&gt;No Image&lt;/div&gt;'"#;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Cover image, or the placeholder when there is no image URL. Never emits
/// an `<img>` without a source.
pub fn render_cover(image: Option<&str>, alt: &str) -> String {
    match image.filter(|x| !x.trim().is_empty()) {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" onerror="{}" />"#,
            escape_html(src),
            escape_html(alt),
            NO_IMAGE_ONERROR
        ),
        None => NO_IMAGE.to_string(),
    }
}

pub fn render_card(index: usize, book: &Book) -> String {
    let title = book.title().unwrap_or(crate::details::NO_TITLE);
    let authors = author::join_names(book.authors.as_deref())
        .unwrap_or_else(|| "Unknown Author".to_string());
    format!(
        concat!(
            r#"<div class="card" data-index="{index}">"#,
            r#"<div class="thumb">{cover}</div>"#,
            r#"<div class="title">{title}</div>"#,
            r#"<div class="authors">{authors}</div>"#,
            r#"<div class="actions"><button class="btn primary" data-index="{index}">View Details</button></div>"#,
            "</div>"
        ),
        index = index,
        cover = render_cover(book.image(), book.title().unwrap_or("cover")),
        title = escape_html(title),
        authors = escape_html(&authors),
    )
}

pub fn render_results(view: &ListView<'_>) -> String {
    let mut s = String::new();
    let class = if view.status.is_error() || view.total == 0 {
        "status muted"
    } else {
        "status"
    };
    let _ = write!(
        s,
        r#"<div id="status"><div class="{class}">{}</div></div>"#,
        escape_html(&view.status.to_string())
    );
    if let Some(genre) = view.current_category {
        let _ = write!(
            s,
            r#"<div id="currentCategory">Current Category: {}</div>"#,
            escape_html(genre.as_str())
        );
    }
    s.push_str(r#"<div id="subjects">"#);
    for genre in view.genre_chips {
        let _ = write!(
            s,
            r#"<button class="tag" data-genre="{0}">{0}</button>"#,
            escape_html(genre.as_str())
        );
    }
    s.push_str("</div>");
    s.push_str(r#"<div id="booksGrid">"#);
    for (i, book) in view.visible.iter().enumerate() {
        s.push_str(&render_card(i, book));
    }
    s.push_str("</div>");
    if view.has_more {
        let _ = write!(
            s,
            r#"<div class="load-more"><button class="btn" id="loadMore">Load More</button><span class="muted">Showing {} of {}</span></div>"#,
            view.displayed, view.total
        );
    }
    s
}

pub fn render_results_page(view: &ListView<'_>) -> String {
    document("Book Search", &render_results(view))
}

fn meta_item(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="meta-item"><span class="meta-label">{label}:</span><span class="meta-value">{value_html}</span></div>"#
    )
}

pub fn render_details(view: &DetailsView) -> String {
    let mut meta = meta_item("Authors", &escape_html(&view.authors));
    if !view.genres.is_empty() {
        let chips = view
            .genres
            .iter()
            .map(|g| format!(r#"<span class="genre-tag">{}</span>"#, escape_html(g.as_str())))
            .collect::<String>();
        meta.push_str(&meta_item(
            "Genres",
            &format!(r#"<div class="genres-list">{chips}</div>"#),
        ));
    }
    if let Some(rating) = &view.rating {
        meta.push_str(&meta_item(
            "Rating",
            &format!(r#"<span class="rating">{}</span>"#, escape_html(rating)),
        ));
    }
    for (label, value) in [
        ("ISBN", &view.isbn),
        ("Pages", &view.pages),
        ("Published", &view.published),
    ] {
        if let Some(value) = value {
            meta.push_str(&meta_item(label, &escape_html(value)));
        }
    }

    format!(
        concat!(
            r#"<div class="book-container">"#,
            r#"<div class="book-header">"#,
            r#"<div class="book-cover">{cover}</div>"#,
            r#"<div class="book-info"><h1 class="book-title">{title}</h1><div class="book-meta">{meta}</div></div>"#,
            "</div>",
            r#"<div class="book-description"><h2 class="description-title">About the Book</h2><div class="description-text">{description}</div></div>"#,
            r#"<div class="actions"><a href="{home}" class="btn btn-secondary">Back</a></div>"#,
            "</div>"
        ),
        cover = render_cover(view.image.as_deref(), "Book cover"),
        title = escape_html(&view.title),
        meta = meta,
        description = escape_html(&view.description),
        home = HOME_PAGE,
    )
}

pub fn render_details_page(view: &DetailsView) -> String {
    document(&view.title, &render_details(view))
}

pub fn render_error(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="error-message"><h2>Error</h2><p>{}</p>"#,
            r#"<a href="{}" class="btn btn-primary">Back to Home</a></div>"#
        ),
        escape_html(message),
        HOME_PAGE
    )
}

pub fn render_error_page(message: &str) -> String {
    document("Error", &render_error(message))
}

fn document(title: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="UTF-8"><title>{}</title></head>"#,
            r#"<body><div id="content">{}</div></body></html>"#,
            "\n"
        ),
        escape_html(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn book(json: &str) -> Book {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn card_without_image_uses_placeholder() {
        let html = render_card(0, &book(r#"{"id": 1, "title": "Dune"}"#));
        assert!(html.contains(NO_IMAGE));
        assert!(!html.contains("<img"));
        let html = render_card(0, &book(r#"{"id": 1, "image": ""}"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn card_image_falls_back_when_broken() {
        let html = render_card(0, &book(r#"{"id": 1, "title": "Dune", "image": "https://covers.example/1.jpg"}"#));
        assert!(html.contains(r#"<img src="https://covers.example/1.jpg" alt="Dune" onerror=""#));
        assert!(html.contains(NO_IMAGE_ONERROR));
        assert!(!html.contains(NO_IMAGE));
    }

    #[test]
    fn card_fallbacks() {
        let html = render_card(3, &book(r#"{"id": 1}"#));
        assert!(html.contains(r#"<div class="title">No Title</div>"#));
        assert!(html.contains(r#"<div class="authors">Unknown Author</div>"#));
        assert!(html.contains(r#"data-index="3""#));
    }

    #[test]
    fn card_escapes_title_and_authors() {
        let html = render_card(
            0,
            &book(r#"{"id": 1, "title": "<script>", "image": "x\" onload=\"evil()", "authors": [{"name": "<b>Bold</b>"}]}"#),
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(!html.contains(r#"" onload=""#));
    }

    #[test]
    fn details_escape_everything() {
        let view = DetailsView::from_book(&book(
            r#"{"id": 1, "title": "<script>", "description": "<img src=x onerror=alert(1)>", "authors": ["<i>A</i>"], "genres": ["<g>"]}"#,
        ));
        let html = render_details(&view);
        assert!(html.contains(r#"<h1 class="book-title">&lt;script&gt;</h1>"#));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&lt;i&gt;A&lt;/i&gt;"));
        assert!(html.contains(r#"<span class="genre-tag">&lt;g&gt;</span>"#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn details_cover_falls_back_when_broken() {
        let view = DetailsView::from_book(&book(r#"{"id": 1, "image": "https://covers.example/1.jpg"}"#));
        let html = render_details(&view);
        assert!(html.contains(r#"<img src="https://covers.example/1.jpg" alt="Book cover" onerror=""#));
        assert!(html.contains(NO_IMAGE_ONERROR));
    }

    #[test]
    fn details_omit_missing_rows() {
        let view = DetailsView::from_book(&book(r#"{"id": 1}"#));
        let html = render_details(&view);
        assert!(html.contains(NO_IMAGE));
        assert!(!html.contains("<img"));
        assert!(!html.contains("Genres:"));
        assert!(!html.contains("Rating:"));
        assert!(!html.contains("ISBN:"));
        assert!(!html.contains("Pages:"));
        assert!(!html.contains("Published:"));
        assert!(html.contains("Unknown"));
        assert!(html.contains("No description available."));
    }

    #[test]
    fn details_rating_row() {
        let view = DetailsView::from_book(&book(r#"{"id": 1, "rating": {"average": 0.8}}"#));
        assert!(render_details(&view).contains(r#"<span class="rating">4.0 / 5.0</span>"#));
    }

    #[test]
    fn error_page_links_home() {
        let html = render_error_page("Book <missing>");
        assert!(html.contains("<p>Book &lt;missing&gt;</p>"));
        assert!(html.contains(r#"href="index.html""#));
    }
}
