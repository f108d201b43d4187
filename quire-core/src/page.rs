//! Assembling rendered pieces into complete HTML pages

use crate::config::{NavStyle, Stylesheet};
use crate::style::default_stylesheet;
use crate::types::{Header, IndexEntry, MergedPage, Navigation};

/// The per-document inputs of one page
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParts<'a> {
    pub title: &'a str,
    pub meta_html: &'a str,
    pub body_html: &'a str,
    /// Rendered navigation bar, empty outside book mode
    pub navigation: &'a str,
}

/// Build a full page from a document's pieces.
///
/// With a header the navigation brackets the header and the article, and
/// the page title is prefixed with the header title. Without one the
/// metadata moves into a `<header>` element.
pub fn assemble(parts: &PageParts, header: &Header, stylesheet: &Stylesheet) -> String {
    let nav = parts.navigation;

    if header.is_present() {
        let title = match &header.title {
            Some(header_title) => format!("{} | {}", header_title, parts.title),
            None => parts.title.to_string(),
        };
        let content = format!(
            "{nav}{}\n<article>{}{}</article>\n{nav}",
            header.html, parts.meta_html, parts.body_html
        );
        wrap_page(&title, &content, stylesheet)
    } else {
        let content = format!(
            "\n<header>{nav}{}</header>\n\n<article>{}</article>\n{nav}",
            parts.meta_html, parts.body_html
        );
        wrap_page(parts.title, &content, stylesheet)
    }
}

/// Build the single page of merge mode
pub fn assemble_merged(page: &MergedPage, stylesheet: &Stylesheet) -> String {
    let content = format!("{}{}", page.header_html, page.articles);
    wrap_page(&page.display_title(), &content, stylesheet)
}

/// Build the generated book index: the header followed by the page list
pub fn assemble_index(
    title: &str,
    header: &Header,
    entries: &[IndexEntry],
    stylesheet: &Stylesheet,
) -> String {
    let content = format!(
        "{}\n<article>{}</article>\n",
        header.html,
        render_index(entries)
    );
    wrap_page(title, &content, stylesheet)
}

/// Wrap content in the HTML document boilerplate
pub fn wrap_page(title: &str, content: &str, stylesheet: &Stylesheet) -> String {
    let style = match stylesheet {
        Stylesheet::Embedded { serif } => format!("<style>{}</style>", default_stylesheet(*serif)),
        Stylesheet::External(href) => format!(
            "<link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">",
            escape_html(href)
        ),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        style,
        content
    )
}

/// Wrap a header document's metadata and body in its section container
pub fn render_header(meta_html: &str, body_html: &str) -> String {
    let meta = if meta_html.is_empty() {
        String::new()
    } else {
        format!("\n<header>{meta_html}</header>\n")
    };
    format!("\n<section id=\"head\">{meta}{body_html}</section>\n")
}

/// Render the book navigation bar
pub fn render_navigation(nav: &Navigation, index_href: &str, style: NavStyle) -> String {
    let prev = nav
        .prev
        .as_ref()
        .map(|link| {
            let label = match style {
                NavStyle::Plain => "&lt; prev".to_string(),
                NavStyle::Titles => format!("&lt; {}", escape_html(&link.title)),
            };
            format!("<a href=\"{}\">{}</a>", escape_html(&link.href), label)
        })
        .unwrap_or_default();

    let next = nav
        .next
        .as_ref()
        .map(|link| {
            let label = match style {
                NavStyle::Plain => "next &gt;".to_string(),
                NavStyle::Titles => format!("{} &gt;", escape_html(&link.title)),
            };
            format!("<a href=\"{}\">{}</a>", escape_html(&link.href), label)
        })
        .unwrap_or_default();

    format!(
        "<div class=\"nav\">{} <a href=\"{}\">index</a> {}</div>",
        prev,
        escape_html(index_href),
        next
    )
}

/// Render the generated book index as a list of links
pub fn render_index(entries: &[IndexEntry]) -> String {
    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                escape_html(&entry.href),
                escape_html(&entry.title)
            )
        })
        .collect();
    format!("<ul>\n{items}</ul>\n")
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
