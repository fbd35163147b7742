use std::ops::Deref;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use scp_model::{Article, RatingColor, UNKNOWN_RATING};
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{FetchError, Result};

const TITLE_SELECTOR: &str = "div#page-title";
const CONTENT_SELECTOR: &str = "div#page-content";

#[allow(clippy::expect_used)]
static OBJECT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)object class: *(.*)").expect("valid object class regex"));

/// Pull the title, body and object class out of an article page.
///
/// The body is the text of `div#page-content` minus its first child element
/// (the rating widget on wiki pages). The first "Object class:" line in the
/// body is rewritten to carry the rating, painted in its color when `paint`
/// is set. Later occurrences are left as they are.
pub fn extract_article(html: &str, paint: bool) -> Result<Article> {
    let document = Html::parse_document(html);

    let title_sel = selector(TITLE_SELECTOR)?;
    let content_sel = selector(CONTENT_SELECTOR)?;

    let title = match document.select(&title_sel).next() {
        Some(el) => el.text().collect::<String>().trim().to_string(),
        None => {
            tracing::warn!(selector = TITLE_SELECTOR, "No title on page");
            String::new()
        }
    };

    let content = match document.select(&content_sel).next() {
        Some(block) => text_without_first_child(block),
        None => {
            tracing::warn!(selector = CONTENT_SELECTOR, "No content block on page");
            String::new()
        }
    };
    let content = content.trim_matches(|c: char| c == ' ' || c == '\n');

    // An "object class:" line with nothing after it counts as unclassified
    let label = OBJECT_CLASS
        .captures(content)
        .map(|caps| caps[1].trim().to_lowercase())
        .filter(|label| !label.is_empty());

    let (rating, content) = match label {
        Some(label) => {
            let rating = title_case(&label);
            let color = RatingColor::for_rating(&rating);
            let label = if paint { color.paint(&rating) } else { rating.clone() };
            let replacement = format!("Object class: {label}");
            let content = OBJECT_CLASS.replacen(content, 1, NoExpand(&replacement));
            (rating, content.into_owned())
        }
        None => (UNKNOWN_RATING.to_string(), content.to_string()),
    };

    tracing::debug!(title = %title, rating = %rating, chars = content.len(), "Extracted article");

    Ok(Article {
        title,
        content,
        rating,
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("bad selector {css:?}: {e}")))
}

/// Text of every descendant of `block`, skipping the subtree of its first
/// child element. Text nodes that precede that element are kept.
fn text_without_first_child(block: ElementRef) -> String {
    let skip = block
        .children()
        .find(|child| child.value().is_element())
        .map(|child| child.id());

    let mut text = String::new();
    for child in block.children() {
        if Some(child.id()) == skip {
            continue;
        }
        collect_text(child, &mut text);
    }
    text
}

fn collect_text(node: ego_tree::NodeRef<Node>, out: &mut String) {
    match node.value() {
        Node::Text(t) => out.push_str(t.deref()),
        Node::Element(_) => {
            for child in node.children() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

/// Capitalize the first letter of every word.
///
/// A word starts at the beginning of the string or after a separator: any
/// ASCII character that isn't alphanumeric or `_`, or any whitespace.
/// Non-ASCII letters never split a word. Each first letter is mapped to its
/// single-character titlecase form, see [`to_title`].
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if prev.map_or(true, is_separator) {
            out.push(to_title(c));
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

/// Simple (one-to-one) titlecase mapping.
///
/// Titlecase only differs from uppercase for the Latin digraphs and the
/// Greek letters with iota subscript. Characters whose uppercase form is
/// more than one character ("ß") are left alone.
fn to_title(c: char) -> char {
    match c {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8).unwrap_or(c)
        }
        '\u{1FB3}' => '\u{1FBC}',
        '\u{1FC3}' => '\u{1FCC}',
        '\u{1FF3}' => '\u{1FFC}',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        }
    }
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::style::Colored;

    fn painted(rating: &str) -> String {
        RatingColor::for_rating(rating).paint(rating)
    }

    fn page(content: &str) -> String {
        // NO_COLOR in the test environment must not strip the escapes
        Colored::set_ansi_color_disabled(false);
        format!(
            r#"<html><body>
            <div id="page-title">
                SCP-173
            </div>
            <div id="page-content">{content}</div>
            </body></html>"#
        )
    }

    #[test]
    fn test_extract_euclid() {
        let html = page(
            r#"<div class="page-rate-widget-box">rating: +42</div>
<p><strong>Item #:</strong> SCP-173</p>
<p><strong>Object Class:</strong> Euclid</p>
<p><strong>Special Containment Procedures:</strong> Keep it in sight.</p>
"#,
        );

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.title, "SCP-173");
        assert_eq!(article.rating, "Euclid");
        assert!(!article.content.contains("rating: +42"));
        assert!(article.content.starts_with("Item #: SCP-173"));
        assert!(article
            .content
            .contains(&format!("Object class: {}\n", painted("Euclid"))));
        assert!(article.content.ends_with("Keep it in sight."));
    }

    #[test]
    fn test_only_first_match_rewritten() {
        let html = page(
            "<div>widget</div>\n\
             <p>Object Class: EUCLID</p>\n\
             <p>Formerly object class: euclid</p>",
        );

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.rating, "Euclid");
        assert_eq!(article.content.matches(&painted("Euclid")).count(), 1);
        assert!(article.content.starts_with("Object class: \x1b"));
        assert!(article.content.ends_with("Formerly object class: euclid"));
    }

    #[test]
    fn test_rest_of_line_is_rating() {
        let html = page("<span></span>\nobject class:   safe\nmore text\n");

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.rating, "Safe");
        assert_eq!(
            article.content,
            format!("Object class: {}\nmore text", painted("Safe"))
        );
    }

    #[test]
    fn test_unknown_rating_leaves_content() {
        let html = page("<div>widget</div>\n<p>No classification here.</p>\n");

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.rating, UNKNOWN_RATING);
        assert_eq!(article.content, "No classification here.");
    }

    #[test]
    fn test_unlisted_class_is_neutral() {
        let html = page("<div>widget</div><p>Object Class: thaumiel</p>");

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.rating, "Thaumiel");
        assert_eq!(
            article.content,
            format!("Object class: {}", RatingColor::Neutral.paint("Thaumiel"))
        );
    }

    #[test]
    fn test_empty_object_class_is_unknown() {
        let html = page("<div>widget</div>\n<p>Object Class:</p>\n<p>Euclid</p>\n");

        let article = extract_article(&html, true).unwrap();

        assert_eq!(article.rating, UNKNOWN_RATING);
        assert_eq!(article.content, "Object Class:\nEuclid");
    }

    #[test]
    fn test_no_paint() {
        let html = page("<div>widget</div><p>Object Class: Keter</p>");

        let article = extract_article(&html, false).unwrap();

        assert_eq!(article.rating, "Keter");
        assert_eq!(article.content, "Object class: Keter");
    }

    #[test]
    fn test_missing_regions() {
        let article = extract_article("<html><body><p>nothing</p></body></html>", true).unwrap();

        assert_eq!(article.title, "");
        assert_eq!(article.content, "");
        assert_eq!(article.rating, UNKNOWN_RATING);
    }

    #[test]
    fn test_leading_text_kept() {
        let html = page("intro <b>skipped</b> tail <i>kept</i>");

        let article = extract_article(&html, false).unwrap();

        assert_eq!(article.content, "intro  tail kept");
    }

    #[test]
    fn test_extract_is_repeatable() {
        let html = page("<div>widget</div><p>Object Class: Euclid</p>");

        let first = extract_article(&html, true).unwrap();
        let second = extract_article(&html, true).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("euclid"), "Euclid");
        assert_eq!(title_case("keter (pending)"), "Keter (Pending)");
        assert_eq!(title_case("euclid/keter"), "Euclid/Keter");
        assert_eq!(title_case("not_applicable"), "Not_applicable");
        assert_eq!(title_case("éclair"), "Éclair");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_uses_titlecase_forms() {
        assert_eq!(title_case("\u{01C6}emal"), "\u{01C5}emal");
        assert_eq!(title_case("\u{01F3}ur"), "\u{01F2}ur");
        assert_eq!(title_case("\u{1FB3}"), "\u{1FBC}");
        assert_eq!(title_case("\u{1F80}"), "\u{1F88}");
        assert_eq!(title_case("ßafe"), "ßafe");
        assert_eq!(title_case("ǆ ǆ"), "ǅ ǅ");
    }
}
