use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::Snapshot;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Quiet Hacker News</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main>
<h1>Quiet Hacker News</h1>
"#;

const FOOT: &str = "</main>\n</body>\n</html>\n";

/// Render the index page for `snapshot`. All story fields are escaped.
pub fn index_page(snapshot: &Snapshot) -> String {
    let mut html = String::with_capacity(HEAD.len() + FOOT.len() + snapshot.len() * 160);
    html.push_str(HEAD);

    if snapshot.is_empty() {
        html.push_str("<p class=\"empty\">Stories are on their way. Check back in a minute.</p>\n");
    } else {
        html.push_str("<ol>\n");
        for story in snapshot.stories() {
            // Writing into a String cannot fail.
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a> <span class=\"host\">({})</span></li>",
                encode_double_quoted_attribute(story.url()),
                encode_text(story.title()),
                encode_text(story.host()),
            );
        }
        html.push_str("</ol>\n");
    }

    html.push_str(FOOT);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawItem, Story};

    fn story(id: u64, title: &str, url: &str) -> Story {
        Story::from_raw(
            id,
            RawItem {
                id: Some(id),
                title: Some(title.into()),
                text: None,
                url: Some(url.into()),
            },
        )
    }

    #[test]
    fn test_empty_page() {
        let html = index_page(&Snapshot::empty());
        assert!(html.contains("Stories are on their way"));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn test_lists_stories_in_order() {
        let snapshot = Snapshot::new(
            vec![
                story(1, "First", "https://www.first.example/a"),
                story(2, "Second", "https://second.example/b"),
            ],
            2,
        );
        let html = index_page(&snapshot);

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"<a href="https://www.first.example/a">First</a>"#));
        assert!(html.contains("(first.example)"));
    }

    #[test]
    fn test_escapes_fields() {
        let snapshot = Snapshot::new(
            vec![story(
                1,
                "<script>alert(1)</script> & more",
                "https://example.com/?a=1&b=\"2\"",
            )],
            1,
        );
        let html = index_page(&snapshot);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("b=\"2\""));
    }
}
