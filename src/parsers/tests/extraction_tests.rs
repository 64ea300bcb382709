use crate::parsers::{extract_metadata, extract_metadata_from_str};
use crate::results::PageMetadata;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_extraction() {
        let meta = extract_metadata_from_str("<html><head><title>X</title></head></html>");
        assert_eq!(meta.title.as_deref(), Some("X"));

        // Surrounding garbage does not matter
        let meta = extract_metadata_from_str(
            "<<>> junk </> <div class=unclosed>&&& <p <b>stray</i> <title>X</title> <<< </html",
        );
        assert_eq!(meta.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_title_is_verbatim() {
        let meta = extract_metadata_from_str("<title>\n  Spaced   Out \n</title>");
        assert_eq!(meta.title.as_deref(), Some("\n  Spaced   Out \n"));
    }

    #[test]
    fn test_first_title_wins() {
        let meta = extract_metadata_from_str(
            "<title>First</title><body><svg><title>Second</title></svg></body>",
        );
        assert_eq!(meta.title.as_deref(), Some("First"));
    }

    #[test]
    fn test_empty_first_title_still_blocks_later_titles() {
        let meta = extract_metadata_from_str("<title></title><title>Later</title>");
        assert_eq!(meta.title, None);

        let meta = extract_metadata_from_str("<title/>");
        assert_eq!(meta.title, None);
    }

    #[test]
    fn test_title_with_nested_markup_is_one_text() {
        let meta = extract_metadata_from_str("<title>A <em>B</em> &amp; C</title>");
        assert_eq!(meta.title.as_deref(), Some("A <em>B</em> & C"));
    }

    #[test]
    fn test_title_inside_script_is_ignored() {
        let meta = extract_metadata_from_str(
            "<script>document.write('<title>Fake</title>')</script><title>Real</title>",
        );
        assert_eq!(meta.title.as_deref(), Some("Real"));
    }

    #[test]
    fn test_description_any_attribute_order() {
        let meta = extract_metadata_from_str(r#"<meta name="description" content="Y">"#);
        assert_eq!(meta.description.as_deref(), Some("Y"));

        let meta = extract_metadata_from_str(r#"<meta content="Y" name="description">"#);
        assert_eq!(meta.description.as_deref(), Some("Y"));

        let meta = extract_metadata_from_str(r#"<META CONTENT='Y' NAME=Description>"#);
        assert_eq!(meta.description.as_deref(), Some("Y"));
    }

    #[test]
    fn test_description_needs_both_attributes() {
        // content without a matching name
        let meta = extract_metadata_from_str(r#"<meta content="Y">"#);
        assert_eq!(meta.description, None);

        // name without content
        let meta = extract_metadata_from_str(r#"<meta name="description">"#);
        assert_eq!(meta.description, None);

        // a different name
        let meta = extract_metadata_from_str(r#"<meta name="keywords" content="a,b">"#);
        assert_eq!(meta.description, None);

        // open graph descriptions use `property`, not `name`
        let meta = extract_metadata_from_str(r#"<meta property="description" content="og">"#);
        assert_eq!(meta.description, None);
    }

    #[test]
    fn test_first_description_wins() {
        let meta = extract_metadata_from_str(
            r#"<meta name="description">
               <meta name="description" content="first">
               <meta name="description" content="second">"#,
        );
        assert_eq!(meta.description.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_description_content_is_kept() {
        let meta = extract_metadata_from_str(r#"<meta name="description" content="">"#);
        assert_eq!(meta.description.as_deref(), Some(""));
    }

    #[test]
    fn test_favicon_extraction() {
        let meta = extract_metadata_from_str(r#"<link rel="icon" href="/f.ico">"#);
        assert_eq!(meta.favicon.as_deref(), Some("/f.ico"));

        let meta = extract_metadata_from_str(r#"<link href="/s.ico" rel="shortcut icon">"#);
        assert_eq!(meta.favicon.as_deref(), Some("/s.ico"));
    }

    #[test]
    fn test_favicon_first_match_wins() {
        let meta = extract_metadata_from_str(
            r#"<link rel="stylesheet" href="/style.css">
               <link rel="icon" href="/first.ico">
               <link rel="shortcut icon" href="/second.ico">
               <link rel="icon" href="/third.png">"#,
        );
        assert_eq!(meta.favicon.as_deref(), Some("/first.ico"));
    }

    #[test]
    fn test_favicon_needs_rel_and_href() {
        let meta = extract_metadata_from_str(r#"<link rel="icon">"#);
        assert_eq!(meta.favicon, None);

        let meta = extract_metadata_from_str(r#"<link rel="icon" href="">"#);
        assert_eq!(meta.favicon, None);

        let meta = extract_metadata_from_str(r#"<link href="/f.ico">"#);
        assert_eq!(meta.favicon, None);

        let meta = extract_metadata_from_str(r#"<link rel="apple-touch-icon" href="/a.png">"#);
        assert_eq!(meta.favicon, None);
    }

    #[test]
    fn test_incomplete_icon_link_does_not_block_later_one() {
        let meta = extract_metadata_from_str(
            r#"<link rel="icon"><link rel="icon" href="/real.ico">"#,
        );
        assert_eq!(meta.favicon.as_deref(), Some("/real.ico"));
    }

    #[test]
    fn test_duplicate_href_first_wins() {
        let meta =
            extract_metadata_from_str(r#"<link rel="icon" href="/a.ico" href="/b.ico">"#);
        assert_eq!(meta.favicon.as_deref(), Some("/a.ico"));
    }

    #[test]
    fn test_no_recognizable_tags() {
        assert_eq!(extract_metadata_from_str(""), PageMetadata::default());
        assert_eq!(
            extract_metadata_from_str("just some plain text, nothing else"),
            PageMetadata::default()
        );
        assert_eq!(
            extract_metadata_from_str("<div><p>body only</p></div>"),
            PageMetadata::default()
        );
    }

    #[test]
    fn test_truncated_document_keeps_partial_results() {
        let meta = extract_metadata_from_str(
            r#"<head><title>Cut</title><meta name="description" content="never fini"#,
        );
        assert_eq!(meta.title.as_deref(), Some("Cut"));
        assert_eq!(meta.description, None);
        assert_eq!(meta.favicon, None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<title>T</title><meta name="description" content="D"><link rel="icon" href="i.png">"#;
        let first = extract_metadata(html.as_bytes());
        let second = extract_metadata(html.as_bytes());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
