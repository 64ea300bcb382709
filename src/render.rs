use crate::favicon::favicon_tag;
use crate::results::PageMetadata;
use crate::utils::escape_html;

/// Renders the preview page: the target's metadata for link unfurlers plus an
/// immediate meta-refresh to the target for browsers.
///
/// All substituted values are HTML-escaped. A missing or empty title is
/// replaced by `fallback_title`.
pub fn render_redirect_page(target: &str, meta: &PageMetadata, fallback_title: &str) -> String {
    let favicon = meta
        .favicon
        .as_deref()
        .map(|href| favicon_tag(href, target))
        .unwrap_or_default();

    render_with_favicon_tag(target, meta, fallback_title, &favicon)
}

/// Same as [`render_redirect_page`] with an already rendered favicon tag
pub(crate) fn render_with_favicon_tag(
    target: &str,
    meta: &PageMetadata,
    fallback_title: &str,
    favicon: &str,
) -> String {
    let target = escape_html(target);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
	<meta charset="UTF-8">
	<meta http-equiv="refresh" content="0;url={target}">
	<title>{title}</title>
	<meta name="description" content="{description}">
	{favicon}
</head>
<body>
	<p>If you are not redirected automatically, <a href="{target}">click here</a>.</p>
</body>
</html>"#,
        title = escape_html(meta.title_or(fallback_title)),
        description = escape_html(meta.description.as_deref().unwrap_or_default()),
    )
}
