use include_dir::{include_dir, Dir};

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// The landing page shipped in `templates/index.html`.
pub fn landing_page() -> &'static str {
    TEMPLATES
        .get_file("index.html")
        .and_then(|f| f.contents_utf8())
        .unwrap_or_default()
}
