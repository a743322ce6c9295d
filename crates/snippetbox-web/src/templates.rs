//! Page templates and the process-wide template cache.
//!
//! Every page is composed of three layers: the shared `base.html` skeleton,
//! the shared partials (`partials/nav.html`), and a page body under
//! `pages/`. Askama compiles each composition at build time; the
//! [`TemplateCache`] maps page names to those compiled entry points so
//! handlers can look pages up by name.
//!
//! Rendering always produces a complete `String` before anything is written
//! to a response, so an error halfway through a page can still become a
//! clean 500.

use std::collections::HashMap;

use askama::Template;
use chrono::{DateTime, Datelike, Utc};
use snippetbox_store::{Snippet, SnippetId};
use thiserror::Error;

use crate::forms::SnippetCreateForm;

/// Errors produced while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("the template {0} does not exist")]
    MissingTemplate(String),

    #[error("template {page} needs {field} in its data")]
    MissingData {
        page: &'static str,
        field: &'static str,
    },

    #[error("template execution failed: {0}")]
    Execute(#[from] askama::Error),
}

// ── View types ──────────────────────────────────────────────────

/// A snippet with display-ready dates.
#[derive(Debug, Clone)]
pub struct SnippetView {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created_display: String,
    pub expires_display: String,
}

impl SnippetView {
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title.clone(),
            content: snippet.content.clone(),
            created_display: human_date(&snippet.created),
            expires_display: human_date(&snippet.expires),
        }
    }
}

/// Format a timestamp as e.g. `21 Mar 2024 at 16:17`.
pub fn human_date(t: &DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}

/// The data bag every page receives.
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub current_year: i32,
    pub snippet: Option<SnippetView>,
    pub snippets: Vec<SnippetView>,
    pub form: Option<SnippetCreateForm>,
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateData {
    pub fn new() -> Self {
        Self {
            current_year: Utc::now().year(),
            snippet: None,
            snippets: Vec::new(),
            form: None,
        }
    }
}

// ── Pages ───────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomePage<'a> {
    data: &'a TemplateData,
}

#[derive(Template)]
#[template(path = "pages/view.html")]
struct ViewPage<'a> {
    data: &'a TemplateData,
    snippet: &'a SnippetView,
}

#[derive(Template)]
#[template(path = "pages/create.html")]
struct CreatePage<'a> {
    data: &'a TemplateData,
    form: &'a SnippetCreateForm,
}

fn render_home(data: &TemplateData) -> Result<String, RenderError> {
    Ok(HomePage { data }.render()?)
}

fn render_view(data: &TemplateData) -> Result<String, RenderError> {
    let snippet = data.snippet.as_ref().ok_or(RenderError::MissingData {
        page: "view.html",
        field: "snippet",
    })?;
    Ok(ViewPage { data, snippet }.render()?)
}

fn render_create(data: &TemplateData) -> Result<String, RenderError> {
    let blank = SnippetCreateForm::default();
    let form = data.form.as_ref().unwrap_or(&blank);
    Ok(CreatePage { data, form }.render()?)
}

type RenderFn = fn(&TemplateData) -> Result<String, RenderError>;

/// Compiled pages keyed by name. Built once at startup, read-only afterwards.
pub struct TemplateCache {
    pages: HashMap<&'static str, RenderFn>,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    pub fn new() -> Self {
        let mut pages: HashMap<&'static str, RenderFn> = HashMap::new();
        pages.insert("home.html", render_home);
        pages.insert("view.html", render_view);
        pages.insert("create.html", render_create);
        Self { pages }
    }

    /// Render `page` into a complete HTML document.
    pub fn render(&self, page: &str, data: &TemplateData) -> Result<String, RenderError> {
        let render = self
            .pages
            .get(page)
            .ok_or_else(|| RenderError::MissingTemplate(page.to_string()))?;
        render(data)
    }

    /// Drop `page` from the cache. Later renders of it fail with
    /// [`RenderError::MissingTemplate`].
    pub fn remove(&mut self, page: &str) -> bool {
        self.pages.remove(page).is_some()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.pages.contains_key(page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn test_snippet(id: SnippetId, title: &str, content: &str) -> SnippetView {
        let created = Utc.with_ymd_and_hms(2024, 3, 21, 16, 17, 51).unwrap();
        SnippetView::from_snippet(&Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created,
            expires: created + TimeDelta::days(1),
        })
    }

    #[test]
    fn cache_holds_every_page() {
        let cache = TemplateCache::new();
        assert_eq!(cache.len(), 3);
        for page in ["home.html", "view.html", "create.html"] {
            assert!(cache.contains(page), "missing {page}");
        }
    }

    #[test]
    fn unknown_page_is_missing_template() {
        let cache = TemplateCache::new();
        let err = cache.render("about.html", &TemplateData::new()).unwrap_err();
        assert!(matches!(err, RenderError::MissingTemplate(ref p) if p == "about.html"));
        assert_eq!(err.to_string(), "the template about.html does not exist");
    }

    #[test]
    fn removed_page_is_missing_template() {
        let mut cache = TemplateCache::new();
        assert!(cache.remove("home.html"));
        assert!(!cache.remove("home.html"));
        assert_eq!(cache.len(), 2);

        let err = cache.render("home.html", &TemplateData::new()).unwrap_err();
        assert!(matches!(err, RenderError::MissingTemplate(ref p) if p == "home.html"));
    }

    #[test]
    fn human_date_format() {
        let t = Utc.with_ymd_and_hms(2024, 3, 21, 16, 17, 51).unwrap();
        assert_eq!(human_date(&t), "21 Mar 2024 at 16:17");
    }

    #[test]
    fn home_lists_snippets_with_base_and_nav() {
        let cache = TemplateCache::new();
        let mut data = TemplateData::new();
        data.snippets = vec![
            test_snippet(2, "title2", "content2"),
            test_snippet(1, "title1", "content1"),
        ];

        let html = cache.render("home.html", &data).unwrap();

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<nav>"));
        assert!(html.contains(r#"<a href="/snippet/view/2">title2</a>"#));
        assert!(html.contains(r#"<a href="/snippet/view/1">title1</a>"#));
        assert!(html.contains(&data.current_year.to_string()));
    }

    #[test]
    fn home_without_snippets_says_so() {
        let html = TemplateCache::new()
            .render("home.html", &TemplateData::new())
            .unwrap();
        assert!(html.contains("There's nothing to see here... yet!"));
    }

    #[test]
    fn view_escapes_content() {
        let mut data = TemplateData::new();
        data.snippet = Some(test_snippet(1, "<b>t</b>", "<script>x</script>"));

        let html = TemplateCache::new().render("view.html", &data).unwrap();

        assert!(html.contains("&#60;script&#62;x&#60;/script&#62;"));
        assert!(html.contains("<strong>&#60;b&#62;t&#60;/b&#62;</strong>"));
        assert!(!html.contains("<script>x</script>"));
        assert!(!html.contains("<b>t</b>"));
        assert!(html.contains("21 Mar 2024 at 16:17"));
        assert!(html.contains("#1"));
    }

    #[test]
    fn view_without_snippet_fails_cleanly() {
        let err = TemplateCache::new()
            .render("view.html", &TemplateData::new())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingData { field: "snippet", .. }));
    }

    #[test]
    fn create_rerenders_values_and_errors() {
        let mut form = SnippetCreateForm {
            title: String::new(),
            content: "kept content".to_string(),
            expires: 7,
            ..Default::default()
        };
        form.validate();
        let mut data = TemplateData::new();
        data.form = Some(form);

        let html = TemplateCache::new().render("create.html", &data).unwrap();

        assert!(html.contains("This field cannot be blank"));
        assert!(html.contains("kept content"));
        assert!(html.contains(r#"value="7" checked"#));
    }

    #[test]
    fn create_defaults_to_one_year() {
        let html = TemplateCache::new()
            .render("create.html", &TemplateData::new())
            .unwrap();
        assert!(html.contains(r#"value="365" checked"#));
        assert!(!html.contains(r#"class="error""#));
    }
}
