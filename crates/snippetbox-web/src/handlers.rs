//! Page handlers.
//!
//! Each handler talks to the snippet store, fills a [`TemplateData`] and
//! renders a page from the cache. Store and render failures are returned as
//! [`AppError`] and mapped to a status by its `IntoResponse` impl.

use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use snippetbox_store::SnippetId;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::forms::SnippetCreateForm;
use crate::templates::{SnippetView, TemplateData};

fn render(
    state: &AppState,
    status: StatusCode,
    page: &str,
    data: &TemplateData,
) -> Result<Response, AppError> {
    let body = state.templates.render(page, data)?;
    Ok((status, Html(body)).into_response())
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    let snippets = state.store.latest().await?;

    let mut data = TemplateData::new();
    data.snippets = snippets.iter().map(SnippetView::from_snippet).collect();

    render(&state, StatusCode::OK, "home.html", &data)
}

/// GET /snippet/view/{id}
pub async fn snippet_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = match id.parse::<SnippetId>() {
        Ok(id) if id >= 1 => id,
        _ => return Err(AppError::NotFound),
    };

    let snippet = match state.store.get(id).await {
        Ok(snippet) => snippet,
        Err(e) if e.is_not_found() => return Err(AppError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let mut data = TemplateData::new();
    data.snippet = Some(SnippetView::from_snippet(&snippet));

    render(&state, StatusCode::OK, "view.html", &data)
}

/// GET /snippet/create
pub async fn snippet_create(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut data = TemplateData::new();
    data.form = Some(SnippetCreateForm::default());

    render(&state, StatusCode::OK, "create.html", &data)
}

/// POST /snippet/create
///
/// An invalid submission re-renders the form in place with a 200; nothing is
/// stored. A valid one is inserted and redirected (303) to its view page.
pub async fn snippet_create_post(
    State(state): State<AppState>,
    form: Result<Form<SnippetCreateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(mut form) = form.map_err(|rejection| {
        debug!(error = %rejection, "undecodable create form");
        AppError::ClientError(StatusCode::BAD_REQUEST)
    })?;

    if !form.validate() {
        debug!(errors = ?form.validator.field_errors, "create form rejected");
        let mut data = TemplateData::new();
        data.form = Some(form);
        return render(&state, StatusCode::OK, "create.html", &data);
    }

    let id = state
        .store
        .insert(&form.title, &form.content, form.expires)
        .await?;

    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}

/// Fallback for unroutable paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
