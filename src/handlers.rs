use crate::errors::HostError;
use crate::state::HostState;
use crate::ui::{fragment, render_shell};
use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::debug;

pub async fn index(State(state): State<HostState>) -> Html<String> {
    Html(render_shell(&state.routes, &state.api_url))
}

pub async fn view_fragment(Path(file): Path<String>) -> Result<Html<&'static str>, HostError> {
    let name = file.strip_suffix(".html").unwrap_or(&file);
    debug!(name, "serving fragment");
    fragment(name)
        .map(Html)
        .ok_or_else(|| HostError::not_found(format!("unknown view: {name}")))
}

pub async fn health() -> &'static str {
    "ok"
}
