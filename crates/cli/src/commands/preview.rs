use super::project::Project;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use chrono::Local;
use geo_compare_core::config::SiteMetadata;
use geo_compare_core::Catalog;
use geo_compare_generator::render::{comparison_page, index_page, not_found_page};
use geo_compare_generator::routes::{list_routes, resolve_with};
use geo_compare_generator::sitemap;
use geo_compare_generator::synthesis::synthesize;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    catalog_path: PathBuf,
    site: Arc<SiteMetadata>,
    reload_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Re-read on every request so edits show up without a restart.
    /// A broken catalog renders as empty instead of failing the page.
    fn catalog(&self) -> Catalog {
        Catalog::load_or_empty(&self.catalog_path)
    }
}

/// Start preview server with hot reload for local development.
///
/// Pages are rendered on request from the current catalog; a change
/// anywhere in the project directory reloads open browsers.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🔎 Starting preview server...");
    println!("   Project: {}", path.display());

    let project = Project::open(&path)?;
    let catalog_path = project.catalog_path();
    let catalog = Catalog::load_or_empty(&catalog_path);

    println!("   ✓ Site: {}", project.config.site.name);
    println!("   ✓ Platforms: {}", catalog.len());

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        catalog_path,
        site: Arc::new(project.config.site),
        reload_tx: reload_tx.clone(),
    };

    let app = router(state);

    // Start file watcher
    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            tracing::error!(error = %e, "File watcher failed");
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}/compare", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/compare", get(index_handler))
        .route("/compare/{slug}", get(comparison_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/_reload", get(sse_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes and trigger reload
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    tracing::info!("File changed, reloading");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    Sse::new(reload_events(state.reload_tx.subscribe())).keep_alive(KeepAlive::default())
}

/// One event per reload signal. Missed signals collapse into the next
/// one; the stream ends when the sender is gone.
fn reload_events(
    mut rx: broadcast::Receiver<()>,
) -> impl futures::Stream<Item = Result<Event, std::convert::Infallible>> {
    async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => {
                    yield Ok(Event::default().data("reload"));
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    }
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(index_page(&state.catalog(), &state.site, true))
}

async fn comparison_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let catalog = state.catalog();
    let index = catalog.index();

    let doc = resolve_with(&slug, &index).and_then(|pair| synthesize(&pair, &index, &state.site));
    match doc {
        Ok(doc) => Html(comparison_page(&doc, &state.site, true)).into_response(),
        Err(e) => {
            tracing::debug!(slug = %slug, error = %e, "Comparison not served");
            (
                StatusCode::NOT_FOUND,
                Html(not_found_page(&slug, &state.site)),
            )
                .into_response()
        }
    }
}

async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let xml = sitemap::build(
        &list_routes(&state.catalog()),
        &state.site,
        Local::now().date_naive(),
    );
    ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
}
