use serde::Serialize;
use std::sync::Mutex;
use tauri::State;

use figscope_core::Document;
use figscope_io::{FigmaClient, FigmaError};
use figscope_renderer::{RenderFrame, Scene};

/// Shared application state managed by Tauri.
pub struct AppState {
    pub scene: Mutex<Scene>,
    pub client: FigmaClient,
}

/// Document metadata readout for the header bar.
#[derive(Serialize)]
pub struct DocumentInfo {
    name: String,
    last_modified: Option<String>,
    version: Option<String>,
    node_count: usize,
}

impl DocumentInfo {
    fn of(scene: &Scene) -> Self {
        let doc = scene.document();
        Self {
            name: doc.name.clone(),
            last_modified: doc.last_modified.clone(),
            version: doc.version.clone(),
            node_count: doc.node_count(),
        }
    }
}

/// Install the outcome of a fetch into the scene.
///
/// A failed fetch leaves the scene exactly as it was — the current node
/// list and transform survive intact and the next repaint shows them.
fn install_fetched(
    scene: &mut Scene,
    fetched: Result<Document, FigmaError>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<DocumentInfo, String> {
    match fetched {
        Ok(document) => {
            scene.install(document, canvas_width, canvas_height);
            Ok(DocumentInfo::of(scene))
        }
        Err(e) => {
            log::warn!("fetch failed: {}", e);
            Err(e.to_string())
        }
    }
}

// ── Tauri IPC Commands ───────────────────────────────────────────────

/// Fetch a file and install it into the scene.
///
/// Blocks the command until the network round trip completes; there is no
/// background worker and no cancellation.
#[tauri::command]
fn fetch_document(
    state: State<AppState>,
    access_token: String,
    file_key: String,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<DocumentInfo, String> {
    let fetched = state.client.fetch_file(&access_token, &file_key);
    let mut scene = state.scene.lock().map_err(|e| e.to_string())?;
    install_fetched(&mut scene, fetched, canvas_width, canvas_height)
}

/// The repaint pass. `None` while the scene is clean.
#[tauri::command]
fn render_frame(
    state: State<AppState>,
    canvas_width: f64,
    canvas_height: f64,
) -> Result<Option<RenderFrame>, String> {
    let mut scene = state.scene.lock().map_err(|e| e.to_string())?;
    Ok(scene.repaint(canvas_width, canvas_height))
}

/// Re-arm the scene after an expose or resize.
#[tauri::command]
fn request_repaint(state: State<AppState>) -> Result<(), String> {
    let mut scene = state.scene.lock().map_err(|e| e.to_string())?;
    scene.mark_dirty();
    Ok(())
}

/// Current document metadata.
#[tauri::command]
fn document_info(state: State<AppState>) -> Result<DocumentInfo, String> {
    let scene = state.scene.lock().map_err(|e| e.to_string())?;
    Ok(DocumentInfo::of(&scene))
}

// ── App setup ────────────────────────────────────────────────────────

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = FigmaClient::new().expect("failed to build the HTTP client");

    tauri::Builder::default()
        .manage(AppState {
            scene: Mutex::new(Scene::new()),
            client,
        })
        .invoke_handler(tauri::generate_handler![
            fetch_document,
            render_frame,
            request_repaint,
            document_info,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Figscope");
}
