//! # Módulo Web — A Interface do EmoBot
//!
//! Este módulo organiza toda a camada web da aplicação, construída
//! com **Axum** + **HTMX** + **Maud**.
//!
//! ## Arquitetura Web
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ Browser (HTMX)                                      │
//! ├─────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                           │
//! │  ├── GET  /          → página principal (Maud)      │
//! │  ├── GET  /status    → JSON: modelo pronto?         │
//! │  └── POST /analyze   → HTMX fragment (relatório)    │
//! ├─────────────────────────────────────────────────────┤
//! │ Static Assets (tower_http::ServeDir → /assets/)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`, `ModelReady`) |
//! | [`handlers`] | Handlers Axum para cada rota |
//! | [`templates`] | Templates Maud (HTML server-side) |

pub mod handlers;
pub mod state;
pub mod templates;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Cria o router Axum com todas as rotas da aplicação.
///
/// - **Página HTML**: `/`
/// - **API JSON**: `/status`
/// - **HTMX fragment**: `/analyze`
/// - **Estáticos**: `/assets/*` → diretório `assets/`
///
/// O estado `AppState` é compartilhado entre todos os handlers via
/// extrator `State<AppState>` do Axum.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/status", get(handlers::model_status))
        .route("/analyze", post(handlers::analyze))
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state(state)
}
