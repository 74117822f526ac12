//! # Estado da Aplicação Web
//!
//! Define as structs de estado compartilhado entre todos os handlers Axum.
//!
//! ## Padrão de Inicialização em Duas Fases
//!
//! ```text
//! Fase 1 (imediata):      Fase 2 (background):
//! ┌────────────────┐      ┌─────────────────┐
//! │ AppState       │      │ ModelReady       │
//! │  ├── lexicon ✓ │      │  └── analyzer    │
//! │  └── model: ∅  │←─────│  (set via OnceLock)
//! └────────────────┘      └─────────────────┘
//!       ↓ Web server                ↓ async init
//!    disponível                  modelo pronto
//! ```

use std::sync::{Arc, OnceLock};

use crate::analyzer::EmotionAnalyzer;
use crate::lexicon::Lexicon;

/// Analisador completo, inicializado em background.
///
/// Só existe depois que o DistilBERT terminou de carregar; enquanto
/// isso, os handlers respondem com o fragmento de loading.
pub struct ModelReady {
    /// Analisador imutável, compartilhado entre requisições.
    pub analyzer: Arc<EmotionAnalyzer>,
}

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Analisador, preenchido em background via `OnceLock::set()`.
    pub model: Arc<OnceLock<ModelReady>>,
    /// Léxico somente-leitura, disponível desde o boot.
    pub lexicon: Arc<Lexicon>,
}
