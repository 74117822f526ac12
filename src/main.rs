#![allow(rustdoc::broken_intra_doc_links, rustdoc::invalid_html_tags)]
//! # EmoBot — Emotion Analysis
//!
//! **Ponto de entrada principal** da aplicação EmoBot.
//!
//! Este arquivo inicializa todos os componentes do sistema e inicia o
//! servidor web. A arquitetura segue um padrão de inicialização em duas
//! fases:
//!
//! 1. **Fase imediata**: O servidor web (axum) é iniciado e começa a
//!    aceitar conexões em `http://localhost:3000` instantaneamente
//! 2. **Fase background**: O DistilBERT de emoções (~250MB) é carregado
//!    em uma thread separada via `tokio::task::spawn_blocking`, sem
//!    bloquear o servidor
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Constrói o Lexicon (tabela estática de emoções)
//!   ├── Monta AppState e Router
//!   ├── Inicia servidor TCP (porta 3000)
//!   └── Spawn background:
//!       ├── Carrega DistilBERT via HuggingFace Hub
//!       ├── Cria EmotionClassifier
//!       ├── Cria EmotionAnalyzer
//!       └── Publica em OnceLock (ModelReady)
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Executar com logs detalhados
//! RUST_LOG=debug cargo run
//!
//! # O servidor estará disponível em http://localhost:3000
//! ```

/// Módulo `analyzer` — ponto de entrada da análise (relatório + gráfico).
mod analyzer;

/// Módulo `chart` — gráfico de barras via plotters → PNG base64.
mod chart;

/// Módulo `classifier` — pipeline léxico + modelo + fusão.
mod classifier;

/// Módulo `lexicon` — tabela estática de metadados de emoções.
mod lexicon;

/// Módulo `report` — compositor do relatório e tabela de recomendações.
mod report;

/// Módulo `web` — servidor web axum, handlers HTTP e templates.
mod web;

use std::sync::{Arc, OnceLock};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::analyzer::EmotionAnalyzer;
use crate::classifier::{EmotionClassifier, EmotionModel};
use crate::lexicon::Lexicon;
use crate::web::state::{AppState, ModelReady};

/// Função principal assíncrona do EmoBot.
///
/// Inicializa o sistema em duas fases:
/// - **Fase 1 (síncrona)**: Constrói léxico, cria estado, inicia servidor
/// - **Fase 2 (background)**: Carrega o modelo e cria o analisador
///
/// O servidor fica acessível imediatamente enquanto o modelo carrega em
/// background; até lá, `/analyze` responde com o fragmento de loading.
///
/// # Erros
///
/// Retorna erro se não conseguir fazer bind na porta 3000 ou se o
/// servidor axum falhar durante execução.
#[tokio::main]
async fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🤖 EmoBot — Starting...");

    // Léxico somente-leitura — construído uma vez, compartilhado por Arc.
    let lexicon = Arc::new(Lexicon::new());

    // OnceLock para o modelo — preenchido quando terminar de carregar.
    // Enquanto estiver vazio, o servidor responde "modelo carregando...".
    let model = Arc::new(OnceLock::new());

    // Estado compartilhado — passado para todos os handlers via axum State.
    let state = AppState {
        model: model.clone(),
        lexicon: lexicon.clone(),
    };

    let app = web::create_router(state);

    // Inicia o servidor TCP — acessível IMEDIATAMENTE,
    // mesmo antes do modelo terminar de carregar.
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running at http://localhost:3000");

    // Carrega o DistilBERT em uma thread de background.
    // spawn_blocking porque o carregamento é I/O + CPU intensivo e
    // bloquearia o runtime tokio se fosse feito inline.
    tokio::task::spawn_blocking(move || {
        tracing::info!("Loading emotion model (first run downloads ~250MB)...");

        let emotion_model = match EmotionModel::load() {
            Ok(m) => m,
            Err(e) => {
                tracing::error!("Failed to load emotion model: {}", e);
                return;
            }
        };
        tracing::info!("Model loaded!");

        let classifier = EmotionClassifier::new(Arc::new(emotion_model));
        let analyzer = Arc::new(EmotionAnalyzer::new(lexicon, classifier));

        // Publica no OnceLock — a partir deste ponto, os handlers que
        // verificam state.model.get() saberão que está pronto.
        let _ = model.set(ModelReady { analyzer });
        tracing::info!("✅ System ready!");
    });

    // Inicia o servidor axum — bloqueia até o processo ser encerrado.
    axum::serve(listener, app).await?;

    Ok(())
}
