//! # Handlers HTTP — Os Endpoints da Aplicação
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`]. Os handlers seguem o padrão
//! **HTMX fragment** — retornam fragmentos HTML (não páginas completas)
//! que o HTMX injeta no DOM via `hx-swap`.
//!
//! ## Padrão de Resposta
//!
//! | Handler | Método | Retorno | Uso |
//! |---------|--------|---------|-----|
//! | `index` | GET | HTML completo | Página principal (Maud) |
//! | `model_status` | GET | JSON | Polling de readiness |
//! | `analyze` | POST | HTMX fragment | Relatório + gráfico |
//!
//! ## Guarda de Model Ready
//!
//! `analyze` verifica `state.model.get()`:
//! - Se `Some(model)` → processa normalmente
//! - Se `None` → retorna fragmento "⏳ Model loading..."
//!
//! ## Falha do Modelo
//!
//! Uma falha do classificador externo vale só para aquela requisição:
//! o handler renderiza um fragmento de erro e o servidor continua
//! disponível para a próxima.

use std::time::Instant;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use maud::html;

use super::state::AppState;
use super::templates;

/// Resposta do endpoint `/status` — indica se o modelo está pronto.
#[derive(serde::Serialize)]
pub struct StatusResponse {
    /// `true` quando o DistilBERT terminou de carregar.
    pub ready: bool,
}

/// Dados do formulário de análise (campo `text` do form HTML).
#[derive(serde::Deserialize)]
pub struct AnalyzeForm {
    /// Texto do usuário descrevendo como se sente.
    pub text: String,
}

/// Converte Maud Markup em resposta Html<String> do Axum.
fn markup_to_html(m: maud::Markup) -> Html<String> {
    Html(m.into_string())
}

/// GET `/` — Página principal.
///
/// Renderiza a página completa usando [`templates::full_page()`].
pub async fn index() -> Html<String> {
    markup_to_html(templates::full_page())
}

/// GET `/status` — Verifica se o modelo está pronto.
///
/// Retorna JSON `{ "ready": true/false }`.
/// O frontend faz polling deste endpoint a cada 3s durante o loading.
pub async fn model_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ready: state.model.get().is_some(),
    })
}

/// POST `/analyze` — Analisa o texto e retorna HTMX fragment.
///
/// ## Fluxo
///
/// ```text
/// 1. Lê o campo "text" do form (trim)
/// 2. Verifica se modelo está pronto (senão: loading fragment)
/// 3. spawn_blocking: analyzer.analyze() — forward pass é CPU-bound
/// 4. Renderiza fragmento com relatório <pre> + <img> do gráfico
/// ```
///
/// Entrada vazia é entrada válida — segue o fluxo normal e produz o
/// relatório neutro com gráfico sem barras.
pub async fn analyze(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<AnalyzeForm>,
) -> Html<String> {
    let user_text = form.text.trim().to_string();

    // Guarda de model ready
    let Some(model) = state.model.get() else {
        return markup_to_html(html! {
            div class="result-block loading" {
                div class="result-title" { "System" }
                div class="result-body" {
                    "⏳ Model loading, try again in a few seconds..."
                }
            }
        });
    };

    // Forward pass do DistilBERT é CPU-bound — roda fora do executor async
    let t0 = Instant::now();
    let analyzer = model.analyzer.clone();
    let input = user_text.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&input)).await;
    let elapsed_ms = t0.elapsed().as_millis() as u64;

    // JoinError (panic na task) é tratado como falha da requisição
    let result = match result {
        Ok(r) => r,
        Err(e) => Err(anyhow::anyhow!("analysis task failed: {}", e)),
    };

    markup_to_html(match result {
        Ok(analysis) => {
            tracing::info!(elapsed_ms, "Analysis complete");
            html! {
                @if !user_text.is_empty() {
                    div class="result-block input-echo" {
                        div class="result-title" { "You" }
                        div class="result-body" { (user_text) }
                    }
                }
                div class="result-block breakdown" {
                    div class="result-title" { "Emotion Breakdown" }
                    pre class="report-text" { (analysis.report) }
                }
                div class="result-block intensity" {
                    div class="result-title" { "Emotion Intensity" }
                    img class="chart-img" src=(analysis.chart) alt="Emotion intensity bar chart";
                }
                div class="result-block metrics" {
                    div class="result-body metrics-line" {
                        (format!("\u{26a1} {} ms", elapsed_ms))
                    }
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            html! {
                @if !user_text.is_empty() {
                    div class="result-block input-echo" {
                        div class="result-title" { "You" }
                        div class="result-body" { (user_text) }
                    }
                }
                div class="result-block error" {
                    div class="result-title" { "Error" }
                    div class="result-body" { (format!("Analysis failed: {}", e)) }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, OnceLock};

    use crate::analyzer::EmotionAnalyzer;
    use crate::classifier::{EmotionClassifier, ModelError, ScoredLabel, TextClassifier};
    use crate::lexicon::Lexicon;
    use crate::web::state::ModelReady;

    /// Stub sem detecções — toda entrada produz o relatório neutro.
    struct StubClassifier;

    impl TextClassifier for StubClassifier {
        fn classify(&self, _text: &str) -> Result<Vec<ScoredLabel>, ModelError> {
            Ok(Vec::new())
        }
    }

    fn ready_state() -> AppState {
        let lexicon = Arc::new(Lexicon::new());
        let analyzer = Arc::new(EmotionAnalyzer::new(
            lexicon.clone(),
            EmotionClassifier::new(Arc::new(StubClassifier)),
        ));
        let model = Arc::new(OnceLock::new());
        let _ = model.set(ModelReady { analyzer });
        AppState { model, lexicon }
    }

    #[tokio::test]
    async fn empty_text_produces_neutral_report_fragment() {
        let Html(body) = analyze(
            State(ready_state()),
            axum::Form(AnalyzeForm {
                text: "   ".to_string(),
            }),
        )
        .await;

        assert!(body.contains("The emotional tone is neutral."));
        assert!(body.contains("data:image/png;base64,"));
        // Sem texto do usuário, não há bloco de eco
        assert!(!body.contains("input-echo"));
    }

    #[tokio::test]
    async fn loading_fragment_before_model_ready() {
        let state = AppState {
            model: Arc::new(OnceLock::new()),
            lexicon: Arc::new(Lexicon::new()),
        };
        let Html(body) = analyze(
            State(state),
            axum::Form(AnalyzeForm {
                text: "I am happy".to_string(),
            }),
        )
        .await;

        assert!(body.contains("Model loading"));
    }

    #[tokio::test]
    async fn status_reflects_model_readiness() {
        let Json(status) = model_status(State(ready_state())).await;
        assert!(status.ready);

        let empty = AppState {
            model: Arc::new(OnceLock::new()),
            lexicon: Arc::new(Lexicon::new()),
        };
        let Json(status) = model_status(State(empty)).await;
        assert!(!status.ready);
    }
}
