//! # Pipeline de Classificação — Léxico + Modelo
//!
//! Este módulo orquestra a detecção de emoções. O [`EmotionClassifier`]
//! é o componente central que:
//!
//! 1. **Normaliza** o texto de entrada (NFC)
//! 2. **Casa palavras-chave** do léxico (fase lexical, roda primeiro)
//! 3. **Invoca o modelo** DistilBERT no texto completo
//! 4. **Funde** as duas fontes em um único mapeamento ordenado
//!
//! ## Fluxo de Processamento
//!
//! ```text
//! Texto do usuário
//!   ├── 1. NFC normalize (Unicode)
//!   ├── 2. Fase lexical: keywords → (emoção, 0.9 | 0.7)
//!   ├── 3. Fase do modelo: classify() → (rótulo, score)
//!   │       └── filtro: score > threshold (default 0.1)
//!   └── 4. Fusão: entrada do modelo só entra se o nome
//!           ainda não foi detectado pelo léxico
//! ```
//!
//! ## Regra de Precedência
//!
//! Detecção lexical SEMPRE vence detecção do modelo para o mesmo nome —
//! sem média, sem max-merge entre fontes. A ordem de iteração do
//! resultado é: entradas lexicais na ordem de detecção, seguidas das
//! entradas do modelo na ordem retornada por ele (score decrescente).
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`keywords`] | Casamento lexical com confiança 0.9/0.7 |
//! | [`model`] | Trait [`TextClassifier`] + adaptador DistilBERT |

/// Sub-módulo do casamento lexical de palavras-chave.
pub mod keywords;

/// Sub-módulo do adaptador do modelo de classificação.
pub mod model;

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::lexicon::Lexicon;

pub use model::{EmotionModel, ModelError, ScoredLabel, TextClassifier};

/// Threshold default para aceitar rótulos vindos do modelo.
///
/// Valor deliberadamente baixo — emoções secundárias aparecem no
/// relatório. Tunável via [`EmotionClassifier::with_threshold`].
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.1;

/// Fonte de uma detecção — lexical ou modelo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionSource {
    /// Detectada por palavra-chave do léxico.
    Keyword,
    /// Detectada pelo modelo de classificação.
    Model,
}

/// Uma emoção detectada, com confiança e fonte.
///
/// Produzida fresca a cada chamada de análise; a ordem de inserção no
/// `Vec` resultante é a ordem do relatório (primeira-detectada primeiro,
/// nunca ordenado por confiança).
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedEmotion {
    /// Nome da emoção, minúsculo ("joy", "surprise", ...).
    pub name: String,
    /// Confiança em [0, 1] — 0.9/0.7 para lexical, score softmax para modelo.
    pub confidence: f32,
    /// Fonte da detecção.
    pub source: DetectionSource,
}

/// Pipeline de classificação de emoções — léxico + modelo + fusão.
///
/// Imutável (`&self`) após criação — thread-safe para uso concorrente.
/// O modelo fica atrás do trait [`TextClassifier`] para que os testes
/// usem um stub determinístico.
pub struct EmotionClassifier {
    /// Classificador externo (DistilBERT em produção, stub nos testes).
    model: Arc<dyn TextClassifier>,
    /// Score mínimo para aceitar um rótulo do modelo.
    score_threshold: f32,
}

impl EmotionClassifier {
    /// Cria a pipeline com o threshold default (0.1).
    pub fn new(model: Arc<dyn TextClassifier>) -> Self {
        Self {
            model,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }

    /// Ajusta o threshold de aceitação de rótulos do modelo.
    pub fn with_threshold(mut self, score_threshold: f32) -> Self {
        self.score_threshold = score_threshold;
        self
    }

    /// Detecta as emoções de um texto, fundindo léxico e modelo.
    ///
    /// Este é o **método principal** da pipeline — recebe texto bruto e
    /// retorna o mapeamento fundido, na ordem de detecção.
    ///
    /// ## Passos
    ///
    /// 1. **NFC Normalize** — forma canônica Unicode
    /// 2. **Fase lexical** — roda primeiro; suas entradas são protegidas
    ///    contra sobrescrita
    /// 3. **Fase do modelo** — o texto completo (não minusculizado) vai
    ///    ao classificador; rótulos com score acima do threshold entram
    ///    apenas se o nome ainda não está presente
    ///
    /// # Erros
    ///
    /// Propaga [`ModelError`] se o classificador externo falhar — a falha
    /// NÃO é capturada aqui; vale para aquela única requisição.
    pub fn detect(
        &self,
        lexicon: &Lexicon,
        text: &str,
    ) -> Result<Vec<DetectedEmotion>, ModelError> {
        // Normalização Unicode NFC — representação consistente de
        // caracteres compostos antes de qualquer matching
        let text: String = text.nfc().collect();
        let text_lower = text.to_lowercase();

        // ─── Fase 1: detecção lexical ─────────────────────────────
        let mut emotions: Vec<DetectedEmotion> = keywords::match_keywords(lexicon, &text_lower)
            .into_iter()
            .map(|(name, confidence)| DetectedEmotion {
                name,
                confidence,
                source: DetectionSource::Keyword,
            })
            .collect();

        // ─── Fase 2: detecção pelo modelo ─────────────────────────
        // O texto bruto vai ao modelo; rótulos duplicados são descartados
        // (primeira-escrita-vence entre as fases)
        let scored = self.model.classify(&text)?;
        for ScoredLabel { label, score } in scored {
            let name = label.to_lowercase();
            if score > self.score_threshold && !emotions.iter().any(|e| e.name == name) {
                emotions.push(DetectedEmotion {
                    name,
                    confidence: score,
                    source: DetectionSource::Model,
                });
            }
        }

        tracing::info!(
            count = emotions.len(),
            emotions = ?emotions.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            "Emotions detected"
        );
        Ok(emotions)
    }
}
