//! # Analisador — Ponto de Entrada da Análise
//!
//! O [`EmotionAnalyzer`] amarra a pipeline completa atrás de uma única
//! operação: `analyze(texto) → (relatório, visualização)`.
//!
//! ```text
//! analyze(text)
//!   ├── EmotionClassifier::detect()   → mapeamento fundido
//!   ├── report::compose()             → relatório textual
//!   └── chart::render()               → data URI PNG
//! ```
//!
//! Sem resultado parcial: ou o par completo relatório+gráfico é
//! produzido, ou a chamada inteira falha (falha do modelo propaga).

use std::sync::Arc;

use anyhow::Result;

use crate::chart;
use crate::classifier::EmotionClassifier;
use crate::lexicon::Lexicon;
use crate::report;

/// Resultado transiente de uma análise — retornado uma vez, nunca
/// armazenado.
pub struct AnalysisResult {
    /// Relatório textual completo (blocos por emoção + conclusão).
    pub report: String,
    /// Gráfico de barras como data URI PNG base64.
    pub chart: String,
}

/// Analisador de emoções — léxico somente-leitura + pipeline de
/// classificação, construídos explicitamente na inicialização.
///
/// Imutável após criação; compartilhado entre requisições sem locking.
pub struct EmotionAnalyzer {
    lexicon: Arc<Lexicon>,
    classifier: EmotionClassifier,
}

impl EmotionAnalyzer {
    /// Cria o analisador a partir do léxico compartilhado e da pipeline.
    pub fn new(lexicon: Arc<Lexicon>, classifier: EmotionClassifier) -> Self {
        Self {
            lexicon,
            classifier,
        }
    }

    /// Analisa um texto: detecta emoções, compõe o relatório e renderiza
    /// o gráfico.
    ///
    /// Entrada vazia ou sem emoções produz o relatório neutro e um
    /// gráfico sem barras — nunca um erro. Falha do modelo externo
    /// propaga como erro desta única chamada.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let emotions = self.classifier.detect(&self.lexicon, text)?;

        let report = report::compose(&self.lexicon, &emotions);
        let chart = chart::render(&self.lexicon, &emotions)?;

        Ok(AnalysisResult { report, chart })
    }
}
