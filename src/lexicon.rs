//! # Léxico de Emoções — A Tabela Estática de Metadados
//!
//! Este módulo define o [`Lexicon`]: a tabela imutável que mapeia cada
//! emoção canônica aos seus metadados — emoções subjacentes, recomendação,
//! polaridade e palavras-chave de disparo.
//!
//! ## Estrutura de uma Entrada
//!
//! ```text
//! "joy" ──┬── underlying:     ["Contentment", "Pleasure", "Delight", "Happiness"]
//!         ├── recommendation: "Savor this positive feeling!"
//!         ├── polarity:       Positive
//!         └── keywords:       ["happy", "joy", "glad", "delighted"]
//! ```
//!
//! ## Ordem Importa
//!
//! As entradas são mantidas em um `Vec` (não em um `HashMap`) porque a
//! ordem de varredura do casamento lexical determina a ordem de detecção,
//! e a ordem de detecção determina a ordem do relatório final. Um
//! `HashMap` tornaria o relatório não-determinístico entre execuções.
//!
//! ## Entrada de Fallback
//!
//! Rótulos vindos do modelo que não existem no léxico (p.ex. "surprise",
//! "love") recebem a entrada genérica de
//! [`get_or_fallback()`](Lexicon::get_or_fallback) — polaridade neutra,
//! "Complex emotion". Nunca é um erro.

use std::fmt;

/// Polaridade de uma emoção — positiva, negativa ou neutra.
///
/// Substitui o sinal numérico (+1/-1/0) por um enum explícito.
/// Emoções neutras não entram nas listas de positivas/negativas
/// do relatório final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Emoção positiva (joy, focus).
    Positive,
    /// Emoção negativa (sadness, anxiety, fear, anger).
    Negative,
    /// Polaridade neutra — usada pela entrada de fallback.
    Neutral,
}

impl Polarity {
    /// Label textual usado no relatório ("Positive", "Negative", "Neutral").
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Positive => "Positive",
            Polarity::Negative => "Negative",
            Polarity::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uma entrada do léxico — metadados completos de uma emoção canônica.
#[derive(Clone, Debug)]
pub struct EmotionEntry {
    /// Nome canônico, minúsculo ("joy", "sadness", ...).
    pub name: &'static str,
    /// Emoções subjacentes, em ordem de exibição.
    pub underlying: &'static [&'static str],
    /// Recomendação específica para esta emoção.
    pub recommendation: &'static str,
    /// Polaridade da emoção.
    pub polarity: Polarity,
    /// Palavras-chave que disparam detecção lexical.
    pub keywords: &'static [&'static str],
}

/// Entrada genérica para rótulos desconhecidos do modelo.
///
/// Polaridade neutra — não entra nas listas positiva/negativa.
const FALLBACK: EmotionEntry = EmotionEntry {
    name: "",
    underlying: &["Complex emotion"],
    recommendation: "This feeling deserves reflection.",
    polarity: Polarity::Neutral,
    keywords: &[],
};

/// O léxico completo — seis emoções canônicas em ordem fixa.
///
/// Construído uma única vez na inicialização e compartilhado como
/// `Arc<Lexicon>` entre os handlers (configuração somente-leitura,
/// nunca mutada após a criação).
pub struct Lexicon {
    entries: Vec<EmotionEntry>,
}

impl Lexicon {
    /// Cria o léxico com as seis emoções canônicas.
    pub fn new() -> Self {
        let entries = vec![
            EmotionEntry {
                name: "joy",
                underlying: &["Contentment", "Pleasure", "Delight", "Happiness"],
                recommendation: "Savor this positive feeling!",
                polarity: Polarity::Positive,
                keywords: &["happy", "joy", "glad", "delighted"],
            },
            EmotionEntry {
                name: "sadness",
                underlying: &["Grief", "Loneliness", "Sorrow", "Melancholy"],
                recommendation: "It's okay to feel this way. Consider talking to someone.",
                polarity: Polarity::Negative,
                keywords: &["sad", "unhappy", "depressed", "miserable"],
            },
            EmotionEntry {
                name: "anxiety",
                underlying: &["Worry", "Unease", "Apprehension", "Nervousness"],
                recommendation: "Try box breathing (4-4-4-4) and focus on preparation.",
                polarity: Polarity::Negative,
                keywords: &["anxious", "nervous", "worried", "stressed"],
            },
            EmotionEntry {
                name: "fear",
                underlying: &["Dread", "Panic", "Terror", "Fright"],
                recommendation: "Practice grounding techniques to stay present.",
                polarity: Polarity::Negative,
                keywords: &["scared", "afraid", "fearful"],
            },
            EmotionEntry {
                name: "anger",
                underlying: &["Frustration", "Irritation", "Rage", "Resentment"],
                recommendation: "Take deep breaths before responding.",
                polarity: Polarity::Negative,
                keywords: &["angry", "mad", "furious"],
            },
            EmotionEntry {
                name: "focus",
                underlying: &["Concentration", "Attention", "Engagement"],
                recommendation: "Maintain this productive state with regular breaks.",
                polarity: Polarity::Positive,
                keywords: &["focused", "concentrating", "studying"],
            },
        ];

        Self { entries }
    }

    /// Busca uma entrada pelo nome canônico (minúsculo).
    ///
    /// Retorna `None` para rótulos desconhecidos — use
    /// [`get_or_fallback()`](Lexicon::get_or_fallback) quando o chamador
    /// precisa sempre de metadados.
    pub fn get(&self, name: &str) -> Option<&EmotionEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Busca uma entrada pelo nome, caindo na entrada genérica
    /// ("Complex emotion", polaridade neutra) para rótulos desconhecidos.
    pub fn get_or_fallback(&self, name: &str) -> &EmotionEntry {
        self.get(name).unwrap_or(&FALLBACK)
    }

    /// Itera sobre as entradas na ordem canônica do léxico.
    pub fn iter(&self) -> impl Iterator<Item = &EmotionEntry> {
        self.entries.iter()
    }

    /// Número de emoções no léxico.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` se o léxico está vazio (nunca acontece com `new()`).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_canonical_emotions() {
        let lex = Lexicon::new();
        assert_eq!(lex.len(), 6);
        let names: Vec<_> = lex.iter().map(|e| e.name).collect();
        assert_eq!(names, ["joy", "sadness", "anxiety", "fear", "anger", "focus"]);
    }

    #[test]
    fn known_lookup() {
        let lex = Lexicon::new();
        let joy = lex.get("joy").unwrap();
        assert_eq!(joy.polarity, Polarity::Positive);
        assert_eq!(joy.recommendation, "Savor this positive feeling!");
        assert!(joy.keywords.contains(&"happy"));
    }

    #[test]
    fn unknown_lookup_is_none() {
        let lex = Lexicon::new();
        assert!(lex.get("surprise").is_none());
    }

    #[test]
    fn fallback_is_neutral_complex_emotion() {
        let lex = Lexicon::new();
        let entry = lex.get_or_fallback("surprise");
        assert_eq!(entry.polarity, Polarity::Neutral);
        assert_eq!(entry.underlying, &["Complex emotion"]);
        assert_eq!(entry.recommendation, "This feeling deserves reflection.");
    }

    #[test]
    fn polarity_labels() {
        assert_eq!(Polarity::Positive.label(), "Positive");
        assert_eq!(Polarity::Negative.label(), "Negative");
        assert_eq!(Polarity::Neutral.label(), "Neutral");
    }
}
