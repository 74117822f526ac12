//! # Detecção Lexical — Casamento de Palavras-Chave
//!
//! Varre o texto de entrada (minusculizado) contra os conjuntos de
//! palavras-chave do léxico, atribuindo uma confiança por emoção:
//!
//! | Tipo de match | Confiança |
//! |---------------|-----------|
//! | Token isolado (split por whitespace, igualdade exata) | 0.9 |
//! | Apenas substring | 0.7 |
//!
//! Um match de token também é um match de substring, então a regra é:
//! substring presente → no mínimo 0.7; se também aparece como token
//! isolado → 0.9. Se várias palavras-chave da mesma emoção casam, vale
//! a maior confiança observada.
//!
//! Atenção à tokenização: em "I feel happy." o token é `happy.` (com
//! ponto), que não é igual a `happy` — o match fica em 0.7. Isso é
//! intencional: o split é por whitespace puro, sem remoção de pontuação.

use crate::lexicon::Lexicon;

/// Confiança para palavra-chave presente como token isolado.
pub const WHOLE_WORD_CONFIDENCE: f32 = 0.9;
/// Confiança para palavra-chave presente apenas como substring.
pub const SUBSTRING_CONFIDENCE: f32 = 0.7;

/// Detecta emoções por palavras-chave no texto já minusculizado.
///
/// Retorna pares `(nome, confiança)` na ordem canônica do léxico —
/// essa ordem é a ordem de detecção que o relatório preserva. Só
/// aparecem emoções com pelo menos um match; entrada vazia produz
/// saída vazia. Nunca falha.
pub fn match_keywords(lexicon: &Lexicon, text_lower: &str) -> Vec<(String, f32)> {
    let tokens: Vec<&str> = text_lower.split_whitespace().collect();

    let mut hits = Vec::new();
    for entry in lexicon.iter() {
        let mut best: Option<f32> = None;
        for keyword in entry.keywords {
            if !text_lower.contains(keyword) {
                continue;
            }
            let confidence = if tokens.iter().any(|tok| tok == keyword) {
                WHOLE_WORD_CONFIDENCE
            } else {
                SUBSTRING_CONFIDENCE
            };
            if confidence > best.unwrap_or(0.0) {
                best = Some(confidence);
            }
        }
        if let Some(confidence) = best {
            tracing::debug!(emotion = entry.name, confidence, "Keyword hit");
            hits.push((entry.name.to_string(), confidence));
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &str) -> Vec<(String, f32)> {
        match_keywords(&Lexicon::new(), &text.to_lowercase())
    }

    #[test]
    fn whole_word_scores_high() {
        let hits = matches("I am happy today");
        assert_eq!(hits, vec![("joy".to_string(), 0.9)]);
    }

    #[test]
    fn substring_scores_low() {
        // "happy." is not a whitespace token equal to "happy"
        let hits = matches("I feel happy.");
        assert_eq!(hits, vec![("joy".to_string(), 0.7)]);
    }

    #[test]
    fn substring_triggers_other_emotions_too() {
        // "unhappy" is a sadness keyword (whole word, 0.9) AND contains
        // "happy" as a substring (joy, 0.7) — both fire
        let hits = matches("I am unhappy");
        assert_eq!(
            hits,
            vec![("joy".to_string(), 0.7), ("sadness".to_string(), 0.9)]
        );
    }

    #[test]
    fn max_confidence_across_keywords() {
        // "glad" whole word (0.9) should win over "delighted" substring
        // inside "delightedly" (0.7) for the same emotion
        let hits = matches("glad and delightedly");
        assert_eq!(hits, vec![("joy".to_string(), 0.9)]);
    }

    #[test]
    fn multiple_emotions_in_lexicon_order() {
        let hits = matches("I am happy but at the same time anxious");
        let names: Vec<_> = hits.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["joy", "anxiety"]);
        assert!(hits.iter().all(|(_, c)| *c == 0.9));
    }

    #[test]
    fn case_insensitive_via_lowering() {
        let hits = matches("I AM FURIOUS");
        assert_eq!(hits, vec![("anger".to_string(), 0.9)]);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(matches("").is_empty());
    }

    #[test]
    fn no_keywords_no_hits() {
        assert!(matches("the weather is mild").is_empty());
    }
}
