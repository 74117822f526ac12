//! # Compositor do Relatório — Narrativa e Recomendação Final
//!
//! Percorre o mapeamento fundido de emoções (na ordem de detecção) e
//! monta o relatório textual: um bloco por emoção, seguido do bloco
//! de conclusão com a recomendação final.
//!
//! ## Formato de Saída
//!
//! ```text
//! Emotion 1: Joy (Positive, Confidence: 0.90)
//! Underlying: Contentment, Pleasure, Delight, Happiness
//! Recommendation: Savor this positive feeling!
//!
//! Emotion 2: Anxiety (Negative, Confidence: 0.90)
//! Underlying: Worry, Unease, Apprehension, Nervousness
//! Recommendation: Try box breathing (4-4-4-4) and focus on preparation.
//!
//!
//! === Final Analysis ===
//! Positive emotions: joy
//! Negative emotions: anxiety
//!
//! Final Recommendation: Channel your anxiety into constructive planning.
//! ```
//!
//! ## Tabela de Regras
//!
//! A recomendação final é escolhida por uma tabela ordenada de pares
//! (predicado, texto) avaliada em ordem — primeira regra que casa vence.
//! A última regra é incondicional, então a tabela é total: regras
//! declarativas avaliadas sobre o estado, sem condicionais aninhados.
//!
//! Rótulos desconhecidos do modelo recebem a entrada de fallback do
//! léxico (polaridade neutra) e não entram em nenhuma das listas.

use crate::classifier::DetectedEmotion;
use crate::lexicon::{Lexicon, Polarity};

/// Listas de nomes de emoções detectadas, separadas por polaridade.
///
/// Derivadas da polaridade do léxico — não da fonte de detecção.
/// Emoções neutras (fallback) não entram em nenhuma lista.
#[derive(Debug, Default, PartialEq)]
pub struct PolarityBuckets {
    /// Nomes das emoções positivas, na ordem de detecção.
    pub positive: Vec<String>,
    /// Nomes das emoções negativas, na ordem de detecção.
    pub negative: Vec<String>,
}

/// Separa as emoções detectadas em positivas/negativas pela polaridade
/// do léxico.
pub fn polarity_buckets(lexicon: &Lexicon, emotions: &[DetectedEmotion]) -> PolarityBuckets {
    let mut buckets = PolarityBuckets::default();
    for emotion in emotions {
        match lexicon.get_or_fallback(&emotion.name).polarity {
            Polarity::Positive => buckets.positive.push(emotion.name.clone()),
            Polarity::Negative => buckets.negative.push(emotion.name.clone()),
            Polarity::Neutral => {}
        }
    }
    buckets
}

/// Escolhe a recomendação final pela tabela ordenada de regras.
///
/// Primeira regra cujo predicado casa vence; a última é incondicional,
/// garantindo que a tabela é total.
pub fn final_recommendation(buckets: &PolarityBuckets) -> &'static str {
    let rules: &[(fn(&PolarityBuckets) -> bool, &'static str)] = &[
        (
            |b| b.positive.iter().any(|e| e == "focus") && b.negative.is_empty(),
            "Great focus! Maintain this productive state.",
        ),
        (
            |b| {
                !b.positive.is_empty()
                    && !b.negative.is_empty()
                    && b.negative.iter().any(|e| e == "anxiety")
            },
            "Channel your anxiety into constructive planning.",
        ),
        (
            |b| !b.positive.is_empty() && !b.negative.is_empty(),
            "Balance these mixed emotions with mindful reflection.",
        ),
        (
            |b| !b.positive.is_empty(),
            "Enjoy these positive feelings!",
        ),
        (
            |b| !b.negative.is_empty(),
            "Consider discussing these feelings with someone.",
        ),
        (|_| true, "The emotional tone is neutral."),
    ];

    // A última regra é incondicional — unwrap nunca dispara
    rules
        .iter()
        .find(|(predicate, _)| predicate(buckets))
        .map(|(_, text)| *text)
        .unwrap_or("The emotional tone is neutral.")
}

/// Capitaliza no estilo do relatório: primeira letra maiúscula, resto
/// minúsculo ("joy" → "Joy", "SURPRISE" → "Surprise").
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Monta o relatório completo: blocos por emoção + conclusão.
///
/// Para mapeamento vazio, o relatório é apenas o bloco de conclusão
/// com a recomendação neutra — nunca um erro.
pub fn compose(lexicon: &Lexicon, emotions: &[DetectedEmotion]) -> String {
    let mut details = String::new();

    for (i, emotion) in emotions.iter().enumerate() {
        let entry = lexicon.get_or_fallback(&emotion.name);
        details.push_str(&format!(
            "Emotion {}: {} ({}, Confidence: {:.2})\n",
            i + 1,
            capitalize(&emotion.name),
            entry.polarity.label(),
            emotion.confidence,
        ));
        details.push_str(&format!("Underlying: {}\n", entry.underlying.join(", ")));
        details.push_str(&format!("Recommendation: {}\n\n", entry.recommendation));
    }

    let buckets = polarity_buckets(lexicon, emotions);

    let mut conclusion = String::from("\n=== Final Analysis ===\n");
    if !buckets.positive.is_empty() {
        conclusion.push_str(&format!(
            "Positive emotions: {}\n",
            buckets.positive.join(", ")
        ));
    }
    if !buckets.negative.is_empty() {
        conclusion.push_str(&format!(
            "Negative emotions: {}\n",
            buckets.negative.join(", ")
        ));
    }
    conclusion.push_str(&format!(
        "\nFinal Recommendation: {}",
        final_recommendation(&buckets)
    ));

    details + &conclusion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::DetectionSource;

    fn detected(name: &str, confidence: f32) -> DetectedEmotion {
        DetectedEmotion {
            name: name.to_string(),
            confidence,
            source: DetectionSource::Keyword,
        }
    }

    fn buckets(positive: &[&str], negative: &[&str]) -> PolarityBuckets {
        PolarityBuckets {
            positive: positive.iter().map(|s| s.to_string()).collect(),
            negative: negative.iter().map(|s| s.to_string()).collect(),
        }
    }

    // ─── final_recommendation rule table ───────────────────────

    #[test]
    fn rule_focus_alone() {
        assert_eq!(
            final_recommendation(&buckets(&["focus"], &[])),
            "Great focus! Maintain this productive state."
        );
    }

    #[test]
    fn rule_mixed_with_anxiety() {
        assert_eq!(
            final_recommendation(&buckets(&["joy"], &["anxiety"])),
            "Channel your anxiety into constructive planning."
        );
    }

    #[test]
    fn rule_mixed_without_anxiety() {
        assert_eq!(
            final_recommendation(&buckets(&["focus"], &["fear"])),
            "Balance these mixed emotions with mindful reflection."
        );
    }

    #[test]
    fn rule_positive_only() {
        assert_eq!(
            final_recommendation(&buckets(&["joy"], &[])),
            "Enjoy these positive feelings!"
        );
    }

    #[test]
    fn rule_negative_only() {
        assert_eq!(
            final_recommendation(&buckets(&[], &["sadness"])),
            "Consider discussing these feelings with someone."
        );
    }

    #[test]
    fn rule_both_empty() {
        assert_eq!(
            final_recommendation(&buckets(&[], &[])),
            "The emotional tone is neutral."
        );
    }

    #[test]
    fn focus_with_negatives_is_not_rule_one() {
        // "focus" positive but negatives present — rule 1 must not fire
        assert_eq!(
            final_recommendation(&buckets(&["focus"], &["anxiety"])),
            "Channel your anxiety into constructive planning."
        );
    }

    #[test]
    fn table_is_total() {
        // Every (positive, negative) emptiness combination selects a rule
        for positive in [&[][..], &["joy"][..], &["focus"][..]] {
            for negative in [&[][..], &["fear"][..], &["anxiety"][..]] {
                let rec = final_recommendation(&buckets(positive, negative));
                assert!(!rec.is_empty());
            }
        }
    }

    // ─── polarity buckets ──────────────────────────────────────

    #[test]
    fn neutral_fallback_joins_neither_bucket() {
        let lex = Lexicon::new();
        let emotions = vec![detected("joy", 0.9), detected("surprise", 0.4)];
        let b = polarity_buckets(&lex, &emotions);
        assert_eq!(b.positive, vec!["joy"]);
        assert!(b.negative.is_empty());
    }

    // ─── compose ───────────────────────────────────────────────

    #[test]
    fn per_emotion_block_format() {
        let lex = Lexicon::new();
        let report = compose(&lex, &[detected("joy", 0.9)]);
        assert!(report.starts_with(
            "Emotion 1: Joy (Positive, Confidence: 0.90)\n\
             Underlying: Contentment, Pleasure, Delight, Happiness\n\
             Recommendation: Savor this positive feeling!\n\n"
        ));
    }

    #[test]
    fn scenario_happy_and_anxious() {
        let lex = Lexicon::new();
        let emotions = vec![detected("joy", 0.9), detected("anxiety", 0.9)];
        let report = compose(&lex, &emotions);
        assert!(report.contains("Positive emotions: joy"));
        assert!(report.contains("Negative emotions: anxiety"));
        assert!(report.ends_with(
            "Final Recommendation: Channel your anxiety into constructive planning."
        ));
    }

    #[test]
    fn scenario_focused_but_afraid() {
        let lex = Lexicon::new();
        let emotions = vec![detected("focus", 0.9), detected("fear", 0.9)];
        let report = compose(&lex, &emotions);
        assert!(report.contains("Positive emotions: focus"));
        assert!(report.contains("Negative emotions: fear"));
        assert!(report.ends_with(
            "Final Recommendation: Balance these mixed emotions with mindful reflection."
        ));
    }

    #[test]
    fn scenario_sad_and_lonely() {
        let lex = Lexicon::new();
        let report = compose(&lex, &[detected("sadness", 0.9)]);
        assert!(report.contains("Emotion 1: Sadness (Negative, Confidence: 0.90)"));
        assert!(report.contains("Negative emotions: sadness"));
        assert!(!report.contains("Positive emotions:"));
        assert!(report.ends_with(
            "Final Recommendation: Consider discussing these feelings with someone."
        ));
    }

    #[test]
    fn scenario_nothing_detected() {
        let lex = Lexicon::new();
        let report = compose(&lex, &[]);
        assert_eq!(
            report,
            "\n=== Final Analysis ===\n\nFinal Recommendation: The emotional tone is neutral."
        );
    }

    #[test]
    fn unknown_label_uses_fallback_metadata() {
        let lex = Lexicon::new();
        let report = compose(&lex, &[detected("surprise", 0.42)]);
        assert!(report.contains("Emotion 1: Surprise (Neutral, Confidence: 0.42)"));
        assert!(report.contains("Underlying: Complex emotion"));
        assert!(report.contains("Recommendation: This feeling deserves reflection."));
        assert!(report.ends_with("Final Recommendation: The emotional tone is neutral."));
    }

    #[test]
    fn exactly_one_final_recommendation_line() {
        let lex = Lexicon::new();
        for emotions in [
            vec![],
            vec![detected("joy", 0.9)],
            vec![detected("joy", 0.9), detected("anxiety", 0.7)],
        ] {
            let report = compose(&lex, &emotions);
            assert_eq!(report.matches("Final Recommendation:").count(), 1);
            assert!(report.matches("Positive emotions:").count() <= 1);
            assert!(report.matches("Negative emotions:").count() <= 1);
        }
    }

    #[test]
    fn blocks_preserve_detection_order() {
        let lex = Lexicon::new();
        // Lower confidence first — order must NOT be resorted by score
        let emotions = vec![detected("anger", 0.7), detected("joy", 0.9)];
        let report = compose(&lex, &emotions);
        let anger_pos = report.find("Emotion 1: Anger").unwrap();
        let joy_pos = report.find("Emotion 2: Joy").unwrap();
        assert!(anger_pos < joy_pos);
    }
}
