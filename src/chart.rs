//! # Visualização — Gráfico de Barras Horizontais
//!
//! Renderiza o mapeamento fundido de emoções como um gráfico de barras
//! horizontais: uma barra por emoção (na ordem de detecção), comprimento
//! igual à confiança, eixo x fixo em [0, 1].
//!
//! ## Cores
//!
//! | Polaridade no léxico | Cor |
//! |----------------------|-----|
//! | Positiva | verde `#4CAF50` |
//! | Negativa | vermelho `#F44336` |
//! | Desconhecida | cinza `#9E9E9E` |
//!
//! ## Pipeline de Renderização
//!
//! ```text
//! emoções → plotters (BitMapBackend em buffer RGB)
//!              ↓
//!          PNG (image::PngEncoder)
//!              ↓
//!          data URI base64 → <img src="data:image/png;base64,...">
//! ```
//!
//! Mapeamento vazio renderiza um gráfico sem barras — nunca um erro.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;

use crate::classifier::DetectedEmotion;
use crate::lexicon::{Lexicon, Polarity};

/// Dimensões do gráfico em pixels.
const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;

/// Verde para emoções positivas (#4CAF50).
const POSITIVE_COLOR: RGBColor = RGBColor(0x4c, 0xaf, 0x50);
/// Vermelho para emoções negativas (#F44336).
const NEGATIVE_COLOR: RGBColor = RGBColor(0xf4, 0x43, 0x36);
/// Cinza para rótulos fora do léxico (#9E9E9E).
const UNKNOWN_COLOR: RGBColor = RGBColor(0x9e, 0x9e, 0x9e);

/// Cor da barra de uma emoção, pela polaridade do léxico.
///
/// Rótulos desconhecidos ficam cinza independente de qualquer
/// polaridade inferida.
pub fn bar_color(lexicon: &Lexicon, name: &str) -> RGBColor {
    match lexicon.get(name).map(|e| e.polarity) {
        Some(Polarity::Positive) => POSITIVE_COLOR,
        Some(Polarity::Negative) => NEGATIVE_COLOR,
        Some(Polarity::Neutral) | None => UNKNOWN_COLOR,
    }
}

/// Label de um ponto do eixo y segmentado: o centro do segmento `i`
/// recebe o nome da emoção `i`; qualquer outro ponto fica sem label.
fn segment_label(names: &[&str], seg: &SegmentValue<i32>) -> String {
    match seg {
        SegmentValue::CenterOf(i) if *i >= 0 => names
            .get(*i as usize)
            .map(|n| n.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Renderiza o gráfico de barras e retorna um data URI PNG.
///
/// O buffer RGB é desenhado pelo plotters, codificado em PNG pelo
/// crate `image`, e embutido como base64 — pronto para um `<img>`.
pub fn render(lexicon: &Lexicon, emotions: &[DetectedEmotion]) -> Result<String> {
    let names: Vec<&str> = emotions.iter().map(|e| e.name.as_str()).collect();
    // Pelo menos um segmento para que o range y nunca seja degenerado
    let rows = emotions.len().max(1) as i32;

    let mut rgb = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Emotion Analysis", ("sans-serif", 32))
            .margin(20)
            .set_label_area_size(LabelAreaPosition::Left, 110)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            // Eixo y segmentado: um segmento inteiro por emoção, com o
            // nome centralizado no segmento — nunca na borda da barra
            .build_cartesian_2d(0f32..1f32, (0..rows).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Confidence Score")
            .y_labels(rows as usize + 1)
            .y_label_formatter(&|seg| segment_label(&names, seg))
            .label_style(("sans-serif", 16))
            .draw()?;

        for (i, emotion) in emotions.iter().enumerate() {
            let color = bar_color(lexicon, &emotion.name);
            let length = emotion.confidence.clamp(0.0, 1.0);
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(i as i32)),
                    (length, SegmentValue::Exact(i as i32 + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            chart.draw_series(std::iter::once(bar))?;
        }

        root.present()?;
    }

    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder.write_image(&rgb, CHART_WIDTH, CHART_HEIGHT, ExtendedColorType::Rgb8)?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
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

    #[test]
    fn every_segment_center_gets_its_emotion_name() {
        let names = ["joy", "anxiety", "surprise", "fear"];
        for (i, name) in names.iter().enumerate() {
            assert_eq!(
                segment_label(&names, &SegmentValue::CenterOf(i as i32)),
                name.to_string()
            );
        }
    }

    #[test]
    fn out_of_range_and_edge_points_are_unlabeled() {
        let names = ["joy", "anxiety"];
        assert_eq!(segment_label(&names, &SegmentValue::CenterOf(2)), "");
        assert_eq!(segment_label(&names, &SegmentValue::CenterOf(-1)), "");
        // Segment boundaries never carry a name — only centers do
        assert_eq!(segment_label(&names, &SegmentValue::Exact(0)), "");
        assert_eq!(segment_label(&names, &SegmentValue::Last), "");
    }

    #[test]
    fn empty_mapping_renders_empty_chart() {
        let lex = Lexicon::new();
        let uri = render(&lex, &[]).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn bars_render_as_png_data_uri() {
        let lex = Lexicon::new();
        let emotions = vec![detected("joy", 0.9), detected("anxiety", 0.7)];
        let uri = render(&lex, &emotions).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        // O payload codifica um PNG 800x500 real, não um stub vazio
        assert!(uri.len() > "data:image/png;base64,".len() + 100);
    }

    #[test]
    fn positive_is_green() {
        let lex = Lexicon::new();
        assert_eq!(bar_color(&lex, "joy"), POSITIVE_COLOR);
        assert_eq!(bar_color(&lex, "focus"), POSITIVE_COLOR);
    }

    #[test]
    fn negative_is_red() {
        let lex = Lexicon::new();
        for name in ["sadness", "anxiety", "fear", "anger"] {
            assert_eq!(bar_color(&lex, name), NEGATIVE_COLOR);
        }
    }

    #[test]
    fn unknown_is_gray() {
        let lex = Lexicon::new();
        assert_eq!(bar_color(&lex, "surprise"), UNKNOWN_COLOR);
        assert_eq!(bar_color(&lex, "love"), UNKNOWN_COLOR);
    }
}
