//! # Templates Maud — HTML Server-Side Rendering
//!
//! Templates HTML renderizados em tempo de compilação usando o macro
//! [`maud`](https://maud.lambda.xyz/). O padrão é **Hypermedia-Driven**:
//! o servidor retorna HTML fragments (não JSON) e o HTMX injeta os
//! fragments no DOM via `hx-swap`.
//!
//! ## Layout Principal (`full_page`)
//!
//! ```text
//! ┌──────────────── nav-bar ────────────────────┐
//! │ EB │ EmoBot                            │ ●  │
//! ├─────────────────────────────────────────────┤
//! │  Descrição                                  │
//! │  [exemplo] [exemplo] [exemplo] [exemplo]    │
//! │  [ How are you feeling? ________ ][Analyze] │
//! ├─────────────────────────────────────────────┤
//! │  Emotion Breakdown (texto)                  │
//! │  Emotion Intensity (gráfico)                │
//! └─────────────────────────────────────────────┘
//! ```

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Os quatro exemplos prontos exibidos abaixo do campo de entrada.
pub const EXAMPLES: [&str; 4] = [
    "I am happy but at the same time anxious",
    "I'm focused on studying but afraid of failure",
    "I feel sad and lonely today",
    "I'm angry about what happened",
];

/// Página principal — formulário de análise, exemplos e área de saída.
///
/// Inclui:
/// - **Nav bar** com o nome do app e o indicador de readiness do modelo
/// - **Form** HTMX que posta em `/analyze` e injeta o fragment em
///   `#analysis-output`
/// - **Botões de exemplo** que preenchem o campo e disparam a análise
/// - **JavaScript inline** para polling de `/status` a cada 3s
pub fn full_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "EmoBot — Emotion Analysis" }
                link rel="stylesheet" href="/assets/style.css";
                script src="https://unpkg.com/htmx.org@2.0.4" {}
            }
            body {
                div class="app-shell" {
                    // Navigation Bar
                    nav class="nav-bar" {
                        a href="/" class="nav-brand" {
                            span class="nav-brand-icon" { "EB" }
                            span class="nav-brand-text" { "Emo" em { "Bot" } }
                        }
                        div class="nav-status" id="nav-status" {
                            span class="nav-status-dot loading" id="status-dot" {}
                            span id="status-text" { "loading model..." }
                        }
                    }

                    // Main content
                    div class="app-container" {
                        div class="intro" {
                            p {
                                "Detects complex emotional states including underlying "
                                "emotions and provides balanced recommendations."
                            }
                        }

                        // Exemplos prontos — preenchem o campo e submetem
                        div class="examples" {
                            @for example in EXAMPLES {
                                button class="example-btn"
                                    onclick=(format!(
                                        "document.getElementById('text-input').value = {:?}; \
                                         document.getElementById('analyze-form').requestSubmit();",
                                        example
                                    )) {
                                    (example)
                                }
                            }
                        }

                        // Analyze form
                        form id="analyze-form" class="analyze-form"
                            hx-post="/analyze"
                            hx-target="#analysis-output"
                            hx-swap="innerHTML" {
                            input id="text-input" type="text" name="text"
                                placeholder="I feel..."
                                aria-label="How are you feeling?"
                                autocomplete="off"
                                autofocus;
                            button type="submit" { "Analyze" }
                        }

                        // Saída: relatório + gráfico injetados pelo HTMX
                        div id="analysis-output" class="analysis-output" {
                            div class="output-placeholder" {
                                "Type how you are feeling, or pick an example above."
                            }
                        }
                    }
                }

                (PreEscaped(r#"<script>
// Poll model status until the background load finishes
function checkModelStatus() {
  fetch('/status')
    .then(function(r) { return r.json(); })
    .then(function(data) {
      var dot = document.getElementById('status-dot');
      var text = document.getElementById('status-text');
      if (data.ready) {
        dot.classList.remove('loading');
        text.textContent = 'ready';
      } else {
        setTimeout(checkModelStatus, 3000);
      }
    })
    .catch(function() {
      setTimeout(checkModelStatus, 5000);
    });
}
checkModelStatus();
</script>"#))
            }
        }
    }
}
