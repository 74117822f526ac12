//! # Adaptador do Modelo — DistilBERT de Classificação de Emoções
//!
//! O [`EmotionModel`] encapsula o modelo
//! `bhadresh-savani/distilbert-base-uncased-emotion`, um DistilBERT
//! fine-tuned para classificação de emoções em inglês com seis rótulos
//! fixos (sadness, joy, love, anger, fear, surprise).
//!
//! ## Pipeline de Classificação
//!
//! ```text
//! Texto → Tokenizer → Token IDs → DistilBERT Forward → hidden [CLS]
//!                                                          ↓
//!                                      pre_classifier → ReLU → classifier
//!                                                          ↓
//!                                      softmax → [(label, score); 6]
//! ```
//!
//! ## Cabeça de Classificação
//!
//! O `candle-transformers` fornece apenas o encoder DistilBERT; a cabeça
//! de sequence-classification (`pre_classifier` + `classifier`) é carregada
//! manualmente dos mesmos pesos via `candle_nn::linear`, seguindo os nomes
//! de tensor do checkpoint original.
//!
//! ## Interface para Testes
//!
//! O trait [`TextClassifier`] é a costura entre a pipeline e o modelo:
//! em produção é o [`EmotionModel`]; nos testes, um stub determinístico.
//!
//! ## Carregamento
//!
//! Pesos baixados do HuggingFace Hub na primeira execução (~250 MB)
//! e cacheados em `~/.cache/huggingface/`. Estratégia de fallback:
//!
//! | Componente | Preferido | Fallback |
//! |-----------|-----------|----------|
//! | Tokenizer | `tokenizer.json` | `vocab.txt` (WordPiece) |
//! | Pesos | `model.safetensors` | `pytorch_model.bin` |
//! | Device | CPU | — |

use std::collections::HashMap;

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config, DistilBertModel};
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

/// Um rótulo pontuado retornado pelo classificador.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredLabel {
    /// Rótulo do vocabulário fixo do modelo (minúsculo).
    pub label: String,
    /// Score softmax em [0, 1]. Os scores somam ~1 para o EmotionModel,
    /// mas a pipeline não depende disso.
    pub score: f32,
}

/// Erros do classificador de texto.
///
/// Falhas do modelo NÃO são capturadas pela pipeline — propagam como
/// erro fatal daquela requisição; a camada web exibe a falha e o
/// servidor continua disponível para a próxima.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Falha na tokenização do texto de entrada.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Falha no forward pass (tensores, shapes, device).
    #[error(transparent)]
    Inference(#[from] candle_core::Error),
}

/// Costura entre a pipeline de análise e o modelo externo.
///
/// A pipeline só enxerga esta capacidade: `texto → rótulos pontuados`.
/// Isso permite substituir o DistilBERT por um stub determinístico nos
/// testes, sem rede e sem forward pass.
pub trait TextClassifier: Send + Sync {
    /// Classifica o texto completo, retornando scores para todo o
    /// vocabulário fixo de rótulos do modelo, em ordem decrescente
    /// de score.
    fn classify(&self, text: &str) -> Result<Vec<ScoredLabel>, ModelError>;
}

/// Campos de `config.json` que a cabeça de classificação precisa e que
/// o `Config` do candle não expõe (dimensão oculta e mapa de rótulos).
#[derive(serde::Deserialize)]
struct HeadConfig {
    /// Dimensão oculta do encoder (768 para DistilBERT-base).
    dim: usize,
    /// Mapa índice → rótulo ("0" → "sadness", "1" → "joy", ...).
    id2label: HashMap<String, String>,
}

/// Modelo DistilBERT de emoções — encoder + cabeça de classificação.
///
/// Imutável após [`load()`](EmotionModel::load) — thread-safe para uso
/// concorrente em múltiplas requisições.
pub struct EmotionModel {
    /// Encoder DistilBERT carregado via candle.
    model: DistilBertModel,
    /// Camada `pre_classifier` (dim → dim) da cabeça.
    pre_classifier: Linear,
    /// Camada `classifier` (dim → n_labels) da cabeça.
    classifier: Linear,
    /// Tokenizer WordPiece uncased.
    tokenizer: Tokenizer,
    /// Rótulos em ordem de índice de logit, já minúsculos.
    labels: Vec<String>,
    /// Device de execução (sempre CPU).
    device: Device,
}

impl EmotionModel {
    /// Carrega o modelo de emoções do HuggingFace Hub.
    ///
    /// Operação pesada de I/O (download na primeira execução, leitura de
    /// pesos, alocação do modelo) — chamada em `spawn_blocking` no
    /// `main.rs` para não bloquear o runtime do Tokio.
    ///
    /// # Erros
    ///
    /// Retorna erro se não conseguir acessar o HuggingFace Hub, se os
    /// arquivos do modelo estiverem corrompidos, ou se o checkpoint não
    /// tiver os tensores da cabeça de classificação.
    pub fn load() -> Result<Self> {
        // Inferência de um DistilBERT-base é rápida o suficiente em CPU.
        let device = Device::Cpu;
        tracing::info!("Device: CPU");

        let repo_id = "bhadresh-savani/distilbert-base-uncased-emotion";

        tracing::info!("Loading emotion model ({}) from HuggingFace Hub...", repo_id);
        let api = Api::new().context("Failed to create HF Hub API")?;
        let repo = api.model(repo_id.to_string());

        // ─── Tokenizer ────────────────────────────────────────────
        let config_path = repo
            .get("config.json")
            .context("Failed to download config.json")?;
        // Tenta tokenizer.json primeiro; caso não exista, constrói um
        // tokenizer WordPiece a partir de vocab.txt
        let tokenizer = match repo.get("tokenizer.json") {
            Ok(tokenizer_path) => {
                tracing::info!("Loading tokenizer from tokenizer.json...");
                Tokenizer::from_file(&tokenizer_path)
                    .map_err(|e| anyhow::anyhow!("{}", e))?
            }
            Err(_) => {
                tracing::info!(
                    "tokenizer.json not available, building WordPiece from vocab.txt..."
                );
                let vocab_path = repo
                    .get("vocab.txt")
                    .context("Failed to download vocab.txt")?;
                Self::build_bert_tokenizer(
                    vocab_path
                        .to_str()
                        .context("Invalid vocab.txt path encoding")?,
                )?
            }
        };

        // ─── Config do modelo ─────────────────────────────────────
        tracing::info!("Loading model config...");
        let config_str = std::fs::read_to_string(&config_path)?;
        let config: Config =
            serde_json::from_str(&config_str).context("Failed to parse model config")?;
        // Segunda passada pelo config.json: dim e id2label não são
        // expostos pelo Config do candle
        let head: HeadConfig =
            serde_json::from_str(&config_str).context("Failed to parse id2label map")?;

        // Converte id2label ("0" → "sadness") em Vec indexado pelo logit
        let mut labels = vec![String::new(); head.id2label.len()];
        for (idx, label) in &head.id2label {
            let idx: usize = idx
                .parse()
                .with_context(|| format!("Non-numeric id2label key: {}", idx))?;
            let slot = labels
                .get_mut(idx)
                .with_context(|| format!("id2label index out of range: {}", idx))?;
            *slot = label.to_lowercase();
        }

        // ─── Pesos do modelo ──────────────────────────────────────
        // Prefere safetensors (rápido, seguro) sobre pytorch_model.bin (pickle)
        tracing::info!("Loading model weights...");
        let vb = match repo.get("model.safetensors") {
            Ok(safetensors_path) => {
                tracing::info!("Loading from model.safetensors...");
                unsafe {
                    VarBuilder::from_mmaped_safetensors(
                        &[safetensors_path],
                        DType::F32,
                        &device,
                    )
                    .context("Failed to load safetensors weights")?
                }
            }
            Err(_) => {
                tracing::info!("Falling back to pytorch_model.bin...");
                let weights_path = repo
                    .get("pytorch_model.bin")
                    .context("Failed to download pytorch_model.bin")?;
                VarBuilder::from_pth(&weights_path, DType::F32, &device)
                    .context("Failed to load pytorch weights")?
            }
        };

        // ─── Encoder + cabeça de classificação ───────────────────
        // O encoder resolve o prefixo "distilbert." internamente; a cabeça
        // vive na raiz do checkpoint ("pre_classifier", "classifier")
        let model = DistilBertModel::load(vb.clone(), &config)
            .context("Failed to load DistilBERT encoder")?;
        let pre_classifier = candle_nn::linear(head.dim, head.dim, vb.pp("pre_classifier"))
            .context("Failed to load pre_classifier head")?;
        let classifier = candle_nn::linear(head.dim, labels.len(), vb.pp("classifier"))
            .context("Failed to load classifier head")?;

        tracing::info!(labels = ?labels, "Emotion model loaded successfully on {:?}!", device);
        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }

    /// Constrói um tokenizer WordPiece BERT a partir de `vocab.txt`.
    ///
    /// Usado como fallback quando o repositório não possui `tokenizer.json`.
    /// O modelo é *uncased* — `lowercase = true`, diferente de checkpoints
    /// cased onde a capitalização precisa ser preservada.
    fn build_bert_tokenizer(vocab_path: &str) -> Result<Tokenizer> {
        use tokenizers::models::wordpiece::WordPiece;
        use tokenizers::normalizers::BertNormalizer;
        use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
        use tokenizers::processors::bert::BertProcessing;

        let wordpiece = WordPiece::from_file(vocab_path)
            .unk_token("[UNK]".to_string())
            .build()
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        let mut tokenizer = Tokenizer::new(wordpiece);
        tokenizer.with_normalizer(Some(BertNormalizer::new(
            true, // clean_text: remove caracteres de controle
            true, // handle_chinese_chars: adiciona espaços ao redor
            None, // strip_accents: comportamento padrão
            true, // lowercase: modelo uncased
        )));
        tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));
        tokenizer.with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), 102),
            ("[CLS]".to_string(), 101),
        )));

        Ok(tokenizer)
    }
}

impl TextClassifier for EmotionModel {
    /// Classifica o texto bruto (não minusculizado — o tokenizer uncased
    /// cuida disso) e retorna todos os rótulos com seus scores softmax,
    /// ordenados por score decrescente.
    ///
    /// ## Pipeline
    ///
    /// ```text
    /// texto → tokenize → [CLS] tok1 ... [SEP]
    ///              ↓
    ///   DistilBERT Forward (6 camadas) → hidden [1, seq, 768]
    ///              ↓
    ///   hidden[CLS] → pre_classifier → ReLU → classifier → logits [1, 6]
    ///              ↓
    ///   softmax → (label, score) para cada rótulo
    /// ```
    fn classify(&self, text: &str) -> Result<Vec<ScoredLabel>, ModelError> {
        // Tokeniza com truncamento automático
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let ids = encoding.get_ids();
        let n_tokens = ids.len();

        // Batch de 1, sem padding — a máscara de atenção não mascara nada
        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::zeros((1, n_tokens), DType::U8, &self.device)?;

        // Forward do encoder → [1, seq_len, dim]
        let hidden = self.model.forward(&input_ids, &attention_mask)?;

        // Representação da sequência = hidden state do token [CLS]
        let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?; // [1, dim]

        // Cabeça de classificação: pre_classifier → ReLU → classifier
        let x = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&x)?; // [1, n_labels]

        let scores: Vec<f32> = candle_nn::ops::softmax_last_dim(&logits)?
            .squeeze(0)?
            .to_vec1()?;

        // Pareia rótulos e scores; ordena por score decrescente, como o
        // pipeline de referência do HuggingFace faz com top_k=None
        let mut scored: Vec<ScoredLabel> = self
            .labels
            .iter()
            .zip(scores)
            .map(|(label, score)| ScoredLabel {
                label: label.clone(),
                score,
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(scores = ?scored, "Model classification");
        Ok(scored)
    }
}
