//! # Pipeline — Registro → Textos Anotados
//!
//! Compõe os dois estágios para cada sentença de um [`Record`]:
//!
//! 1. [`reconstruct`]: texto unido por espaços + spans crus dos tokens não-`O`.
//! 2. [`merge`]: fusão das sequências B/I em entidades com rótulo final.
//!
//! O resultado, um [`AnnotatedText`] por sentença, é o formato aceito pelo
//! renderizador de entidades (`{text, ents: [{start, end, label}], title}`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::merge::{merge, MergedEntity};
use crate::offsets::reconstruct;
use crate::record::{Record, Sentence};

/// Texto de uma sentença com suas entidades, pronto para renderização.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    pub text: String,
    /// Entidades em ordem de início.
    pub ents: Vec<MergedEntity>,
    /// Sempre `None` quando produzido pelo pipeline (serializado como `null`).
    pub title: Option<String>,
}

/// Converte uma única sentença.
pub fn annotate_sentence(sentence: &Sentence, config: &ViewerConfig) -> Result<AnnotatedText> {
    let reconstructed = reconstruct(sentence, config.length_policy)?;
    let ents = merge(reconstructed.raw_tokens, &config.labels, config.merge_mode)?;
    Ok(AnnotatedText {
        text: reconstructed.text,
        ents,
        title: None,
    })
}

/// Converte todas as sentenças de um registro, na ordem do registro.
///
/// Falha na primeira sentença inválida.
pub fn sentences_to_annotated_texts(record: &Record, config: &ViewerConfig) -> Result<Vec<AnnotatedText>> {
    record
        .sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let annotated = annotate_sentence(sentence, config).map_err(|e| e.in_sentence(i))?;
            debug!(sentence = i, tokens = sentence.len(), entities = annotated.ents.len(), "sentença anotada");
            Ok(annotated)
        })
        .collect()
}
