//! # Registros de Entrada Tokenizados
//!
//! Formato consumido pelo visualizador: um documento JSON com uma lista de
//! sentenças, cada uma com os tokens (`content`) e as tags BIO paralelas (`ner`).
//!
//! ```json
//! {"sentences": [{"content": ["Alice", "met", "Bob"], "ner": ["B-PER", "O", "B-PER"]}]}
//! ```
//!
//! Campos extras do documento são ignorados. Nenhuma validação além da
//! estrutura é feita aqui; o alinhamento entre tokens e tags é verificado
//! em [`crate::offsets`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Uma sentença tokenizada com uma tag BIO por token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sentence {
    /// Tokens na ordem original.
    pub content: Vec<String>,
    /// Tags BIO, uma por token (ex: `"B-PER"`, `"I-PER"`, `"O"`).
    pub ner: Vec<String>,
}

impl Sentence {
    pub fn new(content: Vec<String>, ner: Vec<String>) -> Self {
        Self { content, ner }
    }

    /// Constrói a partir de pares (palavra, tag).
    /// Exemplo: `[("Lula", "B-PER"), ("viajou", "O")]`
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let (content, ner) = pairs
            .iter()
            .map(|(word, tag)| (word.to_string(), tag.to_string()))
            .unzip();
        Self { content, ner }
    }

    /// Número de tokens.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// `true` quando há exatamente uma tag por token.
    pub fn is_aligned(&self) -> bool {
        self.content.len() == self.ner.len()
    }
}

/// Unidade de entrada: uma sequência ordenada de sentenças.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub sentences: Vec<Sentence>,
}

impl Record {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Desserializa um registro a partir de uma string JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Desserializa um registro de qualquer fonte de bytes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Lê e desserializa um arquivo JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Total de tokens em todas as sentenças.
    pub fn total_tokens(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}
