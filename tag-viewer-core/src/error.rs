//! # Erros do núcleo
//!
//! Todos os caminhos de falha do pipeline retornam [`ViewerError`]; nenhuma
//! condição de entrada malformada termina o processo com pânico.

use thiserror::Error;

/// Tipo `Result` usado em todo o crate.
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Falhas possíveis ao converter um registro em anotações.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ViewerError {
    /// `content` e `ner` de uma sentença têm tamanhos diferentes.
    #[error("sentença {sentence}: {tokens} tokens mas {tags} tags")]
    LengthMismatch {
        sentence: usize,
        tokens: usize,
        tags: usize,
    },

    /// Uma tag `I-` apareceu sem nenhuma entidade aberta.
    #[error("sentença {sentence}: sequência BIO inconsistente, tag '{tag}' em {start}..{end} sem B- correspondente")]
    InconsistentBio {
        sentence: usize,
        tag: String,
        start: usize,
        end: usize,
    },

    /// Tag que não pode ser classificada (ex: string vazia).
    #[error("sentença {sentence}: tag inválida {tag:?}")]
    InvalidTag { sentence: usize, tag: String },

    /// JSON de entrada malformado.
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    /// Falha de leitura da fonte de entrada.
    #[error("erro de IO: {0}")]
    Io(#[from] std::io::Error),
}

impl ViewerError {
    /// Atribui o índice da sentença aos erros de validação.
    pub fn in_sentence(mut self, index: usize) -> Self {
        match &mut self {
            ViewerError::LengthMismatch { sentence, .. }
            | ViewerError::InconsistentBio { sentence, .. }
            | ViewerError::InvalidTag { sentence, .. } => *sentence = index,
            ViewerError::Json(_) | ViewerError::Io(_) => {}
        }
        self
    }

    /// Verdadeiro para erros causados pelo conteúdo do registro
    /// (e não por IO ou sintaxe JSON).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ViewerError::LengthMismatch { .. }
                | ViewerError::InconsistentBio { .. }
                | ViewerError::InvalidTag { .. }
        )
    }
}
