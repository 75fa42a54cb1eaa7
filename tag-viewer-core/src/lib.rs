//! # tag-viewer-core — De Tags BIO por Token a Spans de Caracteres
//!
//! Este crate converte a saída de um sistema NER (tokens + tags BIO por token)
//! em anotações por intervalo de caracteres, no formato esperado por um
//! renderizador de entidades em HTML.
//!
//! ## Arquitetura
//!
//! O dado flui em uma única direção, sem estado compartilhado:
//!
//! 1.  **Entrada** ([`record`]): JSON com `sentences[].content` e `sentences[].ner`.
//! 2.  **Reconstrução de Offsets** ([`offsets`]): tokens unidos por espaço, cada
//!     token não-`O` vira um [`RawEntityToken`] com `start`/`end` em caracteres.
//! 3.  **Fusão BIO** ([`merge`]): sequências `B- I- I-` viram uma única
//!     [`MergedEntity`], com o rótulo passado pela tabela de [`labels`].
//! 4.  **Saída** ([`pipeline`]): um [`AnnotatedText`] por sentença.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tag_viewer_core::{sentences_to_annotated_texts, Record, ViewerConfig};
//!
//! let json = r#"{"sentences":[{"content":["Alice","met","Bob"],"ner":["B-PER","O","B-PER"]}]}"#;
//! let record = Record::from_json_str(json).unwrap();
//!
//! let texts = sentences_to_annotated_texts(&record, &ViewerConfig::default()).unwrap();
//! assert_eq!(texts[0].text, "Alice met Bob");
//! assert_eq!(texts[0].ents[0].label, "PERSON");
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod merge;
pub mod offsets;
pub mod pipeline;
pub mod record;
pub mod tagger;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use labels::LabelMap;
pub use merge::{merge, MergeMode, MergedEntity, SpanMerger};
pub use offsets::{reconstruct, LengthPolicy, RawEntityToken, ReconstructedSentence};
pub use pipeline::{annotate_sentence, sentences_to_annotated_texts, AnnotatedText};
pub use record::{Record, Sentence};
pub use tagger::TagKind;
