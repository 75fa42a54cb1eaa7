//! # Classificação de Tags BIO
//!
//! Toda a decisão "início, continuação ou fora" acontece em [`TagKind::classify`].
//!
//! ## Regras
//!
//! | Tag             | Classe     | Tipo         |
//! |-----------------|------------|--------------|
//! | `O`             | Outside    | —            |
//! | `I-PER`         | Inside     | `PER`        |
//! | `B-PER`         | Begin      | `PER`        |
//! | `X-FOO`         | Begin      | `FOO`        |
//! | `""`            | inválida   | —            |
//!
//! Apenas a primeira letra é inspecionada: qualquer tag diferente de `"O"` cuja
//! primeira letra não seja `I` abre uma nova entidade. O tipo é o que sobra após
//! descartar os dois primeiros caracteres (`"B-"`), sem checar o hífen.

use std::fmt;

/// Classe de uma tag BIO, com o tipo de entidade emprestado da tag original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// **Begin**: abre uma entidade. Ex: **Alice** (B-PER).
    Begin(&'a str),
    /// **Inside**: continua a entidade aberta. Ex: John **Smith** (I-PER).
    Inside(&'a str),
    /// **Outside**: token fora de qualquer entidade.
    Outside,
}

impl<'a> TagKind<'a> {
    /// Classifica uma tag crua.
    ///
    /// `"O"` é testado por igualdade exata antes da primeira letra, então
    /// `"Other"` é um Begin do tipo `"her"`. Retorna `None` para a tag vazia.
    pub fn classify(tag: &'a str) -> Option<Self> {
        if tag == "O" {
            return Some(TagKind::Outside);
        }
        match tag.chars().next()? {
            'I' => Some(TagKind::Inside(entity_type(tag))),
            _ => Some(TagKind::Begin(entity_type(tag))),
        }
    }

    /// Tipo da entidade (`None` para Outside).
    pub fn entity_type(&self) -> Option<&'a str> {
        match self {
            TagKind::Begin(t) | TagKind::Inside(t) => Some(t),
            TagKind::Outside => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, TagKind::Inside(_))
    }
}

impl fmt::Display for TagKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Begin(t) => write!(f, "B-{}", t),
            TagKind::Inside(t) => write!(f, "I-{}", t),
            TagKind::Outside => write!(f, "O"),
        }
    }
}

/// Remove os dois primeiros caracteres da tag (`"B-PER"` → `"PER"`).
///
/// Tags com menos de três caracteres resultam em string vazia.
pub fn entity_type(tag: &str) -> &str {
    match tag.char_indices().nth(2) {
        Some((i, _)) => &tag[i..],
        None => "",
    }
}
