//! # Reconstrução de Offsets
//!
//! O texto da sentença é reconstruído juntando os tokens com um único espaço.
//! Cada token ocupa `[offsets[i], offsets[i + 1])` nesse texto, onde
//! `offsets` é a soma prefixada de `len(token) + 1`:
//!
//! ```text
//! tokens:   Alice   met   Bob
//! texto:    "Alice met Bob"
//! offsets:  0       6     10    14
//! ```
//!
//! O `+ 1` inclui o espaço separador no fim de cada span, e o último offset
//! fica um caractere além do fim do texto.
//!
//! Comprimentos são contados em caracteres (não bytes), que é a indexação usada
//! pelo renderizador.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::record::Sentence;

/// O que fazer quando `content` e `ner` têm tamanhos diferentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Falha com [`ViewerError::LengthMismatch`].
    #[default]
    Strict,
    /// Emparelha até o menor dos dois tamanhos e descarta o resto.
    /// O texto continua contendo todos os tokens.
    Truncate,
}

/// Span de caracteres de um token não-`O`, ainda com a tag crua como rótulo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityToken {
    /// Offset inicial (inclusivo).
    pub start: usize,
    /// Início do próximo token (exclusivo; inclui o espaço separador).
    pub end: usize,
    /// Tag BIO original (ex: `"B-PER"`).
    pub label: String,
}

/// Resultado da reconstrução de uma sentença.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedSentence {
    /// Tokens unidos por `' '`.
    pub text: String,
    /// `N + 1` offsets para `N` tokens.
    pub offsets: Vec<usize>,
    /// Um item por token cuja tag não é exatamente `"O"`, em ordem.
    pub raw_tokens: Vec<RawEntityToken>,
}

/// Soma prefixada de `len(token) + 1`, começando em zero.
pub fn token_offsets<S: AsRef<str>>(tokens: &[S]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(tokens.len() + 1);
    let mut acc = 0usize;
    offsets.push(acc);
    for token in tokens {
        acc += token.as_ref().chars().count() + 1;
        offsets.push(acc);
    }
    offsets
}

/// Reconstrói o texto e os spans crus de uma sentença.
pub fn reconstruct(sentence: &Sentence, policy: LengthPolicy) -> Result<ReconstructedSentence> {
    if !sentence.is_aligned() && policy == LengthPolicy::Strict {
        return Err(ViewerError::LengthMismatch {
            sentence: 0,
            tokens: sentence.content.len(),
            tags: sentence.ner.len(),
        });
    }

    let text = sentence.content.join(" ");
    let offsets = token_offsets(&sentence.content);

    let raw_tokens = offsets
        .windows(2)
        .zip(&sentence.ner)
        .filter(|(_, tag)| tag.as_str() != "O")
        .map(|(bounds, tag)| RawEntityToken {
            start: bounds[0],
            end: bounds[1],
            label: tag.clone(),
        })
        .collect();

    Ok(ReconstructedSentence { text, offsets, raw_tokens })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_slice(text: &str, start: usize, end: usize) -> String {
        text.chars().skip(start).take(end - start).collect()
    }

    #[test]
    fn test_offsets_prefix_sum() {
        assert_eq!(token_offsets(&["Alice", "met", "Bob"]), vec![0, 6, 10, 14]);
        assert_eq!(token_offsets::<&str>(&[]), vec![0]);
    }

    #[test]
    fn test_offset_round_trip() {
        let sentence = Sentence::from_pairs(&[
            ("O", "O"),
            ("Hospital", "B-ORG"),
            ("Albert", "I-ORG"),
            ("Einstein", "I-ORG"),
            ("em", "O"),
            ("São", "B-LOC"),
            ("Paulo", "I-LOC"),
            (".", "O"),
        ]);
        let rec = reconstruct(&sentence, LengthPolicy::Strict).unwrap();
        assert_eq!(rec.text, sentence.content.join(" "));
        assert_eq!(rec.offsets.len(), sentence.len() + 1);

        for (i, token) in sentence.content.iter().enumerate() {
            let slice = char_slice(&rec.text, rec.offsets[i], rec.offsets[i + 1]);
            let trimmed = slice.strip_suffix(' ').unwrap_or(&slice);
            assert_eq!(trimmed, token);
        }
    }

    #[test]
    fn test_outside_tokens_excluded_but_occupy_space() {
        let sentence = Sentence::from_pairs(&[("Alice", "B-PER"), ("met", "O"), ("Bob", "B-PER")]);
        let rec = reconstruct(&sentence, LengthPolicy::Strict).unwrap();
        assert_eq!(rec.text, "Alice met Bob");
        assert_eq!(
            rec.raw_tokens,
            vec![
                RawEntityToken { start: 0, end: 6, label: "B-PER".into() },
                RawEntityToken { start: 10, end: 14, label: "B-PER".into() },
            ]
        );
    }

    #[test]
    fn test_only_exact_o_is_outside() {
        let sentence = Sentence::from_pairs(&[("a", "o"), ("b", "O"), ("c", "O-")]);
        let rec = reconstruct(&sentence, LengthPolicy::Strict).unwrap();
        let labels: Vec<&str> = rec.raw_tokens.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["o", "O-"]);
    }

    #[test]
    fn test_multibyte_offsets_count_chars() {
        let sentence = Sentence::from_pairs(&[("Ação", "B-MISC"), ("já", "O")]);
        let rec = reconstruct(&sentence, LengthPolicy::Strict).unwrap();
        assert_eq!(rec.offsets, vec![0, 5, 8]);
        assert_eq!(rec.raw_tokens[0].end, 5);
    }

    #[test]
    fn test_length_mismatch_strict() {
        let sentence = Sentence::new(vec!["a".into(), "b".into()], vec!["B-PER".into()]);
        let err = reconstruct(&sentence, LengthPolicy::Strict).unwrap_err();
        assert!(matches!(err, ViewerError::LengthMismatch { tokens: 2, tags: 1, .. }));
    }

    #[test]
    fn test_length_mismatch_truncate() {
        let sentence = Sentence::new(
            vec!["a".into(), "b".into()],
            vec!["B-PER".into(), "O".into(), "B-LOC".into()],
        );
        let rec = reconstruct(&sentence, LengthPolicy::Truncate).unwrap();
        assert_eq!(rec.text, "a b");
        assert_eq!(rec.raw_tokens.len(), 1);

        let short_tags = Sentence::new(vec!["a".into(), "b".into()], vec!["O".into()]);
        let rec = reconstruct(&short_tags, LengthPolicy::Truncate).unwrap();
        assert_eq!(rec.text, "a b");
        assert!(rec.raw_tokens.is_empty());
    }

    #[test]
    fn test_empty_sentence() {
        let rec = reconstruct(&Sentence::default(), LengthPolicy::Strict).unwrap();
        assert_eq!(rec.text, "");
        assert_eq!(rec.offsets, vec![0]);
        assert!(rec.raw_tokens.is_empty());
    }
}
