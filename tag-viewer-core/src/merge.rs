//! # Fusão de Spans BIO
//!
//! Junta sequências `B-X I-X I-X ...` de [`RawEntityToken`] em uma única
//! [`MergedEntity`], numa passada da esquerda para a direita.
//!
//! ## Máquina de Estados
//!
//! ```text
//!            B                      I
//!   Idle ────────► Open(b, None) ─────► Open(b, Some(i))
//!    │  ▲             │    ▲                 │
//!  I │  │ fim         │ B  └─────────────────┘ B (fecha b, abre novo)
//!    ▼  │             ▼
//!  Dangling(i)      fecha b → saída
//! ```
//!
//! Ao fechar `Open(b, Some(i))` o fim do span é `i.end - 1`, ou seja, o
//! caractere anterior ao início do token seguinte ao último `I`. Com apenas
//! `B`, o fim continua sendo o início do token seguinte.
//!
//! `Dangling` só existe em [`MergeMode::Compatible`]: um `I` sem entidade
//! aberta fica pendente e é usado como "último I" do próximo `B`. Em
//! [`MergeMode::Strict`] esse `I` é rejeitado imediatamente.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::labels::LabelMap;
use crate::offsets::RawEntityToken;
use crate::tagger::{entity_type, TagKind};

/// Política para tags `I-` que aparecem sem entidade aberta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Qualquer `I-` órfão é um [`ViewerError::InconsistentBio`].
    #[default]
    Strict,
    /// Reproduz o comportamento da ferramenta original: o `I-` órfão fica
    /// pendente e estende o próximo `B-`; só é erro se sobrar no fim da sentença.
    Compatible,
}

/// Uma entidade com offsets de caracteres e rótulo de exibição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEntity {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

#[derive(Debug)]
enum MergeState {
    Idle,
    Dangling(RawEntityToken),
    Open {
        begin: RawEntityToken,
        inside: Option<RawEntityToken>,
    },
}

/// Fusor incremental: alimente com [`SpanMerger::push`] e feche com [`SpanMerger::finish`].
#[derive(Debug)]
pub struct SpanMerger<'a> {
    labels: &'a LabelMap,
    mode: MergeMode,
    state: MergeState,
    merged: Vec<MergedEntity>,
}

impl<'a> SpanMerger<'a> {
    pub fn new(labels: &'a LabelMap, mode: MergeMode) -> Self {
        Self {
            labels,
            mode,
            state: MergeState::Idle,
            merged: Vec::new(),
        }
    }

    /// Processa o próximo token da sentença.
    pub fn push(&mut self, token: RawEntityToken) -> Result<()> {
        let kind = TagKind::classify(&token.label)
            .ok_or_else(|| ViewerError::InvalidTag {
                sentence: 0,
                tag: token.label.clone(),
            })?;

        // Outside cai no ramo de "início": só a letra I continua uma entidade.
        let state = std::mem::replace(&mut self.state, MergeState::Idle);
        self.state = match (state, kind.is_inside()) {
            (MergeState::Open { begin, inside }, false) => {
                self.close(begin, inside);
                MergeState::Open { begin: token, inside: None }
            }
            (MergeState::Open { begin, .. }, true) => MergeState::Open {
                begin,
                inside: Some(token),
            },
            (MergeState::Idle, false) => MergeState::Open { begin: token, inside: None },
            (MergeState::Dangling(orphan), false) => MergeState::Open {
                begin: token,
                inside: Some(orphan),
            },
            (MergeState::Idle | MergeState::Dangling(_), true) => match self.mode {
                MergeMode::Strict => return Err(inconsistent(&token)),
                MergeMode::Compatible => MergeState::Dangling(token),
            },
        };
        Ok(())
    }

    /// Fecha a entidade aberta (se houver) e devolve as entidades fundidas.
    pub fn finish(mut self) -> Result<Vec<MergedEntity>> {
        match std::mem::replace(&mut self.state, MergeState::Idle) {
            MergeState::Idle => {}
            MergeState::Dangling(orphan) => return Err(inconsistent(&orphan)),
            MergeState::Open { begin, inside } => self.close(begin, inside),
        }
        Ok(self.merged)
    }

    fn close(&mut self, begin: RawEntityToken, inside: Option<RawEntityToken>) {
        let end = match inside {
            Some(last) => last.end.saturating_sub(1),
            None => begin.end,
        };
        let label = self.labels.resolve(entity_type(&begin.label)).to_string();
        self.merged.push(MergedEntity {
            start: begin.start,
            end,
            label,
        });
    }
}

fn inconsistent(token: &RawEntityToken) -> ViewerError {
    ViewerError::InconsistentBio {
        sentence: 0,
        tag: token.label.clone(),
        start: token.start,
        end: token.end,
    }
}

/// Funde os tokens crus de uma sentença.
pub fn merge<I>(raw_tokens: I, labels: &LabelMap, mode: MergeMode) -> Result<Vec<MergedEntity>>
where
    I: IntoIterator<Item = RawEntityToken>,
{
    let mut merger = SpanMerger::new(labels, mode);
    for token in raw_tokens {
        merger.push(token)?;
    }
    merger.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offsets::{reconstruct, LengthPolicy};
    use crate::record::Sentence;

    fn raw(pairs: &[(&str, &str)]) -> Vec<RawEntityToken> {
        reconstruct(&Sentence::from_pairs(pairs), LengthPolicy::Strict)
            .unwrap()
            .raw_tokens
    }

    fn ent(start: usize, end: usize, label: &str) -> MergedEntity {
        MergedEntity { start, end, label: label.to_string() }
    }

    #[test]
    fn test_begin_only_keeps_ends() {
        let tokens = raw(&[("Alice", "B-PER"), ("met", "O"), ("Bob", "B-PER"), ("in", "O"), ("Rio", "B-LOC")]);
        let merged = merge(tokens.clone(), &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged.len(), tokens.len());
        for (m, t) in merged.iter().zip(&tokens) {
            assert_eq!((m.start, m.end), (t.start, t.end));
        }
        assert_eq!(merged[0].label, "PERSON");
        assert_eq!(merged[2].label, "LOC");
    }

    #[test]
    fn test_label_remap_single_token() {
        let per = merge(raw(&[("Ana", "B-PER")]), &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(per[0].label, "PERSON");
        let loc = merge(raw(&[("Recife", "B-LOC")]), &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(loc[0].label, "LOC");
    }

    #[test]
    fn test_bi_collapse() {
        let tokens = raw(&[("John", "B-PER"), ("Q", "I-PER"), ("Smith", "I-PER")]);
        assert_eq!(tokens[2].end, 13);
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged, vec![ent(0, 12, "PERSON")]);
    }

    #[test]
    fn test_bi_followed_by_begin() {
        // São Paulo e Rio
        let tokens = raw(&[("São", "B-LOC"), ("Paulo", "I-LOC"), ("e", "O"), ("Rio", "B-LOC")]);
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged, vec![ent(0, 9, "LOC"), ent(12, 16, "LOC")]);
    }

    #[test]
    fn test_inside_absorbs_mismatched_type() {
        // Só a primeira letra importa: I-ORG continua a entidade aberta por B-PER
        let tokens = raw(&[("Maria", "B-PER"), ("Ltda", "I-ORG")]);
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged, vec![ent(0, 10, "PERSON")]);
    }

    #[test]
    fn test_unknown_prefix_begins_entity() {
        let tokens = raw(&[("Copa", "X-MISC"), ("2014", "I-MISC")]);
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged, vec![ent(0, 9, "MISC")]);
    }

    #[test]
    fn test_empty_input() {
        let merged = merge(Vec::new(), &LabelMap::default(), MergeMode::Strict).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_trailing_orphan_inside_fails_in_both_modes() {
        for mode in [MergeMode::Strict, MergeMode::Compatible] {
            let err = merge(raw(&[("foi", "O"), ("Pelé", "I-PER")]), &LabelMap::default(), mode).unwrap_err();
            match err {
                ViewerError::InconsistentBio { tag, start, end, .. } => {
                    assert_eq!(tag, "I-PER");
                    assert_eq!((start, end), (4, 9));
                }
                other => panic!("erro inesperado: {other:?}"),
            }
        }
    }

    #[test]
    fn test_mid_sequence_orphan_strict() {
        let tokens = raw(&[("Pelé", "I-PER"), ("e", "O"), ("Zico", "B-PER")]);
        let err = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap_err();
        assert!(matches!(err, ViewerError::InconsistentBio { start: 0, .. }));
    }

    #[test]
    fn test_mid_sequence_orphan_compatible_leaks_into_next_begin() {
        // O I órfão vira o "último I" do B seguinte: fim = 5 - 1 = 4
        let tokens = raw(&[("Pelé", "I-PER"), ("e", "O"), ("Zico", "B-PER")]);
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Compatible).unwrap();
        assert_eq!(merged, vec![ent(7, 4, "PERSON")]);
    }

    #[test]
    fn test_outside_label_fed_directly_acts_as_begin() {
        let tokens = vec![
            RawEntityToken { start: 0, end: 3, label: "B-ORG".into() },
            RawEntityToken { start: 3, end: 6, label: "O".into() },
        ];
        let merged = merge(tokens, &LabelMap::default(), MergeMode::Strict).unwrap();
        assert_eq!(merged, vec![ent(0, 3, "ORG"), ent(3, 6, "")]);
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        let tokens = vec![RawEntityToken { start: 0, end: 2, label: String::new() }];
        let err = merge(tokens, &LabelMap::default(), MergeMode::Compatible).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidTag { .. }));
    }

    #[test]
    fn test_custom_label_map() {
        let mut labels = LabelMap::empty();
        labels.insert("LOC", "GPE");
        let merged = merge(raw(&[("Ana", "B-PER"), ("Natal", "B-LOC")]), &labels, MergeMode::Strict).unwrap();
        assert_eq!(merged[0].label, "PER");
        assert_eq!(merged[1].label, "GPE");
    }

    #[test]
    fn test_incremental_merger() {
        let labels = LabelMap::default();
        let mut merger = SpanMerger::new(&labels, MergeMode::Strict);
        for token in raw(&[("Lula", "B-PER"), ("da", "I-PER"), ("Silva", "I-PER")]) {
            merger.push(token).unwrap();
        }
        assert_eq!(merger.finish().unwrap(), vec![ent(0, 13, "PERSON")]);
    }
}
