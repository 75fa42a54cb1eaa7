//! Configuração do pipeline: tabela de rótulos e políticas para entradas malformadas.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::labels::LabelMap;
use crate::merge::MergeMode;
use crate::offsets::LengthPolicy;

/// Parâmetros imutáveis de uma execução.
///
/// Pode ser carregada de JSON; campos ausentes usam os padrões:
///
/// ```json
/// {"labels": {"LOC": "GPE"}, "length_policy": "truncate", "merge_mode": "compatible"}
/// ```
///
/// As entradas de `labels` são acrescentadas aos remapeamentos padrão, como em
/// [`LabelMap::from_json_overrides`]. Para desligar `PER → PERSON`, use `{"PER": "PER"}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    #[serde(deserialize_with = "labels_over_defaults")]
    pub labels: LabelMap,
    pub length_policy: LengthPolicy,
    pub merge_mode: MergeMode,
}

fn labels_over_defaults<'de, D>(deserializer: D) -> std::result::Result<LabelMap, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = HashMap::<String, String>::deserialize(deserializer)?;
    let mut labels = LabelMap::with_default_remaps();
    labels.extend(overrides);
    Ok(labels)
}

impl ViewerConfig {
    /// Configuração equivalente à ferramenta original: truncamento silencioso
    /// e `I-` órfão só detectado no fim da sentença.
    pub fn compatible() -> Self {
        Self {
            labels: LabelMap::default(),
            length_policy: LengthPolicy::Truncate,
            merge_mode: MergeMode::Compatible,
        }
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    pub fn with_merge_mode(mut self, mode: MergeMode) -> Self {
        self.merge_mode = mode;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
