//! # Remapeamento de Rótulos
//!
//! Converte o tipo de entidade vindo das tags (ex: `PER`) no rótulo exibido
//! pelo renderizador (ex: `PERSON`). Rótulos sem entrada passam inalterados.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Remapeamentos padrão: apenas `PER → PERSON`.
pub const DEFAULT_REMAPS: &[(&str, &str)] = &[("PER", "PERSON")];

/// Tabela imutável de remapeamento de rótulos, passada ao merger como configuração.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    remaps: HashMap<String, String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::with_default_remaps()
    }
}

impl LabelMap {
    /// Tabela sem nenhum remapeamento (todos os rótulos passam inalterados).
    pub fn empty() -> Self {
        Self { remaps: HashMap::new() }
    }

    /// Tabela com [`DEFAULT_REMAPS`].
    pub fn with_default_remaps() -> Self {
        let mut map = Self::empty();
        map.extend(DEFAULT_REMAPS.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        map
    }

    /// Carrega remapeamentos de um objeto JSON (`{"LOC": "GPE"}`) por cima dos padrões.
    pub fn from_json_overrides(json: &str) -> Result<Self> {
        let mut map = Self::with_default_remaps();
        map.merge_json(json)?;
        Ok(map)
    }

    /// Acrescenta (ou substitui) entradas lidas de um objeto JSON.
    pub fn merge_json(&mut self, json: &str) -> Result<()> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        self.extend(overrides);
        Ok(())
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) -> Option<String> {
        self.remaps.insert(from.into(), to.into())
    }

    pub fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, remaps: I) {
        self.remaps.extend(remaps);
    }

    /// Rótulo de exibição para `label`; o próprio `label` se não houver entrada.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        self.remaps.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn len(&self) -> usize {
        self.remaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaps.is_empty()
    }
}
