//! Linha de comando: um fragmento HTML por arquivo JSON de entrada.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser};
use rayon::prelude::*;
use tag_viewer_core::{sentences_to_annotated_texts, LengthPolicy, MergeMode, Record, ViewerConfig};
use tracing::{info, warn};

use crate::render::{render_annotated, render_page};

/// Opções de configuração compartilhadas pela CLI e pelo servidor.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Arquivo JSON com a configuração completa (labels, length_policy, merge_mode)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Arquivo JSON com remapeamentos extras de rótulos, ex: {"LOC": "GPE"}
    #[arg(long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Emparelha tokens e tags até o menor tamanho em vez de falhar
    #[arg(long)]
    pub truncate: bool,

    /// Aceita tags I- órfãs no meio da sentença (comportamento original)
    #[arg(long)]
    pub compat: bool,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::from_path(path)
                .with_context(|| format!("lendo configuração {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(path) = &self.labels {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("lendo rótulos {}", path.display()))?;
            config
                .labels
                .merge_json(&json)
                .with_context(|| format!("rótulos inválidos em {}", path.display()))?;
        }
        if self.truncate {
            config.length_policy = LengthPolicy::Truncate;
        }
        if self.compat {
            config.merge_mode = MergeMode::Compatible;
        }
        Ok(config)
    }
}

/// Visualiza arquivos JSON com tags NER como HTML com entidades destacadas.
#[derive(Debug, Parser)]
#[command(name = "tag-viewer", version, about)]
pub struct Cli {
    /// Arquivos JSON de entrada ({"sentences": [{"content": [...], "ner": [...]}]})
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Continua nos arquivos seguintes quando um falha
    #[arg(long)]
    pub keep_going: bool,

    /// Emite os textos anotados em JSON em vez de HTML
    #[arg(long)]
    pub json: bool,

    /// Envolve cada fragmento em uma página HTML completa
    #[arg(long)]
    pub page: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Fragment,
    Page,
    Json,
}

impl Cli {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.page {
            OutputFormat::Page
        } else {
            OutputFormat::Fragment
        }
    }
}

/// Contagem de arquivos processados.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub failed: usize,
}

/// Lê, converte e renderiza um arquivo.
pub fn render_file(path: &Path, config: &ViewerConfig, format: OutputFormat) -> Result<String> {
    let record = Record::from_path(path).with_context(|| format!("lendo {}", path.display()))?;
    let texts = sentences_to_annotated_texts(&record, config)
        .with_context(|| format!("convertendo {}", path.display()))?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&texts)?,
        OutputFormat::Fragment => render_annotated(&texts)?,
        OutputFormat::Page => render_page(&path.display().to_string(), &render_annotated(&texts)?)?,
    };
    Ok(output)
}

/// Processa todos os arquivos e escreve as saídas na ordem dos argumentos.
///
/// Os arquivos são convertidos em paralelo. Sem `keep_going`, a saída para no
/// primeiro arquivo com erro, que é devolvido.
pub fn run<W: Write>(cli: &Cli, config: &ViewerConfig, out: &mut W) -> Result<RunSummary> {
    let format = cli.format();
    let results: Vec<Result<String>> = cli
        .files
        .par_iter()
        .map(|path| render_file(path, config, format))
        .collect();

    let mut summary = RunSummary::default();
    for (path, result) in cli.files.iter().zip(results) {
        match result {
            Ok(output) => {
                writeln!(out, "{}", output)?;
                summary.rendered += 1;
                info!(file = %path.display(), "arquivo renderizado");
            }
            Err(err) if cli.keep_going => {
                warn!(file = %path.display(), "falha ignorada: {:#}", err);
                summary.failed += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(summary)
}
