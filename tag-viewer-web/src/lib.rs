//! # tag-viewer-web — Renderização e Interfaces
//!
//! Camada de apresentação sobre o [`tag_viewer_core`]:
//!
//! - [`render`]: renderizador de entidades (HTML no estilo `ent` do displaCy).
//! - [`cli`]: binário `tag-viewer`, um fragmento HTML por arquivo de entrada.
//! - [`server`]: binário `tag-viewer-server`, rotas HTTP `/annotate` e `/render`.

pub mod cli;
pub mod render;
pub mod server;
pub mod telemetry;
