//! # Renderizador de Entidades (HTML)
//!
//! Transforma [`AnnotatedText`] em marcação no estilo `ent` do displaCy:
//! cada sentença vira um `<div class="entities">` e cada entidade um
//! `<mark class="entity">` com o rótulo em um `<span>` interno.
//!
//! Os offsets são em caracteres. Fins além do texto são cortados no fim do
//! texto; uma entidade que começa antes do cursor (sobreposição) contribui
//! apenas com a parte que ainda não foi emitida; spans vazios ou invertidos
//! são ignorados.

use askama::Template;
use tag_viewer_core::AnnotatedText;

/// Cor de fundo para rótulos sem entrada na paleta.
pub const DEFAULT_COLOR: &str = "#ddd";

/// Cor CSS de highlight para um rótulo.
pub fn label_color(label: &str) -> &'static str {
    match label {
        "PERSON" | "PER" => "#aa9cfc",
        "ORG" => "#7aecec",
        "LOC" => "#ff9561",
        "GPE" => "#feca74",
        "NORP" => "#c887fb",
        "FAC" => "#9cc9cc",
        "EVENT" => "#ffeb80",
        "PRODUCT" => "#bfeeb7",
        "LAW" | "LANGUAGE" => "#ff8197",
        "WORK_OF_ART" => "#f0d0ff",
        "DATE" | "TIME" => "#bfe1d9",
        "MONEY" | "QUANTITY" | "ORDINAL" | "CARDINAL" | "PERCENT" => "#e4e7d2",
        "MISC" => "#d8c7fb",
        _ => DEFAULT_COLOR,
    }
}

/// Trecho contínuo do texto: simples ou destacado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub label: String,
    pub color: &'static str,
    pub is_entity: bool,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self { text, label: String::new(), color: "", is_entity: false }
    }

    fn entity(text: String, label: &str) -> Self {
        Self {
            text,
            label: label.to_string(),
            color: label_color(label),
            is_entity: true,
        }
    }
}

#[derive(Template)]
#[template(path = "entities.html")]
struct EntitiesTemplate<'a> {
    title: &'a str,
    has_title: bool,
    segments: Vec<Segment>,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    body: &'a str,
}

/// Divide o texto em segmentos na ordem de início das entidades.
pub fn segments(doc: &AnnotatedText) -> Vec<Segment> {
    let chars: Vec<char> = doc.text.chars().collect();
    let len = chars.len();
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut ents: Vec<_> = doc.ents.iter().collect();
    ents.sort_by_key(|e| e.start);

    let mut out = Vec::new();
    let mut cursor = 0usize;
    for ent in ents {
        let start = ent.start.min(len).max(cursor);
        let end = ent.end.min(len);
        if end <= start {
            continue;
        }
        if start > cursor {
            out.push(Segment::plain(slice(cursor, start)));
        }
        out.push(Segment::entity(slice(start, end), &ent.label));
        cursor = end;
    }
    if cursor < len {
        out.push(Segment::plain(slice(cursor, len)));
    }
    out
}

/// Renderiza uma sentença anotada.
pub fn render_document(doc: &AnnotatedText) -> askama::Result<String> {
    let title = doc.title.as_deref().unwrap_or("");
    EntitiesTemplate {
        title,
        has_title: !title.is_empty(),
        segments: segments(doc),
    }
    .render()
}

/// Renderiza todas as sentenças, concatenando os fragmentos.
pub fn render_annotated(docs: &[AnnotatedText]) -> askama::Result<String> {
    docs.iter().map(render_document).collect()
}

/// Envolve um fragmento em uma página HTML completa.
pub fn render_page(title: &str, body: &str) -> askama::Result<String> {
    PageTemplate { title, body }.render()
}
