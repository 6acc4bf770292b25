//! XML move log
//!
//! A `<FENNotations>` document with one `<Move><FEN>…</FEN></Move>` element
//! per applied position. The whole document is rewritten on every change;
//! logs stay small (one line per ply).

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use super::error::{PersistenceError, PersistenceResult};

const ROOT: &str = "FENNotations";

pub struct XmlMoveLog {
    path: PathBuf,
    entries: Vec<String>,
}

impl XmlMoveLog {
    /// Open the log at `path`, creating an empty document when missing
    ///
    /// # Errors
    ///
    /// I/O errors, or [`PersistenceError::MalformedLog`] when the file is not
    /// a move log.
    pub async fn open(path: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(text) => parse_document(&text).map_err(|reason| PersistenceError::MalformedLog {
                path: path.clone(),
                reason,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[PERSIST] Creating move log at {:?}", path);
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let log = Self { path, entries };
        log.write().await?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub async fn append(&mut self, fen: &str) -> PersistenceResult<()> {
        self.entries.push(fen.to_string());
        self.write().await
    }

    /// Drop every entry, leaving an empty document.
    pub async fn clear(&mut self) -> PersistenceResult<()> {
        self.entries.clear();
        self.write().await
    }

    async fn write(&self) -> PersistenceResult<()> {
        fs::write(&self.path, render_document(&self.entries)).await?;
        Ok(())
    }
}

fn render_document(entries: &[String]) -> String {
    let mut xml = format!("<{ROOT}>\n");
    for fen in entries {
        xml.push_str("  <Move>\n    <FEN>");
        xml.push_str(&escape(fen));
        xml.push_str("</FEN>\n  </Move>\n");
    }
    xml.push_str(&format!("</{ROOT}>\n"));
    xml
}

fn parse_document(text: &str) -> Result<Vec<String>, String> {
    let trimmed = text.trim();
    if trimmed == format!("<{ROOT} />") || trimmed == format!("<{ROOT}/>") {
        return Ok(Vec::new());
    }
    let body = trimmed
        .strip_prefix(&format!("<{ROOT}>"))
        .and_then(|rest| rest.strip_suffix(&format!("</{ROOT}>")))
        .ok_or_else(|| format!("expected a <{ROOT}> root element"))?;

    let mut entries = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find("<FEN>") {
        let after = &rest[start + "<FEN>".len()..];
        let end = after
            .find("</FEN>")
            .ok_or_else(|| "unterminated <FEN> element".to_string())?;
        entries.push(unescape(&after[..end]));
        rest = &after[end + "</FEN>".len()..];
    }
    Ok(entries)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
