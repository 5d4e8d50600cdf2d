//! Export of the generated material as a single text file.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::config::{EXPORT_FILE_PREFIX, EXPORT_MIME, EXPORT_SEPARATOR};
use crate::error::{HanboxError, Result};
use crate::model::GeneratedOutputs;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
}

impl ExportFile {
    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME
    }
}

/// Joins the non-empty results in lesson, rewrite, questions order.
/// `None` when there is nothing to export.
pub fn combine_outputs(outputs: &GeneratedOutputs) -> Option<String> {
    let parts = [
        outputs.lesson_text.as_str(),
        outputs.rewrite_text.as_str(),
        outputs.questions_text.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(EXPORT_SEPARATOR))
    }
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("{}_{}.txt", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

pub fn build_export(outputs: &GeneratedOutputs, date: NaiveDate) -> Option<ExportFile> {
    combine_outputs(outputs).map(|content| ExportFile {
        filename: export_filename(date),
        content,
    })
}

/// Something that can emit a named text file.
pub trait TextDownloader {
    fn download(&self, file: &ExportFile) -> Result<()>;
}

/// Save-as download in the browser through a temporary object URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDownloader;

impl TextDownloader for BrowserDownloader {
    fn download(&self, file: &ExportFile) -> Result<()> {
        download_text(&file.filename, &file.content)
    }
}

pub fn download_text(filename: &str, content: &str) -> Result<()> {
    let blob = Blob::new_with_options(content, Some(EXPORT_MIME));
    // Revoked when dropped at the end of this function.
    let url = ObjectUrl::from(blob);

    let document = gloo_utils::document();
    let anchor = document
        .create_element("a")
        .map_err(|e| HanboxError::export(format!("{:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| HanboxError::export("created element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = gloo_utils::body();
    body.append_child(&anchor)
        .map_err(|e| HanboxError::export(format!("{:?}", e)))?;
    anchor.click();
    anchor.remove();

    tracing::info!("Downloaded {} ({} bytes)", filename, content.len());
    Ok(())
}

/// Writes export files into a directory instead of the browser.
#[derive(Clone, Debug)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file: &ExportFile) -> PathBuf {
        self.dir.join(&file.filename)
    }
}

impl TextDownloader for DirectoryDownloader {
    fn download(&self, file: &ExportFile) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(file);
        fs::write(&path, file.content.as_bytes())?;
        tracing::info!("Exported {:?}", path);
        Ok(())
    }
}
