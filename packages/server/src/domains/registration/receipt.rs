//! Storage naming for uploaded receipts.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Folder inside the receipts bucket
pub const RECEIPT_FOLDER: &str = "workshop";

lazy_static! {
    static ref NOT_SLUG: Regex = Regex::new(r"[^a-z0-9]").unwrap();
    static ref NOT_FILE_SAFE: Regex = Regex::new(r"[^A-Za-z0-9.\-]").unwrap();
}

/// `<millis>_<slug>.<ext>` for a receipt uploaded at `at`.
///
/// Deterministic in its inputs so the same submission always maps to the same name.
pub fn receipt_file_name(
    at: DateTime<Utc>,
    full_name: &str,
    original_name: Option<&str>,
    content_type: &str,
) -> String {
    let slug = NOT_SLUG.replace_all(&full_name.to_lowercase(), "_").into_owned();
    let ext = original_name
        .and_then(extension_of)
        .unwrap_or_else(|| fallback_extension(content_type).to_string());

    format!("{}_{}.{}", at.timestamp_millis(), slug, ext)
}

/// Object path for a receipt, relative to the bucket root.
pub fn receipt_path(
    at: DateTime<Utc>,
    full_name: &str,
    original_name: Option<&str>,
    content_type: &str,
) -> String {
    format!(
        "{}/{}",
        RECEIPT_FOLDER,
        receipt_file_name(at, full_name, original_name, content_type)
    )
}

fn extension_of(original_name: &str) -> Option<String> {
    let safe = NOT_FILE_SAFE.replace_all(original_name, "_");
    let (stem, ext) = safe.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

fn fallback_extension(content_type: &str) -> &'static str {
    match content_type {
        "application/pdf" => "pdf",
        "image/jpeg" => "jpg",
        "image/png" => "png",
        _ => "bin",
    }
}
