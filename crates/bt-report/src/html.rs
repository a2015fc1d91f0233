//! HTML output helpers shared by chart documents and the report.

use crate::error::{ReportError, Result};
use std::path::Path;
use tracing::debug;

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Serialize a value for embedding inside a `<script>` element.
pub fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Minify a document when enabled, falling back to the input on bad UTF-8.
pub fn finish(html: String, minify: bool) -> String {
    if !minify {
        return html;
    }
    let cfg = minify_html::Cfg {
        minify_js: true,
        minify_css: true,
        ..Default::default()
    };
    String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
}

/// Write a UTF-8 document, overwriting any existing file.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html).map_err(|source| ReportError::WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = html.len(), "Document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_script_json_breaks_closing_tags() {
        let json = script_json(&serde_json::json!({"title": "</script><b>"})).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }

    #[test]
    fn test_write_document_fails_for_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.html");
        let err = write_document(&path, "<html></html>").unwrap_err();
        assert!(matches!(err, ReportError::WriteError { .. }));
    }
}
