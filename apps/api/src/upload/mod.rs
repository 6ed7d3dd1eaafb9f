//! Upload decoding: turns uploaded bytes into text for extraction.
//!
//! JSON uploads are the exception: they already are a `ResumeRecord` and bypass
//! extraction entirely after validation.
//!
//! Decoding is CPU-bound (PDF parsing in particular) and must run inside
//! `tokio::task::spawn_blocking`; see [`decode_upload_blocking`].

use std::io::Read;

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::ResumeRecord;

pub mod handlers;

/// Default request body limit for uploads (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const DOCX_BODY_PATH: &str = "word/document.xml";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// WordprocessingML elements that end a visual line.
/// `&#8217;` and `&#x2013;` style numeric character references.
static CHAR_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#(?:[xX]([0-9A-Fa-f]{1,6})|([0-9]{1,7}));").expect("char ref regex")
});

static DOCX_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("docx break regex"));

static DOCX_TAB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("docx tab regex"));

static MD_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]*").expect("markdown heading regex"));

static MD_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*>[ \t]?").expect("markdown quote regex"));

static MD_EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*|__|~~|`").expect("markdown emphasis regex"));

static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)\s]+)\)").expect("markdown link regex"));

static MD_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:-{3,}|\*{3,}|_{3,})[ \t]*$").expect("markdown rule regex"));

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
    Markdown,
    Xml,
    Json,
}

impl FileKind {
    /// Picks the format from the file extension, falling back to the content type.
    pub fn detect(filename: Option<&str>, content_type: Option<&str>) -> Result<Self, AppError> {
        let by_extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| Self::from_extension(ext));

        by_extension
            .or_else(|| content_type.and_then(Self::from_content_type))
            .ok_or_else(|| {
                AppError::UnsupportedFormat(format!(
                    "'{}' is not a supported resume format (pdf, docx, txt, md, xml, json)",
                    filename.unwrap_or("upload")
                ))
            })
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" | "text" => Some(FileKind::Txt),
            "md" | "markdown" => Some(FileKind::Markdown),
            "xml" => Some(FileKind::Xml),
            "json" => Some(FileKind::Json),
            _ => None,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(FileKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(FileKind::Docx)
            }
            "text/plain" => Some(FileKind::Txt),
            "text/markdown" | "text/x-markdown" => Some(FileKind::Markdown),
            "application/xml" | "text/xml" => Some(FileKind::Xml),
            "application/json" => Some(FileKind::Json),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Txt => "txt",
            FileKind::Markdown => "md",
            FileKind::Xml => "xml",
            FileKind::Json => "json",
        }
    }
}

/// What an upload decoded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Plain text, ready for extraction.
    Text(String),
    /// A JSON upload that already is a complete record.
    Record(ResumeRecord),
}

/// Decodes an upload synchronously. Prefer [`decode_upload_blocking`] from async code.
pub fn decode_upload(kind: FileKind, bytes: &[u8]) -> Result<Decoded, AppError> {
    let decoded = match kind {
        FileKind::Json => return ResumeRecord::from_json_slice(bytes).map(Decoded::Record),
        FileKind::Pdf => pdf_text(bytes)?,
        FileKind::Docx => docx_text(bytes)?,
        FileKind::Txt => utf8_text(bytes),
        FileKind::Markdown => markdown_text(&utf8_text(bytes)),
        FileKind::Xml => xml_text(&utf8_text(bytes)),
    };

    debug!(
        kind = kind.as_str(),
        bytes = bytes.len(),
        chars = decoded.chars().count(),
        "Upload decoded"
    );
    Ok(Decoded::Text(decoded))
}

/// Runs [`decode_upload`] on the blocking pool.
pub async fn decode_upload_blocking(kind: FileKind, bytes: Bytes) -> Result<Decoded, AppError> {
    tokio::task::spawn_blocking(move || decode_upload(kind, &bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                warn!(kind = kind.as_str(), "Decoder panicked on malformed upload");
                AppError::Decode(format!("the {} file is malformed", kind.as_str()))
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in decode: {e}"))
            }
        })?
}

fn pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!("PDF extraction failed: {e}");
        AppError::Decode("the PDF could not be parsed".to_string())
    })
}

fn docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| AppError::Decode(format!("invalid DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PATH)
        .map_err(|e| AppError::Decode(format!("DOCX has no {DOCX_BODY_PATH}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Decode(format!("unreadable DOCX body: {e}")))?;

    let with_breaks = DOCX_BREAK_RE.replace_all(&xml, "\n");
    let with_tabs = DOCX_TAB_RE.replace_all(&with_breaks, "\t");
    Ok(unescape_entities(&TAG_RE.replace_all(&with_tabs, "")))
}

fn utf8_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}

/// Drops heading, quote, rule and emphasis markers; `[text](url)` keeps both parts.
fn markdown_text(text: &str) -> String {
    let text = MD_RULE_RE.replace_all(text, "");
    let text = MD_HEADING_RE.replace_all(&text, "");
    let text = MD_QUOTE_RE.replace_all(&text, "");
    let text = MD_LINK_RE.replace_all(&text, "$1 $2");
    MD_EMPHASIS_RE.replace_all(&text, "").into_owned()
}

/// Every tag becomes a line break so element boundaries become line boundaries.
fn xml_text(text: &str) -> String {
    let without_tags = TAG_RE.replace_all(text, "\n");
    unescape_entities(&without_tags)
}

/// `&amp;` goes last so `&amp;lt;` stays the literal text `&lt;`.
fn unescape_entities(text: &str) -> String {
    let decoded = CHAR_REF_RE.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            (None, None) => None,
        };
        code.and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    });

    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file(DOCX_BODY_PATH, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    fn text(decoded: Decoded) -> String {
        match decoded {
            Decoded::Text(text) => text,
            Decoded::Record(_) => panic!("expected text"),
        }
    }

    #[test]
    fn test_detect_by_extension_case_insensitive() {
        assert_eq!(
            FileKind::detect(Some("CV.PDF"), None).unwrap(),
            FileKind::Pdf
        );
        assert_eq!(
            FileKind::detect(Some("resume.markdown"), Some("application/octet-stream")).unwrap(),
            FileKind::Markdown
        );
    }

    #[test]
    fn test_detect_falls_back_to_content_type() {
        assert_eq!(
            FileKind::detect(Some("resume"), Some("text/plain; charset=utf-8")).unwrap(),
            FileKind::Txt
        );
    }

    #[test]
    fn test_detect_rejects_unknown_format() {
        let err = FileKind::detect(Some("photo.png"), Some("image/png")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
<w:p><w:r><w:t>R&amp;D Engineer</w:t><w:br/><w:t>jane@example.com</w:t></w:r></w:p>
</w:body></w:document>"#;
        let decoded = text(decode_upload(FileKind::Docx, &docx_bytes(xml)).unwrap());
        let lines: Vec<&str> = decoded
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(lines, vec!["Jane Doe", "R&D Engineer", "jane@example.com"]);
    }

    #[test]
    fn test_docx_not_a_zip_is_decode_error() {
        let err = decode_upload(FileKind::Docx, b"not a zip").unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_docx_without_body_is_decode_error() {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"<x/>").unwrap();
            zip.finish().unwrap();
        }
        let err = decode_upload(FileKind::Docx, buf.get_ref()).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_pdf_garbage_is_decode_error() {
        let err = decode_upload(FileKind::Pdf, b"%PDF-1.4 truncated").unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_markdown_markers_stripped() {
        let md = "# Jane Doe\n**Backend Engineer**\n---\n## Skills\n- `Rust`, Go\n[Portfolio](https://jane.dev)";
        let decoded = text(decode_upload(FileKind::Markdown, md.as_bytes()).unwrap());
        assert_eq!(
            decoded,
            "Jane Doe\nBackend Engineer\n\nSkills\n- Rust, Go\nPortfolio https://jane.dev"
        );
    }

    #[test]
    fn test_txt_strips_bom_and_tolerates_invalid_utf8() {
        let mut bytes = "\u{feff}Jane".as_bytes().to_vec();
        bytes.push(0xff);
        let decoded = text(decode_upload(FileKind::Txt, &bytes).unwrap());
        assert!(decoded.starts_with("Jane"));
    }

    #[test]
    fn test_xml_tags_become_lines() {
        let xml = "<resume><name>Jane Doe</name><email>jane@example.com</email><note>A &amp; B</note></resume>";
        let decoded = text(decode_upload(FileKind::Xml, xml.as_bytes()).unwrap());
        let lines: Vec<&str> = decoded.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["Jane Doe", "jane@example.com", "A & B"]);
    }

    #[test]
    fn test_numeric_character_references_decoded() {
        assert_eq!(
            unescape_entities("It&#8217;s 2019 &#x2013; 2021, R&amp;D &#X41;"),
            "It\u{2019}s 2019 \u{2013} 2021, R&D A"
        );
    }

    #[test]
    fn test_invalid_character_reference_kept_verbatim() {
        assert_eq!(unescape_entities("&#xD800; &amp;#39;"), "&#xD800; &#39;");
    }

    #[test]
    fn test_docx_numeric_references_decoded() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane&#8217;s resume</w:t></w:r></w:p></w:body></w:document>"#;
        let Decoded::Text(text) = decode_upload(FileKind::Docx, &docx_bytes(xml)).unwrap() else {
            panic!("docx decodes to text");
        };
        assert!(text.contains("Jane\u{2019}s resume"));
    }

    #[test]
    fn test_json_passthrough_fills_defaults() {
        let json = br#"{"name":"ADA","skills":null}"#;
        match decode_upload(FileKind::Json, json).unwrap() {
            Decoded::Record(record) => {
                assert_eq!(record.name, "ADA");
                assert!(record.skills.is_empty());
            }
            Decoded::Text(_) => panic!("expected record"),
        }
    }

    #[test]
    fn test_json_array_is_invalid() {
        let err = decode_upload(FileKind::Json, b"[1,2]").unwrap_err();
        assert!(matches!(err, AppError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_decode_on_blocking_pool() {
        let decoded = decode_upload_blocking(FileKind::Txt, Bytes::from_static(b"Jane Doe"))
            .await
            .unwrap();
        assert_eq!(decoded, Decoded::Text("Jane Doe".to_string()));
    }
}
