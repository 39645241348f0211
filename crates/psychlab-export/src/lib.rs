//! psychlab-export
//!
//! Rendering of generated reports: the `fullReport` line contract, HTML
//! print view, word-processor document, and DOCX.

pub mod docx;
pub mod error;
pub mod filename;
pub mod html;
pub mod render;
pub mod styles;

pub const DOC_CONTENT_TYPE: &str = "application/msword";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
