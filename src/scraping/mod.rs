pub mod document_source;
pub mod extract_version;
