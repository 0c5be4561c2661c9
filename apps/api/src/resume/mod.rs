// Résumé importer: PDF upload → remote OCR → regex parsing → profile preview.

pub mod handlers;
pub mod ocr;
pub mod parser;
