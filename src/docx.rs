//! Minimal reading and writing of WordprocessingML (`.docx`) packages.
//!
//! Only body-level paragraphs are understood. Reading concatenates the runs of each paragraph;
//! writing produces the smallest package Word and LibreOffice accept.

use anyhow::{Context, anyhow};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_TAIL: &str = "<w:sectPr/></w:body></w:document>";

/// Reads the text of every body-level paragraph, blank ones included.
pub fn read_paragraphs(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Cannot open {:?}", path))?;
    let mut archive =
        ZipArchive::new(file).with_context(|| format!("{:?} is not a docx package", path))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("{:?} has no {}", path, DOCUMENT_PART))?
        .read_to_string(&mut xml)?;

    paragraphs_from_xml(&xml)
}

/// Writes a new package holding one paragraph per entry.
pub fn write_paragraphs(path: &Path, paragraphs: &[String]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {:?}", path))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(CONTENT_TYPES.as_bytes())?;

    writer.start_file("_rels/.rels", options)?;
    writer.write_all(PACKAGE_RELS.as_bytes())?;

    writer.start_file(DOCUMENT_PART, options)?;
    writer.write_all(document_xml(paragraphs).as_bytes())?;

    writer.finish()?;
    Ok(())
}

pub fn paragraphs_from_xml(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack = Vec::<Vec<u8>>::new();
    let mut current: Option<String> = None;
    let mut paragraphs = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| anyhow!("Invalid document XML at {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && is_body_level(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::End(_) => {
                let name = stack.pop();
                if name.as_deref() == Some(&b"p"[..]) && is_body_level(&stack) {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"p" && is_body_level(&stack) {
                    paragraphs.push(String::new());
                } else if let Some(text) = current.as_mut().filter(|_| in_run(&stack)) {
                    match name.as_ref() {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if let Some(text) = current.as_mut() {
                    if in_text_element(&stack) {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::CData(t) => {
                if let Some(text) = current.as_mut() {
                    if in_text_element(&stack) {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

pub fn document_xml(paragraphs: &[String]) -> String {
    let mut xml = String::from(DOCUMENT_HEAD);
    for paragraph in paragraphs {
        xml.push_str("<w:p><w:r>");
        for (i, line) in paragraph.split('\n').enumerate() {
            if i > 0 {
                xml.push_str("<w:br/>");
            }
            for (j, piece) in line.split('\t').enumerate() {
                if j > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !piece.is_empty() {
                    xml.push_str(r#"<w:t xml:space="preserve">"#);
                    xml.push_str(&escape(piece));
                    xml.push_str("</w:t>");
                }
            }
        }
        xml.push_str("</w:r></w:p>");
    }
    xml.push_str(DOCUMENT_TAIL);
    xml
}

/// Directly under `w:body`, i.e. not inside tables, text boxes or headers.
fn is_body_level(stack: &[Vec<u8>]) -> bool {
    matches!(stack, [doc, body] if doc == b"document" && body == b"body")
}

fn in_run(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|name| name.as_slice() == b"r") && in_single_paragraph(stack)
}

fn in_text_element(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|name| name.as_slice() == b"t") && in_single_paragraph(stack)
}

/// Inside exactly one paragraph, so nested text-box paragraphs are left out.
fn in_single_paragraph(stack: &[Vec<u8>]) -> bool {
    stack.iter().filter(|name| name.as_slice() == b"p").count() == 1
}
