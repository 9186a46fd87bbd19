//! Thin document builder over `quick_xml::Writer`.
//!
//! Each render creates a fresh builder, so no element or attribute state can leak from
//! one render into the next.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::errors::{Result, SitemapError};
use crate::namespaces::Namespaces;

pub struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBuilder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| SitemapError::Xml(e.to_string()))
    }

    /// `<?xml version="1.0" encoding="UTF-8"?>`
    pub fn declaration(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    /// `<?xml-stylesheet type="text/xsl" href="..."?>`
    pub fn stylesheet(&mut self, href: &str) -> Result<()> {
        let content = format!(r#"xml-stylesheet type="text/xsl" href="{}""#, escape(href));
        self.write(Event::PI(BytesPI::new(content)))
    }

    /// Opens the document root carrying the given namespace declarations.
    pub fn open_root(&mut self, name: &str, namespaces: &Namespaces) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attr in namespaces.iter() {
            start.push_attribute(attr);
        }
        self.write(Event::Start(start))
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.write(Event::Start(start))
    }

    pub fn close(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Self-closing element, e.g. `<xhtml:link rel=".." href=".."/>`.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.write(Event::Empty(start))
    }

    /// `<name>escaped text</name>`
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.text_element_with(name, &[], text)
    }

    pub fn text_element_with(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attrs)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    /// `<name><![CDATA[text]]></name>`, falling back to escaped text if `text` would end the section early.
    pub fn cdata_element(&mut self, name: &str, text: &str) -> Result<()> {
        if text.contains("]]>") {
            return self.text_element(name, text);
        }
        self.open(name, &[])?;
        self.write(Event::CData(BytesCData::new(text)))?;
        self.close(name)
    }

    pub fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| SitemapError::Xml(e.to_string()))
    }
}
