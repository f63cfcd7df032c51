//! Lecture des documents SOAP reçus
//!
//! `Element::parse` indexe les attributs par leur seul nom local et ignore
//! le texte composé uniquement d'espaces. Ce lecteur construit le même arbre
//! `xmltree` en gardant le préfixe des attributs (`xsi:type` reste distinct
//! de `o:type`) et le texte tel quel.

use crate::error::Result;
use crate::namespace::{XSI_NS, XSI_PREFIX};
use std::io::Read;
use xml::name::OwnedName;
use xml::reader::{EventReader, ParserConfig, XmlEvent};
use xmltree::{Element, ParseError, XMLNode};

/// Parse un document XML complet et renvoie son élément racine
///
/// Les attributs du namespace XML Schema instance sont indexés sous l'alias
/// `xsi`, quel que soit le préfixe utilisé dans le document. Les autres
/// attributs préfixés gardent leur préfixe.
///
/// # Errors
///
/// [`crate::SoapError::MalformedDocument`] si le document n'est pas du XML
/// bien formé.
pub fn parse_document<R: Read>(source: R) -> Result<Element> {
    let config = ParserConfig::new().whitespace_to_characters(true);
    let mut reader = EventReader::new_with_config(source, config);
    let mut open: Vec<Element> = Vec::new();

    loop {
        match reader.next().map_err(ParseError::MalformedXml)? {
            XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let mut elem = Element::new(&name.local_name);
                elem.prefix = name.prefix;
                elem.namespace = name.namespace;
                if !namespace.is_essentially_empty() {
                    elem.namespaces = Some(namespace);
                }
                for attr in attributes {
                    elem.attributes.insert(attribute_key(&attr.name), attr.value);
                }
                open.push(elem);
            }
            XmlEvent::EndElement { .. } => {
                let elem = open.pop().ok_or(ParseError::CannotParse)?;
                match open.last_mut() {
                    Some(parent) => parent.children.push(XMLNode::Element(elem)),
                    None => return Ok(elem),
                }
            }
            XmlEvent::Characters(text) => {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::Text(text));
                }
            }
            XmlEvent::CData(text) => {
                if let Some(parent) = open.last_mut() {
                    parent.children.push(XMLNode::CData(text));
                }
            }
            XmlEvent::EndDocument => return Err(ParseError::CannotParse.into()),
            _ => {}
        }
    }
}

fn attribute_key(name: &OwnedName) -> String {
    match (name.namespace.as_deref(), name.prefix.as_deref()) {
        (Some(XSI_NS), _) => format!("{}:{}", XSI_PREFIX, name.local_name),
        (_, Some(prefix)) => format!("{}:{}", prefix, name.local_name),
        _ => name.local_name.clone(),
    }
}
