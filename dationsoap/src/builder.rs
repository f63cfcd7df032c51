//! Construction des requêtes SOAP

use crate::error::Result;
use crate::namespace::NamespaceContext;
use crate::schema::Param;
use xmltree::{Element, XMLNode};

fn text_element(name: String, text: String) -> Element {
    let mut elem = Element::new(&name);
    elem.children.push(XMLNode::Text(text));
    elem
}

fn build_envelope(ns: &NamespaceContext, body_child: Element) -> Element {
    let mut body = Element::new(&ns.envelope("Body"));
    body.children.push(XMLNode::Element(body_child));

    let mut envelope = Element::new(&ns.envelope("Envelope"));
    for (prefix, uri) in ns.bindings() {
        envelope
            .attributes
            .insert(format!("xmlns:{}", prefix), uri.to_string());
    }
    envelope.children.push(XMLNode::Element(body));
    envelope
}

fn build_request(ns: &NamespaceContext, request_type: &str, params: &[Param]) -> Element {
    let type_attr = ns.type_attribute();

    let mut request = Element::new(&ns.qualify("request"));
    request
        .attributes
        .insert(type_attr.clone(), ns.qualify(request_type));

    for param in params {
        let mut child = text_element(ns.qualify(&param.name), param.value.to_wire());
        child
            .attributes
            .insert(type_attr.clone(), ns.primitive(param.kind().xsd_name()));
        request.children.push(XMLNode::Element(child));
    }

    request
}

/// Construit une requête SOAP complète
///
/// # Arguments
///
/// * `ns` - Contexte de namespaces (le namespace protocolaire est lié à `tns`)
/// * `operation` - Nom de l'opération (ex: "WS_Rijschool_Info")
/// * `request_type` - Type de la requête (ex: "Rijschool_Info_Request")
/// * `params` - Paramètres, sérialisés dans l'ordre donné
///
/// # Returns
///
/// Le document encodé en UTF-8, déclaration XML incluse. Seul un identifiant
/// XML invalide peut faire échouer la sérialisation.
pub fn build_message(
    ns: &NamespaceContext,
    operation: &str,
    request_type: &str,
    params: &[Param],
) -> Result<Vec<u8>> {
    let mut operation_elem = Element::new(&ns.qualify(operation));
    operation_elem
        .children
        .push(XMLNode::Element(build_request(ns, request_type, params)));

    let envelope = build_envelope(ns, operation_elem);

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(false);
    envelope.write_with_config(&mut buf, config)?;

    Ok(buf)
}
