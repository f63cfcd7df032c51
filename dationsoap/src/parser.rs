//! Extraction typée des réponses SOAP

use crate::error::{Result, SoapError};
use crate::namespace::NamespaceContext;
use crate::schema::{Mapping, ObjectSchema, SchemaNode, Value};
use chrono::DateTime;
use xmltree::{Element, XMLNode};

/// Nom de l'élément portant le résultat d'une opération
pub const RETURN_ELEMENT: &str = "return";

/// Nom des éléments d'un tableau
pub const ARRAY_ITEM_ELEMENT: &str = "item";

/// Suffixe du tag de type d'un tableau (ex: `SOAP-ENC:Array`)
pub const ARRAY_TYPE_SUFFIX: &str = ":Array";

/// Cherche, dans tout le document, le premier élément `return` typé
/// `tns:<response_type>`
///
/// Le parcours est en profondeur, dans l'ordre du document, racine comprise.
/// Seul un `return` sans namespace est retenu.
pub fn find_return_element<'a>(
    ns: &NamespaceContext,
    document: &'a Element,
    response_type: &str,
) -> Option<&'a Element> {
    let is_return = |elem: &Element| {
        elem.name == RETURN_ELEMENT
            && elem.namespace.is_none()
            && ns
                .type_of(elem)
                .is_some_and(|tag| ns.is_protocol_type(elem, tag, response_type))
    };

    let mut stack = vec![document];
    while let Some(elem) = stack.pop() {
        if is_return(elem) {
            return Some(elem);
        }
        stack.extend(
            elem.children
                .iter()
                .rev()
                .filter_map(XMLNode::as_element),
        );
    }
    None
}

/// Extrait les valeurs décrites par `schema` de la réponse `document`
///
/// # Arguments
///
/// * `ns` - Contexte de namespaces de l'échange
/// * `document` - Racine du document de réponse
/// * `response_type` - Type attendu de l'élément `return` (ex: "Rijschool_Info_Response")
/// * `schema` - Forme attendue, un nœud par clé du résultat
///
/// # Errors
///
/// [`SoapError::MissingReturnElement`] si aucun élément `return` ne porte le
/// type attendu, puis toute erreur d'extraction rencontrée en descendant le
/// schéma. Aucun résultat partiel n'est renvoyé.
pub fn parse_response(
    ns: &NamespaceContext,
    document: &Element,
    response_type: &str,
    schema: &[SchemaNode],
) -> Result<Mapping> {
    let root = find_return_element(ns, document, response_type)
        .ok_or_else(|| SoapError::MissingReturnElement(response_type.to_string()))?;

    extract_children(ns, root, schema, "")
}

fn extract_children(
    ns: &NamespaceContext,
    parent: &Element,
    schema: &[SchemaNode],
    path: &str,
) -> Result<Mapping> {
    let mut result = Mapping::with_capacity(schema.len());
    for node in schema {
        let value = extract_node(ns, parent, node, path)?;
        result.insert(node.name().to_string(), value);
    }
    Ok(result)
}

fn extract_node(
    ns: &NamespaceContext,
    parent: &Element,
    node: &SchemaNode,
    parent_path: &str,
) -> Result<Value> {
    let path = join_path(parent_path, node.name());
    let elem = parent
        .get_child(node.name())
        .ok_or_else(|| SoapError::MissingField(path.clone()))?;

    match node {
        SchemaNode::Field(_) => extract_primitive(ns, elem, &path),
        SchemaNode::Object(object) => {
            extract_children(ns, elem, &object.children, &path).map(Value::Mapping)
        }
        SchemaNode::Array { item, .. } => extract_array(ns, elem, item, &path),
    }
}

fn extract_primitive(ns: &NamespaceContext, elem: &Element, path: &str) -> Result<Value> {
    let tag = ns.type_of(elem).unwrap_or_default();
    let text = elem.get_text().unwrap_or_default();

    match ns.xsd_local(elem, tag) {
        Some("string") => Ok(Value::Text(text.into_owned())),
        Some("int") => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| SoapError::type_mismatch(path, tag, &text)),
        Some("dateTime") => DateTime::parse_from_rfc3339(text.trim())
            .map(Value::Timestamp)
            .map_err(|_| SoapError::type_mismatch(path, tag, &text)),
        _ => Err(SoapError::unknown_primitive_type(path, tag)),
    }
}

fn extract_array(
    ns: &NamespaceContext,
    elem: &Element,
    item: &ObjectSchema,
    path: &str,
) -> Result<Value> {
    let tag = ns.type_of(elem).unwrap_or_default();
    if !tag.ends_with(ARRAY_TYPE_SUFFIX) {
        return Err(SoapError::malformed_array_type(path, tag));
    }

    let item_path = join_path(path, ARRAY_ITEM_ELEMENT);
    elem.children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|child| child.name == ARRAY_ITEM_ELEMENT)
        .map(|child| extract_children(ns, child, &item.children, &item_path))
        .collect::<Result<Vec<_>>>()
        .map(Value::Sequence)
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
