//! Contexte de namespaces pour les enveloppes SOAP
//!
//! Toutes les opérations de sérialisation et de recherche reçoivent un
//! [`NamespaceContext`] explicite : il n'existe aucune table de namespaces
//! globale.

use xmltree::Element;

/// Namespace de l'enveloppe SOAP 1.1
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace des types primitifs XML Schema
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Namespace des instances XML Schema (attribut `type`)
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Alias de l'enveloppe
pub const SOAP_ENV_PREFIX: &str = "soapenv";

/// Alias des types primitifs
pub const XSD_PREFIX: &str = "xsd";

/// Alias des instances de types
pub const XSI_PREFIX: &str = "xsi";

/// Alias conventionnel du namespace protocolaire
pub const TNS_PREFIX: &str = "tns";

/// Tag de type qualifié, résolu à partir d'une valeur `prefix:local`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedType<'a> {
    /// URI du namespace, si le préfixe a pu être résolu
    pub namespace: Option<&'a str>,
    /// Nom local du type (ex: `int`, `Rijschool_Info_Response`)
    pub local: &'a str,
}

/// Liaisons de namespaces d'un échange SOAP
///
/// Le namespace protocolaire est fourni par l'appelant ; il est lié à
/// l'alias `tns`. Les trois autres liaisons sont fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceContext {
    protocol: String,
}

impl NamespaceContext {
    /// Crée un contexte pour le namespace protocolaire donné
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
        }
    }

    /// URI du namespace protocolaire
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Les quatre déclarations `xmlns:*` posées sur l'enveloppe
    pub fn bindings(&self) -> [(&'static str, &str); 4] {
        [
            (SOAP_ENV_PREFIX, SOAP_ENV_NS),
            (XSD_PREFIX, XSD_NS),
            (XSI_PREFIX, XSI_NS),
            (TNS_PREFIX, self.protocol.as_str()),
        ]
    }

    /// Nom qualifié dans le namespace protocolaire (`tns:local`)
    pub fn qualify(&self, local: &str) -> String {
        format!("{}:{}", TNS_PREFIX, local)
    }

    /// Nom qualifié dans le namespace de l'enveloppe (`soapenv:local`)
    pub fn envelope(&self, local: &str) -> String {
        format!("{}:{}", SOAP_ENV_PREFIX, local)
    }

    /// Tag de type primitif XML Schema (`xsd:local`)
    pub fn primitive(&self, local: &str) -> String {
        format!("{}:{}", XSD_PREFIX, local)
    }

    /// Nom de l'attribut d'instance de type (`xsi:type`)
    pub fn type_attribute(&self) -> String {
        format!("{}:type", XSI_PREFIX)
    }

    /// Lit l'attribut `xsi:type` d'un élément
    ///
    /// Seul l'attribut du namespace XML Schema instance compte : un `type`
    /// sans préfixe ou d'un autre namespace est ignoré. Les documents reçus
    /// doivent être lus par [`crate::parse_document`], qui indexe cet
    /// attribut sous `xsi:type`.
    pub fn type_of<'e>(&self, element: &'e Element) -> Option<&'e str> {
        element
            .attributes
            .get(&self.type_attribute())
            .map(String::as_str)
    }

    /// Résout un tag `prefix:local` en namespace + nom local
    ///
    /// Le préfixe est d'abord cherché dans les déclarations en portée sur
    /// `element`, puis dans les alias conventionnels de ce contexte.
    pub fn resolve<'a>(&'a self, element: &'a Element, tag: &'a str) -> QualifiedType<'a> {
        let (prefix, local) = match tag.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", tag),
        };

        let declared = element
            .namespaces
            .as_ref()
            .and_then(|ns| ns.get(prefix))
            .filter(|uri| !uri.is_empty());

        let namespace = declared.or_else(|| match prefix {
            SOAP_ENV_PREFIX => Some(SOAP_ENV_NS),
            XSD_PREFIX => Some(XSD_NS),
            XSI_PREFIX => Some(XSI_NS),
            TNS_PREFIX => Some(self.protocol.as_str()),
            _ => None,
        });

        QualifiedType { namespace, local }
    }

    /// Vrai si `tag` désigne `local` dans le namespace protocolaire
    pub fn is_protocol_type(&self, element: &Element, tag: &str, local: &str) -> bool {
        if tag == self.qualify(local) {
            return true;
        }
        let resolved = self.resolve(element, tag);
        resolved.local == local && resolved.namespace == Some(self.protocol.as_str())
    }

    /// Nom local d'un type primitif XML Schema, si `tag` en désigne un
    pub fn xsd_local<'a>(&'a self, element: &'a Element, tag: &'a str) -> Option<&'a str> {
        let resolved = self.resolve(element, tag);
        (resolved.namespace == Some(XSD_NS)).then_some(resolved.local)
    }
}
