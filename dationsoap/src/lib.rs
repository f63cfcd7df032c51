//! # dationsoap - Marshalling SOAP piloté par schéma
//!
//! Cette crate construit des requêtes SOAP à partir d'une liste ordonnée de
//! paramètres typés, et extrait un arbre de valeurs typées des réponses en
//! suivant un schéma fourni par l'appelant.
//!
//! ## Fonctionnalités
//!
//! - ✅ Construction d'enveloppes (`soapenv`, `xsd`, `xsi`, `tns`)
//! - ✅ Paramètres `xsd:string` / `xsd:int`, ordre préservé
//! - ✅ Recherche de l'élément `return` typé n'importe où dans la réponse
//! - ✅ Extraction récursive : champs, objets, tableaux `SOAP-ENC:Array`
//! - ✅ Primitives `string`, `int`, `dateTime` (offset conservé)
//! - ✅ Transport HTTP synchrone (`ureq`)
//!
//! ## Architecture
//!
//! - [`schema`] : paramètres, schémas de réponse et valeurs extraites
//! - [`NamespaceContext`] : liaisons de namespaces d'un échange
//! - [`build_message`] : sérialisation d'une requête
//! - [`parse_response`] : extraction typée d'une réponse
//! - [`SoapClient`] / [`SoapTransport`] : envoi des messages
//!
//! ## Example
//!
//! ```ignore
//! use dationsoap::{NamespaceContext, Param, build_message, parse_response};
//! use dationsoap::schema::{array, field, object_schema};
//!
//! let ns = NamespaceContext::new("https://www.dation.nl/soap/server.php");
//! let message = build_message(
//!     &ns,
//!     "WS_Rijschool_Info",
//!     "Rijschool_Info_Request",
//!     &[Param::string("Handle", "demo"), Param::int("studentId", 0)],
//! )?;
//!
//! // ... envoi, puis :
//! let values = parse_response(
//!     &ns,
//!     &document,
//!     "Rijschool_Info_Response",
//!     &[field("Id"), field("Naam"), field("WebServiceURL")],
//! )?;
//! let name = values["Naam"].as_text();
//! ```

mod builder;
mod client;
mod document;
mod error;
mod namespace;
mod parser;
pub mod schema;

pub use builder::build_message;
pub use client::{DEFAULT_TIMEOUT_SECS, HttpTransport, SoapClient, SoapTransport};
pub use document::parse_document;
pub use error::{Result, SoapError};
pub use namespace::{
    NamespaceContext, QualifiedType, SOAP_ENV_NS, SOAP_ENV_PREFIX, TNS_PREFIX, XSD_NS,
    XSD_PREFIX, XSI_NS, XSI_PREFIX,
};
pub use parser::{
    ARRAY_ITEM_ELEMENT, ARRAY_TYPE_SUFFIX, RETURN_ELEMENT, find_return_element, parse_response,
};
pub use schema::{Mapping, ObjectSchema, Param, ParamValue, PrimitiveKind, SchemaNode, Value};

/// Document XML parsé, tel que renvoyé par un [`SoapTransport`]
pub use xmltree::Element;
