//! Transport HTTP des messages SOAP
//!
//! Le transport est synchrone : chaque appel envoie une requête POST et
//! attend la réponse complète. Aucun retry n'est tenté, un échec remonte tel
//! quel à l'appelant.

use crate::builder::build_message;
use crate::document::parse_document;
use crate::error::{Result, SoapError};
use crate::namespace::NamespaceContext;
use crate::parser::parse_response;
use crate::schema::{Mapping, Param, SchemaNode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::Agent;
use xmltree::Element;

/// Timeout par défaut d'un échange (30 secondes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Échange d'un message SOAP avec un service distant
pub trait SoapTransport {
    /// Envoie `message` à `destination` avec l'en-tête `SOAPAction: action`
    ///
    /// Renvoie le document de réponse parsé, ou [`SoapError::Transport`] si
    /// le service répond avec un statut d'échec.
    fn send(&self, message: &[u8], destination: &str, action: &str) -> Result<Element>;
}

/// Transport HTTP bloquant basé sur `ureq`
#[derive(Clone)]
pub struct HttpTransport {
    agent: Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        // Les statuts 4xx/5xx ne sont pas des erreurs ureq : on veut lire le
        // corps pour le joindre à l'erreur de transport.
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SoapTransport for HttpTransport {
    fn send(&self, message: &[u8], destination: &str, action: &str) -> Result<Element> {
        debug!(destination, action, bytes = message.len(), "Sending SOAP request");

        let mut response = self
            .agent
            .post(destination)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", action)
            .header("Accept-Encoding", "identity")
            .send(message)?;

        let status = response.status();
        let body = response.body_mut().read_to_vec()?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).into_owned();
            warn!(action, status = status.as_u16(), "SOAP request failed");
            return Err(SoapError::transport(action, status.as_u16(), text));
        }

        debug!(action, status = status.as_u16(), bytes = body.len(), "SOAP response received");
        parse_document(body.as_slice())
    }
}

/// Client SOAP : construction, envoi et extraction
///
/// L'adresse du service sert aussi de namespace protocolaire des messages.
#[derive(Debug, Clone, Default)]
pub struct SoapClient<T = HttpTransport> {
    transport: T,
}

impl SoapClient<HttpTransport> {
    /// Client HTTP avec le timeout par défaut
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl<T: SoapTransport> SoapClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoque une opération et renvoie le document de réponse
    ///
    /// - `endpoint`: URL du service, également namespace protocolaire
    /// - `action`: valeur de l'en-tête SOAPAction (ex: "Rijschool/Info")
    /// - `operation`: élément d'opération (ex: "WS_Rijschool_Info")
    /// - `request_type`: type de la requête (ex: "Rijschool_Info_Request")
    pub fn call(
        &self,
        endpoint: &str,
        action: &str,
        operation: &str,
        request_type: &str,
        params: &[Param],
    ) -> Result<Element> {
        let ns = NamespaceContext::new(endpoint);
        let message = build_message(&ns, operation, request_type, params)?;
        self.transport.send(&message, endpoint, action)
    }

    /// Invoque une opération puis extrait `schema` de l'élément `return`
    /// typé `response_type`
    #[allow(clippy::too_many_arguments)]
    pub fn call_and_parse(
        &self,
        endpoint: &str,
        action: &str,
        operation: &str,
        request_type: &str,
        params: &[Param],
        response_type: &str,
        schema: &[SchemaNode],
    ) -> Result<Mapping> {
        let document = self.call(endpoint, action, operation, request_type, params)?;
        let ns = NamespaceContext::new(endpoint);
        parse_response(&ns, &document, response_type, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::field;
    use std::cell::RefCell;

    /// Transport qui mémorise le dernier envoi et rejoue une réponse fixe
    struct ReplayTransport {
        response: &'static str,
        sent: RefCell<Vec<(Vec<u8>, String, String)>>,
    }

    impl SoapTransport for ReplayTransport {
        fn send(&self, message: &[u8], destination: &str, action: &str) -> Result<Element> {
            self.sent.borrow_mut().push((
                message.to_vec(),
                destination.to_string(),
                action.to_string(),
            ));
            parse_document(self.response.as_bytes())
        }
    }

    const ENDPOINT: &str = "https://www.dation.nl/soap/server.php";

    #[test]
    fn test_endpoint_is_destination_and_namespace() {
        let client = SoapClient::with_transport(ReplayTransport {
            response: r#"<Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                xmlns:tns="https://www.dation.nl/soap/server.php">
                <return xsi:type="tns:Info_Response"><Id xsi:type="xsd:int">12</Id></return>
              </Envelope>"#,
            sent: RefCell::new(Vec::new()),
        });

        let values = client
            .call_and_parse(
                ENDPOINT,
                "Rijschool/Info",
                "WS_Info",
                "Info_Request",
                &[Param::string("Handle", "demo")],
                "Info_Response",
                &[field("Id")],
            )
            .unwrap();
        assert_eq!(values["Id"].as_integer(), Some(12));

        let sent = client.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        let (message, destination, action) = &sent[0];
        assert_eq!(destination, ENDPOINT);
        assert_eq!(action, "Rijschool/Info");
        let xml = String::from_utf8(message.clone()).unwrap();
        assert!(xml.contains(&format!("xmlns:tns=\"{}\"", ENDPOINT)));
    }
}
