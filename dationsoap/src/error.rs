//! Erreurs SOAP

/// Résultat des opérations SOAP
pub type Result<T> = std::result::Result<T, SoapError>;

/// Erreurs de construction, de transport et d'extraction SOAP
///
/// Aucune n'est récupérée localement : elles remontent toutes à l'appelant.
#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    /// Le service a répondu avec un statut HTTP d'échec
    #[error("SOAP action {action} returned status code {status}: {body}")]
    Transport {
        action: String,
        status: u16,
        body: String,
    },

    /// Échec de l'échange HTTP lui-même (connexion, TLS, lecture)
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// La réponse n'est pas un document XML valide
    #[error("XML parse error: {0}")]
    MalformedDocument(#[from] xmltree::ParseError),

    /// Sérialisation impossible (identifiant XML invalide)
    #[error("XML serialization error: {0}")]
    Serialize(#[from] xmltree::Error),

    #[error("There exists no return element with type '{0}'")]
    MissingReturnElement(String),

    #[error("Missing element '{0}' in SOAP response")]
    MissingField(String),

    #[error("Element '{path}' typed {tag} has invalid text '{text}'")]
    TypeMismatch {
        path: String,
        tag: String,
        text: String,
    },

    #[error("Unknown type '{tag}' for element '{path}'")]
    UnknownPrimitiveType { path: String, tag: String },

    #[error("Element '{path}' is not an array (type '{tag}')")]
    MalformedArrayType { path: String, tag: String },
}

impl SoapError {
    pub fn transport(action: &str, status: u16, body: impl Into<String>) -> Self {
        SoapError::Transport {
            action: action.to_string(),
            status,
            body: body.into(),
        }
    }

    pub fn type_mismatch(path: &str, tag: &str, text: &str) -> Self {
        SoapError::TypeMismatch {
            path: path.to_string(),
            tag: tag.to_string(),
            text: text.to_string(),
        }
    }

    pub fn unknown_primitive_type(path: &str, tag: &str) -> Self {
        SoapError::UnknownPrimitiveType {
            path: path.to_string(),
            tag: tag.to_string(),
        }
    }

    pub fn malformed_array_type(path: &str, tag: &str) -> Self {
        SoapError::MalformedArrayType {
            path: path.to_string(),
            tag: tag.to_string(),
        }
    }
}
