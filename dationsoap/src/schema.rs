//! Modèle de valeurs typées : paramètres sortants, schémas de réponse et
//! arbre de valeurs extraites

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// Types primitifs acceptés en paramètre d'une requête
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Int,
}

impl PrimitiveKind {
    /// Nom local XML Schema du type (`string`, `int`)
    pub fn xsd_name(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
        }
    }
}

/// Valeur d'un paramètre de requête
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Int(i64),
}

impl ParamValue {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            ParamValue::String(_) => PrimitiveKind::String,
            ParamValue::Int(_) => PrimitiveKind::Int,
        }
    }

    /// Forme canonique sur le fil (entiers en base 10, chaînes telles quelles)
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
        }
    }
}

/// Paramètre nommé d'une requête SOAP
///
/// L'ordre d'une liste de paramètres est conservé tel quel sur le fil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
}

impl Param {
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::String(value.into()),
        }
    }

    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Int(value),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.value.kind()
    }
}

/// Groupe nommé d'éléments (objet ou item de tableau)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    pub name: String,
    pub children: Vec<SchemaNode>,
}

/// Description de la forme attendue d'une réponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Feuille : le type primitif est lu sur le fil (`xsi:type`)
    Field(String),
    /// Groupe imbriqué
    Object(ObjectSchema),
    /// Séquence homogène d'éléments `item`, tous de la forme `item`
    Array { name: String, item: ObjectSchema },
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Field(name) => name,
            SchemaNode::Object(object) => &object.name,
            SchemaNode::Array { name, .. } => name,
        }
    }
}

impl From<&str> for SchemaNode {
    fn from(name: &str) -> Self {
        SchemaNode::Field(name.to_string())
    }
}

/// Feuille nommée
pub fn field(name: impl Into<String>) -> SchemaNode {
    SchemaNode::Field(name.into())
}

/// Forme d'un groupe, utilisable seule comme item de tableau
///
/// Les noms des enfants doivent être uniques : c'est au schéma appelant de le
/// garantir. Un doublon fait paniquer les builds de debug. En release il
/// n'est pas vérifié et, à l'extraction, la valeur du dernier enfant de ce nom
/// remplace celle du premier dans le [`Mapping`].
pub fn object_schema(name: impl Into<String>, children: Vec<SchemaNode>) -> ObjectSchema {
    let object = ObjectSchema {
        name: name.into(),
        children,
    };
    debug_assert!(
        has_unique_names(&object.children),
        "duplicate child names in schema object '{}'",
        object.name
    );
    object
}

/// Groupe imbriqué
pub fn object(name: impl Into<String>, children: Vec<SchemaNode>) -> SchemaNode {
    SchemaNode::Object(object_schema(name, children))
}

/// Tableau d'objets de forme `item`
pub fn array(name: impl Into<String>, item: ObjectSchema) -> SchemaNode {
    SchemaNode::Array {
        name: name.into(),
        item,
    }
}

fn has_unique_names(children: &[SchemaNode]) -> bool {
    children
        .iter()
        .enumerate()
        .all(|(i, child)| children[..i].iter().all(|c| c.name() != child.name()))
}

/// Résultat d'extraction, une entrée par enfant du schéma, dans l'ordre du schéma
pub type Mapping = IndexMap<String, Value>;

/// Valeur extraite d'une réponse SOAP
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<FixedOffset>),
    Mapping(Mapping),
    Sequence(Vec<Mapping>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Mapping]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Nom court du variant, pour les messages d'erreur
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Timestamp(_) => "timestamp",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }
}
