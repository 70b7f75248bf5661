//! Identifier tokens.
//!
//! A token is a stable reference to a value that only exists once the
//! template is deployed: a `Ref`, an `Fn::GetAtt` or an `Fn::Sub` string.
//! Tokens compare by their logical target, so two synthesis passes over the
//! same configuration produce equal tokens.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// A value or deploy-time reference usable as a resource property.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    /// A plain string known at synthesis time.
    Literal(String),
    /// `{ "Ref": logical_id }`.
    Ref(String),
    /// `{ "Fn::GetAtt": [logical_id, attribute] }`.
    GetAtt { logical_id: String, attribute: String },
    /// `{ "Fn::Sub": template }`.
    Sub(String),
}

impl Token {
    pub fn literal(value: impl Into<String>) -> Self {
        Token::Literal(value.into())
    }

    pub fn reference(logical_id: impl Into<String>) -> Self {
        Token::Ref(logical_id.into())
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Token::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    pub fn sub(template: impl Into<String>) -> Self {
        Token::Sub(template.into())
    }

    /// Logical id of the resource or parameter this token points at.
    pub fn logical_id(&self) -> Option<&str> {
        match self {
            Token::Ref(id) => Some(id),
            Token::GetAtt { logical_id, .. } => Some(logical_id),
            Token::Literal(_) | Token::Sub(_) => None,
        }
    }

    /// Render the token as template JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Token::Literal(s) => Value::String(s.clone()),
            Token::Ref(id) => serde_json::json!({ "Ref": id }),
            Token::GetAtt {
                logical_id,
                attribute,
            } => serde_json::json!({ "Fn::GetAtt": [logical_id, attribute] }),
            Token::Sub(template) => serde_json::json!({ "Fn::Sub": template }),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Token::Literal(s) => serializer.serialize_str(s),
            Token::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Token::GetAtt {
                logical_id,
                attribute,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[logical_id, attribute])?;
                map.end()
            }
            Token::Sub(template) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Sub", template)?;
                map.end()
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(s) => write!(f, "{}", s),
            Token::Ref(id) => write!(f, "${{Ref:{}}}", id),
            Token::GetAtt {
                logical_id,
                attribute,
            } => write!(f, "${{{}.{}}}", logical_id, attribute),
            Token::Sub(template) => write!(f, "${{Sub:{}}}", template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_serializes_as_intrinsic() {
        let token = Token::reference("VpcA");
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            serde_json::json!({ "Ref": "VpcA" })
        );
        assert_eq!(token.to_value(), serde_json::json!({ "Ref": "VpcA" }));
    }

    #[test]
    fn test_get_att_serializes_as_pair() {
        let token = Token::get_att("NatEip", "AllocationId");
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            serde_json::json!({ "Fn::GetAtt": ["NatEip", "AllocationId"] })
        );
        assert_eq!(token.logical_id(), Some("NatEip"));
    }

    #[test]
    fn test_literal_has_no_logical_id() {
        let token = Token::literal("vpc-123");
        assert_eq!(token.logical_id(), None);
        assert_eq!(token.to_string(), "vpc-123");
    }
}
