//! SSM parameter publication and lookup.
//!
//! Published parameters are the only interface other stacks use to discover
//! identifiers created here. Lookups do not read the parameter store at
//! synthesis time; they declare an SSM-typed template parameter that the
//! deployment engine resolves.

use tracing::debug;

use crate::error::{ConstructError, ConstructResult};
use crate::stack::{logical_id, CfnParameter, Stack};
use crate::token::Token;

/// Template parameter type that resolves an SSM string at deploy time.
pub const SSM_STRING_PARAMETER_TYPE: &str = "AWS::SSM::Parameter::Value<String>";

/// An `AWS::SSM::Parameter` holding an identifier.
pub struct PublishedParameter;

impl PublishedParameter {
    /// Publish `value` under `path`, returning the parameter's logical id.
    ///
    /// The path is recorded only once the parameter resource exists.
    pub fn publish(stack: &mut Stack, id: &str, path: &str, value: &Token) -> ConstructResult<String> {
        if stack.published_parameters().contains_key(path) {
            return Err(ConstructError::DuplicateParameter {
                stack: stack.name().to_string(),
                path: path.to_string(),
            });
        }
        let logical_id = stack.add_resource(
            id,
            "AWS::SSM::Parameter",
            serde_json::json!({
                "Name": path,
                "Type": "String",
                "Value": value,
            }),
        )?;
        stack.record_published(path, value.clone())?;
        debug!("Published {} as {}", path, logical_id);
        Ok(logical_id)
    }
}

/// Deploy-time lookup of a string parameter.
pub struct ParameterLookup;

impl ParameterLookup {
    /// Return a token for the value stored under `path`.
    ///
    /// Repeated lookups of the same path share one template parameter.
    pub fn value_for_string_parameter(stack: &mut Stack, path: &str) -> ConstructResult<Token> {
        if let Some(token) = stack.parameter_lookup(path) {
            return Ok(token);
        }

        let segments: Vec<&str> = path.split('/').collect();
        let candidate = stack.unique_logical_id(&format!("SsmParameterValue{}", logical_id(&segments)));

        let token = stack.add_parameter(
            &candidate,
            CfnParameter {
                parameter_type: SSM_STRING_PARAMETER_TYPE.to_string(),
                default: Some(path.to_string()),
                description: None,
            },
        )?;
        if let Some(id) = token.logical_id() {
            stack.record_parameter_lookup(path, id);
        }
        debug!("Resolving {} through template parameter {}", path, candidate);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Environment;

    fn stack() -> Stack {
        Stack::new("Test", Environment::new("111111111111", "us-east-1"))
    }

    #[test]
    fn test_publish_records_path() {
        let mut stack = stack();
        let value = Token::reference("Vpc");
        PublishedParameter::publish(&mut stack, "VpcParameter", "/accelerator/network/vpc/A/id", &value)
            .unwrap();

        assert_eq!(
            stack.published_parameters().get("/accelerator/network/vpc/A/id"),
            Some(&value)
        );
        let resource = stack.resource("VpcParameter").unwrap();
        assert_eq!(resource.resource_type, "AWS::SSM::Parameter");
        assert_eq!(resource.property("Value").unwrap(), &serde_json::json!({ "Ref": "Vpc" }));
    }

    #[test]
    fn test_publish_same_path_twice_fails() {
        let mut stack = stack();
        let value = Token::reference("Vpc");
        PublishedParameter::publish(&mut stack, "P1", "/x/id", &value).unwrap();
        let err = PublishedParameter::publish(&mut stack, "P2", "/x/id", &value).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateParameter { .. }));
        assert!(!stack.has_logical_id("P2"));
    }

    #[test]
    fn test_failed_publish_leaves_path_free() {
        let mut stack = stack();
        stack.add_resource("Taken", "AWS::EC2::VPC", serde_json::json!({})).unwrap();

        let value = Token::reference("Vpc");
        let err = PublishedParameter::publish(&mut stack, "Taken", "/x/id", &value).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateLogicalId { .. }));
        assert!(stack.published_parameters().is_empty());

        PublishedParameter::publish(&mut stack, "Free", "/x/id", &value).unwrap();
        assert_eq!(stack.published_parameters().get("/x/id"), Some(&value));
    }

    #[test]
    fn test_lookup_reuses_parameter() {
        let mut stack = stack();
        let path = "/accelerator/network/transitGateways/Main/id";
        let first = ParameterLookup::value_for_string_parameter(&mut stack, path).unwrap();
        let second = ParameterLookup::value_for_string_parameter(&mut stack, path).unwrap();

        assert_eq!(first, second);
        let id = first.logical_id().unwrap();
        let parameter = stack.parameter(id).unwrap();
        assert_eq!(parameter.parameter_type, SSM_STRING_PARAMETER_TYPE);
        assert_eq!(parameter.default.as_deref(), Some(path));
    }

    #[test]
    fn test_lookup_disambiguates_colliding_ids() {
        let mut stack = stack();
        let a = ParameterLookup::value_for_string_parameter(&mut stack, "/a-b/id").unwrap();
        let b = ParameterLookup::value_for_string_parameter(&mut stack, "/ab/id").unwrap();
        assert_ne!(a, b);
    }
}
