//! Stack: the unit of synthesis.
//!
//! A stack owns the resources, template parameters and published SSM
//! parameters created by constructs, keyed by logical id. Rendering is
//! deterministic: every collection is ordered by key.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConstructError, ConstructResult};
use crate::token::Token;

/// Account and region a stack deploys into.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub account_id: String,
    pub region: String,
}

impl Environment {
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.account_id, self.region)
    }
}

/// A single CloudFormation resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub depends_on: BTreeSet<String>,
}

impl CfnResource {
    /// Look up a top-level property.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// A template parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnParameter {
    #[serde(rename = "Type")]
    pub parameter_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Rendered template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, CfnParameter>,
    pub resources: BTreeMap<String, CfnResource>,
}

impl Template {
    pub fn to_json(&self) -> ConstructResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Container of everything synthesized for one environment.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    env: Environment,
    description: Option<String>,
    resources: BTreeMap<String, CfnResource>,
    parameters: BTreeMap<String, CfnParameter>,
    /// SSM path -> template parameter logical id.
    parameter_lookups: BTreeMap<String, String>,
    /// SSM path -> published value.
    published: BTreeMap<String, Token>,
}

impl Stack {
    pub fn new(name: impl Into<String>, env: Environment) -> Self {
        Self {
            name: name.into(),
            env,
            description: None,
            resources: BTreeMap::new(),
            parameters: BTreeMap::new(),
            parameter_lookups: BTreeMap::new(),
            published: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Register a resource and return its logical id.
    ///
    /// `properties` must be a JSON object. Logical ids are sanitized to the
    /// alphanumeric form CloudFormation accepts and must be unique.
    pub fn add_resource(
        &mut self,
        logical_id: &str,
        resource_type: &str,
        properties: Value,
    ) -> ConstructResult<String> {
        let logical_id = sanitize_logical_id(logical_id)?;
        if self.resources.contains_key(&logical_id) || self.parameters.contains_key(&logical_id) {
            return Err(ConstructError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id,
            });
        }

        let properties = match properties {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(ConstructError::InvalidProperties(logical_id)),
        };

        debug!("Adding {} {} to stack {}", resource_type, logical_id, self.name);
        self.resources.insert(
            logical_id.clone(),
            CfnResource {
                resource_type: resource_type.to_string(),
                properties,
                depends_on: BTreeSet::new(),
            },
        );
        Ok(logical_id)
    }

    /// Make `dependent` deploy after `dependency`.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) -> ConstructResult<()> {
        for id in [dependent, dependency] {
            if !self.resources.contains_key(id) {
                return Err(self.unknown(id));
            }
        }
        if let Some(resource) = self.resources.get_mut(dependent) {
            resource.depends_on.insert(dependency.to_string());
        }
        Ok(())
    }

    /// Register a template parameter and return a `Ref` to it.
    pub fn add_parameter(
        &mut self,
        logical_id: &str,
        parameter: CfnParameter,
    ) -> ConstructResult<Token> {
        let logical_id = sanitize_logical_id(logical_id)?;
        if self.resources.contains_key(&logical_id) || self.parameters.contains_key(&logical_id) {
            return Err(ConstructError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id,
            });
        }
        self.parameters.insert(logical_id.clone(), parameter);
        Ok(Token::Ref(logical_id))
    }

    pub fn resource(&self, logical_id: &str) -> Option<&CfnResource> {
        self.resources.get(logical_id)
    }

    pub fn parameter(&self, logical_id: &str) -> Option<&CfnParameter> {
        self.parameters.get(logical_id)
    }

    pub fn has_logical_id(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id) || self.parameters.contains_key(logical_id)
    }

    /// `base` if it is free, otherwise `base` with the lowest free numeric
    /// suffix starting at 2. Distinct names that sanitize to the same id
    /// (`App-1` and `App1`) get distinct ids in declaration order.
    pub fn unique_logical_id(&self, base: &str) -> String {
        if !self.has_logical_id(base) {
            return base.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if !self.has_logical_id(&candidate) {
                debug!("Logical id {} is taken in stack {}; using {}", base, self.name, candidate);
                return candidate;
            }
            suffix += 1;
        }
    }

    /// All resources of one CloudFormation type, ordered by logical id.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a CfnResource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.parameters.is_empty()
    }

    /// Parameters published by this stack, keyed by SSM path.
    pub fn published_parameters(&self) -> &BTreeMap<String, Token> {
        &self.published
    }

    pub(crate) fn record_published(&mut self, path: &str, value: Token) -> ConstructResult<()> {
        if self.published.contains_key(path) {
            return Err(ConstructError::DuplicateParameter {
                stack: self.name.clone(),
                path: path.to_string(),
            });
        }
        self.published.insert(path.to_string(), value);
        Ok(())
    }

    pub(crate) fn parameter_lookup(&self, path: &str) -> Option<Token> {
        self.parameter_lookups
            .get(path)
            .map(|id| Token::Ref(id.clone()))
    }

    pub(crate) fn record_parameter_lookup(&mut self, path: &str, logical_id: &str) {
        self.parameter_lookups
            .insert(path.to_string(), logical_id.to_string());
    }

    /// Render the stack as a template.
    pub fn synth(&self) -> Template {
        Template {
            format_version: "2010-09-09".to_string(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            resources: self.resources.clone(),
        }
    }

    fn unknown(&self, logical_id: &str) -> ConstructError {
        ConstructError::UnknownResource {
            stack: self.name.clone(),
            logical_id: logical_id.to_string(),
        }
    }
}

/// Join id segments into a logical id, upper-casing the first character of
/// each segment and dropping everything that is not alphanumeric.
pub fn logical_id(parts: &[&str]) -> String {
    let mut id = String::new();
    for part in parts {
        let mut chars = part.chars().filter(|c| c.is_ascii_alphanumeric());
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.extend(chars);
        }
    }
    id
}

fn sanitize_logical_id(raw: &str) -> ConstructResult<String> {
    let id: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if id.is_empty() || id.len() > 255 {
        return Err(ConstructError::InvalidLogicalId(raw.to_string()));
    }
    Ok(id)
}

/// `Tags` property value with a `Name` tag followed by `extra` in key order.
pub fn name_tags(name: &str, extra: &BTreeMap<String, String>) -> Value {
    let mut tags = vec![serde_json::json!({ "Key": "Name", "Value": name })];
    for (key, value) in extra {
        if key != "Name" {
            tags.push(serde_json::json!({ "Key": key, "Value": value }));
        }
    }
    Value::Array(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stack() -> Stack {
        Stack::new("Test", Environment::new("111111111111", "us-east-1"))
    }

    #[test]
    fn test_logical_id_joins_segments() {
        assert_eq!(logical_id(&["vpc", "Shared-Core", "routeTable", "a_b"]), "VpcSharedCoreRouteTableAb");
        assert_eq!(logical_id(&["", "x"]), "X");
    }

    #[test]
    fn test_unique_logical_id_suffixes_taken_ids() {
        let mut stack = stack();
        assert_eq!(stack.unique_logical_id("App1"), "App1");

        stack.add_resource("App1", "AWS::EC2::RouteTable", json!({})).unwrap();
        assert_eq!(stack.unique_logical_id("App1"), "App12");

        stack.add_resource("App12", "AWS::EC2::RouteTable", json!({})).unwrap();
        assert_eq!(stack.unique_logical_id("App1"), "App13");
    }

    #[test]
    fn test_duplicate_logical_id_rejected() {
        let mut stack = stack();
        stack.add_resource("Vpc", "AWS::EC2::VPC", json!({})).unwrap();
        let err = stack.add_resource("Vpc", "AWS::EC2::VPC", json!({})).unwrap_err();
        assert!(matches!(err, ConstructError::DuplicateLogicalId { .. }));
    }

    #[test]
    fn test_non_object_properties_rejected() {
        let mut stack = stack();
        let err = stack
            .add_resource("Vpc", "AWS::EC2::VPC", json!(["x"]))
            .unwrap_err();
        assert!(matches!(err, ConstructError::InvalidProperties(_)));
    }

    #[test]
    fn test_dependency_requires_both_resources() {
        let mut stack = stack();
        stack.add_resource("A", "AWS::EC2::VPC", json!({})).unwrap();
        assert!(stack.add_dependency("A", "B").is_err());
        stack.add_resource("B", "AWS::EC2::VPC", json!({})).unwrap();
        stack.add_dependency("A", "B").unwrap();
        assert!(stack.resource("A").unwrap().depends_on.contains("B"));
    }

    #[test]
    fn test_synth_renders_template_shape() {
        let mut stack = stack().with_description("network");
        stack
            .add_resource("Vpc", "AWS::EC2::VPC", json!({ "CidrBlock": "10.0.0.0/16" }))
            .unwrap();
        let template: Value = serde_json::from_str(&stack.synth().to_json().unwrap()).unwrap();

        assert_eq!(template["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(template["Description"], "network");
        assert_eq!(template["Resources"]["Vpc"]["Type"], "AWS::EC2::VPC");
        assert_eq!(
            template["Resources"]["Vpc"]["Properties"]["CidrBlock"],
            "10.0.0.0/16"
        );
        assert!(template.get("Parameters").is_none());
    }

    #[test]
    fn test_name_tags_put_name_first() {
        let mut extra = BTreeMap::new();
        extra.insert("Owner".to_string(), "net".to_string());
        extra.insert("Name".to_string(), "ignored".to_string());
        let tags = name_tags("A", &extra);
        assert_eq!(
            tags,
            json!([{ "Key": "Name", "Value": "A" }, { "Key": "Owner", "Value": "net" }])
        );
    }
}
