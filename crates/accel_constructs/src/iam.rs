//! IAM roles assumable from other accounts.

use std::collections::BTreeSet;

use crate::error::{ConstructError, ConstructResult};
use crate::stack::Stack;
use crate::token::Token;

pub struct CrossAccountRoleProps<'a> {
    pub role_name: &'a str,
    pub trusted_account_ids: &'a BTreeSet<String>,
    /// IAM actions granted on `*`.
    pub actions: &'a [&'a str],
}

/// Role trusted by a set of account roots with a single inline policy.
pub struct CrossAccountRole;

impl CrossAccountRole {
    pub fn new(stack: &mut Stack, id: &str, props: CrossAccountRoleProps<'_>) -> ConstructResult<Token> {
        if props.trusted_account_ids.is_empty() {
            return Err(ConstructError::NoTrustedAccounts(props.role_name.to_string()));
        }

        let principals: Vec<Token> = props
            .trusted_account_ids
            .iter()
            .map(|account| Token::sub(format!("arn:${{AWS::Partition}}:iam::{}:root", account)))
            .collect();

        let logical_id = stack.add_resource(
            id,
            "AWS::IAM::Role",
            serde_json::json!({
                "AssumeRolePolicyDocument": {
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Action": "sts:AssumeRole",
                        "Effect": "Allow",
                        "Principal": { "AWS": principals },
                    }],
                },
                "Policies": [{
                    "PolicyName": "default",
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Action": props.actions,
                            "Effect": "Allow",
                            "Resource": "*",
                        }],
                    },
                }],
                "RoleName": props.role_name,
            }),
        )?;
        Ok(Token::get_att(logical_id, "Arn"))
    }
}
