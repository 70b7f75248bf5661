//! Route53 Resolver query-logging associations.

use crate::error::ConstructResult;
use crate::stack::Stack;
use crate::token::Token;
use crate::vpc::SecureVpc;

/// Associates an existing query-logging config with a VPC.
pub struct QueryLoggingConfigAssociation;

impl QueryLoggingConfigAssociation {
    pub fn new(
        stack: &mut Stack,
        id: &str,
        resolver_query_log_config_id: &Token,
        vpc: &SecureVpc,
    ) -> ConstructResult<Token> {
        let logical_id = stack.add_resource(
            id,
            "AWS::Route53Resolver::ResolverQueryLoggingConfigAssociation",
            serde_json::json!({
                "ResolverQueryLogConfigId": resolver_query_log_config_id,
                "ResourceId": vpc.vpc_id(),
            }),
        )?;
        Ok(Token::Ref(logical_id))
    }
}
