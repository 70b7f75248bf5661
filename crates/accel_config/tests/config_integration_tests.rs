//! Integration tests for configuration loading and validation.

use std::fs;
use tempfile::tempdir;

use accel_config::{
    AccountResolver, ConfigError, ConfigReader, ConfigValidator, GatewayEndpointService,
    RouteTargetType,
};

const ACCOUNTS_YAML: &str = r#"
mandatoryAccounts:
  - name: Network
    accountId: "111111111111"
workloadAccounts:
  - name: Shared
    accountId: "222222222222"
"#;

const NETWORK_YAML: &str = r#"
vpcs:
  - name: A
    account: Network
    region: us-east-1
    cidr: 10.0.0.0/16
    internetGateway: true
    routeTables:
      - name: Public
        routes:
          - name: Default
            destination: 0.0.0.0/0
            type: internetGateway
          - name: S3
            type: gatewayEndpoint
            target: s3
      - name: Private
        routes:
          - name: Nat
            destination: 0.0.0.0/0
            type: natGateway
            target: Nat-A
          - name: Core
            destination: 10.0.0.0/8
            type: transitGateway
            target: Main
    subnets:
      - name: Web
        availabilityZone: a
        routeTable: Public
        ipv4CidrBlock: 10.0.0.0/24
        mapPublicIpOnLaunch: true
      - name: App
        availabilityZone: b
        routeTable: Private
        ipv4CidrBlock: 10.0.1.0/24
    natGateways:
      - name: Nat-A
        subnet: Web
    transitGatewayAttachments:
      - name: A-Main
        transitGateway:
          name: Main
          account: Shared
        subnets: [App]
        options:
          applianceModeSupport: true
    gatewayEndpoints:
      endpoints:
        - service: s3
    queryLogs: [central]
"#;

fn write_config_dir(network: &str) -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("network-config.yaml"), network).unwrap();
    fs::write(dir.path().join("accounts-config.yaml"), ACCOUNTS_YAML).unwrap();
    dir
}

/// Load a complete configuration directory and validate it.
#[test]
fn test_load_and_validate_full_config() {
    let dir = write_config_dir(NETWORK_YAML);
    let config = ConfigReader::load_dir(dir.path()).unwrap();

    assert_eq!(config.network.vpcs.len(), 1);
    let vpc = &config.network.vpcs[0];
    assert!(vpc.has_internet_gateway());
    assert_eq!(vpc.route_tables[1].routes[1].target_type, RouteTargetType::TransitGateway);
    assert_eq!(vpc.gateway_endpoint_services(), vec![GatewayEndpointService::S3]);
    assert_eq!(vpc.transit_gateway_attachments[0].options.appliance_mode_support, Some(true));
    assert_eq!(config.accounts.account_id("Shared").as_deref(), Some("222222222222"));

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid(), "Validation failed: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "Unexpected warnings: {:?}", result.warnings);
}

#[test]
fn test_load_dir_accepts_json_and_toml() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("network-config.json"),
        r#"{ "vpcs": [{ "name": "A", "account": "Network", "region": "eu-west-1", "cidr": "10.1.0.0/16" }] }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("accounts-config.toml"),
        "[[mandatoryAccounts]]\nname = \"Network\"\naccountId = \"111111111111\"\n",
    )
    .unwrap();

    let config = ConfigReader::load_dir(dir.path()).unwrap();
    assert_eq!(config.network.vpcs[0].region, "eu-west-1");
    assert_eq!(config.accounts.account_id("Network").as_deref(), Some("111111111111"));
}

#[test]
fn test_load_dir_missing_directory() {
    let err = ConfigReader::load_dir("/nonexistent/config/dir").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

/// Every broken reference is reported, not just the first.
#[test]
fn test_validation_collects_reference_errors() {
    let network = r#"
vpcs:
  - name: B
    account: Unknown
    region: us-east-1
    cidr: 10.0.0.0/99
    routeTables:
      - name: Public
        routes:
          - name: Default
            destination: 0.0.0.0/0
            type: internetGateway
          - name: Nat
            destination: 0.0.0.0/0
            type: natGateway
            target: Missing
          - name: Sqs
            type: gatewayEndpoint
            target: sqs
    subnets:
      - name: Web
        availabilityZone: a
        routeTable: Nowhere
        ipv4CidrBlock: 10.0.0.0/24
    natGateways:
      - name: Nat
        subnet: Ghost
"#;
    let dir = write_config_dir(network);
    let config = ConfigReader::load_dir(dir.path()).unwrap();
    let result = ConfigValidator::validate(&config);

    assert!(!result.is_valid());
    let all = result.errors.join("\n");
    assert!(all.contains("unknown account: Unknown"));
    assert!(all.contains("invalid CIDR: 10.0.0.0/99"));
    assert!(all.contains("internet gateway but the VPC has none"));
    assert!(all.contains("unknown NAT gateway: Missing"));
    assert!(all.contains("unknown endpoint service: sqs"));
    assert!(all.contains("unknown route table: Nowhere"));
    assert!(all.contains("unknown subnet: Ghost"));
}

#[test]
fn test_validation_warns_on_duplicate_attachments() {
    let network = r#"
vpcs:
  - name: C
    account: Network
    region: us-east-1
    cidr: 10.2.0.0/16
    routeTables:
      - name: Private
    subnets:
      - name: App
        availabilityZone: a
        routeTable: Private
        ipv4CidrBlock: 10.2.0.0/24
    transitGatewayAttachments:
      - name: First
        transitGateway: { name: Main, account: Shared }
        subnets: [App]
      - name: Second
        transitGateway: { name: Main, account: Shared }
        subnets: [App]
    gatewayEndpoints:
      endpoints:
        - service: dynamodb
"#;
    let dir = write_config_dir(network);
    let config = ConfigReader::load_dir(dir.path()).unwrap();
    let result = ConfigValidator::validate(&config);

    assert!(result.is_valid(), "Validation failed: {:?}", result.errors);
    assert!(result.warnings.iter().any(|w| w.contains("2 attachments to transit gateway Main")));
    assert!(result.warnings.iter().any(|w| w.contains("dynamodb gateway endpoint that no route table uses")));
}

#[test]
fn test_validation_rejects_conflicting_transit_gateway_owners() {
    let network = r#"
vpcs:
  - name: A
    account: Network
    region: us-east-1
    cidr: 10.0.0.0/16
    routeTables: [{ name: Private }]
    subnets: [{ name: App, availabilityZone: a, routeTable: Private, ipv4CidrBlock: 10.0.0.0/24 }]
    transitGatewayAttachments:
      - { name: A-Main, transitGateway: { name: Main, account: Shared }, subnets: [App] }
  - name: B
    account: Network
    region: us-east-1
    cidr: 10.1.0.0/16
    routeTables: [{ name: Private }]
    subnets: [{ name: App, availabilityZone: a, routeTable: Private, ipv4CidrBlock: 10.1.0.0/24 }]
    transitGatewayAttachments:
      - { name: B-Main, transitGateway: { name: Main, account: Network }, subnets: [App] }
"#;
    let dir = write_config_dir(network);
    let config = ConfigReader::load_dir(dir.path()).unwrap();
    let result = ConfigValidator::validate(&config);

    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.contains("Transit gateway Main is referenced with owners Shared and Network")));
}

#[test]
fn test_validation_rejects_duplicate_route_and_query_log_names() {
    let network = r#"
vpcs:
  - name: A
    account: Network
    region: us-east-1
    cidr: 10.0.0.0/16
    internetGateway: true
    routeTables:
      - name: Public
        routes:
          - { name: Default, destination: 0.0.0.0/0, type: internetGateway }
          - { name: Default, destination: 10.0.0.0/8, type: internetGateway }
      - name: Other
        routes:
          - { name: Default, destination: 0.0.0.0/0, type: internetGateway }
    queryLogs: [central, central]
"#;
    let dir = write_config_dir(network);
    let config = ConfigReader::load_dir(dir.path()).unwrap();
    let result = ConfigValidator::validate(&config);

    assert_eq!(result.errors.len(), 2, "Unexpected errors: {:?}", result.errors);
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("Duplicate route name in route table Public of VPC A: Default")));
    assert!(result.errors.iter().any(|e| e.contains("Duplicate query log name in VPC A: central")));
}

#[test]
fn test_validation_rejects_subnet_outside_vpc_cidr() {
    let network = r#"
vpcs:
  - name: A
    account: Network
    region: us-east-1
    cidr: 10.0.0.0/16
    routeTables: [{ name: Private }]
    subnets:
      - { name: Inside, availabilityZone: a, routeTable: Private, ipv4CidrBlock: 10.0.4.0/24 }
      - { name: Outside, availabilityZone: a, routeTable: Private, ipv4CidrBlock: 10.1.0.0/24 }
      - { name: Wider, availabilityZone: a, routeTable: Private, ipv4CidrBlock: 10.0.0.0/8 }
"#;
    let dir = write_config_dir(network);
    let config = ConfigReader::load_dir(dir.path()).unwrap();
    let result = ConfigValidator::validate(&config);

    assert_eq!(result.errors.len(), 2, "Unexpected errors: {:?}", result.errors);
    assert!(result
        .errors
        .iter()
        .any(|e| e.contains("Subnet Outside CIDR 10.1.0.0/24 is outside VPC A CIDR 10.0.0.0/16")));
    assert!(result.errors.iter().any(|e| e.contains("Subnet Wider")));
}
