use super::*;

#[test]
fn endpoint_from_store_root() {
    let url = graphql_endpoint("https://demo.myshopify.com", "2020-10").unwrap();
    assert_eq!(
        url.as_str(),
        "https://demo.myshopify.com/api/2020-10/graphql.json"
    );
}

#[test]
fn endpoint_strips_path_and_trailing_slash() {
    let url = graphql_endpoint("https://demo.myshopify.com/collections/all/", "2024-01").unwrap();
    assert_eq!(
        url.as_str(),
        "https://demo.myshopify.com/api/2024-01/graphql.json"
    );
}

#[test]
fn endpoint_rejects_invalid_origin() {
    let result = graphql_endpoint("not-a-url", "2020-10");
    assert!(
        matches!(result, Err(SourceError::InvalidEndpoint { .. })),
        "expected InvalidEndpoint, got: {result:?}"
    );
}

#[test]
fn extract_store_origin_strips_path() {
    assert_eq!(
        extract_store_origin("https://demo.myshopify.com/collections/all"),
        "https://demo.myshopify.com"
    );
}

#[test]
fn extract_store_origin_keeps_port() {
    assert_eq!(
        extract_store_origin("http://127.0.0.1:4010/"),
        "http://127.0.0.1:4010"
    );
}

#[test]
fn extract_domain_reads_host() {
    let url = Url::parse("https://demo.myshopify.com/api/2020-10/graphql.json").unwrap();
    assert_eq!(origin::extract_domain(&url), "demo.myshopify.com");
}

#[test]
fn client_from_config_uses_configured_endpoint() {
    let config = shopsrc_core::SourceOptions {
        store_name: Some("acme".to_owned()),
        storefront_token: Some("token".to_owned()),
        api_version: Some("2023-07".to_owned()),
        ..shopsrc_core::SourceOptions::default()
    }
    .validate()
    .unwrap();

    let client = StorefrontClient::from_config(&config).unwrap();
    assert_eq!(
        client.endpoint().as_str(),
        "https://acme.myshopify.com/api/2023-07/graphql.json"
    );
}
