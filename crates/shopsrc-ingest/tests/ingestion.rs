//! End-to-end ingestion runs against a scripted transport and the
//! in-memory store.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use shopsrc_core::{SourceConfig, SourceOptions, TypeNames};
use shopsrc_ingest::schema::resolve_translated_field;
use shopsrc_ingest::{derive, run, run_with_transport, IngestError, Role, Step, StepError};
use shopsrc_store::{MemoryStore, NodeStore};
use shopsrc_storefront::{GraphqlResponse, GraphqlTransport, SourceError};

// ---------------------------------------------------------------------------
// Scripted transport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Call {
    operation: String,
    variables: Value,
    locale: Option<String>,
}

/// Replays scripted responses per operation (and locale). Operations with
/// no script left answer with an empty list page.
#[derive(Default)]
struct Fixture {
    scripts: Mutex<HashMap<String, VecDeque<GraphqlResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl Fixture {
    fn script(self, operation: &str, responses: Vec<GraphqlResponse>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(operation.to_owned())
            .or_default()
            .extend(responses);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }
}

fn operation_name(query: &str) -> String {
    let start = query.find("query ").expect("document has an operation") + "query ".len();
    query[start..]
        .chars()
        .take_while(|c| c.is_alphanumeric())
        .collect()
}

#[async_trait]
impl GraphqlTransport for Fixture {
    async fn request(
        &self,
        query: &str,
        variables: &Value,
        extra_headers: &[(String, String)],
    ) -> Result<GraphqlResponse, SourceError> {
        let operation = operation_name(query);
        let locale = extra_headers
            .iter()
            .find(|(name, _)| name == "Accept-Language")
            .map(|(_, value)| value.clone());
        self.calls.lock().unwrap().push(Call {
            operation: operation.clone(),
            variables: variables.clone(),
            locale: locale.clone(),
        });

        let key = match &locale {
            Some(locale) => format!("{operation}@{locale}"),
            None => operation,
        };
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        Ok(scripted.unwrap_or_else(|| list_page(vec![], false)))
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn gid(kind: &str, n: u32) -> String {
    STANDARD.encode(format!("gid://shopify/{kind}/{n}"))
}

fn edges(nodes: Vec<Value>, prefix: &str) -> Vec<Value> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| json!({ "cursor": format!("{prefix}-{i}"), "node": node }))
        .collect()
}

fn connection(nodes: Vec<Value>, has_next_page: bool, prefix: &str) -> Value {
    json!({
        "pageInfo": { "hasNextPage": has_next_page },
        "edges": edges(nodes, prefix)
    })
}

fn list_page(nodes: Vec<Value>, has_next_page: bool) -> GraphqlResponse {
    GraphqlResponse::ok(json!({ "data": connection(nodes, has_next_page, "page") }))
}

fn nested_page(nodes: Vec<Value>, has_next_page: bool) -> GraphqlResponse {
    GraphqlResponse::ok(json!({ "node": { "data": connection(nodes, has_next_page, "nested") } }))
}

fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

fn image(n: u32) -> Value {
    json!({
        "id": gid("ProductImage", n),
        "altText": format!("image {n}"),
        "originalSrc": format!("https://cdn.shopify.com/s/files/{n}.jpg"),
        "width": 800,
        "height": 600
    })
}

fn collection_c1() -> Value {
    json!({
        "id": gid("Collection", 1),
        "title": "Teas",
        "handle": "teas",
        "products": connection(vec![json!({ "id": gid("Product", 1) })], false, "cp")
    })
}

fn product_p1() -> Value {
    json!({
        "id": gid("Product", 1),
        "title": "Sencha",
        "handle": "sencha",
        "productType": "Tea",
        "tags": ["green"],
        "collections": connection(vec![json!({ "id": gid("Collection", 1) })], false, "pc"),
        "priceRange": { "minVariantPrice": money("10"), "maxVariantPrice": money("20") },
        "images": connection(vec![], false, "pi"),
        "variants": connection(
            vec![json!({ "id": gid("ProductVariant", 1), "title": "50g", "price": money("10") })],
            false,
            "pv"
        )
    })
}

fn config(types: &[&str], locales: &[&str]) -> SourceConfig {
    SourceOptions {
        store_url: Some("https://tea.myshopify.com".to_owned()),
        storefront_token: Some("token".to_owned()),
        types: types.iter().map(|t| (*t).to_owned()).collect(),
        locales: locales.iter().map(|l| (*l).to_owned()).collect(),
        ..SourceOptions::default()
    }
    .validate()
    .unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collection_and_product_are_cross_linked() {
    let transport = Fixture::default()
        .script("Collections", vec![list_page(vec![collection_c1()], false)])
        .script("Products", vec![list_page(vec![product_p1()], false)]);
    let store = MemoryStore::new();

    let report = run_with_transport(&config(&[], &[]), &transport, &store)
        .await
        .unwrap();

    let collection = store.get_node("ShopifyCollection", &gid("Collection", 1)).unwrap();
    assert_eq!(
        collection["products"],
        json!([{ "typeName": "ShopifyProduct", "id": gid("Product", 1) }])
    );

    let product = store.get_node("ShopifyProduct", &gid("Product", 1)).unwrap();
    assert_eq!(
        product["collections"],
        json!([{ "typeName": "ShopifyCollection", "id": gid("Collection", 1) }])
    );
    assert_eq!(product["variants"].as_array().unwrap().len(), 1);
    assert_eq!(product["variants"][0]["typeName"], "ShopifyProductVariant");

    let min_ref = &product["priceRange"]["minVariantPrice"];
    let max_ref = &product["priceRange"]["maxVariantPrice"];
    assert_eq!(min_ref["typeName"], "ShopifyPrice");
    assert_eq!(
        min_ref["id"],
        derive(&gid("Product", 1), &Role::PriceRangeMin).unwrap()
    );
    let min = store.get_node("ShopifyPrice", min_ref["id"].as_str().unwrap()).unwrap();
    let max = store.get_node("ShopifyPrice", max_ref["id"].as_str().unwrap()).unwrap();
    assert_eq!((min["amount"].as_str(), min["currencyCode"].as_str()), (Some("10"), Some("USD")));
    assert_eq!((max["amount"].as_str(), max["currencyCode"].as_str()), (Some("20"), Some("USD")));

    assert_eq!(report.nodes_for(&Step::Kind(shopsrc_core::EntityKind::Collection)), Some(1));
    assert_eq!(report.nodes_for(&Step::Kind(shopsrc_core::EntityKind::Product)), Some(1));
    assert_eq!(store.overwrite_count(), 0);
}

#[tokio::test]
async fn kinds_run_in_dependency_order() {
    let transport = Fixture::default();
    let store = MemoryStore::new();

    run_with_transport(&config(&[], &[]), &transport, &store)
        .await
        .unwrap();

    assert_eq!(
        transport.operations(),
        vec![
            "ProductTypes",
            "ProductTags",
            "Collections",
            "Products",
            "Blogs",
            "Articles",
            "Pages"
        ]
    );
    for name in [
        "ShopifyImage",
        "ShopifyPrice",
        "ShopifyProductType",
        "ShopifyProductTag",
        "ShopifyCollection",
        "ShopifyProduct",
        "ShopifyProductVariant",
        "ShopifyBlog",
        "ShopifyArticle",
        "ShopifyPage",
    ] {
        assert!(store.has_collection(name), "{name} was not created");
    }
}

#[tokio::test]
async fn only_configured_kinds_are_ingested() {
    let transport = Fixture::default()
        .script("Collections", vec![list_page(vec![collection_c1()], false)])
        .script("Products", vec![list_page(vec![product_p1()], false)]);
    let store = MemoryStore::new();

    run_with_transport(&config(&["Product"], &[]), &transport, &store)
        .await
        .unwrap();

    assert_eq!(transport.operations(), vec!["Products"]);
    assert!(!store.has_collection("ShopifyCollection"));
    assert!(store.has_collection("ShopifyImage"));
    assert!(store.has_collection("ShopifyPrice"));

    let product = store.get_node("ShopifyProduct", &gid("Product", 1)).unwrap();
    assert!(product.get("collections").is_none());
}

#[tokio::test]
async fn page_error_aborts_the_run_with_nothing_committed() {
    let transport = Fixture::default().script(
        "Products",
        vec![
            list_page(vec![product_p1()], true),
            GraphqlResponse::failed(["Throttled"]),
        ],
    );
    let store = MemoryStore::new();

    let err = run_with_transport(&config(&[], &[]), &transport, &store)
        .await
        .unwrap_err();

    match err {
        IngestError::Step { step, source } => {
            assert_eq!(step, "Product");
            assert!(
                matches!(source, StepError::Source(SourceError::Query { ref message }) if message == "Throttled"),
                "got: {source:?}"
            );
        }
        other => panic!("expected IngestError::Step, got: {other:?}"),
    }

    assert_eq!(store.node_count("ShopifyProduct"), Some(0));
    assert_eq!(store.node_count("ShopifyPrice"), Some(0));
    assert!(!store.has_collection("ShopifyBlog"), "run continued past the failure");
    assert!(!transport.operations().contains(&"Blogs".to_owned()));
}

#[tokio::test]
async fn product_references_every_collection_and_image() {
    let mut product = product_p1();
    product["collections"] = connection(
        vec![
            json!({ "id": gid("Collection", 1) }),
            json!({ "id": gid("Collection", 2) }),
        ],
        false,
        "pc",
    );
    product["images"] = connection(vec![image(1), image(2), image(3)], false, "pi");

    let transport =
        Fixture::default().script("Products", vec![list_page(vec![product], false)]);
    let store = MemoryStore::new();

    run_with_transport(&config(&[], &[]), &transport, &store)
        .await
        .unwrap();

    let product = store.get_node("ShopifyProduct", &gid("Product", 1)).unwrap();
    let collections = product["collections"].as_array().unwrap();
    assert_eq!(collections.len(), 2);
    assert!(collections.iter().all(|r| r["typeName"] == "ShopifyCollection"));

    let images = product["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    for (n, reference) in (1..=3).zip(images) {
        assert_eq!(reference["typeName"], "ShopifyImage");
        let stored = store
            .get_node("ShopifyImage", reference["id"].as_str().unwrap())
            .unwrap();
        assert_eq!(stored, image(n));
    }
}

#[tokio::test]
async fn overflowing_nested_connections_are_completed() {
    let mut collection = collection_c1();
    collection["products"] = connection(vec![json!({ "id": gid("Product", 1) })], true, "cp");

    let transport = Fixture::default()
        .script("Collections", vec![list_page(vec![collection], false)])
        .script(
            "CollectionProducts",
            vec![
                nested_page(vec![json!({ "id": gid("Product", 2) })], true),
                nested_page(vec![json!({ "id": gid("Product", 3) })], false),
            ],
        );
    let store = MemoryStore::new();

    run_with_transport(&config(&["Collection", "Product"], &[]), &transport, &store)
        .await
        .unwrap();

    let stored = store.get_node("ShopifyCollection", &gid("Collection", 1)).unwrap();
    let ids: Vec<_> = stored["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(ids, vec![gid("Product", 1), gid("Product", 2), gid("Product", 3)]);

    let nested: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|c| c.operation == "CollectionProducts")
        .collect();
    assert_eq!(nested.len(), 2);
    assert_eq!(nested[0].variables["id"], gid("Collection", 1));
    assert_eq!(nested[0].variables["after"], "cp-0");
    assert_eq!(nested[0].variables["first"], 250);
    assert_eq!(nested[1].variables["after"], "nested-0");
}

#[tokio::test]
async fn overflowing_article_comments_are_completed() {
    let comment = |n: u32| json!({ "id": gid("Comment", n), "content": format!("comment {n}") });
    let article = json!({
        "id": gid("Article", 1),
        "title": "Brewing",
        "comments": connection(vec![comment(1)], true, "cm")
    });

    let transport = Fixture::default()
        .script("Articles", vec![list_page(vec![article], false)])
        .script(
            "ArticleComments",
            vec![
                nested_page(vec![comment(2)], true),
                nested_page(vec![comment(3)], false),
            ],
        );
    let store = MemoryStore::new();

    run_with_transport(&config(&["Article"], &[]), &transport, &store)
        .await
        .unwrap();

    let stored = store.get_node("ShopifyArticle", &gid("Article", 1)).unwrap();
    let contents: Vec<_> = stored["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(contents, vec!["comment 1", "comment 2", "comment 3"]);

    let follow_ups: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|c| c.operation == "ArticleComments")
        .collect();
    assert_eq!(follow_ups.len(), 2);
    assert_eq!(follow_ups[0].variables["id"], gid("Article", 1));
    assert_eq!(follow_ups[0].variables["after"], "cm-0");
}

#[tokio::test]
async fn overflowing_metafields_are_completed_for_products_and_variants() {
    let metafield = |key: &str| json!({ "key": key, "value": "x" });
    let mut product = product_p1();
    product["metafields"] = connection(vec![metafield("origin")], true, "pm");
    product["variants"] = connection(
        vec![json!({
            "id": gid("ProductVariant", 1),
            "title": "50g",
            "metafields": connection(vec![metafield("grams")], true, "vm")
        })],
        false,
        "pv",
    );

    let transport = Fixture::default()
        .script("Products", vec![list_page(vec![product], false)])
        .script("ProductMetafields", vec![nested_page(vec![metafield("harvest")], false)])
        .script("VariantMetafields", vec![nested_page(vec![metafield("roast")], false)]);
    let store = MemoryStore::new();

    run_with_transport(&config(&["Product"], &[]), &transport, &store)
        .await
        .unwrap();

    let keys = |node: &Value| -> Vec<String> {
        node["metafields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["key"].as_str().unwrap().to_owned())
            .collect()
    };
    let product = store.get_node("ShopifyProduct", &gid("Product", 1)).unwrap();
    assert_eq!(keys(&product), vec!["origin", "harvest"]);
    let variant = store
        .get_node("ShopifyProductVariant", &gid("ProductVariant", 1))
        .unwrap();
    assert_eq!(keys(&variant), vec!["grams", "roast"]);

    let calls = transport.calls();
    let variant_call = calls
        .iter()
        .find(|c| c.operation == "VariantMetafields")
        .unwrap();
    assert_eq!(variant_call.variables["id"], gid("ProductVariant", 1));
    assert_eq!(variant_call.variables["after"], "vm-0");
}

#[tokio::test]
async fn localized_product_pass_completes_only_variants() {
    let mut base = product_p1();
    base["images"] = connection(vec![image(1)], true, "pi");

    let mut localized = product_p1();
    localized["images"] = connection(vec![image(1)], true, "pi");
    localized["metafields"] = connection(vec![json!({ "key": "origin" })], true, "pm");
    localized["variants"] = connection(
        vec![json!({ "id": gid("ProductVariant", 1), "title": "50 g" })],
        true,
        "pv",
    );

    let transport = Fixture::default()
        .script("Products", vec![list_page(vec![base], false)])
        .script("ProductImages", vec![nested_page(vec![image(2)], false)])
        .script("Products@fr", vec![list_page(vec![localized], false)])
        .script(
            "ProductVariants@fr",
            vec![nested_page(
                vec![json!({ "id": gid("ProductVariant", 2), "title": "100 g" })],
                false,
            )],
        );
    let store = MemoryStore::new();

    run_with_transport(&config(&["Product"], &["fr"]), &transport, &store)
        .await
        .unwrap();

    let localized_ops: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|c| c.locale.is_some())
        .map(|c| c.operation)
        .collect();
    assert_eq!(localized_ops, vec!["Products", "ProductVariants"]);

    let product = store.get_node("ShopifyProduct", &gid("Product", 1)).unwrap();
    assert_eq!(product["images"].as_array().unwrap().len(), 2);

    let second_variant = store
        .get_node(
            "ShopifyProductVariantTranslation",
            &derive(&gid("ProductVariant", 2), &Role::Locale("fr".to_owned())).unwrap(),
        )
        .unwrap();
    assert_eq!(second_variant["title"], "100 g");
}

#[tokio::test]
async fn separator_variant_locales_get_distinct_translations() {
    let translated = |title: &str| {
        json!({
            "id": gid("Page", 1),
            "title": title
        })
    };
    let transport = Fixture::default()
        .script("Pages", vec![list_page(vec![translated("Chá")], false)])
        .script("Pages@pt-br", vec![list_page(vec![translated("Chá BR")], false)])
        .script("Pages@ptbr", vec![list_page(vec![translated("Chá sem hífen")], false)]);
    let store = MemoryStore::new();

    run_with_transport(
        &config(&["Page"], &["pt_BR", "pt-br", "ptbr"]),
        &transport,
        &store,
    )
    .await
    .unwrap();

    assert_eq!(store.node_count("ShopifyPageTranslation"), Some(2));
    assert_eq!(store.overwrite_count(), 0);

    let names = TypeNames::new("Shopify");
    let title = |locale: &str| {
        resolve_translated_field(&store, &names, "Page", &gid("Page", 1), "title", locale)
            .unwrap()
            .unwrap()
    };
    assert_eq!(title("pt_BR"), json!("Chá BR"));
    assert_eq!(title("ptbr"), json!("Chá sem hífen"));
}

#[tokio::test]
async fn translations_are_fetched_per_locale_and_resolved_with_fallback() {
    let translated_c1 = json!({
        "id": gid("Collection", 1),
        "title": "Thés",
        "handle": "thes",
        "products": connection(vec![], false, "cp")
    });
    let c2 = json!({
        "id": gid("Collection", 2),
        "title": "Infusions",
        "products": connection(vec![], false, "cp")
    });

    let transport = Fixture::default()
        .script("Collections", vec![list_page(vec![collection_c1(), c2], false)])
        .script("Collections@fr", vec![list_page(vec![translated_c1], false)]);
    let store = MemoryStore::new();

    let report = run_with_transport(&config(&["Collection"], &["FR"]), &transport, &store)
        .await
        .unwrap();

    let localized: Vec<_> = transport
        .calls()
        .into_iter()
        .filter(|c| c.locale.is_some())
        .collect();
    assert_eq!(localized.len(), 1);
    assert_eq!(localized[0].operation, "Collections");
    assert_eq!(localized[0].locale.as_deref(), Some("fr"));

    let translation_id = derive(&gid("Collection", 1), &Role::Locale("fr".to_owned())).unwrap();
    let translation = store
        .get_node("ShopifyCollectionTranslation", &translation_id)
        .unwrap();
    assert_eq!(translation["locale"], "fr");
    assert_eq!(translation["originalId"], gid("Collection", 1));
    assert_eq!(translation["original"]["typeName"], "ShopifyCollection");
    assert!(translation.get("products").is_none());

    let names = TypeNames::new("Shopify");
    let title = |id: &str| {
        resolve_translated_field(&store, &names, "Collection", id, "title", "fr")
            .unwrap()
            .unwrap()
    };
    assert_eq!(title(&gid("Collection", 1)), json!("Thés"));
    assert_eq!(title(&gid("Collection", 2)), json!("Infusions"));

    assert_eq!(
        report.nodes_for(&Step::Translation {
            kind: shopsrc_core::EntityKind::Collection,
            locale: "fr".to_owned(),
        }),
        Some(1)
    );
}

#[tokio::test]
async fn variant_titles_are_translated_with_products() {
    let mut translated = product_p1();
    translated["title"] = json!("Sencha (fr)");
    translated["variants"] = connection(
        vec![json!({ "id": gid("ProductVariant", 1), "title": "50 g" })],
        false,
        "pv",
    );
    let transport = Fixture::default()
        .script("Products", vec![list_page(vec![product_p1()], false)])
        .script("Products@fr", vec![list_page(vec![translated], false)]);
    let store = MemoryStore::new();

    run_with_transport(&config(&["Product"], &["fr"]), &transport, &store)
        .await
        .unwrap();

    let variant_translation = store
        .get_node(
            "ShopifyProductVariantTranslation",
            &derive(&gid("ProductVariant", 1), &Role::Locale("fr".to_owned())).unwrap(),
        )
        .unwrap();
    assert_eq!(variant_translation["title"], "50 g");
    assert_eq!(
        variant_translation["original"]["typeName"],
        "ShopifyProductVariant"
    );
}

#[tokio::test]
async fn invalid_configuration_fails_before_any_request() {
    let store = MemoryStore::new();
    let err = run(SourceOptions::default(), &store).await.unwrap_err();
    assert!(matches!(err, IngestError::Configuration(_)), "got: {err:?}");
    assert!(store.collection_names().is_empty());
}

#[tokio::test]
async fn empty_prefix_still_prefixes_reserved_names() {
    let mut options = SourceOptions {
        store_url: Some("https://tea.myshopify.com".to_owned()),
        storefront_token: Some("token".to_owned()),
        types: vec!["Page".to_owned(), "Blog".to_owned()],
        ..SourceOptions::default()
    };
    options.type_name = Some(String::new());
    let config = options.validate().unwrap();
    let transport = Fixture::default();
    let store = MemoryStore::new();

    run_with_transport(&config, &transport, &store).await.unwrap();

    assert!(store.has_collection("ShopifyPage"));
    assert!(store.has_collection("ShopifyImage"));
    assert!(store.has_collection("Blog"));
    assert!(store.has_collection("Price"));
}
