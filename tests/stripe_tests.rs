use cancel_cloud_subscriptions::account::STRIPE_CUSTOMER_ID;
use cancel_cloud_subscriptions::client::API_VERSION;
use cancel_cloud_subscriptions::stripe::Error;
use cancel_cloud_subscriptions::{Account, CancelCloudSubscriptionsService, Deployment, StripeClient};
use mockito::{Matcher, Server};

const SECRET: &str = "sk_test_123";

const LIST_BODY: &str = r#"{
  "object": "list",
  "url": "/v1/subscriptions",
  "has_more": false,
  "data": [
    {"id": "sub_1", "object": "subscription", "status": "active", "cancel_at_period_end": false, "customer": "cus_123"},
    {"id": "sub_2", "object": "subscription", "status": "active", "cancel_at_period_end": true, "customer": "cus_123"}
  ]
}"#;

const UPDATED_BODY: &str = r#"{
  "id": "sub_1",
  "object": "subscription",
  "status": "active",
  "cancel_at_period_end": true,
  "customer": "cus_123"
}"#;

const NO_SUCH_CUSTOMER: &str = r#"{
  "error": {
    "code": "resource_missing",
    "message": "No such customer: 'cus_123'",
    "param": "customer",
    "type": "invalid_request_error"
  }
}"#;

fn list_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("customer".into(), "cus_123".into()),
        Matcher::UrlEncoded("status".into(), "active".into()),
        Matcher::UrlEncoded("limit".into(), "100".into()),
    ])
}

// "sk_test_123:" in base64: the secret as user, no password
fn authorization() -> Matcher {
    Matcher::Exact("Basic c2tfdGVzdF8xMjM6".to_string())
}

fn account() -> Account {
    Account::new(7).with_attribute(STRIPE_CUSTOMER_ID, "cus_123")
}

#[test]
fn perform_lists_then_updates_renewing_subscriptions() {
    let mut server = Server::new();
    let list = server
        .mock("GET", "/v1/subscriptions")
        .match_query(list_query())
        .match_header("authorization", authorization())
        .match_header("stripe-version", API_VERSION)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LIST_BODY)
        .expect(1)
        .create();
    let update = server
        .mock("POST", "/v1/subscriptions/sub_1")
        .match_header("authorization", authorization())
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("stripe-version", API_VERSION)
        .match_body(Matcher::Exact("cancel_at_period_end=true".to_string()))
        .with_status(200)
        .with_body(UPDATED_BODY)
        .expect(1)
        .create();
    let untouched = server
        .mock("POST", "/v1/subscriptions/sub_2")
        .expect(0)
        .create();

    let client = StripeClient::new(SECRET, &server.url()).unwrap();
    let account = account();
    CancelCloudSubscriptionsService::new(&account, Deployment::Cloud, &client)
        .perform()
        .unwrap();

    list.assert();
    update.assert();
    untouched.assert();
}

#[test]
fn self_hosted_never_reaches_stripe() {
    let mut server = Server::new();
    let list = server.mock("GET", Matcher::Any).expect(0).create();

    let client = StripeClient::new(SECRET, &server.url()).unwrap();
    let account = account();
    CancelCloudSubscriptionsService::new(&account, Deployment::SelfHosted, &client)
        .perform()
        .unwrap();

    list.assert();
}

#[test]
fn stripe_errors_are_returned() {
    let mut server = Server::new();
    server
        .mock("GET", "/v1/subscriptions")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(NO_SUCH_CUSTOMER)
        .create();

    let client = StripeClient::new(SECRET, &server.url()).unwrap();
    let account = account();
    let err = CancelCloudSubscriptionsService::new(&account, Deployment::Cloud, &client)
        .perform()
        .unwrap_err();

    match err {
        Error::Api { status, error } => {
            assert_eq!(status, 404);
            assert_eq!(error.kind, "invalid_request_error");
            assert_eq!(error.message.as_deref(), Some("No such customer: 'cus_123'"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failed_update_stops_the_run() {
    let mut server = Server::new();
    server
        .mock("GET", "/v1/subscriptions")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"object": "list", "url": "/v1/subscriptions", "has_more": false, "data": [
              {"id": "sub_1", "status": "active", "cancel_at_period_end": false},
              {"id": "sub_3", "status": "active", "cancel_at_period_end": false}
            ]}"#,
        )
        .create();
    server
        .mock("POST", "/v1/subscriptions/sub_1")
        .with_status(500)
        .with_body("upstream exploded")
        .create();
    let never = server
        .mock("POST", "/v1/subscriptions/sub_3")
        .expect(0)
        .create();

    let client = StripeClient::new(SECRET, &server.url()).unwrap();
    let account = account();
    let err = CancelCloudSubscriptionsService::new(&account, Deployment::Cloud, &client)
        .perform()
        .unwrap_err();

    assert!(matches!(err, Error::ResponseCode { status: 500 }));
    never.assert();
}

#[tokio::test]
async fn async_perform_lists_then_updates_renewing_subscriptions() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/v1/subscriptions")
        .match_query(list_query())
        .match_header("authorization", authorization())
        .with_status(200)
        .with_body(LIST_BODY)
        .expect(1)
        .create_async()
        .await;
    let update = server
        .mock("POST", "/v1/subscriptions/sub_1")
        .match_body(Matcher::UrlEncoded(
            "cancel_at_period_end".into(),
            "true".into(),
        ))
        .with_status(200)
        .with_body(UPDATED_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = StripeClient::new(SECRET, &server.url()).unwrap();
    let account = account();
    CancelCloudSubscriptionsService::new(&account, Deployment::Cloud, &client)
        .async_perform()
        .await
        .unwrap();

    list.assert_async().await;
    update.assert_async().await;
}
