//! End-to-end tests against a running gateway with mocked upstreams.

use reqwest::StatusCode;
use serde_json::{json, Value};
use vaija_gateway::config::GatewayConfig;
use vaija_gateway::messaging::credentials::basic_auth_header;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_delivery_lifecycle() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/entregas"))
        .and(header("apikey", "test-store-key"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({
            "status": "buscando",
            "cliente_nome": "Ana",
            "origem_lat": -23.55,
            "destino_lng": -46.65,
            "preco": 22.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "7b0c",
            "status": "buscando",
            "created_at": "2024-05-01T12:00:00.000Z",
            "updated_at": "2024-05-01T12:00:00.000Z"
        }])))
        .expect(1)
        .mount(&store)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/entregas"))
        .and(query_param("id", "eq.7b0c"))
        .and(body_partial_json(json!({ "status": "aceita", "driver_placa": "ABC1D23" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "7b0c", "status": "aceita" }])))
        .expect(1)
        .mount(&store)
        .await;

    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let client = common::client();

    let res = client
        .post(gateway.url("/criar-entrega"))
        .json(&json!({
            "origem": { "lat": -23.55, "lng": -46.63 },
            "destino": { "lat": -23.56, "lng": -46.65 },
            "cliente": { "nome": "Ana", "fone": "+5511999990000" },
            "preco": 22.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["entrega"]["status"], "buscando");
    assert_eq!(body["entrega"]["created_at"], body["entrega"]["updated_at"]);

    let res = client
        .post(gateway.url("/aceitar-motorista"))
        .json(&json!({ "entregaId": "7b0c", "driver": { "nome": "Rui", "placa": "ABC1D23" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "ok": true }));
}

#[tokio::test]
async fn test_created_row_timestamps_match() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/entregas"))
        .respond_with(|req: &wiremock::Request| {
            let row: Value = serde_json::from_slice(&req.body).unwrap();
            ResponseTemplate::new(201).set_body_json(json!([row]))
        })
        .mount(&store)
        .await;

    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let body: Value = common::client()
        .post(gateway.url("/criar-entrega"))
        .json(&json!({ "origem": { "lat": 1.5, "lng": 2.5 }, "destino": { "lat": 3.5, "lng": 4.5 } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entrega = &body["entrega"];
    assert_eq!(entrega["status"], "buscando");
    assert!(entrega["created_at"].is_string());
    assert_eq!(entrega["created_at"], entrega["updated_at"]);
    assert_eq!(entrega["cliente_nome"], Value::Null);
    assert_eq!(entrega["preco"], Value::Null);
}

#[tokio::test]
async fn test_whatsapp_test_send() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2010-04-01/Accounts/ACtest/Messages.json"))
        .and(header(
            "authorization",
            basic_auth_header("ACtest", "test-auth-token").as_str(),
        ))
        .and(body_string_contains("To=whatsapp%3A%2B5511988887777"))
        .and(body_string_contains("Body=VAIJ%C3%81"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "SM42", "status": "queued" })))
        .expect(1)
        .mount(&messaging)
        .await;

    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let res = common::client()
        .get(gateway.url("/whatsapp/test"))
        .query(&[("to", "whatsapp:+5511988887777")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["sent"], true);
    assert_eq!(body["result"]["sid"], "SM42");
}

#[tokio::test]
async fn test_messaging_failure_is_500() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"code":21211}"#))
        .mount(&messaging)
        .await;

    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let res = common::client()
        .get(gateway.url("/whatsapp/test?to=whatsapp:%2B1&msg=hi"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    let body: Value = res.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("400"));
    assert!(message.contains("21211"));
}

#[tokio::test]
async fn test_store_failure_surfaces_upstream_status() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(401).set_body_string("JWT expired"))
        .expect(1)
        .mount(&store)
        .await;

    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let res = common::client()
        .post(gateway.url("/aceitar-motorista"))
        .json(&json!({ "entregaId": 12 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "data store 401: JWT expired");
}

#[tokio::test]
async fn test_webhook_round_trip() {
    let gateway = common::start_gateway(GatewayConfig::default()).await;
    let client = common::client();

    let res = client.get(gateway.url("/whatsapp/webhook")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("access-control-allow-origin").is_none());
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = client
        .post(gateway.url("/whatsapp/webhook"))
        .json(&json!({ "MessageSid": "SM1", "MessageStatus": "delivered" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "received": true, "payload": { "MessageSid": "SM1", "MessageStatus": "delivered" } })
    );
}

#[tokio::test]
async fn test_env_and_preflight() {
    let store = MockServer::start().await;
    let messaging = MockServer::start().await;
    let gateway = common::start_gateway(common::mocked_config(&store, &messaging)).await;
    let client = common::client();

    let text = client
        .get(gateway.url("/env"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!text.contains("test-store-key"));
    assert!(!text.contains("test-auth-token"));
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["datastore"]["hasKey"], true);
    assert_eq!(body["messaging"]["usingApiKey"], false);
    assert_eq!(body["messaging"]["usingAuthToken"], true);

    let res = client
        .request(reqwest::Method::OPTIONS, gateway.url("/criar-entrega"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(res.headers()["access-control-max-age"], "86400");
    assert_eq!(res.headers()["access-control-allow-methods"], "GET,POST,OPTIONS");
}
