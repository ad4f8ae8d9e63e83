use proptest::prelude::*;
use serde_json::{Map, Value};
use shoplist_fn::ai::completion::{interpret_completion, CompletionOutcome};
use shoplist_fn::event::to_body_string;
use shoplist_fn::{AiConfig, InboundEvent, OutboundResponse, ShoppingListHandler};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn inbound_strategy() -> impl Strategy<Value = (Option<String>, bool)> {
    let body = prop_oneof![
        "(?s).{0,64}",
        any::<String>().prop_map(|text| serde_json::json!({ "ocrText": text }).to_string()),
        Just(r#"{"ocrText": 42}"#.to_string()),
        Just("[]".to_string()),
    ];
    (proptest::option::of(body), any::<bool>())
}

fn reply_strategy() -> impl Strategy<Value = (u16, String)> {
    let body = prop_oneof![
        any::<String>().prop_map(|text| serde_json::json!({ "completion": text }).to_string()),
        any::<String>()
            .prop_map(|text| serde_json::json!({ "error": { "message": text } }).to_string()),
        Just(r#"{"error": {}}"#.to_string()),
        Just(r#"{"error": null}"#.to_string()),
        Just(r#"{"error": "boom"}"#.to_string()),
        Just(r#"{"completion": 5}"#.to_string()),
        Just(r#"{"candidates": []}"#.to_string()),
        Just("[]".to_string()),
        "(?s).{0,64}",
    ];
    (prop::sample::select(vec![200u16, 400, 403, 500, 502]), body)
}

fn handle_with_reply(event: InboundEvent, status: u16, reply: String) -> OutboundResponse {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async move {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(reply, "application/json"))
            .mount(&server)
            .await;
        let handler = ShoppingListHandler::new(AiConfig {
            completion_api_key: "k".into(),
            completion_url: format!("{}/v1/complete", server.uri()),
            ocr_api_key: String::new(),
            ocr_url: String::new(),
        });
        handler.handle(event).await
    })
}

// Property: whatever comes in and whatever the service answers, the
// response has a known status and a body with exactly one expected key
proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_handler_always_answers_well_formed(
        (body, encoded) in inbound_strategy(),
        (status, reply) in reply_strategy(),
    ) {
        let event = InboundEvent { body, is_base64_encoded: encoded };
        let resp = handle_with_reply(event, status, reply);

        prop_assert!([200, 400, 500].contains(&resp.status_code), "{:?}", resp);
        let body: Map<String, Value> = serde_json::from_str(&resp.body).unwrap();
        prop_assert_eq!(body.len(), 1);
        let key = if resp.status_code == 200 { "shoppingList" } else { "error" };
        prop_assert!(body.get(key).is_some_and(Value::is_string), "{:?}", resp);
    }
}

proptest! {
    #[test]
    fn prop_completion_text_is_preserved(completion in "(?s).*") {
        let raw = serde_json::json!({ "completion": &completion }).to_string();
        let outcome = interpret_completion(&raw).unwrap();
        prop_assert_eq!(outcome, CompletionOutcome::Success { completion: completion.clone() });
    }

    #[test]
    fn prop_response_body_is_valid_json(text in "(?s).*") {
        let body = to_body_string(&serde_json::json!({ "shoppingList": &text })).unwrap();
        let back: Value = serde_json::from_str(&body).unwrap();
        prop_assert_eq!(back["shoppingList"].as_str(), Some(text.as_str()));
    }
}
