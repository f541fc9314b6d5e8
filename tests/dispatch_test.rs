use nutrichat::{
    ActionOutcome, ApiClient, App, Origin, Panel, SendOutcome, Trigger, UiContext,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn settings_mock(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/get_user_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "John Doe",
            "theme": "dark",
            "fontSize": "large"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn app(server: &MockServer) -> App {
    App::new(ApiClient::new(&server.uri()).unwrap(), UiContext::new())
}

#[test_log::test(tokio::test)]
async fn test_page_load_projects_settings() {
    let server = MockServer::start().await;
    settings_mock(&server, 1).await;

    let app = app(&server);
    assert_eq!(app.start().await, Some(ActionOutcome::Refreshed(true)));
    assert_eq!(app.ui().body_classes().await, vec!["dark-mode", "font-large"]);
    assert_eq!(app.ui().settings().await.name, "John Doe");
}

#[test_log::test(tokio::test)]
async fn test_click_and_enter_send_on_their_panel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "noted"})))
        .expect(2)
        .mount(&server)
        .await;

    let app = app(&server);
    app.ui().set_input(Panel::Chat, "one banana").await;
    let outcome = app.handle(Trigger::Click(Panel::Chat)).await;
    assert_eq!(
        outcome,
        Some(ActionOutcome::Sent(SendOutcome::Replied {
            needs_confirmation: false
        }))
    );

    app.ui().set_input(Panel::Chat, "medium sized").await;
    app.handle(Trigger::enter(Panel::Chat)).await;

    let messages = app.ui().messages(Panel::Chat).await;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[2].text, "medium sized");
    assert_eq!(messages[3].origin, Origin::Assistant);
    assert!(app.ui().messages(Panel::Settings).await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_shift_enter_does_not_send() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "noted"})))
        .expect(0)
        .mount(&server)
        .await;

    let app = app(&server);
    app.ui().set_input(Panel::Chat, "first line").await;
    let outcome = app
        .handle(Trigger::KeyUp {
            panel: Panel::Chat,
            key: "Enter".to_string(),
            shift: true,
        })
        .await;

    assert_eq!(outcome, None);
    assert_eq!(app.ui().input(Panel::Chat).await, "first line");
    assert!(app.ui().messages(Panel::Chat).await.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_settings_enter_refreshes_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "Updated."})))
        .expect(1)
        .mount(&server)
        .await;
    settings_mock(&server, 1).await;

    let app = app(&server);
    app.ui().set_input(Panel::Settings, "dark theme").await;
    app.handle(Trigger::enter(Panel::Settings)).await;

    assert_eq!(app.ui().settings().await.theme, "Dark");
    assert_eq!(app.ui().messages(Panel::Settings).await.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_empty_click_is_skipped() {
    let server = MockServer::start().await;
    let app = app(&server);

    let outcome = app.handle(Trigger::Click(Panel::Settings)).await;
    assert_eq!(outcome, Some(ActionOutcome::Sent(SendOutcome::Skipped)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_history_is_fetched_and_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2025-03-02": {"calories": 280, "protein": 24, "carbs": 0, "fat": 12,
                "items": [{"food": "Eggs (4 medium)", "protein": 24, "carbs": 0, "fat": 12, "calories": 280}]},
            "2025-03-01": {"calories": 420, "protein": 60, "carbs": 0, "fat": 25, "items": []}
        })))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let history = api.get_history().await.unwrap();
    let rendered = nutrichat::render::render_history(&history);

    assert_eq!(
        rendered,
        "2025-03-01: 420 cals, 60 g protein, 0 g carbs, 25 g fat\n\
         2025-03-02: 280 cals, 24 g protein, 0 g carbs, 12 g fat\n  \
         - Eggs (4 medium): 280 cals, 24 g protein, 0 g carbs, 12 g fat\n\
         Total: 700 cals"
    );
}
