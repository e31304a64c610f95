mod common;

use common::{create_member, get, post};
use http::StatusCode;
use serde_json::json;
use shared::models::ReminderChannel;

fn candidate_names(body: &serde_json::Value) -> Vec<String> {
    body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["member"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_reminder_window_follows_as_of() {
    let app = common::test_app().await;
    // Monthly from 2024-01-01 expires 2024-01-31
    create_member(&app, "Jan", "9000000010", "Monthly", "2024-01-01").await;
    // expires 2024-02-02
    create_member(&app, "Feb", "9000000011", "Monthly", "2024-01-03").await;

    let (status, body) = get(&app, "/api/reminders?as_of=2024-01-30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["as_of"], "2024-01-30");
    assert_eq!(candidate_names(&body), vec!["Jan", "Feb"]);
    assert_eq!(body["candidates"][0]["urgency"], "due_soon");

    let (_, body) = get(&app, "/api/reminders?as_of=2024-01-31").await;
    assert_eq!(body["candidates"][0]["urgency"], "due_today");

    let (_, body) = get(&app, "/api/reminders?as_of=2024-02-01").await;
    assert_eq!(candidate_names(&body), vec!["Jan", "Feb"]);
    assert_eq!(body["candidates"][0]["urgency"], "due_yesterday");
    assert_eq!(body["candidates"][1]["urgency"], "due_soon");
    assert_eq!(
        body["candidates"][0]["message"],
        "Hi Jan, your gym membership is expiring on 31/01/2024. Please renew your membership to continue using our facilities."
    );

    // Jan is stale, Feb expired yesterday
    let (_, body) = get(&app, "/api/reminders?as_of=2024-02-03").await;
    assert_eq!(candidate_names(&body), vec!["Feb"]);

    let (_, body) = get(&app, "/api/reminders?as_of=2024-02-05").await;
    assert_eq!(body["candidates"], json!([]));
}

#[tokio::test]
async fn test_reminder_list_rejects_bad_date() {
    let app = common::test_app().await;
    let (status, body) = get(&app, "/api/reminders?as_of=31-01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_send_reminder_returns_launch_url() {
    let app = common::test_app().await;
    let id = create_member(&app, "Jan", "+91 98765 43210", "Monthly", "2024-01-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/reminders/{id}/send"),
        json!({ "channel": "whatsapp" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["channel"], "whatsapp");
    assert_eq!(body["phone"], "+919876543210");
    let url = body["launch_url"].as_str().unwrap();
    assert!(url.starts_with("whatsapp://send?phone=+919876543210&text=Hi%20Jan%2C"));
    assert!(url.contains("31%2F01%2F2024"));

    let (_, body) = post(
        &app,
        &format!("/api/reminders/{id}/send"),
        json!({ "channel": "business_whatsapp" }),
    )
    .await;
    assert!(
        body["launch_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/919876543210?text=")
    );
}

#[tokio::test]
async fn test_send_reminder_failures() {
    let app = common::test_app_with_channels(&[ReminderChannel::Sms]).await;
    let id = create_member(&app, "Jan", "9876543210", "Monthly", "2024-01-01").await;
    let bad_phone = create_member(&app, "NoPhone", "n/a", "Monthly", "2024-01-01").await;

    let (status, body) = post(
        &app,
        &format!("/api/reminders/{id}/send"),
        json!({ "channel": "whatsapp" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 6002);

    let (status, body) = post(
        &app,
        &format!("/api/reminders/{bad_phone}/send"),
        json!({ "channel": "sms" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6001);

    let (status, body) = post(&app, "/api/reminders/7/send", json!({ "channel": "sms" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (status, body) = post(
        &app,
        &format!("/api/reminders/{id}/send"),
        json!({ "channel": "pigeon" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["field"], "channel");
    assert_eq!(body["details"]["reason"], "unknown_channel");

    let (status, body) = post(&app, &format!("/api/reminders/{id}/send"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "channel");
}
