//! Card queries and resource reads against a mock AnkiConnect.

mod common;

use review_engine::resources::{list_resources, read_resource};
use review_engine::{Card, Error, QueryEngine};
use serde_json::json;

use common::{
    card_info, client_for, mock_action, mock_action_times, mock_anki_error, mock_anki_response,
    setup_mock_server,
};

#[tokio::test]
async fn test_no_matches_skips_details() {
    let server = setup_mock_server().await;
    mock_action_times(
        &server,
        "findCards",
        json!({"query": "deck:Empty"}),
        mock_anki_response(Vec::<i64>::new()),
        1,
    )
    .await;
    mock_action_times(&server, "cardsInfo", json!({}), mock_anki_response(json!([])), 0).await;

    let client = client_for(&server);
    let cards = QueryEngine::new(&client).cards("deck:Empty").await.unwrap();

    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_cards_sorted_by_due_keeping_ties_in_order() {
    let server = setup_mock_server().await;
    mock_action(&server, "findCards", mock_anki_response(vec![1, 2, 3, 4])).await;
    mock_action_times(
        &server,
        "cardsInfo",
        json!({"cards": [1, 2, 3, 4]}),
        mock_anki_response(json!([
            card_info(1, "a", "A", 5),
            card_info(2, "b", "B", 2),
            card_info(3, "c", "C", 5),
            card_info(4, "d", "D", 2)
        ])),
        1,
    )
    .await;

    let client = client_for(&server);
    let cards = QueryEngine::new(&client).cards("is:due").await.unwrap();

    let ids: Vec<i64> = cards.iter().map(|c| c.card_id).collect();
    assert_eq!(ids, [2, 4, 1, 3]);
    assert!(cards.windows(2).all(|w| w[0].due <= w[1].due));
}

#[tokio::test]
async fn test_card_sides_are_normalized() {
    let server = setup_mock_server().await;
    mock_action(&server, "findCards", mock_anki_response(vec![7])).await;
    mock_action(
        &server,
        "cardsInfo",
        mock_anki_response(json!([card_info(
            7,
            "<style>.card { color: black; }</style>comer[sound:comer.mp3]",
            "<style>.card {}</style>comer<hr id=answer><div>to eat</div>",
            0
        )])),
    )
    .await;

    let client = client_for(&server);
    let cards = QueryEngine::new(&client).cards("nid:1").await.unwrap();

    assert_eq!(
        cards,
        vec![Card {
            card_id: 7,
            question: "comer".to_string(),
            answer: "comer\nto eat".to_string(),
            due: 0,
        }]
    );
}

#[tokio::test]
async fn test_backend_error_propagates() {
    let server = setup_mock_server().await;
    mock_action(&server, "findCards", mock_anki_error("invalid search")).await;

    let client = client_for(&server);
    let err = QueryEngine::new(&client).cards("(((").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Backend(review_connect::Error::AnkiConnect(ref msg)) if msg == "invalid search"
    ));
}

#[tokio::test]
async fn test_read_resource_decodes_filter() {
    let server = setup_mock_server().await;
    mock_action_times(
        &server,
        "findCards",
        json!({"query": "deck:\"Spanish Verbs\""}),
        mock_anki_response(vec![1]),
        1,
    )
    .await;
    mock_action(
        &server,
        "cardsInfo",
        mock_anki_response(json!([card_info(1, "hablar", "to speak", 3)])),
    )
    .await;

    let client = client_for(&server);
    let body = read_resource(&client, "anki://search/deck%3A%22Spanish%20Verbs%22")
        .await
        .unwrap();

    assert_eq!(body.mime_type, "application/json");
    assert_eq!(body.uri, "anki://search/deck%3A%22Spanish%20Verbs%22");
    let cards: Vec<Card> = serde_json::from_str(&body.text).unwrap();
    assert_eq!(cards[0].question, "hablar");
}

#[tokio::test]
async fn test_listed_resources_are_readable() {
    let server = setup_mock_server().await;
    for filter in ["deck:current", "is:due", "is:new"] {
        mock_action_times(
            &server,
            "findCards",
            json!({ "query": filter }),
            mock_anki_response(Vec::<i64>::new()),
            1,
        )
        .await;
    }

    let client = client_for(&server);
    for resource in list_resources() {
        let body = read_resource(&client, resource.uri).await.unwrap();
        assert_eq!(body.text, "[]");
    }
}

#[tokio::test]
async fn test_bad_resource_uri_makes_no_request() {
    let server = setup_mock_server().await;
    mock_action_times(&server, "findCards", json!({}), mock_anki_response(json!([])), 0).await;

    let client = client_for(&server);
    let err = read_resource(&client, "anki://search/").await.unwrap_err();

    assert!(matches!(err, Error::InvalidResourceUri(_)));
    assert!(err.is_invalid_request());
}
