mod common;

use serde_json::json;
use story_gif::{deepai, ImageGenerator, StoryError};
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn downloads_the_generated_image() {
    let server = MockServer::start().await;
    let image = common::png_bytes(4, 4, [1, 2, 3, 255]);

    Mock::given(method("POST"))
        .and(path("/api/text2img"))
        .and(header("api-key", "secret"))
        .and(body_string_contains("text=A+red+fox"))
        .and(body_string_contains("grid_size=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1b2",
            "output_url": format!("{}/media/fox.png", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/fox.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = deepai::Client::new("secret", &server.uri()).unwrap();
    let bytes = client.generate("A red fox").await.unwrap();

    assert_eq!(bytes, image);
}

#[tokio::test]
async fn missing_output_url_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/text2img"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Out of credits"
        })))
        .mount(&server)
        .await;

    let client = deepai::Client::new("secret", &server.uri()).unwrap();
    let err = client.generate("A red fox").await.unwrap_err();

    assert!(matches!(err, StoryError::Generation(_)));
    assert!(err.to_string().contains("Out of credits"));
}

#[tokio::test]
async fn rejected_request_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/text2img"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad api key"))
        .mount(&server)
        .await;

    let client = deepai::Client::new("wrong", &server.uri()).unwrap();
    let err = client.generate("anything").await.unwrap_err();

    assert!(matches!(err, StoryError::Generation(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn failed_download_is_a_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/text2img"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output_url": format!("{}/media/gone.png", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/media/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = deepai::Client::new("secret", &server.uri()).unwrap();

    assert!(matches!(
        client.generate("anything").await,
        Err(StoryError::Generation(_))
    ));
}
