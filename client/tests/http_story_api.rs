//! Behaviour of the reqwest story API adapter against a local stub server.

mod support;

use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use snooze::domain::ports::{StoryApi, StoryApiError};
use snooze::domain::{
    LoginCredentials, ProfileUpdate, SessionToken, SignupDetails, StoryDraft, StoryId, Username,
};
use snooze::outbound::http::HttpStoryApi;

use support::{Canned, spawn_stub, story_json, unreachable_url, user_json};

const TOKEN: &str = "tok-123";

fn token() -> SessionToken {
    SessionToken::new(TOKEN).expect("fixture token")
}

fn username(raw: &str) -> Username {
    Username::new(raw).expect("fixture username")
}

fn client(base_url: reqwest::Url) -> HttpStoryApi {
    HttpStoryApi::new(base_url, Some(Duration::from_secs(5))).expect("client builds")
}

#[rstest]
#[actix_web::test]
async fn list_stories_decodes_the_feed_without_a_token() {
    let stub = spawn_stub(vec![Canned::json(
        "GET",
        "/stories",
        200,
        &json!({"stories": [story_json("a", "First"), story_json("b", "Second")]}),
    )])
    .await;

    let stories = client(stub.base_url.clone())
        .list_stories()
        .await
        .expect("feed decodes");

    let titles: Vec<_> = stories.iter().map(|story| story.title().to_owned()).collect();
    assert_eq!(titles, ["First", "Second"]);
    let request = stub.single_request();
    assert_eq!(request.query, "");
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn create_story_sends_token_and_story_in_the_body() {
    let stub = spawn_stub(vec![Canned::json(
        "POST",
        "/stories",
        201,
        &json!({"story": story_json("new", "Fresh")}),
    )])
    .await;
    let draft = StoryDraft::try_new("Fresh", "Ada Author", "https://example.com/new")
        .expect("fixture draft");

    let story = client(stub.base_url.clone())
        .create_story(&token(), &draft)
        .await
        .expect("story created");

    assert_eq!(story.id().as_ref(), "new");
    let request = stub.single_request();
    assert_eq!(request.query, "");
    assert_eq!(
        request.body,
        Some(json!({
            "token": TOKEN,
            "story": {"title": "Fresh", "author": "Ada Author", "url": "https://example.com/new"}
        }))
    );
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn fetch_user_sends_the_token_as_a_query_parameter() {
    let stub = spawn_stub(vec![Canned::json(
        "GET",
        "/users/hueter",
        200,
        &json!({"user": user_json(vec![story_json("f", "Fav")], vec![story_json("o", "Own")])}),
    )])
    .await;

    let account = client(stub.base_url.clone())
        .fetch_user(&token(), &username("hueter"))
        .await
        .expect("user decodes");

    assert_eq!(account.profile.name(), "Joel Burton");
    assert_eq!(account.favorites.len(), 1);
    assert_eq!(account.own_stories[0].id().as_ref(), "o");
    let request = stub.single_request();
    assert_eq!(request.query, format!("token={TOKEN}"));
    assert_eq!(request.body, None);
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn delete_and_favorite_calls_carry_the_token_in_the_body() {
    let stub = spawn_stub(vec![
        Canned::json("DELETE", "/stories/s1", 200, &json!({"message": "Deleted story!"})),
        Canned::json(
            "POST",
            "/users/hueter/favorites/s2",
            200,
            &json!({"message": "Favorite added!"}),
        ),
        Canned::json(
            "DELETE",
            "/users/hueter/favorites/s2",
            200,
            &json!({"message": "Favorite removed!"}),
        ),
    ])
    .await;
    let api = client(stub.base_url.clone());
    let s1 = StoryId::new("s1").expect("id");
    let s2 = StoryId::new("s2").expect("id");

    api.delete_story(&token(), &s1).await.expect("deleted");
    api.add_favorite(&token(), &username("hueter"), &s2)
        .await
        .expect("favorited");
    api.remove_favorite(&token(), &username("hueter"), &s2)
        .await
        .expect("unfavorited");

    let recorded = stub.recorded();
    let methods: Vec<_> = recorded.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, ["DELETE", "POST", "DELETE"]);
    for request in &recorded {
        assert_eq!(request.body, Some(json!({"token": TOKEN})), "{request:?}");
        assert_eq!(request.query, "");
    }
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn path_segments_are_percent_encoded() {
    let stub = spawn_stub(vec![Canned::json(
        "POST",
        "/users/ada%20l/favorites/a%2Fb",
        200,
        &json!({}),
    )])
    .await;

    client(stub.base_url.clone())
        .add_favorite(
            &token(),
            &username("ada l"),
            &StoryId::new("a/b").expect("id"),
        )
        .await
        .expect("encoded path matches");

    assert_eq!(stub.single_request().path, "/users/ada%20l/favorites/a%2Fb");
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn login_and_signup_return_the_issued_token() {
    let stub = spawn_stub(vec![
        Canned::json(
            "POST",
            "/login",
            200,
            &json!({"token": "tok-login", "user": user_json(vec![], vec![])}),
        ),
        Canned::json(
            "POST",
            "/signup",
            201,
            &json!({"token": "tok-signup", "user": user_json(vec![], vec![])}),
        ),
    ])
    .await;
    let api = client(stub.base_url.clone());

    let login = api
        .login(&LoginCredentials::try_from_parts("hueter", "pw").expect("credentials"))
        .await
        .expect("login");
    let signup = api
        .signup(&SignupDetails::try_from_parts("hueter", "pw", "Joel Burton").expect("details"))
        .await
        .expect("signup");

    assert_eq!(login.token.expose(), "tok-login");
    assert_eq!(signup.token.expose(), "tok-signup");
    let recorded = stub.recorded();
    assert_eq!(
        recorded[0].body,
        Some(json!({"user": {"username": "hueter", "password": "pw"}}))
    );
    assert_eq!(
        recorded[1].body,
        Some(json!({"user": {"username": "hueter", "password": "pw", "name": "Joel Burton"}}))
    );
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn profile_update_keeps_the_current_token_when_none_is_returned() {
    let stub = spawn_stub(vec![Canned::json(
        "PATCH",
        "/users/hueter",
        200,
        &json!({"user": user_json(vec![], vec![])}),
    )])
    .await;
    let update = ProfileUpdate::try_from_parts(None, Some("Joel B.")).expect("update");

    let account = client(stub.base_url.clone())
        .update_user(&token(), &username("hueter"), &update)
        .await
        .expect("profile updated");

    assert_eq!(account.token.expose(), TOKEN);
    assert_eq!(
        stub.single_request().body,
        Some(json!({"token": TOKEN, "user": {"name": "Joel B."}}))
    );
    stub.stop().await;
}

#[rstest]
#[case::envelope(
    Canned::json(
        "GET",
        "/stories",
        401,
        &json!({"error": {"status": 401, "title": "Unauthorized", "message": "Invalid token"}})
    ),
    401,
    "Invalid token"
)]
#[case::plain_body(
    Canned::raw("GET", "/stories", 502, "<html>\n  Bad   Gateway\n</html>"),
    502,
    "<html> Bad Gateway </html>"
)]
#[actix_web::test]
async fn error_statuses_carry_the_server_message(
    #[case] reply: Canned,
    #[case] status: u16,
    #[case] message: &str,
) {
    let stub = spawn_stub(vec![reply]).await;

    let error = client(stub.base_url.clone())
        .list_stories()
        .await
        .expect_err("non-2xx");

    assert_eq!(error, StoryApiError::api(status, message));
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn undecodable_success_bodies_are_decode_errors() {
    let stub = spawn_stub(vec![Canned::raw("GET", "/stories", 200, "{\"stories\": 7}")]).await;

    let error = client(stub.base_url.clone())
        .list_stories()
        .await
        .expect_err("bad payload");

    assert!(matches!(error, StoryApiError::Decode { .. }), "{error:?}");
    stub.stop().await;
}

#[rstest]
#[actix_web::test]
async fn transport_failures_do_not_leak_the_token() {
    let error = client(unreachable_url())
        .fetch_user(&token(), &username("hueter"))
        .await
        .expect_err("nothing listening");

    let StoryApiError::Network { message } = &error else {
        panic!("expected a network error, got {error:?}");
    };
    assert!(!message.contains(TOKEN), "token leaked: {message}");
}
