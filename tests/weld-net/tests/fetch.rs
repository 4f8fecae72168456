use futures_util::future::join;
use url::Url;
use weld_net::ReqwestProvider;
use weld_traits::net::{FetchProvider, Request};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn get(url: &str) -> Request {
    Request::get(Url::parse(url).unwrap())
}

#[tokio::test]
async fn fetches_http_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/script.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("console.log('hi')", "text/javascript"),
        )
        .mount(&server)
        .await;

    let provider = ReqwestProvider::new();
    let response = provider
        .fetch(get(&format!("{}/script.js", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    assert_eq!(response.text(), "console.log('hi')");
    assert_eq!(
        response.headers.get("content-type").unwrap(),
        "text/javascript"
    );
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.js"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let provider = ReqwestProvider::new();
    let response = provider
        .fetch(get(&format!("{}/missing.js", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.text(), "not found");
}

#[tokio::test]
async fn request_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth.js"))
        .and(header("x-manifest-token", "sesame"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = get(&format!("{}/auth.js", server.uri()));
    request
        .headers
        .insert("x-manifest-token", "sesame".parse().unwrap());

    let provider = ReqwestProvider::new();
    let response = provider.fetch(request).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn sends_a_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (X11; Linux x86_64; rv:60.0) Gecko/20100101 Firefox/81.0",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ReqwestProvider::new();
    let response = provider.fetch(get(&format!("{}/", server.uri()))).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn concurrent_fetches_share_one_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string("b"))
        .mount(&server)
        .await;

    let provider = ReqwestProvider::new();
    let (a, b) = join(
        provider.fetch(get(&format!("{}/a", server.uri()))),
        provider.fetch(get(&format!("{}/b", server.uri()))),
    )
    .await;

    assert_eq!(a.unwrap().text(), "a");
    assert_eq!(b.unwrap().text(), "b");
}

#[tokio::test]
async fn file_urls_are_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("local.js");
    std::fs::write(&file_path, "export default 1;").unwrap();

    let url = Url::from_file_path(&file_path).unwrap();
    let provider = ReqwestProvider::new();
    let response = provider.fetch(Request::get(url)).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "export default 1;");
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let url = Url::from_file_path("/definitely/not/here.js").unwrap();
    let provider = ReqwestProvider::new();
    let err = provider.fetch(Request::get(url)).await.unwrap_err();
    assert!(matches!(err, weld_traits::net::FetchError::Io(_)));
}

#[tokio::test]
async fn data_urls_decode_in_place() {
    let provider = ReqwestProvider::new();
    let response = provider
        .fetch(get("data:text/javascript;base64,Y29uc29sZS5sb2coMSk="))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "console.log(1)");
}
