//! HTTP client for the storefront's cart and variant endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, Url,
    cookie::{CookieStore, Jar},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    api::{
        ApiError, CartApi, VariantApi,
        wire::{
            AddToCart, AddedToCart, QuantityUpdated, Reply, UpdateQuantity, VariantQuery,
            VariantRecord,
        },
    },
    cart::models::Cart,
    config::StorefrontConfig,
};

const CART_LIST_PATH: &str = "/cart/api/list/";
const CART_ADD_PATH: &str = "/cart/api/add/";
const CART_UPDATE_PATH: &str = "/cart/api/update/";
const VARIANT_PATH: &str = "/products/api/variant/";

/// Longest slice of an unexpected body kept in error messages.
const BODY_SNIPPET_LEN: usize = 200;

/// Cookie-aware HTTP client for the storefront API.
///
/// Session and anti-forgery cookies live in a shared jar; mutating requests
/// echo the anti-forgery cookie back in the configured header.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: Url,
    http: Client,
    cookies: Arc<Jar>,
    csrf_cookie: String,
    csrf_header: String,
}

impl HttpStorefrontApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|error| ApiError::InvalidUrl(format!("{}: {error}", config.base_url)))?;

        let cookies = Arc::new(Jar::default());

        let http = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url,
            http,
            cookies,
            csrf_cookie: config.csrf_cookie.clone(),
            csrf_header: config.csrf_header.clone(),
        })
    }

    /// Seed the cookie jar, e.g. with `"sessionid=..."` from an existing login.
    #[must_use]
    pub fn with_cookie(self, cookie: &str) -> Self {
        self.cookies.add_cookie_str(cookie, &self.base_url);
        self
    }

    /// Current anti-forgery token, read from the cookie jar.
    #[must_use]
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.cookies.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;

        find_cookie(cookies, &self.csrf_cookie).map(str::to_string)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::InvalidUrl(format!("{path}: {error}")))
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<RequestBuilder, ApiError> {
        let token = self
            .csrf_token()
            .ok_or_else(|| ApiError::MissingCsrfToken(self.csrf_cookie.clone()))?;

        Ok(self
            .http
            .post(self.endpoint(path)?)
            .header(self.csrf_header.as_str(), token)
            .json(body))
    }

    /// An `{error}` body is a rejection whatever the status; any other body
    /// only counts as success on a 2xx.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Reply<T>>(&text) {
            Ok(Reply::Rejected { error }) => {
                warn!(%status, "storefront rejected request: {error}");

                Err(ApiError::Rejected(error))
            }
            Ok(Reply::Accepted(body)) if status.is_success() => Ok(body),
            Ok(Reply::Accepted(_)) => Err(ApiError::UnexpectedResponse(format!(
                "status {status}: {}",
                snippet(&text)
            ))),
            Err(source) => Err(ApiError::UnexpectedResponse(format!(
                "status {status}: {source}: {}",
                snippet(&text)
            ))),
        }
    }

    async fn into_variant(response: Response) -> Result<Option<VariantRecord>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            debug!(%status, "variant lookup found no match");

            return Ok(None);
        }

        let text = response.text().await?;

        serde_json::from_str(&text).map(Some).map_err(|source| {
            ApiError::UnexpectedResponse(format!("variant: {source}: {}", snippet(&text)))
        })
    }
}

#[async_trait]
impl CartApi for HttpStorefrontApi {
    async fn list_cart(&self) -> Result<Cart, ApiError> {
        debug!("fetching cart");

        let carts: Vec<Cart> = Self::send(self.http.get(self.endpoint(CART_LIST_PATH)?)).await?;

        Ok(carts.into_iter().next().unwrap_or_default())
    }

    async fn add_item(&self, request: AddToCart) -> Result<AddedToCart, ApiError> {
        debug!(product = %request.product_id, quantity = request.quantity, "adding to cart");

        Self::send(self.post(CART_ADD_PATH, &request)?).await
    }

    async fn update_quantity(&self, request: UpdateQuantity) -> Result<QuantityUpdated, ApiError> {
        debug!(item = %request.item_id, quantity = request.quantity, "updating quantity");

        Self::send(self.post(CART_UPDATE_PATH, &request)?).await
    }
}

#[async_trait]
impl VariantApi for HttpStorefrontApi {
    async fn find_variant(&self, query: VariantQuery) -> Result<Option<VariantRecord>, ApiError> {
        debug!(product = %query.product_id, size = %query.size, color = %query.color, "looking up variant");

        let product_id = query.product_id.to_string();

        let response = self
            .http
            .get(self.endpoint(VARIANT_PATH)?)
            .query(&[
                ("product_id", product_id.as_str()),
                ("size", query.size.as_str()),
                ("color", query.color.as_str()),
            ])
            .send()
            .await?;

        Self::into_variant(response).await
    }
}

/// Find `name` in a `Cookie` header value (`"a=1; b=2"`).
fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;

        (key == name).then_some(value)
    })
}

fn snippet(text: &str) -> String {
    text.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        task::JoinHandle,
    };

    use super::*;
    use crate::ids::{ItemId, ProductId, VariantId};

    /// A one-shot HTTP server answering with `status` and `body`.
    ///
    /// Resolves to the raw request it received.
    struct FakeServer {
        base_url: String,
        request: JoinHandle<String>,
    }

    impl FakeServer {
        async fn answering(status: &'static str, body: &'static str) -> TestResult<Self> {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            let base_url = format!("http://{}", listener.local_addr()?);

            let request = tokio::spawn(async move {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return String::new();
                };

                let request = read_request(&mut stream).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );

                if let Err(error) = stream.write_all(response.as_bytes()).await {
                    return format!("write failed: {error}\n{request}");
                }

                request
            });

            Ok(Self { base_url, request })
        }

        fn api(&self) -> Result<HttpStorefrontApi, ApiError> {
            HttpStorefrontApi::new(&StorefrontConfig {
                base_url: self.base_url.clone(),
                ..StorefrontConfig::default()
            })
            .map(|api| api.with_cookie("csrftoken=t0k3n"))
        }

        async fn request(self) -> TestResult<String> {
            Ok(self.request.await?)
        }
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut received = Vec::new();
        let mut chunk = [0_u8; 1024];

        while let Ok(read) = stream.read(&mut chunk).await {
            if read == 0 {
                break;
            }

            received.extend_from_slice(chunk.get(..read).unwrap_or_default());

            let text = String::from_utf8_lossy(&received);

            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;

                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);

                if body.len() >= length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&received).into_owned()
    }

    fn api() -> Result<HttpStorefrontApi, ApiError> {
        HttpStorefrontApi::new(&StorefrontConfig {
            base_url: "http://shop.test".to_string(),
            ..StorefrontConfig::default()
        })
    }

    #[test]
    fn finds_cookie_among_others() {
        let header = "sessionid=abc; csrftoken=t0k3n; theme=dark";

        assert_eq!(find_cookie(header, "csrftoken"), Some("t0k3n"));
        assert_eq!(find_cookie(header, "csrf"), None);
    }

    #[test]
    fn csrf_token_comes_from_seeded_cookie() -> TestResult {
        let api = api()?.with_cookie("csrftoken=t0k3n");

        assert_eq!(api.csrf_token().as_deref(), Some("t0k3n"));

        Ok(())
    }

    #[test]
    fn mutating_request_without_token_is_refused() -> TestResult {
        let api = api()?;

        let result = api.post(CART_ADD_PATH, &serde_json::json!({}));

        assert!(
            matches!(result, Err(ApiError::MissingCsrfToken(ref name)) if name == "csrftoken"),
            "expected MissingCsrfToken"
        );

        Ok(())
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = HttpStorefrontApi::new(&StorefrontConfig {
            base_url: "not a url".to_string(),
            ..StorefrontConfig::default()
        });

        assert!(
            matches!(result, Err(ApiError::InvalidUrl(_))),
            "expected InvalidUrl"
        );
    }

    #[test]
    fn endpoints_resolve_against_origin() -> TestResult {
        let api = api()?;

        assert_eq!(
            api.endpoint(CART_UPDATE_PATH)?.as_str(),
            "http://shop.test/cart/api/update/"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_posts_json_with_csrf_header() -> TestResult {
        let server =
            FakeServer::answering("200 OK", r#"{"message": "Item added to cart", "cart_total": 3}"#)
                .await?;

        let added = server
            .api()?
            .add_item(AddToCart {
                product_id: ProductId::new(5),
                quantity: 2,
                variant_id: Some(VariantId::new(7)),
            })
            .await?;

        let request = server.request().await?;
        let lowered = request.to_ascii_lowercase();

        assert_eq!(added.cart_total, 3);
        assert!(request.starts_with("POST /cart/api/add/ "), "unexpected request {request}");
        assert!(lowered.contains("x-csrftoken: t0k3n"), "missing csrf header in {request}");
        assert!(
            request.contains(r#""product_id":5"#) && request.contains(r#""variant_id":7"#),
            "unexpected body in {request}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn error_body_is_a_rejection_whatever_the_status() -> TestResult {
        let server =
            FakeServer::answering("400 Bad Request", r#"{"error": "Only 2 left in stock"}"#).await?;

        let result = server
            .api()?
            .update_quantity(UpdateQuantity {
                item_id: ItemId::new(1),
                quantity: 5,
            })
            .await;

        assert!(
            matches!(result, Err(ApiError::Rejected(ref message)) if message == "Only 2 left in stock"),
            "expected a rejection, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_update_is_not_a_success() -> TestResult {
        let server = FakeServer::answering(
            "403 Forbidden",
            r#"{"detail": "CSRF Failed: CSRF token missing."}"#,
        )
        .await?;

        let result = server
            .api()?
            .update_quantity(UpdateQuantity {
                item_id: ItemId::new(1),
                quantity: 0,
            })
            .await;

        assert!(
            matches!(result, Err(ApiError::UnexpectedResponse(_))),
            "expected an unexpected response, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_status_with_success_shaped_body_is_not_a_success() -> TestResult {
        let server = FakeServer::answering(
            "500 Internal Server Error",
            r#"{"message": "Cart updated", "cart_total": 3}"#,
        )
        .await?;

        let result = server
            .api()?
            .update_quantity(UpdateQuantity {
                item_id: ItemId::new(1),
                quantity: 3,
            })
            .await;

        assert!(
            matches!(result, Err(ApiError::UnexpectedResponse(_))),
            "expected an unexpected response, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_success_is_parsed() -> TestResult {
        let server = FakeServer::answering(
            "200 OK",
            r#"{"message": "Cart updated", "item_subtotal": "59.97", "cart_total_price": "59.97", "cart_total": 3}"#,
        )
        .await?;

        let update = server
            .api()?
            .update_quantity(UpdateQuantity {
                item_id: ItemId::new(1),
                quantity: 3,
            })
            .await?;

        let request = server.request().await?;

        assert_eq!(update.cart_total, Some(3));
        assert_eq!(update.cart_total_price, Some(Decimal::new(5997, 2)));
        assert!(
            request.contains(r#"{"item_id":1,"quantity":3}"#),
            "unexpected body in {request}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_list_is_an_empty_cart() -> TestResult {
        let server = FakeServer::answering("200 OK", "[]").await?;

        let cart = server.api()?.list_cart().await?;
        let request = server.request().await?;

        assert_eq!(cart, Cart::default());
        assert!(request.starts_with("GET /cart/api/list/ "), "unexpected request {request}");

        Ok(())
    }

    #[tokio::test]
    async fn html_body_is_an_unexpected_response() -> TestResult {
        let server =
            FakeServer::answering("500 Internal Server Error", "<html>Server Error</html>").await?;

        let result = server.api()?.list_cart().await;

        assert!(
            matches!(result, Err(ApiError::UnexpectedResponse(ref message)) if message.contains("<html>")),
            "expected an unexpected response, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn variant_not_found_is_none() -> TestResult {
        let server = FakeServer::answering("404 Not Found", r#"{"error": "Variant not found"}"#).await?;

        let found = server
            .api()?
            .find_variant(VariantQuery {
                product_id: ProductId::new(42),
                size: "M".to_string(),
                color: "Red".to_string(),
            })
            .await?;

        let request = server.request().await?;

        assert_eq!(found, None);
        assert!(
            request.starts_with("GET /products/api/variant/?product_id=42&size=M&color=Red "),
            "unexpected request {request}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn variant_match_is_parsed() -> TestResult {
        let server = FakeServer::answering(
            "200 OK",
            r#"{"id": 7, "selling_price": "19.99", "stock": 0, "sku": "TS-M-RED"}"#,
        )
        .await?;

        let found = server
            .api()?
            .find_variant(VariantQuery {
                product_id: ProductId::new(42),
                size: "M".to_string(),
                color: "Red".to_string(),
            })
            .await?
            .ok_or("expected a variant")?;

        assert_eq!(found.id, VariantId::new(7));
        assert_eq!(found.selling_price, Decimal::new(1999, 2));
        assert_eq!(found.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() -> TestResult {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        drop(listener);

        let api = HttpStorefrontApi::new(&StorefrontConfig {
            base_url,
            ..StorefrontConfig::default()
        })?;

        let result = api.list_cart().await;

        assert!(
            matches!(result, Err(ApiError::Http(_))),
            "expected a transport error, got {result:?}"
        );

        Ok(())
    }
}
