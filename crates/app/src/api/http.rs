//! HTTP client for the marketplace API.

use std::fmt;

use async_trait::async_trait;
use comanda::{
    menu::{MenuItem, MenuItemId},
    orders::{CreateOrderRequest, Order, OrderId, OrderStatus},
    restaurants::{Restaurant, RestaurantId},
    users::{LoginResponse, RegisterRequest, User},
};
use reqwest::{Client, RequestBuilder, StatusCode, header::ACCEPT};
use serde::{
    Deserialize, Serialize,
    de::{DeserializeOwned, IgnoredAny},
};
use serde_json::{Value, json};
use tracing::debug;

use crate::api::{ApiError, MarketplaceApi};

/// JSON-over-HTTP implementation of [`MarketplaceApi`].
#[derive(Clone)]
pub struct HttpMarketplaceApi {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl fmt::Debug for HttpMarketplaceApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpMarketplaceApi")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpMarketplaceApi {
    /// Create an anonymous client for the API rooted at `base_url`,
    /// e.g. `"http://localhost:8000/api"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            http: Client::new(),
        }
    }

    /// Send `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.http.patch(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.header(ACCEPT, "application/json");

        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), "marketplace response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            return Err(ApiError::UnexpectedResponse(error_message(status, &body)));
        }

        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }
}

#[async_trait]
impl MarketplaceApi for HttpMarketplaceApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post("login", &json!({ "email": email, "password": password }))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        self.post("register", request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.post::<_, IgnoredAny>("logout", &json!({})).await?;

        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get("user").await
    }

    async fn restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.get("restaurants").await
    }

    async fn restaurant(&self, id: &RestaurantId) -> Result<Restaurant, ApiError> {
        self.get(&format!("restaurants/{id}")).await
    }

    async fn menu_items(&self, restaurant_id: &RestaurantId) -> Result<Vec<MenuItem>, ApiError> {
        self.get(&format!("restaurants/{restaurant_id}/foods")).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
        self.post("orders", request).await
    }

    async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get::<Listing<Order>>("orders")
            .await
            .map(Listing::into_items)
    }

    async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("orders/{id}")).await
    }

    async fn my_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        self.get::<Listing<Restaurant>>("my-restaurants")
            .await
            .map(Listing::into_items)
    }

    async fn restaurant_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get::<Listing<Order>>("restaurant-orders")
            .await
            .map(Listing::into_items)
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.patch(&format!("orders/{id}/status"), &json!({ "status": status }))
            .await
    }

    async fn toggle_menu_item_availability(&self, id: &MenuItemId) -> Result<MenuItem, ApiError> {
        self.patch(&format!("foods/{id}/toggle-availability"), &json!({}))
            .await
    }
}

/// List endpoints answer with either a bare array or, once the envelope is
/// removed, a paginator page `{ data: [...], current_page, ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Items(Vec<T>),
    Page { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) | Listing::Page { data: items } => items,
        }
    }
}

/// Responses are either the payload itself or `{ "data": payload }`.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut object) => match object.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                object.insert("data".to_string(), data);
                Value::Object(object)
            }
            None => Value::Object(object),
        },
        other => other,
    }
}

/// Prefers the server's `message`, then its `error`, then the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let field = |value: &Value, key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| field(&value, "message").or_else(|| field(&value, "error")))
        .unwrap_or_else(|| format!("Error {status}"))
}
