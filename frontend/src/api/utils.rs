use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use log::{debug, error};
use serde::de::DeserializeOwned;
use shared::{ErrorResponse, Result, SharedError};

/// LocalStorage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Creates a request with Authorization header from localStorage
pub fn authenticated_request(method: &str, url: &str) -> RequestBuilder {
    let mut req = match method {
        "POST" => Request::post(url),
        "PUT" => Request::put(url),
        "DELETE" => Request::delete(url),
        _ => Request::get(url),
    };

    if let Ok(token) = LocalStorage::get::<String>(TOKEN_KEY) {
        req = req.header("Authorization", &format!("Bearer {}", token));
    }

    req
}

pub fn authenticated_get(url: &str) -> RequestBuilder {
    authenticated_request("GET", url)
}

pub fn authenticated_post(url: &str) -> RequestBuilder {
    authenticated_request("POST", url)
}

pub fn authenticated_put(url: &str) -> RequestBuilder {
    authenticated_request("PUT", url)
}

pub fn authenticated_delete(url: &str) -> RequestBuilder {
    authenticated_request("DELETE", url)
}

pub fn network_error(e: gloo_net::Error) -> SharedError {
    error!("Request failed: {}", e);
    SharedError::Network(e.to_string())
}

/// Turns a non-success response into the client error taxonomy.
pub async fn error_from(response: Response) -> SharedError {
    let status = response.status();
    let body = response.json::<ErrorResponse>().await.unwrap_or_default();
    let err = body.into_error(status);
    debug!("API answered {}: {}", status, err);
    err
}

/// Sends the request and decodes the success body as `T`.
pub async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T> {
    let response = request.send().await.map_err(network_error)?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| SharedError::Conversion(e.to_string()))
}

/// Sends the request and ignores the success body.
pub async fn send_empty(request: Request) -> Result<()> {
    let response = request.send().await.map_err(network_error)?;
    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

pub fn build(builder: RequestBuilder) -> Result<Request> {
    builder.build().map_err(network_error)
}

pub fn with_json<B: serde::Serialize>(builder: RequestBuilder, body: &B) -> Result<Request> {
    builder.json(body).map_err(network_error)
}
