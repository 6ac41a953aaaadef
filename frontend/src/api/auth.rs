use crate::api::api_url;
use crate::api::utils::{authenticated_get, build, send_json, with_json};
use gloo_net::http::Request;
use log::{debug, info};
use shared::{CurrentUserResponse, LoginRequest, LoginResponse, Result, SharedError, User};
use validator::Validate;

pub async fn login(email: String, password: String) -> Result<LoginResponse> {
    let request = LoginRequest { email, password };
    request.validate().map_err(SharedError::from)?;
    debug!("Logging in {}", request.email);
    let response: LoginResponse =
        send_json(with_json(Request::post(&api_url("/auth/login")), &request)?).await?;
    info!("Signed in as {}", response.user.username);
    Ok(response)
}

pub async fn current_user() -> Result<User> {
    let body: CurrentUserResponse = send_json(build(authenticated_get(&api_url("/auth/me")))?).await?;
    Ok(body.user)
}
