use crate::api::api_url;
use crate::api::utils::{
    authenticated_get, authenticated_post, authenticated_put, build, send_json, with_json,
};
use log::debug;
use shared::{
    Contest, ContestStatus, MyContests, PlayerDetails, RegisterRequest, Registration, RegistrationEnvelope,
    RegistrationList, Result, SharedError,
};

fn contests_path(status: ContestStatus) -> String {
    format!("/contests?status={}", urlencoding::encode(status.as_str()))
}

fn contest_path(contest_id: i64) -> String {
    format!("/contests/{}", contest_id)
}

fn envelope(body: RegistrationEnvelope) -> Result<Registration> {
    body.registration
        .ok_or_else(|| SharedError::Conversion("Response carried no registration".to_string()))
}

pub async fn list_contests(status: ContestStatus) -> Result<Vec<Contest>> {
    debug!("Fetching {} contests", status);
    send_json(build(authenticated_get(&api_url(&contests_path(status))))?).await
}

pub async fn get_contest(contest_id: i64) -> Result<Contest> {
    debug!("Fetching contest {}", contest_id);
    send_json(build(authenticated_get(&api_url(&contest_path(contest_id))))?).await
}

/// `Ok(None)` when the API answers 404.
pub async fn my_registration(contest_id: i64) -> Result<Option<Registration>> {
    debug!("Probing registration for contest {}", contest_id);
    let url = api_url(&format!("{}/registration", contest_path(contest_id)));
    match send_json::<RegistrationEnvelope>(build(authenticated_get(&url))?).await {
        Ok(body) => Ok(body.registration),
        Err(SharedError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// All registrations of a contest, for the lobby roster.
pub async fn contest_registrations(contest_id: i64) -> Result<Vec<Registration>> {
    let url = api_url(&format!("{}/registrations", contest_path(contest_id)));
    let body: RegistrationList = send_json(build(authenticated_get(&url))?).await?;
    Ok(body.registrations)
}

/// Registrations of the signed-in user across contests.
pub async fn user_registrations() -> Result<RegistrationList> {
    send_json(build(authenticated_get(&api_url("/user/registrations")))?).await
}

/// `GET /my-contests`, the dashboard's activity feed.
pub async fn my_contests() -> Result<MyContests> {
    debug!("Fetching joined contests");
    send_json(build(authenticated_get(&api_url("/my-contests")))?).await
}

pub async fn register(contest_id: i64, request: &RegisterRequest) -> Result<Registration> {
    debug!(
        "Registering for contest {} (confirmed: {})",
        contest_id,
        request.is_confirmed()
    );
    let url = api_url(&format!("{}/register", contest_path(contest_id)));
    envelope(send_json(with_json(authenticated_post(&url), request)?).await?)
}

pub async fn update_registration(contest_id: i64, players: &PlayerDetails) -> Result<Registration> {
    debug!("Updating registration for contest {}", contest_id);
    let url = api_url(&format!("{}/registration", contest_path(contest_id)));
    envelope(send_json(with_json(authenticated_put(&url), players)?).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths() {
        assert_eq!(contests_path(ContestStatus::Open), "/contests?status=open");
        assert_eq!(contest_path(42), "/contests/42");
    }

    #[test]
    fn test_envelope_without_registration_is_an_error() {
        assert!(matches!(
            envelope(RegistrationEnvelope { registration: None }),
            Err(SharedError::Conversion(_))
        ));
    }
}
