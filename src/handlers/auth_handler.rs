use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::UserProfile,
        dto::{
            request::{LoginRequest, RefreshRequest},
            response::AuthResponse,
        },
    },
};

fn issue_tokens(state: &AppState, profile: UserProfile) -> Result<AuthResponse, AppError> {
    let access_token = state.jwt_service.create_token(&profile)?;
    let refresh = state.jwt_service.create_refresh_token(&profile.id)?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh,
        profile: profile.into(),
    })
}

/// Display-name login. Resumes the existing profile when the name is known,
/// otherwise registers a new one.
#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let profile = state.profile_service.login(&request.display_name).await?;
    let response = issue_tokens(&state, profile)?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/auth/guest")]
pub async fn guest_login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let profile = state.profile_service.create_guest().await?;
    let response = issue_tokens(&state, profile)?;

    Ok(HttpResponse::Created().json(response))
}

#[post("/api/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let refresh_claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    let profile = state
        .profile_service
        .get_profile(&refresh_claims.sub)
        .await
        .map_err(|_| {
            AppError::Unauthorized("Profile associated with refresh token not found".to_string())
        })?;

    let response = issue_tokens(&state, profile)?;
    log::info!("Token refreshed for profile '{}'", refresh_claims.sub);

    Ok(HttpResponse::Ok().json(response))
}
