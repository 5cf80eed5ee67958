use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::AnswerOutcome,
        dto::{
            request::{StartSessionRequest, SubmitAnswerRequest},
            response::{
                AdvanceResponse, AnswerResponse, DeleteSessionResponse, HintResponse, RewardView,
                SessionStateResponse,
            },
        },
    },
    services::AdvanceOutcome,
};

#[post("/api/curriculums/{curriculum_id}/chapters/{chapter_id}/sessions")]
pub async fn start_session(
    state: web::Data<AppState>,
    path: web::Path<(String, i32)>,
    request: web::Json<StartSessionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (curriculum_id, chapter_id) = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let curriculum = state
        .curriculum_service
        .get_curriculum(&curriculum_id, &auth.0.sub)
        .await?;

    let session = state
        .session_service
        .start_session(&auth.0.sub, &curriculum, chapter_id, request)
        .await?;

    Ok(HttpResponse::Created().json(SessionStateResponse::from_session(&session)))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.session_service.get_session(&id, &auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(SessionStateResponse::from_session(&session)))
}

#[post("/api/sessions/{id}/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let (outcome, solved_level) = state
        .session_service
        .submit_answer(&id, &auth.0.sub, &request.answer)
        .await?;

    let response = AnswerResponse {
        correct: outcome == AnswerOutcome::Correct,
        reward: solved_level.as_ref().map(RewardView::from),
    };

    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/sessions/{id}/hint")]
pub async fn reveal_hint(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (hint, hints_remaining) = state.session_service.reveal_hint(&id, &auth.0.sub).await?;

    Ok(HttpResponse::Ok().json(HintResponse {
        hint,
        hints_remaining: hints_remaining as i32,
    }))
}

/// Past the last level the session is consumed and the chapter completion
/// walk runs, so the response carries the refreshed curriculum.
#[post("/api/sessions/{id}/advance")]
pub async fn advance_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let outcome = state.session_service.advance(&id, &auth.0.sub).await?;

    let response = match outcome {
        AdvanceOutcome::Continued(session) => AdvanceResponse {
            finished: false,
            session: Some(SessionStateResponse::from_session(&session)),
            curriculum: None,
        },
        AdvanceOutcome::Finished {
            curriculum_id,
            chapter_id,
        } => {
            let curriculum = state
                .curriculum_service
                .complete_chapter(&curriculum_id, &auth.0.sub, chapter_id)
                .await?;

            AdvanceResponse {
                finished: true,
                session: None,
                curriculum: Some(curriculum.into()),
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

#[actix_web::delete("/api/sessions/{id}")]
pub async fn abandon_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.session_service.abandon(&id, &auth.0.sub).await?;

    Ok(HttpResponse::Ok().json(DeleteSessionResponse {
        message: format!("Session '{}' abandoned", id),
    }))
}
