use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateCurriculumRequest, PaginationParams},
        response::{CurriculumDto, PaginatedCurriculumsResponse, PaginationMetadata},
    },
};

/// Turns uploaded study material into a fresh chapter roadmap. Generation is
/// synchronous; the client waits on the model.
#[post("/api/curriculums")]
pub async fn create_curriculum(
    state: web::Data<AppState>,
    request: web::Json<CreateCurriculumRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let curriculum = state
        .curriculum_service
        .create_curriculum(&auth.0.sub, request)
        .await?;

    Ok(HttpResponse::Created().json(CurriculumDto::from(curriculum)))
}

/// Canned subject with no model round-trip, for trying the game out.
#[post("/api/curriculums/demo")]
pub async fn create_demo_curriculum(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let curriculum = state
        .curriculum_service
        .create_demo_curriculum(&auth.0.sub)
        .await?;

    Ok(HttpResponse::Created().json(CurriculumDto::from(curriculum)))
}

#[get("/api/curriculums")]
pub async fn list_curriculums(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let (curriculums, total) = state
        .curriculum_service
        .list_curriculums(&auth.0.sub, pagination.offset(), pagination.limit())
        .await?;

    let response = PaginatedCurriculumsResponse {
        data: curriculums.into_iter().map(CurriculumDto::from).collect(),
        pagination: PaginationMetadata {
            offset: pagination.offset(),
            limit: pagination.limit(),
            total,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/curriculums/{id}")]
pub async fn get_curriculum(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let curriculum = state
        .curriculum_service
        .get_curriculum(&id, &auth.0.sub)
        .await?;

    Ok(HttpResponse::Ok().json(CurriculumDto::from(curriculum)))
}
