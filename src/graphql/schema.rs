use async_graphql::{Context, EmptySubscription, Object, Schema as GraphQLSchema, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppResult,
    models::dto::{
        request::LoginRequest,
        response::{
            AuthResponse, CurriculumDto, PaginatedCurriculumsResponse, PaginationMetadata,
            ProfileDto,
        },
    },
};

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The profile the supplied token belongs to.
    async fn profile(&self, ctx: &Context<'_>) -> AppResult<ProfileDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let profile = state.profile_service.get_profile(&claims.sub).await?;
        Ok(profile.into())
    }

    async fn curriculum(&self, ctx: &Context<'_>, id: ID) -> AppResult<CurriculumDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let curriculum = state
            .curriculum_service
            .get_curriculum(&id, &claims.sub)
            .await?;
        Ok(curriculum.into())
    }

    async fn curriculums(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<PaginatedCurriculumsResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let offset = offset.unwrap_or(0).max(0);
        let limit = limit.unwrap_or(20).clamp(1, 100);

        let (curriculums, total) = state
            .curriculum_service
            .list_curriculums(&claims.sub, offset, limit)
            .await?;

        Ok(PaginatedCurriculumsResponse {
            data: curriculums.into_iter().map(CurriculumDto::from).collect(),
            pagination: PaginationMetadata {
                offset,
                limit,
                total,
            },
        })
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Display-name login. The only mutation usable without a token.
    async fn register_profile(
        &self,
        ctx: &Context<'_>,
        input: LoginRequest,
    ) -> AppResult<AuthResponse> {
        let state = ctx.data::<AppState>()?;
        input.validate()?;

        let profile = state.profile_service.login(&input.display_name).await?;
        let access_token = state.jwt_service.create_token(&profile)?;
        let refresh_token = state.jwt_service.create_refresh_token(&profile.id)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            profile: profile.into(),
        })
    }

    async fn complete_chapter(
        &self,
        ctx: &Context<'_>,
        curriculum_id: ID,
        chapter_id: i32,
    ) -> AppResult<CurriculumDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        let curriculum = state
            .curriculum_service
            .complete_chapter(&curriculum_id, &claims.sub, chapter_id)
            .await?;
        Ok(curriculum.into())
    }
}

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}
