use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Claims are injected into the GraphQL request data by the HTTP layer
/// when a valid bearer token is present.
pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
