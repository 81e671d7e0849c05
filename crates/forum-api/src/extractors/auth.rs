//! Authentication extractor
//!
//! Resolves the `Authorization: Bearer` header into an [`Actor`]. The header is
//! optional: services decide which operations need an actor.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use forum_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Actor of the request, if a bearer token was sent
///
/// A missing header yields `None`. A header that is present but malformed,
/// expired or badly signed is rejected with 401 rather than treated as
/// anonymous.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Actor>);

impl OptionalAuthUser {
    /// The actor as passed to services
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InvalidAuthFormat)?;

        let app_state = AppState::from_ref(state);

        let actor = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::App(e)
            })?;

        Ok(OptionalAuthUser(Some(actor)))
    }
}
