//! Professional profile domain services.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{
    CreateProfessionalRequest, CreateProfessionalResponse, GetProfessionalForUserRequest,
    GetProfessionalRequest, GetProfessionalResponse, ListProfessionalsResponse,
    ProfessionalCommand, ProfessionalPayload, ProfessionalQuery, ProfessionalRepository,
    ProfessionalRepositoryError, unknown_professional_error,
};

fn map_repository_error(error: ProfessionalRepositoryError) -> Error {
    match error {
        ProfessionalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("professional repository unavailable: {message}"))
        }
        ProfessionalRepositoryError::Query { message } => {
            Error::internal(format!("professional repository error: {message}"))
        }
    }
}

/// Professional service implementing the command driving port.
#[derive(Clone)]
pub struct ProfessionalCommandService<R> {
    professional_repo: Arc<R>,
}

impl<R> ProfessionalCommandService<R> {
    /// Create a new command service with the professional repository.
    pub fn new(professional_repo: Arc<R>) -> Self {
        Self { professional_repo }
    }
}

#[async_trait]
impl<R> ProfessionalCommand for ProfessionalCommandService<R>
where
    R: ProfessionalRepository,
{
    async fn create_professional(
        &self,
        request: CreateProfessionalRequest,
    ) -> Result<CreateProfessionalResponse, Error> {
        let professional = request
            .professional
            .into_entity(Uuid::new_v4())
            .map_err(|err| {
                Error::invalid_request(format!("invalid professional payload: {err}"))
            })?;

        self.professional_repo
            .save(&professional)
            .await
            .map_err(map_repository_error)?;

        Ok(CreateProfessionalResponse {
            professional: professional.into(),
        })
    }
}

/// Professional service implementing the query driving port.
#[derive(Clone)]
pub struct ProfessionalQueryService<R> {
    professional_repo: Arc<R>,
}

impl<R> ProfessionalQueryService<R> {
    /// Create a new query service with the professional repository.
    pub fn new(professional_repo: Arc<R>) -> Self {
        Self { professional_repo }
    }
}

#[async_trait]
impl<R> ProfessionalQuery for ProfessionalQueryService<R>
where
    R: ProfessionalRepository,
{
    async fn get_professional(
        &self,
        request: GetProfessionalRequest,
    ) -> Result<GetProfessionalResponse, Error> {
        let professional = self
            .professional_repo
            .find_by_id(&request.professional_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                unknown_professional_error("professionalId", request.professional_id)
            })?;

        Ok(GetProfessionalResponse {
            professional: professional.into(),
        })
    }

    async fn get_professional_for_user(
        &self,
        request: GetProfessionalForUserRequest,
    ) -> Result<GetProfessionalResponse, Error> {
        let professional = self
            .professional_repo
            .find_by_user_id(&request.user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_professional_error("userId", request.user_id))?;

        Ok(GetProfessionalResponse {
            professional: professional.into(),
        })
    }

    async fn list_professionals(&self) -> Result<ListProfessionalsResponse, Error> {
        let professionals = self
            .professional_repo
            .list_all()
            .await
            .map_err(map_repository_error)?;

        Ok(ListProfessionalsResponse {
            professionals: professionals
                .into_iter()
                .map(ProfessionalPayload::from)
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "professional_service_tests.rs"]
mod tests;
