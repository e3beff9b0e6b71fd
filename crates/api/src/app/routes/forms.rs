use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use myform_core::{CreateFormRequest, FormId};
use myform_infra::cqrs::{CreateFormCommand, DeleteFormCommand};
use myform_infra::FormService;

use crate::app::dto::{self, FormResponse};
use crate::app::errors::ApiFailure;
use crate::app::API_V1;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).delete(delete_form))
}

pub async fn list_forms(
    Extension(services): Extension<Arc<dyn FormService>>,
) -> Result<Json<Vec<FormResponse>>, ApiFailure> {
    let all = services.get_all_forms().await?;
    Ok(Json(dto::forms_to_response(all.forms)))
}

pub async fn get_form(
    Extension(services): Extension<Arc<dyn FormService>>,
    Path(id): Path<String>,
) -> Result<Json<FormResponse>, ApiFailure> {
    let id: FormId = id.parse()?;
    let form = services.get_form(id).await?.ok_or(ApiFailure::NotFound)?;
    Ok(Json(FormResponse::from(form)))
}

pub async fn create_form(
    Extension(services): Extension<Arc<dyn FormService>>,
    body: Result<Json<CreateFormRequest>, JsonRejection>,
) -> Result<Response, ApiFailure> {
    let Json(request) = body?;
    let new_form = request.validate()?;

    let created = services
        .create_form(CreateFormCommand::from(new_form))
        .await?;

    let location = format!("{API_V1}/forms/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(FormResponse::from(created)),
    )
        .into_response())
}

pub async fn delete_form(
    Extension(services): Extension<Arc<dyn FormService>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    let id: FormId = id.parse()?;
    let result = services.delete_form(DeleteFormCommand { id }).await?;

    if !result.success {
        return Err(ApiFailure::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
