//! API Handlers

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request, State,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use director_business::BusinessError;
use director_core::{AssignmentOutcome, AssignmentRequest, Company, CoreError};
use director_persistence::DirectorRow;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

// ============ Error Mapping ============

/// Business errors rendered as `{"message": ...}`
pub struct ApiError(BusinessError);

impl From<BusinessError> for ApiError {
    fn from(err: BusinessError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": self.0.to_string() })),
            )
                .into_response();
        }

        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Internal server error." })),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoreError::InvalidInput(rejection.body_text()).into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CoreError::InvalidInput(rejection.body_text()).into())
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ============ Extractors ============

/// `Query` whose rejection renders as `{"message": ...}`
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `Json` whose rejection renders as `{"message": ...}`
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// HTTP rendering of an assignment outcome
pub fn outcome_response(outcome: AssignmentOutcome) -> (StatusCode, Json<serde_json::Value>) {
    let status = match outcome {
        AssignmentOutcome::Assigned { rows_inserted } => {
            return (StatusCode::OK, Json(json!({ "rowsInserted": rows_inserted })));
        }
        AssignmentOutcome::BusinessUnitNotFound | AssignmentOutcome::ClassNotFound => {
            StatusCode::NOT_FOUND
        }
        AssignmentOutcome::ClassBusinessUnitConflict | AssignmentOutcome::DuplicateDirector => {
            StatusCode::CONFLICT
        }
    };
    (status, Json(json!({ "message": outcome.message() })))
}

// ============ Request Types ============

#[derive(Deserialize)]
pub struct CompanyQuery {
    pub company: String,
}

#[derive(Deserialize)]
pub struct ClassQuery {
    pub company: String,
    pub clazz: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub company: String,
    pub clazz: String,
    pub business_unit: String,
}

// ============ Handlers ============

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn list_companies(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    Ok(Json(state.service.list_companies().await?))
}

pub async fn list_business_units(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.service.list_business_units(&q.company).await?))
}

pub async fn business_units_for_class(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ClassQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let labels = state
        .service
        .business_units_for_class(&q.company, &q.clazz)
        .await?;
    Ok(Json(labels))
}

/// 404 when the class has no director
pub async fn business_unit_for_class(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ClassQuery>,
) -> ApiResult<Response> {
    let label = state
        .service
        .business_unit_for_class(&q.company, &q.clazz)
        .await?;
    Ok(match label {
        Some(label) => Json(json!({ "businessUnit": label })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

pub async fn list_director_classes(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.service.list_director_classes(&q.company).await?))
}

pub async fn list_registered_classes(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.service.list_registered_classes(&q.company).await?))
}

pub async fn search_directors(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<DirectorRow>>> {
    let rows = state
        .service
        .search_directors(&q.company, &q.business_unit, &q.clazz)
        .await?;
    Ok(Json(rows))
}

pub async fn list_all_directors(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DirectorRow>>> {
    Ok(Json(state.service.list_all_directors().await?))
}

pub async fn list_directors_for_company(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<DirectorRow>>> {
    Ok(Json(state.service.list_directors_for_company(&q.company).await?))
}

pub async fn list_directory_accounts(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.service.list_directory_accounts(&q.company).await?))
}

pub async fn update_director_account(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AssignmentRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let updated = state
        .service
        .update_director_account(
            &payload.company,
            &payload.business_unit,
            &payload.class,
            &payload.nt_account,
        )
        .await?;
    Ok(Json(json!({ "rowsUpdated": updated })))
}

/// Assign a director; the outcome decides the status code
pub async fn add_director(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AssignmentRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let outcome = state.service.assign_director(&payload).await?;
    Ok(outcome_response(outcome))
}

pub async fn delete_class_mapping(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ClassQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state.service.delete_class_mapping(&q.clazz, &q.company).await?;
    Ok(Json(json!({ "rowsDeleted": deleted })))
}

pub async fn delete_director_association(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ClassQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = state
        .service
        .delete_director_association(&q.clazz, &q.company)
        .await?;
    Ok(Json(json!({ "rowsDeleted": deleted })))
}
