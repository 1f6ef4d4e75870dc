//! Application state and request extractors.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use hr_auth::{jwt, Principal};
use hr_core::HrError;
use hr_services::{
    AttendanceService, DisciplineService, DocumentService, EmployeeService, LeaveService,
    Notifier, ReportService, Store, TaskService,
};

use crate::error::ApiError;

/// One instance of each business service over a shared store.
pub struct Services {
    pub employees: EmployeeService,
    pub tasks: TaskService,
    pub attendance: AttendanceService,
    pub leaves: LeaveService,
    pub discipline: DisciplineService,
    pub documents: DocumentService,
    pub reports: ReportService,
    pub notifier: Notifier,
}

impl Services {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            employees: EmployeeService::new(store.clone()),
            tasks: TaskService::new(store.clone()),
            attendance: AttendanceService::new(store.clone()),
            leaves: LeaveService::new(store.clone()),
            discipline: DisciplineService::new(store.clone()),
            documents: DocumentService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            notifier: Notifier::new(store),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub jwt_secret: Arc<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_secret: impl Into<String>) -> Self {
        Self {
            services: Arc::new(Services::new(store)),
            jwt_secret: Arc::new(jwt_secret.into()),
        }
    }
}

/// Bearer-token authenticated principal.
pub struct AuthenticatedUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError(HrError::unauthenticated("missing bearer token")))?;

        let principal = jwt::decode_token(token, &app_state.jwt_secret)?;
        Ok(AuthenticatedUser(principal))
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
