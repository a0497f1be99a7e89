use rocket::serde::{json::Json, Serialize};

use crate::api::service;
use crate::model::error::metadata_errors::CreatePasswordError;
use crate::model::request::NewAuth;
use crate::model::response::api_responses::SetPassWordResponse;
use crate::model::response::BasicMessage;

static API_VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: &'static str,
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion {
        version: API_VERSION_NUMBER,
    })
}

#[post("/password", data = "<auth>")]
pub fn set_password(auth: Json<NewAuth>) -> SetPassWordResponse {
    match service::create_password(auth.into_inner()) {
        Ok(()) => SetPassWordResponse::Created(()),
        Err(CreatePasswordError::AlreadyExists) => SetPassWordResponse::AlreadyExists(
            BasicMessage::new("Cannot set password, because password is already set."),
        ),
        Err(CreatePasswordError::Failure) => SetPassWordResponse::Failure(BasicMessage::new(
            "Failed to save password. Check server logs for details",
        )),
    }
}
