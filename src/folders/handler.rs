use rocket::serde::json::Json;

use crate::folders::service;
use crate::guard::HeaderAuth;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, GetFolderError, RestoreFolderError, UpdateFolderError,
};
use crate::model::guard::auth::ValidateResult;
use crate::model::request::folder_requests::{
    CreateFolderRequest, MoveFolderRequest, UpdateFolderRequest,
};
use crate::model::response::folder_responses::{
    CreateFolderResponse, DeleteFolderResponse, FolderApi, GetFolderResponse,
    GetFolderTreeResponse, GetRootFolderResponse, RestoreFolderResponse, UpdateFolderResponse,
};
use crate::model::response::BasicMessage;

static NO_PASSWORD_MESSAGE: &str = "No password has been set. You can set a username and password by making a POST to `/api/password`";
static BAD_CREDENTIALS_MESSAGE: &str = "Bad Credentials";

#[get("/")]
pub fn get_root_folder(auth: HeaderAuth) -> GetRootFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return GetRootFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return GetRootFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::get_root_folder() {
        Ok(root) => GetRootFolderResponse::Success(Json::from(root)),
        Err(_) => GetRootFolderResponse::FolderDbError(BasicMessage::new(
            "Failed to pull folder info from database. Check server logs for details",
        )),
    }
}

#[get("/tree")]
pub fn get_folder_tree(auth: HeaderAuth) -> GetFolderTreeResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return GetFolderTreeResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return GetFolderTreeResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::get_folder_tree() {
        Ok(tree) => GetFolderTreeResponse::Success(Json::from(tree)),
        Err(_) => GetFolderTreeResponse::FolderDbError(BasicMessage::new(
            "Failed to pull folder info from database. Check server logs for details",
        )),
    }
}

#[get("/<id>")]
pub fn get_folder(id: &str, auth: HeaderAuth) -> GetFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return GetFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return GetFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::get_folder(id) {
        Ok(folder) => GetFolderResponse::Success(Json::from(folder)),
        Err(GetFolderError::NotFound) => GetFolderResponse::FolderNotFound(BasicMessage::new(
            "The folder with the passed id could not be found.",
        )),
        Err(GetFolderError::DbFailure) => GetFolderResponse::FolderDbError(BasicMessage::new(
            "Failed to pull folder info from database. Check server logs for details",
        )),
    }
}

#[post("/", data = "<folder>")]
pub fn create_folder(folder: Json<CreateFolderRequest>, auth: HeaderAuth) -> CreateFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return CreateFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return CreateFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::create_folder(&folder.into_inner()) {
        Ok(created) => CreateFolderResponse::Success(Json::from(created)),
        Err(CreateFolderError::AlreadyExists) => CreateFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder already exists."),
        ),
        Err(CreateFolderError::ParentNotFound) => CreateFolderResponse::ParentNotFound(
            BasicMessage::new("No folder with the passed parentId was found."),
        ),
        Err(CreateFolderError::InvalidName) => CreateFolderResponse::BadRequest(
            BasicMessage::new("Folder name cannot be blank."),
        ),
        Err(CreateFolderError::InvalidColor) => CreateFolderResponse::BadRequest(
            BasicMessage::new("Folder color must be in the format #RRGGBB."),
        ),
        Err(CreateFolderError::DbFailure) => CreateFolderResponse::FolderDbError(
            BasicMessage::new("Failed to save folder info to the database. Check server logs for details"),
        ),
    }
}

#[put("/", data = "<folder>")]
pub fn update_folder(folder: Json<UpdateFolderRequest>, auth: HeaderAuth) -> UpdateFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return UpdateFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return UpdateFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    map_update_result(service::update_folder(&folder.into_inner()))
}

#[put("/<id>/parent", data = "<request>")]
pub fn move_folder(id: &str, request: Json<MoveFolderRequest>, auth: HeaderAuth) -> UpdateFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return UpdateFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return UpdateFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    map_update_result(service::move_folder(id, &request.into_inner()))
}

#[put("/<id>/restore")]
pub fn restore_folder(id: &str, auth: HeaderAuth) -> RestoreFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return RestoreFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return RestoreFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    match service::restore_folder(id) {
        Ok(folder) => RestoreFolderResponse::Success(Json::from(folder)),
        Err(RestoreFolderError::FolderNotFound) => RestoreFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(RestoreFolderError::NotDeleted) => RestoreFolderResponse::NotDeleted(
            BasicMessage::new("That folder has not been deleted."),
        ),
        Err(RestoreFolderError::AlreadyExists) => RestoreFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder already exists."),
        ),
        Err(RestoreFolderError::DbFailure) => RestoreFolderResponse::FolderDbError(
            BasicMessage::new("Failed to restore folder. Check server logs for details"),
        ),
    }
}

/// soft-deletes the folder, unless `permanent` is true in which case the folder and its descendants are removed for good
#[delete("/<id>?<permanent>")]
pub fn delete_folder(id: &str, permanent: Option<bool>, auth: HeaderAuth) -> DeleteFolderResponse {
    match auth.validate() {
        ValidateResult::Ok => {/* no op */},
        ValidateResult::NoPasswordSet => return DeleteFolderResponse::Unauthorized(NO_PASSWORD_MESSAGE.to_string()),
        ValidateResult::Invalid => return DeleteFolderResponse::Unauthorized(BAD_CREDENTIALS_MESSAGE.to_string())
    };
    let result = if permanent.unwrap_or(false) {
        service::hard_delete_folder(id)
    } else {
        service::delete_folder(id)
    };
    match result {
        Ok(()) => DeleteFolderResponse::Success(()),
        Err(DeleteFolderError::FolderNotFound) => DeleteFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(DeleteFolderError::DbFailure) => DeleteFolderResponse::FolderDbError(
            BasicMessage::new("Failed to delete folder. Check server logs for details"),
        ),
    }
}

fn map_update_result(result: Result<FolderApi, UpdateFolderError>) -> UpdateFolderResponse {
    match result {
        Ok(folder) => UpdateFolderResponse::Success(Json::from(folder)),
        Err(UpdateFolderError::NotFound) => UpdateFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(UpdateFolderError::ParentNotFound) => UpdateFolderResponse::ParentNotFound(
            BasicMessage::new("The parent folder with the passed id could not be found."),
        ),
        Err(UpdateFolderError::AlreadyExists) => UpdateFolderResponse::FolderAlreadyExists(
            BasicMessage::new("That folder already exists."),
        ),
        Err(UpdateFolderError::NotAllowed) => UpdateFolderResponse::NotAllowed(BasicMessage::new(
            "Cannot move a folder into itself or one of its own child folders.",
        )),
        Err(UpdateFolderError::InvalidName) => UpdateFolderResponse::BadRequest(
            BasicMessage::new("Folder name cannot be blank."),
        ),
        Err(UpdateFolderError::InvalidColor) => UpdateFolderResponse::BadRequest(
            BasicMessage::new("Folder color must be in the format #RRGGBB."),
        ),
        Err(UpdateFolderError::DbFailure) => UpdateFolderResponse::FolderDbError(
            BasicMessage::new("Failed to update folder in the database. Check server logs for details"),
        ),
    }
}
