use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use sha2::{Digest, Sha256};

use crate::api::service::check_auth;
use crate::model::guard::auth::ValidateResult;
use crate::model::service::metadata::CheckAuthResult;

/// basic auth credentials pulled from the `Authorization` header of a request
#[derive(Debug)]
pub struct HeaderAuth {
    pub username: String,
    pub password: String,
}

impl HeaderAuth {
    /// creates a `HeaderAuth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<HeaderAuth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.trim_start_matches("Basic ").trim();
        let Ok(value) = STANDARD.decode(stripped_header) else {
            return Err("Invalid basic auth format: not base64");
        };
        let Ok(combined) = String::from_utf8(value) else {
            return Err("Invalid basic auth format: not utf-8");
        };
        let split = combined.split(':').collect::<Vec<&str>>();
        // if there aren't exactly 2 parts, then something is wrong here
        if split.len() != 2 || split.iter().any(|part| part.trim().is_empty()) {
            return Err("Invalid basic auth format: missing username or password");
        }
        Ok(HeaderAuth {
            username: String::from(split[0].trim()),
            password: String::from(split[1].trim()),
        })
    }

    /// compares our value with that in the database.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(&self) -> ValidateResult {
        match check_auth(self) {
            CheckAuthResult::Valid => ValidateResult::Ok,
            CheckAuthResult::Missing => ValidateResult::NoPasswordSet,
            CheckAuthResult::Invalid | CheckAuthResult::DbError => ValidateResult::Invalid,
        }
    }

    /// sha256 of `username:password`, hex encoded. This is what gets stored in the database
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> String {
        let mut hasher = Sha256::new();
        let combined = format!("{}:{}", self.username.trim(), self.password.trim());
        hasher.update(combined.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for HeaderAuth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if value.starts_with("Basic") => match HeaderAuth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}
