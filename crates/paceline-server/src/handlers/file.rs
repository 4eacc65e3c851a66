use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MAX_FILE_BYTES: usize = 100 * 1024;
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

pub async fn upload(
    state: web::Data<AppState>,
    _user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<HttpResponse> {
    let mut field = find_file_field(&mut multipart).await?;
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("Invalid file"))?;
    check_extension(&filename)?;
    let content_type = field.content_type().map(|mime| mime.to_string());
    let data = read_capped(&mut field).await?;

    let uri = state.files.upload(&filename, content_type, data).await?;
    Ok(HttpResponse::Ok().json(json!({ "uri": uri })))
}

async fn find_file_field(multipart: &mut Multipart) -> Result<Field, ApiError> {
    while let Some(field) = multipart
        .try_next()
        .await
        .map_err(|_| ApiError::bad_request("Invalid file"))?
    {
        if field.name() == Some("file") {
            return Ok(field);
        }
    }
    Err(ApiError::bad_request("Invalid file"))
}

fn check_extension(filename: &str) -> Result<(), ApiError> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ApiError::bad_request(
            "Only jpeg, jpg, and png files are allowed",
        ))
    }
}

async fn read_capped(field: &mut Field) -> Result<Bytes, ApiError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|_| ApiError::bad_request("Invalid file"))?
    {
        if buf.len() + chunk.len() > MAX_FILE_BYTES {
            return Err(ApiError::bad_request("File exceeds 100KB"));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(check_extension("photo.PNG").is_ok());
        assert!(check_extension("photo.jpeg").is_ok());
        assert!(check_extension("photo.jpg").is_ok());
    }

    #[test]
    fn other_extensions_are_rejected() {
        for name in ["clip.gif", "archive.tar.gz", "noext", "sneaky.png.exe"] {
            let err = check_extension(name).unwrap_err();
            assert_eq!(err.to_string(), "Only jpeg, jpg, and png files are allowed");
        }
    }
}
