use axum::{
    Json,
    extract::{Multipart, Path, State},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Image, ImageUploadState},
    queries::image_queries,
};

/// Image upload form action: store the file in the blob store, then record
/// the image row pointing at the public URL. Any failure collapses into a
/// generic state the form can display.
pub async fn post_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Json<ImageUploadState> {
    match store_image(&state, multipart).await {
        Ok(url) => Json(ImageUploadState {
            errors: Default::default(),
            message: Some(format!("Success: {} created", url)),
        }),
        Err(e) => {
            tracing::error!("Image upload failed: {}", e);
            Json(ImageUploadState {
                errors: Default::default(),
                message: Some("Error adding file".to_string()),
            })
        }
    }
}

async fn store_image(state: &AppState, mut multipart: Multipart) -> Result<String> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut description = String::new();
    let mut owner_id: Option<i32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image_file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid description: {}", e)))?;
            }
            Some("owner_id") => {
                owner_id = field.text().await.ok().and_then(|s| s.parse().ok());
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("No file found in form data".to_string()))?;

    let url = state.blob.put(&file_name, bytes, &content_type).await?;

    image_queries::create_image(&state.db, &url, &description, owner_id).await?;

    Ok(url)
}

pub async fn get_image(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Image>> {
    let image = image_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    Ok(Json(image))
}
