use contracts::domain::a001_fire_district::{DistrictDraft, DistrictListItem, ExportFormat};
use contracts::shared::api_error::SaveDistrictResponse;
use wasm_bindgen::JsCast;
use web_sys::Blob;

use crate::shared::api_utils::{response_json, send};

const BASE_PATH: &str = "/api/fire_district";

pub async fn fetch_districts() -> Result<Vec<DistrictListItem>, String> {
    let response = send("GET", BASE_PATH, None).await?;
    response_json(&response).await
}

pub async fn save_district(draft: &DistrictDraft) -> Result<SaveDistrictResponse, String> {
    let body = serde_json::to_string(draft).map_err(|e| e.to_string())?;
    let response = send("POST", BASE_PATH, Some(body)).await?;
    response_json(&response).await
}

pub async fn delete_district(id: &str) -> Result<(), String> {
    let id = String::from(js_sys::encode_uri_component(id));
    let path = format!("{}/{}", BASE_PATH, id);
    send("DELETE", &path, None).await?;
    Ok(())
}

/// Exported file of the drawn district, ready for [`crate::shared::export::download_blob`]
pub async fn fetch_export(draft: &DistrictDraft, format: ExportFormat) -> Result<Blob, String> {
    let body = serde_json::to_string(draft).map_err(|e| e.to_string())?;
    let path = format!("{}/export/{}", BASE_PATH, format.code());
    let response = send("POST", &path, Some(body)).await?;

    let blob = wasm_bindgen_futures::JsFuture::from(
        response
            .blob()
            .map_err(|e| format!("Failed to read body: {:?}", e))?,
    )
    .await
    .map_err(|e| format!("Failed to read body: {:?}", e))?;

    blob.dyn_into::<Blob>().map_err(|_| "Not a Blob".to_string())
}
