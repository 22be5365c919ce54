//! REST handlers. Each one deserializes its body, calls the core, and returns
//! the core's result as JSON.

use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use devtools_core::color::{ColorConversion, Palette, DEFAULT_PALETTE_COUNT};
use devtools_core::json::{JsonDiff, JsonValidation};
use devtools_core::password::{GeneratedPassword, PasswordAnalysis, PasswordOptions};
use serde::{Deserialize, Serialize};

type Payload<T> = Result<Json<T>, JsonRejection>;

#[derive(Debug, Deserialize)]
pub struct ColorConvertRequest {
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct ColorPaletteRequest {
    pub base_color: String,
    #[serde(default = "default_palette_count")]
    pub count: usize,
}

fn default_palette_count() -> usize {
    DEFAULT_PALETTE_COUNT
}

#[derive(Debug, Deserialize)]
pub struct PasswordCheckRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonValidateRequest {
    pub json_string: String,
}

#[derive(Debug, Deserialize)]
pub struct JsonDiffRequest {
    pub json1: String,
    pub json2: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "healthy" })
}

pub async fn convert_color(
    payload: Payload<ColorConvertRequest>,
) -> Result<Json<ColorConversion>, Error> {
    let Json(request) = payload?;
    log::debug!("convert_color: {}", request.color);

    Ok(Json(devtools_core::convert_color(&request.color)?))
}

pub async fn generate_palette(
    payload: Payload<ColorPaletteRequest>,
) -> Result<Json<Palette>, Error> {
    let Json(request) = payload?;
    log::debug!(
        "generate_palette: base={} count={}",
        request.base_color,
        request.count
    );

    Ok(Json(devtools_core::generate_palette(
        &request.base_color,
        request.count,
    )?))
}

pub async fn check_password(
    payload: Payload<PasswordCheckRequest>,
) -> Result<Json<PasswordAnalysis>, Error> {
    let Json(request) = payload?;

    Ok(Json(devtools_core::check_password_strength(
        &request.password,
    )?))
}

pub async fn generate_password(
    payload: Payload<PasswordOptions>,
) -> Result<Json<GeneratedPassword>, Error> {
    let Json(options) = payload?;
    log::debug!("generate_password: length={}", options.length);

    Ok(Json(devtools_core::generate_password(&options)?))
}

pub async fn validate_json(
    payload: Payload<JsonValidateRequest>,
) -> Result<Json<JsonValidation>, Error> {
    let Json(request) = payload?;

    Ok(Json(devtools_core::validate_json(&request.json_string)))
}

pub async fn diff_json(payload: Payload<JsonDiffRequest>) -> Result<Json<JsonDiff>, Error> {
    let Json(request) = payload?;

    Ok(Json(devtools_core::diff_json(&request.json1, &request.json2)?))
}
