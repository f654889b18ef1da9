//! 바코드 카탈로그 조회

use actix_web::{get, web, HttpResponse};

use crate::errors::errors::AppError;
use crate::services::products::ProductService;

/// 바코드(EAN-13)로 카탈로그 상품을 조회합니다. 형식이 틀리면 400, 없으면 404.
#[get("/{code}")]
pub async fn get_by_barcode(code: web::Path<String>) -> Result<HttpResponse, AppError> {
    let product = ProductService::instance()
        .get_by_barcode(&code)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("바코드에 해당하는 상품이 없습니다: {}", code)))?;
    Ok(HttpResponse::Ok().json(product))
}
