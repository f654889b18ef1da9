//! 기부 기록 핸들러 (관리자 전용 스코프)
//!
//! 결제 검증은 하지 않으며, 관리자가 확인된 거래를 JSON으로 기록합니다.
//! 기부자는 payer id로 병합되고 주소는 필드가 모두 같으면 재사용됩니다.

use actix_web::{get, post, web, HttpResponse};

use crate::domain::dto::donations::request::RecordDonationRequest;
use crate::errors::errors::AppError;
use crate::services::donations::DonationService;

/// 기부 기록
///
/// 같은 `transaction_id`가 이미 기록되어 있으면 409 Conflict.
#[post("")]
pub async fn record_donation(payload: web::Json<RecordDonationRequest>) -> Result<HttpResponse, AppError> {
    let donation = DonationService::instance().record(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(donation))
}

#[get("")]
pub async fn get_donations() -> Result<HttpResponse, AppError> {
    let donations = DonationService::instance().get_all().await?;
    Ok(HttpResponse::Ok().json(donations))
}

#[get("/donor/{donor_id}")]
pub async fn get_donor_donations(donor_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let donations = DonationService::instance().get_by_donor(&donor_id).await?;
    Ok(HttpResponse::Ok().json(donations))
}
