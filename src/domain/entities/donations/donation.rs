use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 기부 기록
///
/// `transaction_id`는 결제 서비스의 거래 id이며 unique 인덱스로 중복 기록을 막습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub transaction_id: String,
    pub donor_id: String,
    pub gross: f64,
    pub fee: f64,
    pub currency: String,
    pub date: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
