//! # 기부 리포지토리
//!
//! 기부 기록을 저장하면서 기부자와 주소를 병합합니다.
//!
//! ## 병합 규칙
//!
//! 1. 처음 보는 기부자는 모든 필드가 같은 기존 주소를 재사용하거나 새 주소를 만든 뒤 삽입합니다.
//! 2. 저장된 기부자와 프로필, 주소가 모두 같으면 그대로 사용합니다.
//! 3. 프로필만 바뀌었으면 저장된 주소 id를 유지합니다.
//! 4. 주소까지 바뀌었으면 일치하는 주소를 찾거나 새로 만들고, 이전 주소를 쓰는
//!    기부자가 더 이상 없으면 이전 주소를 삭제합니다.
//! 5. 바뀐 기부자는 `created_at`을 유지하고 `modified_at`을 기록합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use singleton_macro::repository;

use crate::db::Database;
use crate::domain::entities::donations::{plan_donor_update, Address, Donation, Donor, DonorUpdate};
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key};

const DONORS: &str = "donors";
const ADDRESSES: &str = "addresses";

#[repository(name = "donation", collection = "donations")]
pub struct DonationRepository {
    db: Arc<Database>,
}

impl DonationRepository {
    pub fn with_dependencies(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn donations(&self) -> Collection<Donation> {
        self.collection::<Donation>()
    }

    fn donors(&self) -> Collection<Donor> {
        self.db.collection(DONORS)
    }

    fn addresses(&self) -> Collection<Address> {
        self.db.collection(ADDRESSES)
    }

    fn duplicate_transaction(transaction_id: &str) -> AppError {
        AppError::ConflictError(format!("이미 기록된 거래입니다: {}", transaction_id))
    }

    /// 기부를 기록합니다.
    ///
    /// 기부자와 주소를 병합한 뒤 기부 문서를 삽입하고, 저장된 기부를 반환합니다.
    /// 같은 `transaction_id`가 이미 있으면 ConflictError입니다.
    pub async fn add(&self, mut donation: Donation, donor: Donor, address: Address) -> Result<Donation, AppError> {
        if self.find_by_transaction(&donation.transaction_id).await?.is_some() {
            return Err(Self::duplicate_transaction(&donation.transaction_id));
        }

        let donor = self.merge_donor(donor, address).await?;
        donation.donor_id = donor.id.clone();

        let result = self.donations()
            .insert_one(&donation)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    Self::duplicate_transaction(&donation.transaction_id)
                } else {
                    db_error(e)
                }
            })?;

        donation.id = Some(inserted_object_id(&result)?);
        log::info!("💝 Donation recorded: {} from {}", donation.transaction_id, donation.donor_id);
        Ok(donation)
    }

    pub async fn find_all(&self) -> Result<Vec<Donation>, AppError> {
        let cursor = self.donations()
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    pub async fn find_by_donor(&self, donor_id: &str) -> Result<Vec<Donation>, AppError> {
        let cursor = self.donations()
            .find(doc! { "donor_id": donor_id })
            .sort(doc! { "date": -1 })
            .await
            .map_err(db_error)?;
        collect(cursor).await
    }

    pub async fn find_by_transaction(&self, transaction_id: &str) -> Result<Option<Donation>, AppError> {
        self.donations()
            .find_one(doc! { "transaction_id": transaction_id })
            .await
            .map_err(db_error)
    }

    pub async fn find_donor(&self, donor_id: &str) -> Result<Option<Donor>, AppError> {
        self.donors()
            .find_one(doc! { "_id": donor_id })
            .await
            .map_err(db_error)
    }

    pub async fn find_address(&self, id: &ObjectId) -> Result<Option<Address>, AppError> {
        self.addresses()
            .find_one(doc! { "_id": id })
            .await
            .map_err(db_error)
    }

    /// 병합 규칙에 따라 기부자를 저장하고, 저장된 기부자를 반환합니다.
    async fn merge_donor(&self, mut incoming: Donor, incoming_address: Address) -> Result<Donor, AppError> {
        let stored = self.find_donor(&incoming.id).await?;
        let stored_address = match stored.as_ref().and_then(|d| d.address_id) {
            Some(address_id) => self.find_address(&address_id).await?,
            None => None,
        };

        let plan = match (&stored, &stored_address) {
            (Some(donor), Some(address)) => plan_donor_update(Some((donor, address)), &incoming, &incoming_address),
            (Some(_), None) => DonorUpdate::Changed { keep_address: false },
            (None, _) => plan_donor_update(None, &incoming, &incoming_address),
        };

        match (plan, stored) {
            (DonorUpdate::Unchanged, Some(stored)) => Ok(stored),
            (DonorUpdate::Changed { keep_address }, Some(stored)) => {
                let previous_address_id = stored.address_id;

                incoming.address_id = if keep_address {
                    previous_address_id
                } else {
                    Some(self.resolve_address(&incoming_address).await?)
                };
                incoming.created_at = stored.created_at;
                incoming.modified_at = Some(DateTime::now());

                self.donors()
                    .replace_one(doc! { "_id": &incoming.id }, &incoming)
                    .await
                    .map_err(db_error)?;

                if let Some(old_id) = previous_address_id {
                    if incoming.address_id != Some(old_id) {
                        self.delete_address_if_orphaned(&old_id).await?;
                    }
                }

                Ok(incoming)
            }
            _ => {
                incoming.address_id = Some(self.resolve_address(&incoming_address).await?);
                incoming.created_at = DateTime::now();
                incoming.modified_at = None;

                self.donors()
                    .insert_one(&incoming)
                    .await
                    .map_err(db_error)?;

                Ok(incoming)
            }
        }
    }

    /// 모든 필드가 같은 주소가 있으면 그 id를, 없으면 새 주소를 삽입하고 그 id를 반환합니다.
    async fn resolve_address(&self, address: &Address) -> Result<ObjectId, AppError> {
        let filter = doc! {
            "name": &address.name,
            "street": &address.street,
            "city": &address.city,
            "state": &address.state,
            "zip": &address.zip,
            "country": &address.country,
            "is_confirmed": address.is_confirmed,
        };

        if let Some(existing) = self.addresses().find_one(filter).await.map_err(db_error)? {
            if let Some(id) = existing.id {
                return Ok(id);
            }
        }

        let mut address = address.clone();
        address.id = None;
        let result = self.addresses()
            .insert_one(&address)
            .await
            .map_err(db_error)?;

        inserted_object_id(&result)
    }

    async fn delete_address_if_orphaned(&self, address_id: &ObjectId) -> Result<(), AppError> {
        let users = self.donors()
            .count_documents(doc! { "address_id": address_id })
            .await
            .map_err(db_error)?;

        if users == 0 {
            self.addresses()
                .delete_one(doc! { "_id": address_id })
                .await
                .map_err(db_error)?;
            log::debug!("Deleted orphaned address {}", address_id);
        }

        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let transaction_index = IndexModel::builder()
            .keys(doc! { "transaction_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("transaction_id_unique".to_string())
                .build())
            .build();

        let donor_index = IndexModel::builder()
            .keys(doc! { "donor_id": 1 })
            .options(IndexOptions::builder()
                .name("donor_id".to_string())
                .build())
            .build();

        self.donations()
            .create_indexes([transaction_index, donor_index])
            .await
            .map_err(db_error)?;

        let address_index = IndexModel::builder()
            .keys(doc! { "address_id": 1 })
            .options(IndexOptions::builder()
                .name("address_id".to_string())
                .build())
            .build();

        self.donors()
            .create_index(address_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

