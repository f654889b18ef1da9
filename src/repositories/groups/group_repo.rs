//! # 그룹 리포지토리
//!
//! 그룹 기능은 다섯 개의 컬렉션에 걸쳐 저장됩니다.
//!
//! | 컬렉션 | 엔티티 |
//! |--------|--------|
//! | `groups` | [`Group`] |
//! | `group_users` | [`GroupUser`] |
//! | `group_boards` | [`GroupBoard`] |
//! | `group_comments` | [`GroupComment`] |
//! | `group_products` | [`GroupProduct`] |
//!
//! 권한 검사는 서비스 계층의 책임이며, 이 리포지토리는 타입별 CRUD와 조회만 제공합니다.

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use singleton_macro::repository;

use crate::db::Database;
use crate::domain::entities::groups::{Group, GroupBoard, GroupComment, GroupProduct, GroupUser};
use crate::errors::errors::AppError;
use crate::repositories::{collect, db_error, inserted_object_id, is_duplicate_key};

const GROUP_USERS: &str = "group_users";
const GROUP_BOARDS: &str = "group_boards";
const GROUP_COMMENTS: &str = "group_comments";
const GROUP_PRODUCTS: &str = "group_products";

#[repository(name = "group", collection = "groups")]
pub struct GroupRepository {
    db: Arc<Database>,
}

async fn insert_into<T>(collection: Collection<T>, entity: &T) -> Result<ObjectId, AppError>
where
    T: Serialize + Send + Sync,
{
    let result = collection
        .insert_one(entity)
        .await
        .map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError(format!("{}: 이미 존재하는 항목입니다", collection.name()))
            } else {
                db_error(e)
            }
        })?;

    inserted_object_id(&result)
}

async fn find_in<T>(collection: Collection<T>, filter: Document) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned + Send + Sync,
{
    collection.find_one(filter).await.map_err(db_error)
}

async fn find_many_in<T>(collection: Collection<T>, filter: Document) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    let cursor = collection
        .find(filter)
        .sort(doc! { "created_at": 1 })
        .await
        .map_err(db_error)?;
    collect(cursor).await
}

async fn replace_in<T>(collection: Collection<T>, id: Option<ObjectId>, entity: &T) -> Result<bool, AppError>
where
    T: Serialize + Send + Sync,
{
    let id = id.ok_or_else(|| AppError::ValidationError("저장되지 않은 항목은 갱신할 수 없습니다".to_string()))?;

    let result = collection
        .replace_one(doc! { "_id": id }, entity)
        .await
        .map_err(db_error)?;

    Ok(result.matched_count > 0)
}

async fn delete_in<T>(collection: Collection<T>, id: &ObjectId) -> Result<bool, AppError>
where
    T: Send + Sync,
{
    let result = collection
        .delete_one(doc! { "_id": id })
        .await
        .map_err(db_error)?;

    Ok(result.deleted_count > 0)
}

impl GroupRepository {
    pub fn with_dependencies(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn groups(&self) -> Collection<Group> {
        self.collection::<Group>()
    }

    fn group_users(&self) -> Collection<GroupUser> {
        self.db.collection(GROUP_USERS)
    }

    fn boards(&self) -> Collection<GroupBoard> {
        self.db.collection(GROUP_BOARDS)
    }

    fn comments(&self) -> Collection<GroupComment> {
        self.db.collection(GROUP_COMMENTS)
    }

    fn group_products(&self) -> Collection<GroupProduct> {
        self.db.collection(GROUP_PRODUCTS)
    }

    // ---- groups ----

    pub async fn insert_group(&self, mut group: Group) -> Result<Group, AppError> {
        group.id = Some(insert_into(self.groups(), &group).await?);
        Ok(group)
    }

    /// 삭제 표시된 그룹도 포함하여 조회합니다.
    pub async fn find_group(&self, id: &ObjectId) -> Result<Option<Group>, AppError> {
        find_in(self.groups(), doc! { "_id": id }).await
    }

    pub async fn update_group(&self, group: &Group) -> Result<bool, AppError> {
        replace_in(self.groups(), group.id, group).await
    }

    /// 관리자가 소유한 활성 그룹 목록
    pub async fn find_groups_by_admin(&self, admin_id: &ObjectId) -> Result<Vec<Group>, AppError> {
        find_many_in(self.groups(), doc! { "admin_id": admin_id, "is_not_deleted": true }).await
    }

    // ---- members ----

    pub async fn insert_member(&self, mut member: GroupUser) -> Result<GroupUser, AppError> {
        member.id = Some(insert_into(self.group_users(), &member).await?);
        Ok(member)
    }

    /// `(group_id, user_id)` 멤버십 조회
    pub async fn find_member(&self, group_id: &ObjectId, user_id: &ObjectId) -> Result<Option<GroupUser>, AppError> {
        find_in(self.group_users(), doc! { "group_id": group_id, "user_id": user_id }).await
    }

    pub async fn find_members(&self, group_id: &ObjectId) -> Result<Vec<GroupUser>, AppError> {
        find_many_in(self.group_users(), doc! { "group_id": group_id }).await
    }

    pub async fn update_member(&self, member: &GroupUser) -> Result<bool, AppError> {
        replace_in(self.group_users(), member.id, member).await
    }

    pub async fn delete_member(&self, id: &ObjectId) -> Result<bool, AppError> {
        delete_in(self.group_users(), id).await
    }

    // ---- boards ----

    pub async fn insert_board(&self, mut board: GroupBoard) -> Result<GroupBoard, AppError> {
        board.id = Some(insert_into(self.boards(), &board).await?);
        Ok(board)
    }

    pub async fn find_board(&self, id: &ObjectId) -> Result<Option<GroupBoard>, AppError> {
        find_in(self.boards(), doc! { "_id": id }).await
    }

    /// 그룹의 활성 게시판 목록
    pub async fn find_boards_by_group(&self, group_id: &ObjectId) -> Result<Vec<GroupBoard>, AppError> {
        find_many_in(self.boards(), doc! { "group_id": group_id, "is_not_deleted": true }).await
    }

    pub async fn update_board(&self, board: &GroupBoard) -> Result<bool, AppError> {
        replace_in(self.boards(), board.id, board).await
    }

    // ---- comments ----

    pub async fn insert_comment(&self, mut comment: GroupComment) -> Result<GroupComment, AppError> {
        comment.id = Some(insert_into(self.comments(), &comment).await?);
        Ok(comment)
    }

    pub async fn find_comment(&self, id: &ObjectId) -> Result<Option<GroupComment>, AppError> {
        find_in(self.comments(), doc! { "_id": id }).await
    }

    pub async fn find_board_comments(&self, board_id: &ObjectId) -> Result<Vec<GroupComment>, AppError> {
        find_many_in(self.comments(), doc! { "group_board_id": board_id }).await
    }

    pub async fn update_comment(&self, comment: &GroupComment) -> Result<bool, AppError> {
        replace_in(self.comments(), comment.id, comment).await
    }

    pub async fn delete_comment(&self, id: &ObjectId) -> Result<bool, AppError> {
        delete_in(self.comments(), id).await
    }

    // ---- board products ----

    pub async fn insert_group_product(&self, mut product: GroupProduct) -> Result<GroupProduct, AppError> {
        product.id = Some(insert_into(self.group_products(), &product).await?);
        Ok(product)
    }

    pub async fn find_group_product(&self, id: &ObjectId) -> Result<Option<GroupProduct>, AppError> {
        find_in(self.group_products(), doc! { "_id": id }).await
    }

    pub async fn find_board_products(&self, board_id: &ObjectId) -> Result<Vec<GroupProduct>, AppError> {
        find_many_in(self.group_products(), doc! { "group_board_id": board_id }).await
    }

    pub async fn update_group_product(&self, product: &GroupProduct) -> Result<bool, AppError> {
        replace_in(self.group_products(), product.id, product).await
    }

    pub async fn delete_group_product(&self, id: &ObjectId) -> Result<bool, AppError> {
        delete_in(self.group_products(), id).await
    }
}

fn plain_index(keys: Document, name: &str) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().name(name.to_string()).build())
        .build()
}

impl GroupRepository {
    /// 멤버십 유일성과 그룹/게시판별 조회 인덱스를 만듭니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        self.groups()
            .create_index(plain_index(doc! { "admin_id": 1 }, "admin_id"))
            .await
            .map_err(db_error)?;

        let membership_index = IndexModel::builder()
            .keys(doc! { "group_id": 1, "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("group_user_unique".to_string())
                .build())
            .build();

        self.group_users()
            .create_index(membership_index)
            .await
            .map_err(db_error)?;

        self.boards()
            .create_index(plain_index(doc! { "group_id": 1 }, "group_id"))
            .await
            .map_err(db_error)?;

        self.comments()
            .create_index(plain_index(doc! { "group_board_id": 1 }, "group_board_id"))
            .await
            .map_err(db_error)?;

        self.group_products()
            .create_index(plain_index(doc! { "group_board_id": 1 }, "group_board_id"))
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

