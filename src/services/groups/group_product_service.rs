//! 그룹 게시판 상품 서비스
//!
//! 게시판에 카탈로그 상품을 올리고 설명을 붙입니다. 모든 쓰기는 다음을 확인합니다.
//!
//! 1. 게시판이 존재하고, 삭제되지 않았고, 해당 그룹에 속함
//! 2. 사용자가 게시판 생성 권한을 가진 확정 멤버
//! 3. (생성 시) 참조하는 카탈로그 상품이 존재

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use validator::Validate;
use singleton_macro::service;

use crate::domain::dto::groups::request::{CreateGroupProductRequest, UpdateGroupProductRequest};
use crate::domain::dto::groups::response::GroupProductResponse;
use crate::domain::entities::groups::{GroupBoard, GroupProduct};
use crate::errors::errors::AppError;
use crate::repositories::groups::GroupRepository;
use crate::repositories::parse_object_id;
use crate::repositories::products::ProductRepository;
use crate::services::groups::access::{ensure_can_create_boards, ensure_on_board, load_active_group, load_board_in_group};

#[service(name = "group_product")]
pub struct GroupProductService {
    group_repo: Arc<GroupRepository>,
    product_repo: Arc<ProductRepository>,
}

fn group_product_not_found(id: &ObjectId) -> AppError {
    AppError::NotFound(format!("게시판 상품을 찾을 수 없습니다: {}", id))
}

impl GroupProductService {
    pub fn with_dependencies(group_repo: Arc<GroupRepository>, product_repo: Arc<ProductRepository>) -> Self {
        Self { group_repo, product_repo }
    }

    /// 게시판과 멤버 권한을 확인하고 게시판을 반환합니다.
    async fn authorize_board(
        &self,
        user_id: &ObjectId,
        group_id: &ObjectId,
        board_id: &ObjectId,
    ) -> Result<GroupBoard, AppError> {
        load_active_group(&self.group_repo, group_id).await?;
        let board = load_board_in_group(&self.group_repo, board_id, group_id).await?;

        let member = self.group_repo.find_member(group_id, user_id).await?;
        ensure_can_create_boards(member.as_ref())?;

        Ok(board)
    }

    pub async fn create(
        &self,
        user_id: &str,
        group_id: &str,
        request: CreateGroupProductRequest,
    ) -> Result<GroupProductResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(&request.board_id)?;
        let product_id = parse_object_id(&request.product_id)?;

        self.authorize_board(&user_id, &group_id, &board_id).await?;

        if self.product_repo.find_by_id(&request.product_id).await?.is_none() {
            return Err(AppError::NotFound(format!("상품을 찾을 수 없습니다: {}", request.product_id)));
        }

        let product = GroupProduct::new(board_id, product_id, request.information);
        let product = self.group_repo.insert_group_product(product).await?;
        Ok(GroupProductResponse::from(product))
    }

    pub async fn update(
        &self,
        user_id: &str,
        group_id: &str,
        request: UpdateGroupProductRequest,
    ) -> Result<GroupProductResponse, AppError> {
        request.validate()?;
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(&request.board_id)?;
        let group_product_id = parse_object_id(&request.group_product_id)?;

        self.authorize_board(&user_id, &group_id, &board_id).await?;

        let mut product = self.group_repo
            .find_group_product(&group_product_id)
            .await?
            .ok_or_else(|| group_product_not_found(&group_product_id))?;
        ensure_on_board(&product, &board_id)?;

        product.information = request.information;
        product.modified_at = Some(DateTime::now());
        self.group_repo.update_group_product(&product).await?;

        Ok(GroupProductResponse::from(product))
    }

    pub async fn delete(&self, user_id: &str, group_id: &str, group_product_id: &str) -> Result<(), AppError> {
        let user_id = parse_object_id(user_id)?;
        let group_id = parse_object_id(group_id)?;
        let group_product_id = parse_object_id(group_product_id)?;

        let product = self.group_repo
            .find_group_product(&group_product_id)
            .await?
            .ok_or_else(|| group_product_not_found(&group_product_id))?;

        self.authorize_board(&user_id, &group_id, &product.group_board_id).await?;
        self.group_repo.delete_group_product(&group_product_id).await?;
        Ok(())
    }

    /// 그룹의 게시판에 올라온 상품만 반환합니다. 없으면 None.
    pub async fn find_by_id(&self, group_id: &str, group_product_id: &str) -> Result<Option<GroupProductResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let group_product_id = parse_object_id(group_product_id)?;

        let Some(product) = self.group_repo.find_group_product(&group_product_id).await? else {
            return Ok(None);
        };
        let on_group_board = self.group_repo
            .find_board(&product.group_board_id)
            .await?
            .is_some_and(|board| board.is_available(&group_id));

        Ok(on_group_board.then(|| GroupProductResponse::from(product)))
    }

    pub async fn find_board_products(&self, group_id: &str, board_id: &str) -> Result<Vec<GroupProductResponse>, AppError> {
        let group_id = parse_object_id(group_id)?;
        let board_id = parse_object_id(board_id)?;

        load_board_in_group(&self.group_repo, &board_id, &group_id).await?;
        let products = self.group_repo.find_board_products(&board_id).await?;
        Ok(products.into_iter().map(GroupProductResponse::from).collect())
    }
}
