//! # Group HTTP Handlers
//!
//! 그룹, 멤버십, 게시판, 댓글, 게시판 상품을 다룹니다. 스코프 전체가 인증을
//! 요구하며, 행위자는 항상 토큰의 사용자입니다. 권한 판단(관리자 여부, 멤버 확인,
//! 게시판 생성 권한, 작성자 여부)은 그룹 서비스들이 합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/groups` | 그룹 생성 (생성자가 관리자) |
//! | `GET` | `/api/groups/mine` | 내가 관리하는 그룹 |
//! | `GET, PUT, DELETE` | `/api/groups/{group_id}` | 조회, 변경, 삭제 (관리자) |
//! | `GET` | `/api/groups/{group_id}/users` | 멤버 목록 |
//! | `POST` | `/api/groups/{group_id}/invite/{user_id}` | 초대 (관리자) |
//! | `PUT, DELETE` | `/api/groups/{group_id}/invite` | 초대 수락, 거절 |
//! | `DELETE` | `/api/groups/{group_id}/leave` | 탈퇴 |
//! | `DELETE` | `/api/groups/{group_id}/users/{user_id}` | 멤버 제거 (관리자) |
//! | `PUT` | `/api/groups/{group_id}/users/{user_id}/board-rights` | 게시판 생성 권한 (관리자) |
//! | `POST` | `/api/groups/{group_id}/board` | 게시판 생성 |
//! | `GET` | `/api/groups/{group_id}/boards` | 게시판 목록 |
//! | `GET, PUT, DELETE` | `/api/groups/{group_id}/board/{board_id}` | 게시판 조회, 변경, 삭제 |
//! | `POST, PUT` | `/api/groups/{group_id}/comment` | 댓글 작성, 수정 |
//! | `GET, DELETE` | `/api/groups/{group_id}/comment/{comment_id}` | 댓글 조회, 삭제 |
//! | `GET` | `/api/groups/{group_id}/board/{board_id}/comments` | 게시판 댓글 |
//! | `POST, PUT` | `/api/groups/{group_id}/product` | 게시판 상품 추가, 수정 |
//! | `GET, DELETE` | `/api/groups/{group_id}/product/{product_id}` | 게시판 상품 조회, 삭제 |
//! | `GET` | `/api/groups/{group_id}/board/{board_id}/products` | 게시판 상품 목록 |

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::dto::groups::request::{
    BoardRequest, BoardRightsRequest, CreateCommentRequest, CreateGroupProductRequest, GroupRequest,
    UpdateCommentRequest, UpdateGroupProductRequest,
};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::groups::{
    GroupBoardService, GroupCommentService, GroupProductService, GroupService, GroupUserService,
};

fn not_found(what: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{}을(를) 찾을 수 없습니다: {}", what, id))
}

// ---- 그룹 ----

#[post("")]
pub async fn create_group(
    user: AuthenticatedUser,
    payload: web::Json<GroupRequest>,
) -> Result<HttpResponse, AppError> {
    let group = GroupService::instance().create(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(group))
}

#[get("/mine")]
pub async fn get_my_groups(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let groups = GroupService::instance().find_by_admin(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(groups))
}

#[get("/{group_id}")]
pub async fn get_group(group_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let group = GroupService::instance()
        .find_by_id(&group_id)
        .await?
        .ok_or_else(|| not_found("그룹", &group_id))?;
    Ok(HttpResponse::Ok().json(group))
}

#[put("/{group_id}")]
pub async fn update_group(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<GroupRequest>,
) -> Result<HttpResponse, AppError> {
    let group = GroupService::instance()
        .update(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(group))
}

/// 그룹 삭제 (소프트 삭제)
#[delete("/{group_id}")]
pub async fn delete_group(user: AuthenticatedUser, group_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    GroupService::instance().delete(&user.user_id, &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- 멤버 ----

#[get("/{group_id}/users")]
pub async fn get_members(group_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let members = GroupUserService::instance().get_members(&group_id).await?;
    Ok(HttpResponse::Ok().json(members))
}

/// 사용자 초대. 초대된 사용자는 수락 전까지 미확인 멤버입니다.
#[post("/{group_id}/invite/{user_id}")]
pub async fn invite_user(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (group_id, invitee_id) = path.into_inner();

    let member = GroupUserService::instance()
        .invite(&user.user_id, &group_id, &invitee_id)
        .await?;
    Ok(HttpResponse::Created().json(member))
}

#[put("/{group_id}/invite")]
pub async fn accept_invitation(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let member = GroupUserService::instance()
        .accept_invitation(&user.user_id, &group_id)
        .await?;
    Ok(HttpResponse::Ok().json(member))
}

#[delete("/{group_id}/invite")]
pub async fn dismiss_invitation(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    GroupUserService::instance().dismiss_invitation(&user.user_id, &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{group_id}/leave")]
pub async fn leave_group(user: AuthenticatedUser, group_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    GroupUserService::instance().leave(&user.user_id, &group_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{group_id}/users/{user_id}")]
pub async fn remove_member(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (group_id, member_id) = path.into_inner();

    GroupUserService::instance()
        .remove_member(&user.user_id, &group_id, &member_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 게시판 생성 권한 부여/회수
///
/// ```json
/// { "granted": true }
/// ```
#[put("/{group_id}/users/{user_id}/board-rights")]
pub async fn set_board_rights(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<BoardRightsRequest>,
) -> Result<HttpResponse, AppError> {
    let (group_id, member_id) = path.into_inner();

    let member = GroupUserService::instance()
        .set_board_rights(&user.user_id, &group_id, &member_id, payload.granted)
        .await?;
    Ok(HttpResponse::Ok().json(member))
}

// ---- 게시판 ----

#[post("/{group_id}/board")]
pub async fn create_board(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<BoardRequest>,
) -> Result<HttpResponse, AppError> {
    let board = GroupBoardService::instance()
        .create(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(board))
}

#[get("/{group_id}/boards")]
pub async fn get_boards(group_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let boards = GroupBoardService::instance().find_by_group(&group_id).await?;
    Ok(HttpResponse::Ok().json(boards))
}

#[get("/{group_id}/board/{board_id}")]
pub async fn get_board(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (group_id, board_id) = path.into_inner();

    let board = GroupBoardService::instance()
        .find_by_id(&group_id, &board_id)
        .await?
        .ok_or_else(|| not_found("게시판", &board_id))?;
    Ok(HttpResponse::Ok().json(board))
}

#[put("/{group_id}/board/{board_id}")]
pub async fn update_board(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<BoardRequest>,
) -> Result<HttpResponse, AppError> {
    let (group_id, board_id) = path.into_inner();

    let board = GroupBoardService::instance()
        .update(&user.user_id, &group_id, &board_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(board))
}

#[delete("/{group_id}/board/{board_id}")]
pub async fn delete_board(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (group_id, board_id) = path.into_inner();

    GroupBoardService::instance().delete(&user.user_id, &group_id, &board_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- 댓글 ----

#[post("/{group_id}/comment")]
pub async fn create_comment(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = GroupCommentService::instance()
        .create(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

#[put("/{group_id}/comment")]
pub async fn update_comment(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment = GroupCommentService::instance()
        .update(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[get("/{group_id}/comment/{comment_id}")]
pub async fn get_comment(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (group_id, comment_id) = path.into_inner();

    let comment = GroupCommentService::instance()
        .find_by_id(&group_id, &comment_id)
        .await?
        .ok_or_else(|| not_found("댓글", &comment_id))?;
    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/{group_id}/comment/{comment_id}")]
pub async fn delete_comment(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (group_id, comment_id) = path.into_inner();

    GroupCommentService::instance()
        .delete(&user.user_id, &group_id, &comment_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{group_id}/board/{board_id}/comments")]
pub async fn get_board_comments(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (group_id, board_id) = path.into_inner();

    let comments = GroupCommentService::instance()
        .find_board_comments(&group_id, &board_id)
        .await?;
    Ok(HttpResponse::Ok().json(comments))
}

// ---- 게시판 상품 ----

#[post("/{group_id}/product")]
pub async fn create_group_product(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<CreateGroupProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = GroupProductService::instance()
        .create(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/{group_id}/product")]
pub async fn update_group_product(
    user: AuthenticatedUser,
    group_id: web::Path<String>,
    payload: web::Json<UpdateGroupProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = GroupProductService::instance()
        .update(&user.user_id, &group_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[get("/{group_id}/product/{product_id}")]
pub async fn get_group_product(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (group_id, product_id) = path.into_inner();

    let product = GroupProductService::instance()
        .find_by_id(&group_id, &product_id)
        .await?
        .ok_or_else(|| not_found("게시판 상품", &product_id))?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{group_id}/product/{product_id}")]
pub async fn delete_group_product(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (group_id, product_id) = path.into_inner();

    GroupProductService::instance()
        .delete(&user.user_id, &group_id, &product_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/{group_id}/board/{board_id}/products")]
pub async fn get_board_products(path: web::Path<(String, String)>) -> Result<HttpResponse, AppError> {
    let (group_id, board_id) = path.into_inner();

    let products = GroupProductService::instance()
        .find_board_products(&group_id, &board_id)
        .await?;
    Ok(HttpResponse::Ok().json(products))
}
