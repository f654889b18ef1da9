mod common;

use common::TestStores;
use waste_products::domain::dto::groups::request::{
    BoardRequest, CreateCommentRequest, CreateGroupProductRequest, GroupRequest, UpdateCommentRequest,
    UpdateGroupProductRequest,
};
use waste_products::domain::dto::products::request::AddProductRequest;
use waste_products::errors::errors::AppError;
use waste_products::services::groups::{
    GroupBoardService, GroupCommentService, GroupProductService, GroupService, GroupUserService,
};
use waste_products::services::products::ProductService;

#[actix_web::test]
async fn test_group_membership_and_board_flow() {
    let Some(stores) = TestStores::connect().await else { return };
    let users = stores.user_service().await;
    let group_repo = stores.group_repo().await;

    let groups = GroupService::with_dependencies(group_repo.clone());
    let members = GroupUserService::with_dependencies(group_repo.clone(), stores.user_repo().await);
    let boards = GroupBoardService::with_dependencies(group_repo.clone());
    let comments = GroupCommentService::with_dependencies(group_repo.clone());
    let group_products = GroupProductService::with_dependencies(group_repo.clone(), stores.product_repo().await);
    let products = ProductService::with_dependencies(stores.product_repo().await, stores.category_repo().await);

    let anna = common::register(&users, "anna_k").await;
    let boris = common::register(&users, "boris_m").await;

    let group = groups
        .create(&anna.id, GroupRequest { name: "Zero waste Minsk".to_string(), information: String::new() })
        .await
        .unwrap();
    assert_eq!(group.admin_id, anna.id);

    // 초대 전에는 게시판을 만들 수 없음
    let board_request = || BoardRequest { name: "Dairy".to_string(), information: String::new() };
    assert!(boards.create(&boris.id, &group.id, board_request()).await.is_err());

    let invited = members.invite(&anna.id, &group.id, &boris.id).await.unwrap();
    assert!(!invited.is_confirmed);
    assert!(matches!(
        members.invite(&anna.id, &group.id, &boris.id).await,
        Err(AppError::ConflictError(_))
    ));
    assert!(members.invite(&boris.id, &group.id, &anna.id).await.is_err());

    let accepted = members.accept_invitation(&boris.id, &group.id).await.unwrap();
    assert!(accepted.is_confirmed);

    // 확인된 멤버라도 권한 없이는 게시판 생성 불가
    assert!(boards.create(&boris.id, &group.id, board_request()).await.is_err());
    members.set_board_rights(&anna.id, &group.id, &boris.id, true).await.unwrap();
    let board = boards.create(&boris.id, &group.id, board_request()).await.unwrap();
    assert_eq!(board.creator_id, boris.id);

    let comment = comments
        .create(&anna.id, &group.id, CreateCommentRequest { board_id: board.id.clone(), comment: "Glass only".to_string() })
        .await
        .unwrap();
    assert_eq!(comments.find_board_comments(&group.id, &board.id).await.unwrap().len(), 1);
    assert!(comments.delete(&boris.id, &group.id, &comment.id).await.is_err());
    comments.delete(&anna.id, &group.id, &comment.id).await.unwrap();

    let milk = products
        .add_by_name(AddProductRequest { name: "Milk".to_string(), description: None, price: None })
        .await
        .unwrap()
        .unwrap();
    group_products
        .create(&boris.id, &group.id, CreateGroupProductRequest {
            board_id: board.id.clone(),
            product_id: milk.id.clone(),
            information: "Returnable bottle".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(group_products.find_board_products(&group.id, &board.id).await.unwrap().len(), 1);

    assert!(matches!(members.leave(&anna.id, &group.id).await, Err(AppError::ValidationError(_))));
    members.leave(&boris.id, &group.id).await.unwrap();
    assert_eq!(members.get_members(&group.id).await.unwrap().len(), 1);

    // 소프트 삭제된 그룹은 조회되지 않음
    assert!(groups.delete(&boris.id, &group.id).await.is_err());
    groups.delete(&anna.id, &group.id).await.unwrap();
    assert!(groups.find_by_id(&group.id).await.unwrap().is_none());
    assert!(groups.find_by_admin(&anna.id).await.unwrap().is_empty());

    stores.cleanup().await;
}

#[actix_web::test]
async fn test_board_and_comment_changes_are_limited_to_their_authors() {
    let Some(stores) = TestStores::connect().await else { return };
    let users = stores.user_service().await;
    let group_repo = stores.group_repo().await;

    let groups = GroupService::with_dependencies(group_repo.clone());
    let members = GroupUserService::with_dependencies(group_repo.clone(), stores.user_repo().await);
    let boards = GroupBoardService::with_dependencies(group_repo.clone());
    let comments = GroupCommentService::with_dependencies(group_repo.clone());

    let anna = common::register(&users, "anna_k").await;
    let boris = common::register(&users, "boris_m").await;

    let group = groups
        .create(&anna.id, GroupRequest { name: "Refill stations".to_string(), information: String::new() })
        .await
        .unwrap();
    members.invite(&anna.id, &group.id, &boris.id).await.unwrap();
    members.accept_invitation(&boris.id, &group.id).await.unwrap();
    members.set_board_rights(&anna.id, &group.id, &boris.id, true).await.unwrap();

    let board = boards
        .create(&boris.id, &group.id, BoardRequest { name: "Shampoo".to_string(), information: String::new() })
        .await
        .unwrap();

    // 관리자라도 다른 사람의 게시판은 수정할 수 없음
    let rename = || BoardRequest { name: "Soap".to_string(), information: "bars only".to_string() };
    assert!(matches!(
        boards.update(&anna.id, &group.id, &board.id, rename()).await,
        Err(AppError::AuthorizationError(_))
    ));
    let renamed = boards.update(&boris.id, &group.id, &board.id, rename()).await.unwrap();
    assert_eq!(renamed.name, "Soap");
    assert!(renamed.modified_at.is_some());

    let comment = comments
        .create(&boris.id, &group.id, CreateCommentRequest { board_id: board.id.clone(), comment: "Bring a jar".to_string() })
        .await
        .unwrap();
    let edit = |text: &str| UpdateCommentRequest { comment_id: comment.id.clone(), comment: text.to_string() };
    assert!(matches!(
        comments.update(&anna.id, &group.id, edit("Any bottle")).await,
        Err(AppError::AuthorizationError(_))
    ));
    let edited = comments.update(&boris.id, &group.id, edit("Bring a glass jar")).await.unwrap();
    assert_eq!(edited.comment, "Bring a glass jar");

    // 관리자는 다른 사람의 게시판을 소프트 삭제할 수 있음
    boards.delete(&anna.id, &group.id, &board.id).await.unwrap();
    assert!(boards.find_by_id(&group.id, &board.id).await.unwrap().is_none());
    assert!(boards.find_by_group(&group.id).await.unwrap().is_empty());
    assert!(boards.update(&boris.id, &group.id, &board.id, rename()).await.is_err());

    stores.cleanup().await;
}

#[actix_web::test]
async fn test_group_product_changes_require_board_and_rights() {
    let Some(stores) = TestStores::connect().await else { return };
    let users = stores.user_service().await;
    let group_repo = stores.group_repo().await;

    let groups = GroupService::with_dependencies(group_repo.clone());
    let members = GroupUserService::with_dependencies(group_repo.clone(), stores.user_repo().await);
    let boards = GroupBoardService::with_dependencies(group_repo.clone());
    let group_products = GroupProductService::with_dependencies(group_repo.clone(), stores.product_repo().await);
    let products = ProductService::with_dependencies(stores.product_repo().await, stores.category_repo().await);

    let anna = common::register(&users, "anna_k").await;
    let boris = common::register(&users, "boris_m").await;

    let group = groups
        .create(&anna.id, GroupRequest { name: "Bulk buying".to_string(), information: String::new() })
        .await
        .unwrap();
    let board_request = |name: &str| BoardRequest { name: name.to_string(), information: String::new() };
    let grains = boards.create(&anna.id, &group.id, board_request("Grains")).await.unwrap();
    let oils = boards.create(&anna.id, &group.id, board_request("Oils")).await.unwrap();

    let rice = products
        .add_by_name(AddProductRequest { name: "Rice".to_string(), description: None, price: None })
        .await
        .unwrap()
        .unwrap();
    let listed = group_products
        .create(&anna.id, &group.id, CreateGroupProductRequest {
            board_id: grains.id.clone(),
            product_id: rice.id.clone(),
            information: "5kg paper bag".to_string(),
        })
        .await
        .unwrap();

    let update = |board_id: &str, information: &str| UpdateGroupProductRequest {
        board_id: board_id.to_string(),
        group_product_id: listed.id.clone(),
        information: information.to_string(),
    };

    // 다른 게시판을 통해서는 찾을 수 없음
    assert!(matches!(
        group_products.update(&anna.id, &group.id, update(&oils.id, "moved")).await,
        Err(AppError::NotFound(_))
    ));

    // 확인된 멤버라도 게시판 권한이 없으면 거부
    members.invite(&anna.id, &group.id, &boris.id).await.unwrap();
    members.accept_invitation(&boris.id, &group.id).await.unwrap();
    assert!(matches!(
        group_products.update(&boris.id, &group.id, update(&grains.id, "10kg")).await,
        Err(AppError::AuthorizationError(_))
    ));
    assert!(group_products.delete(&boris.id, &group.id, &listed.id).await.is_err());

    members.set_board_rights(&anna.id, &group.id, &boris.id, true).await.unwrap();
    let updated = group_products.update(&boris.id, &group.id, update(&grains.id, "10kg sack")).await.unwrap();
    assert_eq!(updated.information, "10kg sack");
    assert!(updated.modified_at.is_some());

    group_products.delete(&boris.id, &group.id, &listed.id).await.unwrap();
    assert!(group_products.find_by_id(&group.id, &listed.id).await.unwrap().is_none());
    assert!(group_products.find_board_products(&group.id, &grains.id).await.unwrap().is_empty());

    stores.cleanup().await;
}

#[actix_web::test]
async fn test_invitation_dismissal_member_removal_and_revoked_rights() {
    let Some(stores) = TestStores::connect().await else { return };
    let users = stores.user_service().await;
    let group_repo = stores.group_repo().await;

    let groups = GroupService::with_dependencies(group_repo.clone());
    let members = GroupUserService::with_dependencies(group_repo.clone(), stores.user_repo().await);
    let boards = GroupBoardService::with_dependencies(group_repo.clone());

    let anna = common::register(&users, "anna_k").await;
    let boris = common::register(&users, "boris_m").await;
    let vera = common::register(&users, "vera_s").await;

    let group = groups
        .create(&anna.id, GroupRequest { name: "Repair cafe".to_string(), information: String::new() })
        .await
        .unwrap();

    // 거절한 초대는 사라지고 다시 수락할 수 없음
    members.invite(&anna.id, &group.id, &vera.id).await.unwrap();
    members.dismiss_invitation(&vera.id, &group.id).await.unwrap();
    assert!(matches!(members.accept_invitation(&vera.id, &group.id).await, Err(AppError::NotFound(_))));
    assert!(matches!(members.dismiss_invitation(&vera.id, &group.id).await, Err(AppError::NotFound(_))));

    // 수락한 멤버십은 초대가 아니므로 거절할 수 없음
    members.invite(&anna.id, &group.id, &boris.id).await.unwrap();
    members.accept_invitation(&boris.id, &group.id).await.unwrap();
    assert!(matches!(members.dismiss_invitation(&boris.id, &group.id).await, Err(AppError::NotFound(_))));

    let board_request = || BoardRequest { name: "Bikes".to_string(), information: String::new() };
    members.set_board_rights(&anna.id, &group.id, &boris.id, true).await.unwrap();
    boards.create(&boris.id, &group.id, board_request()).await.unwrap();

    let revoked = members.set_board_rights(&anna.id, &group.id, &boris.id, false).await.unwrap();
    assert!(!revoked.right_to_create_boards);
    assert!(matches!(
        boards.create(&boris.id, &group.id, board_request()).await,
        Err(AppError::AuthorizationError(_))
    ));
    assert!(members.set_board_rights(&boris.id, &group.id, &boris.id, true).await.is_err());

    assert!(members.remove_member(&boris.id, &group.id, &anna.id).await.is_err());
    assert!(matches!(
        members.remove_member(&anna.id, &group.id, &anna.id).await,
        Err(AppError::ValidationError(_))
    ));
    members.remove_member(&anna.id, &group.id, &boris.id).await.unwrap();
    let remaining = members.get_members(&group.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, anna.id);
    assert!(boards.create(&boris.id, &group.id, board_request()).await.is_err());

    stores.cleanup().await;
}
