use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, current_user, internal_error, not_found};

/// 删除账号，选课、成绩、出勤等记录随外键级联删除
pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    if admin.id == user_id {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Administrators cannot delete their own account",
        ));
    }

    let storage = service.get_storage(request);
    match storage.delete_user(user_id).await {
        Ok(true) => {
            tracing::info!("User {} deleted by admin {}", user_id, admin.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(internal_error("Failed to delete user", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{create_user, memory_storage};
    use actix_web::{HttpMessage, http::StatusCode, test, web};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_admin_cannot_delete_self_but_can_delete_others() {
        let db = memory_storage().await;
        let admin = create_user(&db, "director", UserRole::Admin, None).await;
        let student = create_user(&db, "lucia_m", UserRole::Student, Some("3B")).await;
        let storage: Arc<dyn Storage> = Arc::new(db);
        let service = UserService::new_lazy();

        let request = test::TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        request.extensions_mut().insert(admin.clone());

        let res = delete_user(&service, admin.id, &request).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = delete_user(&service, student.id, &request).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(storage.get_user_by_id(student.id).await.unwrap().is_none());

        let res = delete_user(&service, student.id, &request).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
