use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::UserService;
use crate::errors::Result;
use crate::models::subjects::{entities::Subject, requests::SubjectListQuery};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::responses::UserDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};
use crate::storage::Storage;

/// 教师返回所授科目，学生（含学生代表）返回选修科目，其余角色为空
async fn related_subjects(storage: &Arc<dyn Storage>, user: &User) -> Result<Vec<Subject>> {
    let query = match user.role {
        UserRole::Teacher => SubjectListQuery {
            teacher_id: Some(user.id),
            ..Default::default()
        },
        UserRole::Student | UserRole::StudentRep => SubjectListQuery {
            student_id: Some(user.id),
            ..Default::default()
        },
        _ => return Ok(Vec::new()),
    };
    storage.list_all_subjects(query).await
}

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    };

    match related_subjects(&storage, &user).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserDetailResponse { user, subjects },
            "User loaded successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to load subjects of user", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::{
        create_subject, create_user, memory_storage,
    };

    #[tokio::test]
    async fn test_related_subjects_by_role() {
        let db = memory_storage().await;
        let teacher = create_user(&db, "perez", UserRole::Teacher, None).await;
        let student = create_user(&db, "sofia_r", UserRole::Student, Some("5A")).await;
        let preceptor = create_user(&db, "preceptor1", UserRole::Preceptor, None).await;
        let math = create_subject(&db, teacher.id, "Matemática", "5A").await;
        create_subject(&db, teacher.id, "Física", "5B").await;
        let storage: Arc<dyn Storage> = Arc::new(db);
        storage
            .enroll_students(math.id, &[student.id])
            .await
            .unwrap();

        let taught = related_subjects(&storage, &teacher).await.unwrap();
        assert_eq!(taught.len(), 2);

        let enrolled = related_subjects(&storage, &student).await.unwrap();
        assert_eq!(enrolled.len(), 1);
        assert_eq!(enrolled[0].id, math.id);

        assert!(related_subjects(&storage, &preceptor).await.unwrap().is_empty());
    }
}
