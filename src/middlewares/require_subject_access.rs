/*!
 * 科目访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，挂在带有 `{subject_id}` 路径参数的作用域上。
 * 校验通过后会把 `Subject` 放入请求扩展，处理程序可以直接取用，无需再次查询。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{RequireJWT, RequireSubjectAccess, SubjectAccess};
 *
 * web::scope("/api/v1/subjects/{subject_id}")
 *     .wrap(RequireSubjectAccess::new(SubjectAccess::Member))
 *     .wrap(RequireJWT)
 *     .route("/materials", web::get().to(list_materials_handler))
 * ```
 *
 * ## 访问级别
 *
 * - `Member`：管理员、学务人员、任课教师、已选课的学生
 * - `Staff`：管理员、学务人员、任课教师
 * - `Manage`：管理员、任课教师
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error};

use crate::{
    models::{
        ErrorCode,
        subjects::entities::Subject,
        users::entities::{User, UserRole},
    },
    storage::Storage,
};

use super::create_error_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectAccess {
    Member,
    Staff,
    Manage,
}

#[derive(Clone)]
pub struct RequireSubjectAccess {
    access: SubjectAccess,
}

impl RequireSubjectAccess {
    pub fn new(access: SubjectAccess) -> Self {
        Self { access }
    }

    /// 从请求扩展中提取已校验的科目
    pub fn extract_subject(req: &actix_web::HttpRequest) -> Option<Subject> {
        req.extensions().get::<Subject>().cloned()
    }
}

/// 不依赖数据库的部分权限判断，`enrolled` 只在需要时才查询
pub(crate) fn role_grants_access(
    access: SubjectAccess,
    user: &User,
    subject: &Subject,
) -> Option<bool> {
    if user.role == UserRole::Admin || subject.teacher_id == user.id {
        return Some(true);
    }
    match access {
        SubjectAccess::Manage => Some(false),
        SubjectAccess::Staff => Some(user.role == UserRole::Preceptor),
        SubjectAccess::Member => {
            if user.role == UserRole::Preceptor {
                Some(true)
            } else if user.role.is_student() {
                // 需要查询选课记录
                None
            } else {
                Some(false)
            }
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSubjectAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSubjectAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSubjectAccessMiddleware {
            service: Rc::new(service),
            access: self.access,
        }))
    }
}

pub struct RequireSubjectAccessMiddleware<S> {
    service: Rc<S>,
    access: SubjectAccess,
}

impl<S, B> Service<ServiceRequest> for RequireSubjectAccessMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let access = self.access;

        Box::pin(async move {
            // 1. 校验用户信息
            let user_opt = req.extensions().get::<User>().cloned();
            let user = match user_opt {
                Some(user) => user,
                None => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Unauthorized: missing user claims",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 2. 校验 subject_id
            let subject_id = match req
                .match_info()
                .get("subject_id")
                .and_then(|s| s.parse::<i64>().ok())
            {
                Some(id) if id > 0 => id,
                _ => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::BAD_REQUEST,
                            ErrorCode::BadRequest,
                            "Missing or invalid subject_id",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            let storage = req
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone();

            // 3. 查询科目
            let subject = match storage.get_subject_by_id(subject_id).await {
                Ok(Some(subject)) => subject,
                Ok(None) => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::SubjectNotFound,
                            "Subject not found",
                        )
                        .map_into_right_body(),
                    ));
                }
                Err(e) => {
                    error!("Failed to load subject {}: {}", subject_id, e);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            &format!("Failed to load subject: {e}"),
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 4. 判断权限，学生需要查询选课关系
            let allowed = match role_grants_access(access, &user, &subject) {
                Some(allowed) => allowed,
                None => storage
                    .is_student_enrolled(subject.id, user.id)
                    .await
                    .unwrap_or(false),
            };

            if allowed {
                debug!("User {} granted {:?} access to subject {}", user.id, access, subject.id);
                req.extensions_mut().insert(subject);
                let res = srv.call(req).await?.map_into_left_body();
                Ok(res)
            } else {
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::SubjectPermissionDenied,
                        "No permission for this subject",
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@school.test"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            course: None,
            avatar_url: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn subject(teacher_id: i64) -> Subject {
        Subject {
            id: 1,
            name: "Matemática".into(),
            course: "5A".into(),
            teacher_id,
            description: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_owner_and_admin_always_pass() {
        let subject = subject(7);
        for access in [SubjectAccess::Member, SubjectAccess::Staff, SubjectAccess::Manage] {
            assert_eq!(
                role_grants_access(access, &user(7, UserRole::Teacher), &subject),
                Some(true)
            );
            assert_eq!(
                role_grants_access(access, &user(1, UserRole::Admin), &subject),
                Some(true)
            );
        }
    }

    #[test]
    fn test_other_roles() {
        let subject = subject(7);
        let other_teacher = user(8, UserRole::Teacher);
        let preceptor = user(9, UserRole::Preceptor);
        let student = user(10, UserRole::Student);

        assert_eq!(role_grants_access(SubjectAccess::Member, &other_teacher, &subject), Some(false));
        assert_eq!(role_grants_access(SubjectAccess::Member, &preceptor, &subject), Some(true));
        assert_eq!(role_grants_access(SubjectAccess::Staff, &preceptor, &subject), Some(true));
        assert_eq!(role_grants_access(SubjectAccess::Manage, &preceptor, &subject), Some(false));
        assert_eq!(role_grants_access(SubjectAccess::Member, &student, &subject), None);
        assert_eq!(role_grants_access(SubjectAccess::Staff, &student, &subject), Some(false));
    }
}
