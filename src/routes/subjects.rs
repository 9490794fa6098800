use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireSubjectAccess, SubjectAccess};
use crate::models::subjects::requests::{
    CreateSubjectRequest, EnrollStudentsRequest, SubjectQueryParams, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{AttendanceService, GradeService, MaterialService, SubjectService};
use crate::utils::{SafeStudentIdI64, SafeSubjectIdI64};

// 懒加载的全局服务实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// 科目列表（业务层按角色过滤）
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectQueryParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req, query.into_inner()).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.create_subject(&req, body.into_inner()).await
}

pub async fn get_subject(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(&req, path.0).await
}

pub async fn update_subject(
    req: HttpRequest,
    path: SafeSubjectIdI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, path.0).await
}

pub async fn list_students(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_students(&req, path.0).await
}

pub async fn enroll_students(
    req: HttpRequest,
    path: SafeSubjectIdI64,
    body: web::Json<EnrollStudentsRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .enroll_students(&req, path.0, body.into_inner())
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    subject_id: SafeSubjectIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .unenroll_student(&req, subject_id.0, student_id.0)
        .await
}

pub async fn list_materials(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(&req, path.0).await
}

pub async fn attendance_report(
    req: HttpRequest,
    path: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_subject_report(&req, path.0).await
}

pub async fn grade_report(req: HttpRequest, path: SafeSubjectIdI64) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_subject_report(&req, path.0).await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 所有登录用户
                    .route(web::get().to(list_subjects))
                    // 创建 - 教师和管理员
                    .route(
                        web::post()
                            .to(create_subject)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 以下路由要求能访问该科目，更细的权限在业务层检查
            .service(
                web::scope("/{subject_id}")
                    .wrap(RequireSubjectAccess::new(SubjectAccess::Member))
                    .service(
                        web::resource("")
                            .route(web::get().to(get_subject))
                            .route(web::put().to(update_subject))
                            .route(web::delete().to(delete_subject)),
                    )
                    .service(
                        web::resource("/students")
                            .route(web::get().to(list_students))
                            .route(web::post().to(enroll_students)),
                    )
                    .route("/students/{student_id}", web::delete().to(unenroll_student))
                    .route("/materials", web::get().to(list_materials))
                    .route("/attendance-report", web::get().to(attendance_report))
                    .route("/grade-report", web::get().to(grade_report)),
            ),
    );
}
