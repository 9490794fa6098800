use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::MaterialService;
use crate::middlewares::SubjectAccess;
use crate::models::{
    ApiResponse,
    materials::{
        entities::Material,
        responses::{MaterialGroup, MaterialGroupsResponse},
    },
};
use crate::services::{check_subject_access, current_user, internal_error, scoped_subject};

/// 按分类分组，分类按字母排序，组内最新的在前
pub(crate) fn group_materials(materials: Vec<Material>) -> Vec<MaterialGroup> {
    let mut groups: BTreeMap<String, Vec<Material>> = BTreeMap::new();
    for material in materials {
        groups.entry(material.category.clone()).or_default().push(material);
    }

    groups
        .into_iter()
        .map(|(category, mut items)| {
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            MaterialGroup { category, items }
        })
        .collect()
}

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let subject = match scoped_subject(&storage, request, subject_id).await {
        Ok(subject) => subject,
        Err(response) => return Ok(response),
    };
    if let Err(response) =
        check_subject_access(&storage, SubjectAccess::Member, &user, &subject).await
    {
        return Ok(response);
    }

    match storage.list_materials(subject.id).await {
        Ok(materials) => {
            let total = materials.len() as i64;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MaterialGroupsResponse {
                    subject_id: subject.id,
                    total,
                    groups: group_materials(materials),
                },
                "Materials retrieved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to list materials", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn material(id: i64, category: &str, age_days: i64) -> Material {
        let created = Utc::now() - Duration::days(age_days);
        Material {
            id,
            subject_id: 1,
            uploaded_by: 7,
            title: format!("Material {id}"),
            description: None,
            category: category.to_string(),
            url: format!("https://campus.test/{id}"),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_groups_sorted_and_newest_first() {
        let groups = group_materials(vec![
            material(1, "guías", 10),
            material(2, "apuntes", 3),
            material(3, "guías", 1),
            material(4, "other", 5),
        ]);

        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, vec!["apuntes", "guías", "other"]);

        let guias: Vec<_> = groups[1].items.iter().map(|m| m.id).collect();
        assert_eq!(guias, vec![3, 1]);
    }

    #[test]
    fn test_empty_list_has_no_groups() {
        assert!(group_materials(Vec::new()).is_empty());
    }
}
