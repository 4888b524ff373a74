use crate::core::keys::{
    is_project_variant, normalize_category_key, normalize_module_key, CATEGORY_MODULE_MARKER,
};
use crate::domain::model::{CategoryMembership, Module, ModuleId, RelationList, Term};
use crate::domain::source::{CategoryRecord, ModuleAssignment, ModuleDetail};
use crate::utils::error::{CurriculumError, Result};

const PROJECT_WORK_LABEL: &str = " (Project Work)";

/// 建立一個所有衍生欄位都為空的模組。
///
/// 短代碼以類別標記開頭的紀錄其實是類別，回傳 `None`。
pub fn new_module(id: ModuleId, raw_code: &str, display_name: &str, url: &str) -> Option<Module> {
    let short_key = normalize_module_key(raw_code);
    if short_key.starts_with(CATEGORY_MODULE_MARKER) {
        tracing::debug!("Skipping category-shaped module record {} ({})", raw_code, id);
        return None;
    }

    let mut name = display_name.trim().to_string();
    // 專題拆分出來的模組需要在介面上能區分
    if is_project_variant(raw_code) {
        name.push_str(PROJECT_WORK_LABEL);
    }

    Some(Module {
        id,
        short_key,
        name,
        url: url.to_string(),
        ects: 0,
        is_deactivated: false,
        is_mandatory: false,
        term: Term::Unknown,
        categories: Vec::new(),
        focuses: Vec::new(),
        recommended: RelationList::default(),
        dependents: RelationList::default(),
        successor_short_key: None,
        predecessor_short_key: None,
    })
}

pub fn category_memberships(records: &[CategoryRecord]) -> Vec<CategoryMembership> {
    records
        .iter()
        .map(|record| CategoryMembership {
            short_key: normalize_category_key(&record.kuerzel),
            name: record.bezeichnung.clone(),
            ects: record.kreditpunkte,
        })
        .collect()
}

/// 由學程中的模組分配建立模組，學分取自第一個類別
pub fn build_from_assignment(assignment: &ModuleAssignment) -> Option<Module> {
    let mut module = new_module(
        assignment.id,
        &assignment.kuerzel,
        &assignment.bezeichnung,
        &assignment.url,
    )?;

    if let Some(categories) = &assignment.kategorien {
        module.categories = category_memberships(categories);
        if let Some(ects) = categories.first().and_then(|category| category.kreditpunkte) {
            module.ects = ects;
        }
    }

    Some(module)
}

/// 由額外指定的獨立模組詳細資料建立模組。
///
/// 類別取自該模組在 `program_path` 學程中的分配，找不到分配時視為錯誤。
pub fn build_standalone(
    detail: &ModuleDetail,
    module_path: &str,
    program_path: &str,
) -> Result<Option<Module>> {
    let id = detail.id.ok_or_else(|| CurriculumError::MalformedRecord {
        path: module_path.to_string(),
        message: "standalone module record has no id".to_string(),
    })?;
    let display_name = detail.bezeichnung.as_deref().unwrap_or(&detail.kuerzel);

    let Some(mut module) = new_module(id, &detail.kuerzel, display_name, module_path) else {
        return Ok(None);
    };

    let assignment = detail
        .zuordnungen
        .iter()
        .find(|assignment| assignment.url == program_path)
        .ok_or_else(|| CurriculumError::MissingProgramAssignment {
            module: detail.kuerzel.clone(),
            program: program_path.to_string(),
        })?;

    module.categories = category_memberships(&assignment.kategorien);
    module.ects = detail.kreditpunkte.unwrap_or(0);

    Ok(Some(module))
}
