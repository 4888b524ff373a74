use crate::domain::model::{Module, ModuleExport};
use std::collections::BTreeSet;

/// 轉成匯出形狀：計算 `categoriesForColoring` 並丟棄建構期間的欄位
pub fn project_module(module: Module) -> ModuleExport {
    let categories_for_coloring: BTreeSet<String> = module
        .categories
        .into_iter()
        .map(|category| category.short_key)
        .collect();

    ModuleExport {
        id: module.id,
        short_key: module.short_key,
        name: module.name,
        url: module.url,
        ects: module.ects,
        is_deactivated: module.is_deactivated,
        is_mandatory: module.is_mandatory,
        term: module.term,
        recommended_modules: module.recommended.entries().to_vec(),
        recommended_module_ids: module.recommended.ids().iter().copied().collect(),
        recommended_module_short_keys: module.recommended.short_keys().iter().cloned().collect(),
        dependent_modules: module.dependents.entries().to_vec(),
        dependent_module_ids: module.dependents.ids().iter().copied().collect(),
        dependent_module_short_keys: module.dependents.short_keys().iter().cloned().collect(),
        successor_module_short_key: module.successor_short_key,
        predecessor_module_short_key: module.predecessor_short_key,
        categories_for_coloring: categories_for_coloring.into_iter().collect(),
    }
}

/// 投影所有模組並依 id 排序
pub fn project_modules(modules: Vec<Module>) -> Vec<ModuleExport> {
    let mut exports: Vec<ModuleExport> = modules.into_iter().map(project_module).collect();
    exports.sort_by_key(|module| module.id);
    exports
}
