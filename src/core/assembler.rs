use crate::core::keys::{
    normalize_category_key, normalize_module_key, remap_focus_module_key,
    GENERAL_STUDIES_CATEGORY_KEY, LEGACY_HELPER_CATEGORY, LEGACY_HELPER_CATEGORY_KEY,
};
use crate::core::table::ModuleTable;
use crate::domain::model::{
    Category, CategoryMembership, Focus, FocusMembership, ModuleId, ModuleSummary,
};
use crate::domain::source::{CreditRecord, FocusDetail, SpecializationRecord};
use std::collections::{BTreeMap, HashMap};

/// 一個學程的類別集合，依短代碼索引
#[derive(Debug, Clone, Default)]
pub struct CategorySet {
    categories: HashMap<String, Category>,
}

impl CategorySet {
    /// 由學分要求建立類別，略過僅供簿記用的輔助類別
    pub fn from_credits(credits: &[CreditRecord]) -> Self {
        let mut categories = HashMap::new();

        for credit in credits {
            let Some(record) = credit.kategorien.first() else {
                tracing::warn!("Credit entry without category, skipping");
                continue;
            };
            if record.kuerzel == LEGACY_HELPER_CATEGORY {
                continue;
            }

            let short_key = normalize_category_key(&record.kuerzel);
            let category = Category {
                id: record.id,
                short_key: short_key.clone(),
                name: record.bezeichnung.clone(),
                required_ects: credit.min_kredits,
                modules: Vec::new(),
            };
            if categories.insert(short_key.clone(), category).is_some() {
                tracing::warn!("Category {} defined twice, keeping the last one", short_key);
            }
        }

        Self { categories }
    }

    /// 將模組加入所有符合的類別
    pub fn attach(&mut self, summary: &ModuleSummary, memberships: &[CategoryMembership]) {
        for membership in memberships {
            let target = if self.categories.contains_key(&membership.short_key) {
                membership.short_key.as_str()
            } else if membership.short_key == LEGACY_HELPER_CATEGORY_KEY {
                GENERAL_STUDIES_CATEGORY_KEY
            } else {
                continue;
            };

            if let Some(category) = self.categories.get_mut(target) {
                category.modules.push(summary.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// 排序並去除重複模組後輸出，依 id 排序
    pub fn finish(self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .categories
            .into_values()
            .map(|mut category| {
                category.modules.sort_by_key(|module| module.id);
                category.modules.dedup_by_key(|module| module.id);
                category
            })
            .collect();
        categories.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.short_key.cmp(&b.short_key)));
        categories
    }
}

/// 建立專長方向，只收錄模組表中已知的模組，並在模組上記錄所屬方向
pub fn assemble_focus(
    record: &SpecializationRecord,
    detail: &FocusDetail,
    table: &mut ModuleTable,
) -> Focus {
    let membership = FocusMembership {
        short_key: record.kuerzel.clone(),
        name: record.bezeichnung.clone(),
        url: record.url.clone(),
    };

    // 以 id 為鍵收斂，重複時保留最後一筆
    let mut modules: BTreeMap<ModuleId, ModuleSummary> = BTreeMap::new();
    for assignment in &detail.zuordnungen {
        let Some(module) = table.get_mut(assignment.id) else {
            tracing::debug!(
                "Focus {} references module {} outside this run, dropping",
                record.kuerzel,
                assignment.id
            );
            continue;
        };

        modules.insert(
            module.id,
            ModuleSummary {
                id: module.id,
                short_key: remap_focus_module_key(normalize_module_key(&assignment.kuerzel)),
                name: module.name.clone(),
                url: module.url.clone(),
            },
        );
        module.focuses.push(membership.clone());
    }

    Focus {
        id: record.id,
        short_key: record.kuerzel.clone(),
        url: record.url.clone(),
        name: record.bezeichnung.clone(),
        modules: modules.into_values().collect(),
    }
}
