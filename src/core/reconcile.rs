use crate::core::table::ModuleTable;
use crate::domain::model::ModuleId;

/// 將推薦關係反轉為依賴關係，只處理兩端都已知的模組。回傳新增的邊數。
pub fn reconcile_dependents(table: &mut ModuleTable) -> usize {
    let edges: Vec<(ModuleId, String, Vec<ModuleId>)> = table
        .iter()
        .map(|module| {
            (
                module.id,
                module.short_key.clone(),
                module.recommended.ids().iter().copied().collect(),
            )
        })
        .collect();

    let mut added = 0;
    for (dependent_id, dependent_key, recommended_ids) in edges {
        for recommended_id in recommended_ids {
            if let Some(recommended) = table.get_mut(recommended_id) {
                if recommended.dependents.add(dependent_id, &dependent_key) {
                    added += 1;
                }
            }
        }
    }

    tracing::debug!("Reconciled {} new dependent edge(s)", added);
    added
}
