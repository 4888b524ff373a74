use crate::core::keys::normalize_module_key;
use crate::core::overrides::OverrideTable;
use crate::core::table::ModuleTable;
use crate::domain::model::{Module, ModuleId, Term};
use crate::domain::source::{ModuleDetail, ModuleLink};

pub const DEACTIVATED_STATUS: &str = "deaktiviert";

/// 衍生步驟所需的外部輸入
#[derive(Debug, Clone)]
pub struct DerivationContext<'a> {
    pub current_year: i32,
    pub overrides: &'a OverrideTable,
}

/// 以模組詳細資料依序執行所有衍生步驟，手動修正最後套用
pub fn enrich_module(
    table: &mut ModuleTable,
    id: ModuleId,
    detail: &ModuleDetail,
    context: &DerivationContext<'_>,
) {
    let Some(module) = table.get_mut(id) else {
        tracing::warn!("Cannot enrich unknown module {}", id);
        return;
    };
    apply_detail_ects(module, detail);
    assign_term(module, detail);

    link_successor_and_predecessor(table, id, detail);

    let Some(module) = table.get_mut(id) else {
        return;
    };
    collect_recommendations(module, detail);
    infer_deactivation(module, detail, context.current_year);
    context.overrides.apply(module);
}

/// 類別提供的學分優先，只有尚未設定時才採用詳細資料的學分
pub fn apply_detail_ects(module: &mut Module, detail: &ModuleDetail) {
    if module.ects != 0 {
        return;
    }
    if let Some(ects) = detail.kreditpunkte {
        module.ects = ects;
    }
}

pub fn assign_term(module: &mut Module, detail: &ModuleDetail) {
    let Some(offerings) = &detail.durchfuehrungen else {
        tracing::warn!("Module {} ({}) has no term", module.short_key, module.id);
        return;
    };
    let Some(end_code) = offerings.end_semester.as_deref() else {
        return;
    };
    let Some(end) = Term::from_semester(end_code) else {
        tracing::warn!(
            "Module {} has no valid term (end semester '{}')",
            module.id,
            end_code
        );
        return;
    };

    let begin = offerings
        .begin_semester
        .as_deref()
        .and_then(Term::from_semester);
    module.term = match begin {
        Some(begin) if begin != end => Term::Both,
        _ => end,
    };
}

/// 記錄後繼與前導模組，並在對方尚未設定時回填反向指標
pub fn link_successor_and_predecessor(table: &mut ModuleTable, id: ModuleId, detail: &ModuleDetail) {
    let Some(own_key) = table.get(id).map(|module| module.short_key.clone()) else {
        return;
    };

    if let Some(successor_key) = chain_target(detail.nachfolger.as_ref(), &detail.kuerzel) {
        if let Some(module) = table.get_mut(id) {
            module.successor_short_key = Some(successor_key.clone());
        }
        if let Some(successor) = table.find_by_short_key_mut(&successor_key, id) {
            if successor.predecessor_short_key.is_none() {
                tracing::debug!("Back-filling predecessor of {} with {}", successor_key, own_key);
                successor.predecessor_short_key = Some(own_key.clone());
            }
        }
    }

    if let Some(predecessor_key) = chain_target(detail.vorgaenger.as_ref(), &detail.kuerzel) {
        if let Some(module) = table.get_mut(id) {
            module.predecessor_short_key = Some(predecessor_key.clone());
        }
        if let Some(predecessor) = table.find_by_short_key_mut(&predecessor_key, id) {
            if predecessor.successor_short_key.is_none() {
                tracing::debug!("Back-filling successor of {} with {}", predecessor_key, own_key);
                predecessor.successor_short_key = Some(own_key);
            }
        }
    }
}

/// 指向自己的後繼/前導宣告不算數
fn chain_target(link: Option<&ModuleLink>, own_code: &str) -> Option<String> {
    link.filter(|link| link.kuerzel != own_code)
        .map(|link| normalize_module_key(&link.kuerzel))
}

/// 推薦與先修條件都併入同一個推薦關係
pub fn collect_recommendations(module: &mut Module, detail: &ModuleDetail) {
    for link in detail.empfehlungen.iter().chain(&detail.voraussetzungen) {
        let Some(target_id) = link.id else {
            tracing::warn!(
                "Module {} references {} without an id, ignoring",
                module.short_key,
                link.kuerzel
            );
            continue;
        };
        if target_id == module.id {
            tracing::debug!("Ignoring self recommendation of {}", module.short_key);
            continue;
        }
        module
            .recommended
            .add(target_id, &normalize_module_key(&link.kuerzel));
    }
}

/// 狀態為停用，且沒有開課資料或最後開課年份早於今年時，模組視為停用
pub fn infer_deactivation(module: &mut Module, detail: &ModuleDetail, current_year: i32) {
    if detail.zustand.as_deref() != Some(DEACTIVATED_STATUS) {
        return;
    }
    match &detail.durchfuehrungen {
        None => module.is_deactivated = true,
        Some(offerings) => {
            if offerings.end_year.is_some_and(|year| year < current_year) {
                module.is_deactivated = true;
            }
        }
    }
}
