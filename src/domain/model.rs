use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};

pub type ModuleId = u64;

/// 開課學期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Term {
    #[serde(rename = "HS")]
    Autumn,
    #[serde(rename = "FS")]
    Spring,
    #[serde(rename = "both")]
    Both,
    #[default]
    #[serde(rename = "")]
    Unknown,
}

impl Term {
    /// 只接受來源中的兩個學期代碼 `HS` 與 `FS`
    pub fn from_semester(code: &str) -> Option<Self> {
        match code {
            "HS" => Some(Self::Autumn),
            "FS" => Some(Self::Spring),
            _ => None,
        }
    }
}

/// 一條指向其他模組的邊，序列化為 `{"<id>": "<shortKey>"}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleRef {
    pub id: ModuleId,
    pub short_key: String,
}

impl Serialize for ModuleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id.to_string(), &self.short_key)?;
        map.end()
    }
}

/// 保持插入順序且不重複的邊列表，附帶 id 與 shortKey 的集合鏡像
#[derive(Debug, Clone, Default)]
pub struct RelationList {
    entries: Vec<ModuleRef>,
    seen: HashSet<ModuleRef>,
    ids: BTreeSet<ModuleId>,
    short_keys: BTreeSet<String>,
}

impl RelationList {
    /// 回傳是否新增了一條邊；集合鏡像無論如何都會更新
    pub fn add(&mut self, id: ModuleId, short_key: &str) -> bool {
        self.ids.insert(id);
        self.short_keys.insert(short_key.to_string());

        let edge = ModuleRef {
            id,
            short_key: short_key.to_string(),
        };
        if self.seen.contains(&edge) {
            return false;
        }
        self.seen.insert(edge.clone());
        self.entries.push(edge);
        true
    }

    pub fn entries(&self) -> &[ModuleRef] {
        &self.entries
    }

    pub fn ids(&self) -> &BTreeSet<ModuleId> {
        &self.ids
    }

    pub fn short_keys(&self) -> &BTreeSet<String> {
        &self.short_keys
    }

    pub fn contains_id(&self, id: ModuleId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 模組在某個學程中所屬的類別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMembership {
    pub short_key: String,
    pub name: String,
    pub ects: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusMembership {
    pub short_key: String,
    pub name: String,
    pub url: String,
}

/// 建構過程中的模組實體，`categories` 與 `focuses` 只在建構期間使用
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub short_key: String,
    pub name: String,
    pub url: String,
    pub ects: u32,
    pub is_deactivated: bool,
    pub is_mandatory: bool,
    pub term: Term,
    pub categories: Vec<CategoryMembership>,
    // 僅在組裝專長方向時填入，不會輸出
    pub focuses: Vec<FocusMembership>,
    pub recommended: RelationList,
    pub dependents: RelationList,
    pub successor_short_key: Option<String>,
    pub predecessor_short_key: Option<String>,
}

impl Module {
    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            id: self.id,
            short_key: self.short_key.clone(),
            name: self.name.clone(),
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: ModuleId,
    pub short_key: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub short_key: String,
    pub name: String,
    pub required_ects: u32,
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Focus {
    pub id: u64,
    pub short_key: String,
    pub url: String,
    pub name: String,
    pub modules: Vec<ModuleSummary>,
}

/// 匯出到 `modules.json` 的最終形狀
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleExport {
    pub id: ModuleId,
    pub short_key: String,
    pub name: String,
    pub url: String,
    pub ects: u32,
    pub is_deactivated: bool,
    pub is_mandatory: bool,
    pub term: Term,
    pub recommended_modules: Vec<ModuleRef>,
    pub recommended_module_ids: Vec<ModuleId>,
    pub recommended_module_short_keys: Vec<String>,
    pub dependent_modules: Vec<ModuleRef>,
    pub dependent_module_ids: Vec<ModuleId>,
    pub dependent_module_short_keys: Vec<String>,
    pub successor_module_short_key: Option<String>,
    pub predecessor_module_short_key: Option<String>,
    pub categories_for_coloring: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_list_skips_duplicate_pairs() {
        let mut list = RelationList::default();
        assert!(list.add(3, "AD1"));
        assert!(list.add(1, "Prog1"));
        assert!(!list.add(3, "AD1"));

        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].id, 3);
        assert_eq!(list.ids().iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_relation_list_mirrors_update_for_new_key_of_known_id() {
        let mut list = RelationList::default();
        list.add(3, "AD1");
        list.add(3, "AD_1");

        assert_eq!(list.len(), 2);
        assert_eq!(list.ids().len(), 1);
        assert_eq!(list.short_keys().len(), 2);
    }

    #[test]
    fn test_module_ref_serializes_as_single_entry_map() {
        let edge = ModuleRef {
            id: 42,
            short_key: "SE1".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&edge).unwrap(),
            r#"{"42":"SE1"}"#
        );
    }

    #[test]
    fn test_term_serialization() {
        assert_eq!(serde_json::to_string(&Term::Autumn).unwrap(), r#""HS""#);
        assert_eq!(serde_json::to_string(&Term::Both).unwrap(), r#""both""#);
        assert_eq!(serde_json::to_string(&Term::Unknown).unwrap(), r#""""#);
        assert_eq!(Term::from_semester("FS"), Some(Term::Spring));
        assert_eq!(Term::from_semester("WS"), None);
    }
}
