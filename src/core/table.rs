use crate::domain::model::{Module, ModuleId};
use std::collections::HashMap;

/// 跨學程共用的模組表，依插入順序保存並以 id 索引
#[derive(Debug, Clone, Default)]
pub struct ModuleTable {
    modules: Vec<Module>,
    index: HashMap<ModuleId, usize>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增模組；若 id 已存在則保留既有實體並合併本次的類別歸屬
    pub fn insert_or_merge(&mut self, module: Module) -> &mut Module {
        if let Some(position) = self.index.get(&module.id).copied() {
            let existing = &mut self.modules[position];
            tracing::debug!(
                "Module {} ({}) already known, merging memberships",
                existing.short_key,
                existing.id
            );
            for category in module.categories {
                if !existing
                    .categories
                    .iter()
                    .any(|known| known.short_key == category.short_key)
                {
                    existing.categories.push(category);
                }
            }
            if existing.ects == 0 {
                existing.ects = module.ects;
            }
            return existing;
        }

        let position = self.modules.len();
        self.index.insert(module.id, position);
        self.modules.push(module);
        &mut self.modules[position]
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.index.get(&id).map(|&position| &self.modules[position])
    }

    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.index
            .get(&id)
            .copied()
            .map(move |position| &mut self.modules[position])
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.index.contains_key(&id)
    }

    /// 以短代碼尋找模組，排除指定 id
    pub fn find_by_short_key_mut(
        &mut self,
        short_key: &str,
        except: ModuleId,
    ) -> Option<&mut Module> {
        self.modules
            .iter_mut()
            .find(|module| module.id != except && module.short_key == short_key)
    }

    pub fn ids(&self) -> Vec<ModuleId> {
        self.modules.iter().map(|module| module.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    pub fn as_slice(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.modules
    }
}
