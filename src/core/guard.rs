use crate::domain::model::{Module, ModuleId};
use crate::utils::error::{CurriculumError, Result};
use std::collections::HashSet;

/// 模組 id 在整次執行中必須唯一，否則中止且不寫出任何產物
pub fn ensure_unique_ids(modules: &[Module]) -> Result<()> {
    let distinct: HashSet<ModuleId> = modules.iter().map(|module| module.id).collect();
    if distinct.len() != modules.len() {
        tracing::error!(
            "❌ Module table is inconsistent: {} distinct ids for {} modules",
            distinct.len(),
            modules.len()
        );
        return Err(CurriculumError::DuplicateModuleIds {
            distinct: distinct.len(),
            entries: modules.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::tests::module;

    #[test]
    fn test_unique_ids_pass() {
        let modules = vec![module(1, "AD1"), module(2, "AD2")];
        assert!(ensure_unique_ids(&modules).is_ok());
        assert!(ensure_unique_ids(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_are_fatal() {
        let modules = vec![module(1, "AD1"), module(1, "AD1_copy"), module(2, "AD2")];
        match ensure_unique_ids(&modules) {
            Err(CurriculumError::DuplicateModuleIds { distinct, entries }) => {
                assert_eq!(distinct, 2);
                assert_eq!(entries, 3);
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }
}
