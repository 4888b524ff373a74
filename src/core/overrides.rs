use crate::domain::model::{Module, Term};
use std::collections::HashMap;

/// 對單一欄位的手動修正
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Term(Term),
    IsMandatory(bool),
    IsDeactivated(bool),
    Successor(&'static str),
    Predecessor(&'static str),
}

impl Override {
    fn apply(&self, module: &mut Module) {
        match self {
            Self::Term(term) => module.term = *term,
            Self::IsMandatory(value) => module.is_mandatory = *value,
            Self::IsDeactivated(value) => module.is_deactivated = *value,
            Self::Successor(key) => module.successor_short_key = Some(key.to_string()),
            Self::Predecessor(key) => module.predecessor_short_key = Some(key.to_string()),
        }
    }
}

use Override::{IsDeactivated, IsMandatory, Predecessor, Successor};

/// 手動維護的來源資料修正。
///
/// `RheKI` 與 `IBN` 各出現兩次；查表時只有最後一筆生效，
/// 因此 `RheKI` 的後繼修正 (`RheKoI`) 從未套用。這是已知缺陷，保留原樣。
const BUILTIN_OVERRIDES: &[(&str, &[Override])] = &[
    ("ExEv", &[Override::Term(Term::Autumn)]),
    ("ComEng1", &[Override::Term(Term::Spring)]),
    ("ComEng2", &[Override::Term(Term::Autumn)]),
    ("SEProj", &[Override::Term(Term::Spring), IsMandatory(true)]),
    ("PF", &[IsDeactivated(true)]),
    ("SE1", &[Successor("SEP2")]),
    ("SE2", &[Successor("SEP2")]),
    ("SEP1", &[Predecessor("SE1"), IsMandatory(true)]),
    ("SEP2", &[Predecessor("SE2"), IsMandatory(true)]),
    ("BuPro", &[Successor("WI2")]),
    ("WI2", &[Predecessor("BuPro")]),
    ("RheKI", &[Successor("RheKoI")]),
    ("RheKoI", &[Predecessor("RheKI")]),
    ("RKI", &[Successor("RheKI")]),
    ("RheKI", &[Predecessor("RKI")]),
    ("SDW", &[Successor("IBN")]),
    ("IBN", &[Predecessor("SDW")]),
    ("FunProg", &[Successor("FP")]),
    ("FP", &[Predecessor("FunProg")]),
    ("IBN", &[Predecessor("SDW")]),
    ("WIoT", &[Successor("WsoT")]),
    ("WsoT", &[Predecessor("WIoT")]),
    ("SecSW", &[Successor("SecSoW")]),
    ("SecSoW", &[Predecessor("SecSW")]),
    ("Inno2", &[Successor("Inno_2")]),
    ("Inno_2", &[Predecessor("Inno2")]),
    ("BAI21", &[Override::Term(Term::Both), IsMandatory(true)]),
    ("SAI21", &[Override::Term(Term::Both), IsMandatory(true)]),
    ("IKBH", &[Successor("IKBD")]),
    ("IKBD", &[Predecessor("IKBH")]),
];

#[derive(Debug, Clone)]
pub struct OverrideTable {
    entries: HashMap<&'static str, &'static [Override]>,
}

impl OverrideTable {
    /// 依序建立查詢表，重複的短代碼由後面的項目取代
    pub fn from_entries(entries: &[(&'static str, &'static [Override])]) -> Self {
        let mut table = HashMap::new();
        for (short_key, overrides) in entries {
            if table.insert(*short_key, *overrides).is_some() {
                tracing::debug!("Override entry for {} replaces an earlier one", short_key);
            }
        }
        Self { entries: table }
    }

    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_OVERRIDES)
    }

    pub fn get(&self, short_key: &str) -> Option<&'static [Override]> {
        self.entries.get(short_key).copied()
    }

    /// 回傳是否有修正被套用
    pub fn apply(&self, module: &mut Module) -> bool {
        let Some(overrides) = self.get(&module.short_key) else {
            return false;
        };
        for field in overrides {
            field.apply(module);
        }
        tracing::debug!(
            "Applied {} override(s) to module {}",
            overrides.len(),
            module.short_key
        );
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::builtin()
    }
}
