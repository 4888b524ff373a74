//! 課程資料來源的原始紀錄（欄位名稱沿用來源的德文命名）

use serde::Deserialize;

/// 學程紀錄（`allStudies/*.json`）
#[derive(Debug, Clone, Deserialize)]
pub struct StudyProgramRecord {
    pub kredits: Vec<CreditRecord>,
    pub zuordnungen: Vec<ModuleAssignment>,
    pub spezialisierungen: Vec<SpecializationRecord>,
}

/// 學分要求，`kategorien` 的第一筆即為對應類別
#[derive(Debug, Clone, Deserialize)]
pub struct CreditRecord {
    #[serde(rename = "minKredits")]
    pub min_kredits: u32,
    #[serde(default)]
    pub kategorien: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub id: u64,
    pub kuerzel: String,
    #[serde(default)]
    pub bezeichnung: String,
    pub kreditpunkte: Option<u32>,
}

/// 學程中的模組分配
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleAssignment {
    pub id: u64,
    pub kuerzel: String,
    pub bezeichnung: String,
    pub url: String,
    pub kategorien: Option<Vec<CategoryRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecializationRecord {
    pub id: u64,
    pub kuerzel: String,
    pub bezeichnung: String,
    pub url: String,
}

/// 模組詳細資料（`allModules/*.json`）
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDetail {
    pub id: Option<u64>,
    pub kuerzel: String,
    pub bezeichnung: Option<String>,
    pub kreditpunkte: Option<u32>,
    pub zustand: Option<String>,
    pub durchfuehrungen: Option<Offerings>,
    pub nachfolger: Option<ModuleLink>,
    pub vorgaenger: Option<ModuleLink>,
    #[serde(default)]
    pub empfehlungen: Vec<ModuleLink>,
    #[serde(default)]
    pub voraussetzungen: Vec<ModuleLink>,
    #[serde(default)]
    pub zuordnungen: Vec<ProgramAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Offerings {
    #[serde(rename = "beginSemester")]
    pub begin_semester: Option<String>,
    #[serde(rename = "endSemester")]
    pub end_semester: Option<String>,
    #[serde(rename = "endJahr")]
    pub end_year: Option<i32>,
}

/// 指向另一個模組的參照，後繼/前導只帶 `kuerzel`
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleLink {
    pub id: Option<u64>,
    pub kuerzel: String,
}

/// 獨立模組在各學程中的分配
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramAssignment {
    pub url: String,
    #[serde(default)]
    pub kategorien: Vec<CategoryRecord>,
}

/// 專長方向的詳細資料
#[derive(Debug, Clone, Deserialize)]
pub struct FocusDetail {
    #[serde(default)]
    pub zuordnungen: Vec<FocusAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FocusAssignment {
    pub id: u64,
    pub kuerzel: String,
}
