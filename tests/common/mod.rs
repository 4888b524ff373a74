#![allow(dead_code)]

use async_trait::async_trait;
use curriculum_etl::config::toml_config::{CrawlerConfig, OutputConfig, SourceConfig, StudyProgramConfig};
use curriculum_etl::domain::ports::{CurriculumSource, Storage};
use curriculum_etl::{CurriculumError, Result};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const PROGRAM_A: &str = "allStudies/A.json";
pub const PROGRAM_B: &str = "allStudies/B.json";

/// 以路徑查表的記憶體資料來源，找不到時回報 404
#[derive(Clone, Default)]
pub struct MemorySource {
    records: HashMap<String, Value>,
}

impl MemorySource {
    pub fn new(records: HashMap<String, Value>) -> Self {
        Self { records }
    }

    pub fn without(mut self, path: &str) -> Self {
        self.records.remove(path);
        self
    }

    pub fn with(mut self, path: &str, value: Value) -> Self {
        self.records.insert(path.to_string(), value);
        self
    }
}

#[async_trait]
impl CurriculumSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.records
            .get(path)
            .cloned()
            .ok_or_else(|| CurriculumError::HttpStatusError {
                url: path.to_string(),
                status: 404,
            })
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let bytes = self
            .get_file(path)
            .await
            .unwrap_or_else(|| panic!("artifact {} was not written", path));
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }
}

impl Storage for MemoryStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.files.lock().await.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

pub fn config(base_url: &str) -> CrawlerConfig {
    CrawlerConfig {
        source: SourceConfig {
            base_url: base_url.to_string(),
            timeout_seconds: Some(5),
            user_agent: None,
        },
        output: OutputConfig::default(),
        study_programs: vec![
            StudyProgramConfig {
                name: Some("Program A".to_string()),
                path: PROGRAM_A.to_string(),
                output_directory: "dataA".to_string(),
                additional_modules: vec![],
            },
            StudyProgramConfig {
                name: Some("Program B".to_string()),
                path: PROGRAM_B.to_string(),
                output_directory: "dataB".to_string(),
                additional_modules: vec!["allModules/30_M_MGE.json".to_string()],
            },
        ],
    }
}

fn category(id: u64, kuerzel: &str, name: &str, ects: u32) -> Value {
    json!({"id": id, "kuerzel": kuerzel, "bezeichnung": name, "kreditpunkte": ects})
}

fn assignment(id: u64, kuerzel: &str, name: &str, categories: Value) -> Value {
    json!({
        "id": id,
        "kuerzel": kuerzel,
        "bezeichnung": name,
        "url": format!("allModules/{}_{}.json", id, kuerzel),
        "kategorien": categories
    })
}

/// 兩個學程共用模組 7 (SE1) 的資料集
pub fn fixture() -> HashMap<String, Value> {
    let informatik = category(100, "I-Inf", "Informatik", 4);
    let software = category(200, "I_SE", "Software Engineering", 4);

    let mut records = HashMap::new();

    records.insert(
        PROGRAM_A.to_string(),
        json!({
            "kredits": [
                {"minKredits": 40, "kategorien": [{"id": 100, "kuerzel": "I-Inf", "bezeichnung": "Informatik"}]},
                {"minKredits": 20, "kategorien": [{"id": 50, "kuerzel": "Kat_gwr", "bezeichnung": "Gesellschaft, Wirtschaft und Recht"}]},
                {"minKredits": 0, "kategorien": [{"id": 60, "kuerzel": "IKTS-help", "bezeichnung": "Hilfskategorie"}]}
            ],
            "zuordnungen": [
                assignment(7, "M_SE1", "Software Engineering 1 ", json!([informatik.clone()])),
                assignment(8, "M_SE2", "Software Engineering 2", json!([informatik.clone()])),
                assignment(9, "M_SEP2", "Software Engineering Projekt 2", json!([informatik.clone()])),
                assignment(3, "M_PF", "Programmierfertigkeiten", json!([informatik.clone()])),
                assignment(2, "Kat_GWR", "Gesellschaft, Wirtschaft und Recht", json!([])),
                assignment(11, "M_IKBH_p", "Interkulturelle Kompetenz", json!([category(61, "IKTS-help", "Hilfskategorie", 2)])),
                assignment(12, "M_Gone", "Verschwundenes Modul", json!([informatik.clone()]))
            ],
            "spezialisierungen": [
                {"id": 900, "kuerzel": "SPEZ_SE", "bezeichnung": "Software Engineering", "url": "spezialisierungen/900.json"}
            ]
        }),
    );

    records.insert(
        PROGRAM_B.to_string(),
        json!({
            "kredits": [
                {"minKredits": 30, "kategorien": [{"id": 200, "kuerzel": "I_SE", "bezeichnung": "Software Engineering"}]}
            ],
            "zuordnungen": [
                assignment(7, "M_SE1", "Software Engineering 1", json!([software.clone()])),
                assignment(20, "M_AD2", "Algorithmen und Datenstrukturen 2", json!([software.clone()]))
            ],
            "spezialisierungen": []
        }),
    );

    records.insert(
        "spezialisierungen/900.json".to_string(),
        json!({"zuordnungen": [
            {"id": 8, "kuerzel": "M_SE2"},
            {"id": 7, "kuerzel": "M_SE1"},
            {"id": 4242, "kuerzel": "M_Foreign"},
            {"id": 7, "kuerzel": "M_SE1"}
        ]}),
    );

    records.insert(
        "allModules/7_M_SE1.json".to_string(),
        json!({
            "id": 7, "kuerzel": "M_SE1", "kreditpunkte": 6, "zustand": "aktiv",
            "durchfuehrungen": {"beginSemester": "HS", "endSemester": "HS", "endJahr": 2099},
            "nachfolger": {"kuerzel": "M_SEP2"}
        }),
    );
    records.insert(
        "allModules/8_M_SE2.json".to_string(),
        json!({
            "id": 8, "kuerzel": "M_SE2", "zustand": "aktiv",
            "durchfuehrungen": {"beginSemester": "FS", "endSemester": "FS"},
            "nachfolger": {"kuerzel": "M_SEP2"},
            "empfehlungen": [{"id": 7, "kuerzel": "M_SE1"}],
            "voraussetzungen": [{"id": 7, "kuerzel": "M_SE1"}]
        }),
    );
    records.insert(
        "allModules/9_M_SEP2.json".to_string(),
        json!({
            "id": 9, "kuerzel": "M_SEP2",
            "durchfuehrungen": {"beginSemester": "HS", "endSemester": "FS"},
            "nachfolger": {"kuerzel": "M_SEP2"}
        }),
    );
    records.insert(
        "allModules/3_M_PF.json".to_string(),
        json!({
            "id": 3, "kuerzel": "M_PF", "zustand": "aktiv",
            "durchfuehrungen": {"beginSemester": "HS", "endSemester": "HS", "endJahr": 2099}
        }),
    );
    records.insert(
        "allModules/11_M_IKBH_p.json".to_string(),
        json!({"id": 11, "kuerzel": "M_IKBH_p", "kreditpunkte": 2, "zustand": "deaktiviert"}),
    );
    records.insert(
        "allModules/20_M_AD2.json".to_string(),
        json!({
            "id": 20, "kuerzel": "M_AD2", "kreditpunkte": 8,
            "durchfuehrungen": {"beginSemester": "FS", "endSemester": "FS"},
            "empfehlungen": [{"id": 7, "kuerzel": "M_SE1"}, {"id": 20, "kuerzel": "M_AD2"}]
        }),
    );
    records.insert(
        "allModules/30_M_MGE.json".to_string(),
        json!({
            "id": 30, "kuerzel": "M_MGE", "bezeichnung": "Mobile and GUI Engineering", "kreditpunkte": 4,
            "durchfuehrungen": {"beginSemester": "FS", "endSemester": "FS"},
            "empfehlungen": [{"id": 20, "kuerzel": "M_AD2"}],
            "zuordnungen": [
                {"url": PROGRAM_B, "kategorien": [{"id": 200, "kuerzel": "I_SE", "bezeichnung": "Software Engineering"}]}
            ]
        }),
    );

    records
}

/// 依 id 取出匯出的模組
pub fn module_by_id(modules: &Value, id: u64) -> &Value {
    modules
        .as_array()
        .unwrap()
        .iter()
        .find(|module| module["id"] == id)
        .unwrap_or_else(|| panic!("module {} missing from export", id))
}

pub fn ids_of(list: &Value) -> Vec<u64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_u64().unwrap())
        .collect()
}
