use crate::config::toml_config::{CrawlerConfig, StudyProgramConfig};
use crate::core::assembler::{assemble_focus, CategorySet};
use crate::core::builder::{build_from_assignment, build_standalone};
use crate::core::derivation::{enrich_module, DerivationContext};
use crate::core::guard::ensure_unique_ids;
use crate::core::overrides::OverrideTable;
use crate::core::projector::project_modules;
use crate::core::reconcile::reconcile_dependents;
use crate::core::table::ModuleTable;
use crate::domain::model::{Category, CategoryMembership, Focus, ModuleExport, ModuleId};
use crate::domain::ports::{CurriculumSource, Storage};
use crate::domain::source::{FocusDetail, ModuleDetail, StudyProgramRecord};
use crate::utils::error::{CurriculumError, Result};
use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const FOCUSES_FILE: &str = "focuses.json";
pub const MODULES_FILE: &str = "modules.json";

/// 單一學程的產出
#[derive(Debug, Clone)]
pub struct ProgramArtifacts {
    pub name: String,
    pub output_directory: String,
    pub categories: Vec<Category>,
    pub focuses: Vec<Focus>,
}

/// 整次執行的結果，寫出前完整保存在記憶體中
#[derive(Debug, Clone)]
pub struct Dataset {
    pub programs: Vec<ProgramArtifacts>,
    pub modules: Vec<ModuleExport>,
    pub skipped_details: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub programs: usize,
    pub modules: usize,
    pub categories: usize,
    pub focuses: usize,
    pub skipped_details: usize,
    pub artifacts: Vec<String>,
}

impl RunSummary {
    fn from_dataset(dataset: &Dataset, artifacts: Vec<String>) -> Self {
        Self {
            programs: dataset.programs.len(),
            modules: dataset.modules.len(),
            categories: dataset.programs.iter().map(|p| p.categories.len()).sum(),
            focuses: dataset.programs.iter().map(|p| p.focuses.len()).sum(),
            skipped_details: dataset.skipped_details,
            artifacts,
        }
    }
}

pub struct CurriculumEngine<S: CurriculumSource, W: Storage> {
    source: S,
    storage: W,
    config: CrawlerConfig,
    overrides: OverrideTable,
    current_year: i32,
}

impl<S: CurriculumSource, W: Storage> CurriculumEngine<S, W> {
    pub fn new(source: S, storage: W, config: CrawlerConfig) -> Self {
        Self {
            source,
            storage,
            config,
            overrides: OverrideTable::builtin(),
            current_year: chrono::Local::now().year(),
        }
    }

    /// 固定停用判斷所用的年份
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// 建構並寫出所有產物；任何致命錯誤都會在寫出前中止
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let dataset = self.build().await?;
        let artifacts = self.write(&dataset).await?;

        let summary = RunSummary::from_dataset(&dataset, artifacts);
        tracing::info!(
            "✅ Wrote {} artifact(s) for {} module(s) in {:?}",
            summary.artifacts.len(),
            summary.modules,
            start.elapsed()
        );
        Ok(summary)
    }

    /// 只建構資料集，不寫出任何檔案
    pub async fn dry_run(&self) -> Result<RunSummary> {
        let dataset = self.build().await?;
        Ok(RunSummary::from_dataset(&dataset, Vec::new()))
    }

    pub async fn build(&self) -> Result<Dataset> {
        let mut table = ModuleTable::new();
        let mut programs = Vec::with_capacity(self.config.study_programs.len());
        let mut skipped_details = 0;

        for program in &self.config.study_programs {
            let start = Instant::now();
            let artifacts = self
                .process_program(program, &mut table, &mut skipped_details)
                .await?;
            tracing::info!(
                "✅ Study program {}: {} categories, {} focuses, {} modules known (duration: {:?})",
                artifacts.name,
                artifacts.categories.len(),
                artifacts.focuses.len(),
                table.len(),
                start.elapsed()
            );
            programs.push(artifacts);
        }

        ensure_unique_ids(table.as_slice())?;
        let modules = project_modules(table.into_modules());

        Ok(Dataset {
            programs,
            modules,
            skipped_details,
        })
    }

    async fn process_program(
        &self,
        program: &StudyProgramConfig,
        table: &mut ModuleTable,
        skipped_details: &mut usize,
    ) -> Result<ProgramArtifacts> {
        let name = program.display_name().to_string();
        tracing::info!("📥 Processing study program {}", name);

        let record: StudyProgramRecord = self.fetch_record(&program.path).await?;
        let mut categories = CategorySet::from_credits(&record.kredits);
        if categories.is_empty() {
            tracing::warn!("⚠️ Study program {} defines no categories", name);
        }

        // 本學程的類別歸屬，與模組表中累積的歸屬分開保存
        let mut memberships: Vec<(ModuleId, Vec<CategoryMembership>)> = Vec::new();

        for assignment in &record.zuordnungen {
            let Some(module) = build_from_assignment(assignment) else {
                continue;
            };
            memberships.push((module.id, module.categories.clone()));
            table.insert_or_merge(module);
        }

        for module_path in &program.additional_modules {
            let detail: ModuleDetail = self.fetch_record(module_path).await?;
            if let Some(module) = build_standalone(&detail, module_path, &program.path)? {
                memberships.push((module.id, module.categories.clone()));
                table.insert_or_merge(module);
            }
        }

        *skipped_details += self.enrich_all(table).await?;

        reconcile_dependents(table);

        for (id, module_categories) in &memberships {
            if let Some(module) = table.get(*id) {
                categories.attach(&module.summary(), module_categories);
            }
        }

        let mut focuses = Vec::with_capacity(record.spezialisierungen.len());
        for specialization in &record.spezialisierungen {
            let detail: FocusDetail = self.fetch_record(&specialization.url).await?;
            focuses.push(assemble_focus(specialization, &detail, table));
        }
        focuses.sort_by_key(|focus| focus.id);

        ensure_unique_ids(table.as_slice())?;

        Ok(ProgramArtifacts {
            name,
            output_directory: program.output_directory.clone(),
            categories: categories.finish(),
            focuses,
        })
    }

    /// 對模組表中所有模組執行衍生步驟，回傳無法取得詳細資料而略過的數量
    async fn enrich_all(&self, table: &mut ModuleTable) -> Result<usize> {
        let context = DerivationContext {
            current_year: self.current_year,
            overrides: &self.overrides,
        };
        let mut skipped = 0;

        for id in table.ids() {
            let Some(url) = table.get(id).map(|module| module.url.clone()) else {
                continue;
            };
            match self.fetch_record::<ModuleDetail>(&url).await {
                Ok(detail) => enrich_module(table, id, &detail, &context),
                Err(e) if e.is_recoverable_for_detail() => {
                    tracing::warn!("⚠️ Could not get data for module {} with {}: {}", id, url, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(skipped)
    }

    async fn fetch_record<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("Fetching {}", path);
        let value = self.source.fetch(path).await?;
        serde_json::from_value(value).map_err(|e| CurriculumError::MalformedRecord {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// 寫出每個學程的類別與專長方向，以及所有學程共用的模組檔
    pub async fn write(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for program in &dataset.programs {
            let categories_path = format!("{}/{}", program.output_directory, CATEGORIES_FILE);
            self.write_json(&categories_path, &program.categories).await?;
            written.push(categories_path);

            let focuses_path = format!("{}/{}", program.output_directory, FOCUSES_FILE);
            self.write_json(&focuses_path, &program.focuses).await?;
            written.push(focuses_path);
        }

        let modules_path = format!("{}/{}", self.config.output.modules_directory, MODULES_FILE);
        self.write_json(&modules_path, &dataset.modules).await?;
        written.push(modules_path);

        Ok(written)
    }

    async fn write_json<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Result<()> {
        let bytes = to_json_bytes(data)?;
        tracing::debug!("💾 Writing {} ({} bytes)", path, bytes.len());
        self.storage.write_file(path, &bytes).await
    }
}

/// 兩格縮排、保留非 ASCII 字元並以換行結尾
pub fn to_json_bytes<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
    let mut json = serde_json::to_string_pretty(data)?;
    json.push('\n');
    Ok(json.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{OutputConfig, SourceConfig};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EmptyProgramSource;

    #[async_trait]
    impl CurriculumSource for EmptyProgramSource {
        async fn fetch(&self, path: &str) -> Result<serde_json::Value> {
            match path {
                "allStudies/empty.json" => Ok(serde_json::json!({
                    "kredits": [],
                    "zuordnungen": [],
                    "spezialisierungen": []
                })),
                _ => Err(CurriculumError::HttpStatusError {
                    url: path.to_string(),
                    status: 404,
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingStorage {
        paths: Mutex<Vec<String>>,
    }

    impl Storage for RecordingStorage {
        async fn write_file(&self, path: &str, _data: &[u8]) -> Result<()> {
            if let Ok(mut paths) = self.paths.lock() {
                paths.push(path.to_string());
            }
            Ok(())
        }
    }

    fn empty_config() -> CrawlerConfig {
        CrawlerConfig {
            source: SourceConfig {
                base_url: "http://localhost/".to_string(),
                timeout_seconds: None,
                user_agent: None,
            },
            output: OutputConfig::default(),
            study_programs: vec![StudyProgramConfig {
                name: None,
                path: "allStudies/empty.json".to_string(),
                output_directory: "empty".to_string(),
                additional_modules: vec![],
            }],
        }
    }

    #[test]
    fn test_empty_program_still_writes_every_artifact() {
        let engine = CurriculumEngine::new(EmptyProgramSource, RecordingStorage::default(), empty_config());

        let summary = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(summary.programs, 1);
        assert_eq!(summary.modules, 0);
        assert_eq!(
            summary.artifacts,
            vec!["empty/categories.json", "empty/focuses.json", "data/modules.json"]
        );
        assert_eq!(engine.storage.paths.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_to_json_bytes_keeps_umlauts_and_trailing_newline() {
        let bytes = to_json_bytes(&serde_json::json!({"name": "Einführung"})).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n  \"name\": \"Einführung\"\n}\n");
    }
}
