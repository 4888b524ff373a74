use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::{
    validate_non_empty_list, validate_path, validate_relative_source_path, validate_unique_values,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://studien.ost.ch/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub study_programs: Vec<StudyProgramConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_root")]
    pub root: String,
    #[serde(default = "default_modules_directory")]
    pub modules_directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
            modules_directory: default_modules_directory(),
        }
    }
}

fn default_output_root() -> String {
    ".".to_string()
}

fn default_modules_directory() -> String {
    "data".to_string()
}

/// 一個學程：來源路徑、產出目錄，以及需另外併入的獨立模組
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyProgramConfig {
    pub name: Option<String>,
    pub path: String,
    pub output_directory: String,
    #[serde(default)]
    pub additional_modules: Vec<String>,
}

impl StudyProgramConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

impl CrawlerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CurriculumError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CurriculumError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CURRICULUM_BASE_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CurriculumError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_url(&self) -> &str {
        &self.source.base_url
    }

    pub fn output_root(&self) -> &str {
        &self.output.root
    }
}

/// 預設值重現 OST 資訊工程的兩個學程
impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: Some(30),
                user_agent: None,
            },
            output: OutputConfig::default(),
            study_programs: vec![
                StudyProgramConfig {
                    name: Some("Informatik 2023".to_string()),
                    path: "allStudies/10246_I.json".to_string(),
                    output_directory: "data23".to_string(),
                    additional_modules: vec![
                        "allModules/28254_M_MGE.json".to_string(),
                        "allModules/44037_M_IKBH.json".to_string(),
                        "allModules/55066_M_IKBD.json".to_string(),
                    ],
                },
                StudyProgramConfig {
                    name: Some("Informatik 2021".to_string()),
                    path: "allStudies/10191_I.json".to_string(),
                    output_directory: "data21".to_string(),
                    additional_modules: vec!["allModules/28254_M_MGE.json".to_string()],
                },
            ],
        }
    }
}

impl Validate for CrawlerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.source.base_url)?;
        if self.source.timeout_seconds == Some(0) {
            return Err(CurriculumError::InvalidConfigValueError {
                field: "source.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            });
        }

        validate_path("output.root", &self.output.root)?;
        validate_path("output.modules_directory", &self.output.modules_directory)?;

        validate_non_empty_list("study_programs", &self.study_programs)?;
        for program in &self.study_programs {
            validate_relative_source_path("study_programs.path", &program.path)?;
            validate_path("study_programs.output_directory", &program.output_directory)?;
            for module_path in &program.additional_modules {
                validate_relative_source_path("study_programs.additional_modules", module_path)?;
            }
        }

        // 每個學程的產出不可互相覆蓋
        validate_unique_values(
            "study_programs.output_directory",
            self.study_programs
                .iter()
                .map(|program| program.output_directory.as_str()),
        )?;

        Ok(())
    }
}
