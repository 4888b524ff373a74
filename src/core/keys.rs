//! 將來源代碼轉換成圖中使用的短代碼

const MODULE_PREFIX: &str = "M_";
const PROJECT_SUFFIX: &str = "_p";
const CATEGORY_PREFIXES: [&str; 3] = ["I-", "I_", "Kat_"];

/// 只在學分簿記中出現的輔助類別
pub const LEGACY_HELPER_CATEGORY: &str = "IKTS-help";
pub const LEGACY_HELPER_CATEGORY_KEY: &str = "GWRIKTS";
/// `GWRIKTS` 的模組歸入此類別
pub const GENERAL_STUDIES_CATEGORY_KEY: &str = "gwr";
/// 來源也把類別以模組形式列出，這些代碼以此開頭
pub const CATEGORY_MODULE_MARKER: &str = "Kat";

pub fn normalize_module_key(raw: &str) -> String {
    raw.strip_prefix(MODULE_PREFIX)
        .unwrap_or(raw)
        .replace(PROJECT_SUFFIX, "p")
}

pub fn normalize_category_key(raw: &str) -> String {
    let stripped = CATEGORY_PREFIXES
        .iter()
        .fold(raw, |key, prefix| key.strip_prefix(prefix).unwrap_or(key));
    stripped.replace(LEGACY_HELPER_CATEGORY, LEGACY_HELPER_CATEGORY_KEY)
}

pub fn is_project_variant(raw: &str) -> bool {
    raw.ends_with(PROJECT_SUFFIX)
}

/// 專長方向中仍使用舊代碼的模組
pub fn remap_focus_module_key(short_key: String) -> String {
    match short_key.as_str() {
        "WIoT" => "WsoT".to_string(),
        _ => short_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_module_key() {
        assert_eq!(normalize_module_key("M_SE1"), "SE1");
        assert_eq!(normalize_module_key("M_BAI21_p"), "BAI21p");
        assert_eq!(normalize_module_key("Inno_2"), "Inno_2");
        assert_eq!(normalize_module_key("Kat_GWR"), "Kat_GWR");
    }

    #[test]
    fn test_normalize_category_key() {
        assert_eq!(normalize_category_key("I-KTech"), "KTech");
        assert_eq!(normalize_category_key("I_Inf"), "Inf");
        assert_eq!(normalize_category_key("Kat_gwr"), "gwr");
        assert_eq!(normalize_category_key("IKTS-help"), "GWRIKTS");
        assert_eq!(normalize_category_key("I-Kat_EIP"), "EIP");
    }

    #[test]
    fn test_project_variant_and_focus_remap() {
        assert!(is_project_variant("M_IKBH_p"));
        assert!(!is_project_variant("M_IKBH"));
        assert_eq!(remap_focus_module_key("WIoT".to_string()), "WsoT");
        assert_eq!(remap_focus_module_key("SE1".to_string()), "SE1");
    }
}
