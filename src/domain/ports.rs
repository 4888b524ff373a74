use crate::utils::error::Result;
use async_trait::async_trait;

/// 課程資料來源，依相對路徑取得已解析的 JSON 紀錄
#[async_trait]
pub trait CurriculumSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<serde_json::Value>;
}

/// 產出檔案的儲存位置
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
