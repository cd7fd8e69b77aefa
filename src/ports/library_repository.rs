use crate::domain::{Library, codec::LoadReport};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 蔵書データ保存先ポート
///
/// Library集約のスナップショット全体を読み書きする。
/// アプリケーション層は保存先（ファイル、メモリなど）を知らない。
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// 保存済みのスナップショットを読み込む
    ///
    /// まだ何も保存されていない場合は `None` を返す。
    /// 不正な行は読み飛ばし、`LoadReport` で報告する。
    async fn load(&self) -> Result<Option<(Library, LoadReport)>>;

    /// スナップショット全体を書き出す
    ///
    /// 呼び出し時点の状態を書き出してから戻る。
    /// 失敗してもメモリ上の集約は変更されない。
    async fn save(&self, library: &Library) -> Result<()>;
}
