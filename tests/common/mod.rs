use chrono::NaiveDate;
use library_catalog::adapters::memory::InMemoryLibraryRepository;
use library_catalog::application::library::ServiceDependencies;
use std::sync::Arc;

/// テスト用の依存関係を作成
///
/// 保存先はメモリ上のリポジトリ。テスト側から保存内容を確認・操作できるよう、
/// リポジトリ本体も返す。
#[allow(dead_code)]
pub fn in_memory_deps(
    repository: InMemoryLibraryRepository,
) -> (Arc<InMemoryLibraryRepository>, ServiceDependencies) {
    let repository = Arc::new(repository);
    let deps = ServiceDependencies {
        repository: repository.clone(),
    };
    (repository, deps)
}

/// 2024年3月の日付
#[allow(dead_code)]
pub fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date")
}
