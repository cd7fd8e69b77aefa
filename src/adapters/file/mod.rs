pub mod library_repository;

// パブリックに型を再エクスポート
pub use library_repository::LibraryRepository as FileLibraryRepository;
