pub mod library_repository;

pub use library_repository::LibraryRepository as InMemoryLibraryRepository;
