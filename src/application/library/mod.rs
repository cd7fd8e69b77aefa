mod catalog;
mod errors;
mod library_service;
mod queries;
mod sample;
mod statistics;

pub use catalog::{
    ItemListing, MemberListing, MostActiveBorrower, SearchResults, SortKey, SortedItems,
    borrow_count, list_items, list_members, most_active_borrower, search_items, sorted_items,
};
pub use errors::{LibraryApplicationError, Result};
pub use library_service::{
    BorrowReceipt, ItemRegistered, MemberRegistered, ReturnReceipt, ServiceDependencies,
    borrow_item, open_library, register_item, register_member, return_item, save_library, today,
};
pub use queries::{LoanView, MemberLoans, member_loans, overdue_loans};
pub use sample::sample_library;
pub use statistics::{BorrowCount, LibraryStatistics, library_statistics};
