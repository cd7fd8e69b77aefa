use library_catalog::adapters::memory::InMemoryLibraryRepository;
use library_catalog::application::library::{
    LibraryApplicationError, borrow_item, library_statistics, member_loans, open_library,
    search_items,
    register_item, register_member, return_item, save_library,
};
use library_catalog::domain::commands::*;
use library_catalog::domain::{Copies, ItemId, Library, MemberId, RecordError};

mod common;

use common::{in_memory_deps, march};

fn borrow(member: i32, item: &str, day: u32) -> BorrowItem {
    BorrowItem {
        member_id: MemberId::new(member),
        item_id: ItemId::new(item),
        borrowed_on: march(day),
    }
}

fn give_back(member: i32, item: &str) -> ReturnItem {
    ReturnItem {
        member_id: MemberId::new(member),
        item_id: ItemId::new(item),
    }
}

fn copies(library: &Library, item: &str) -> Copies {
    library.item(&ItemId::new(item)).unwrap().copies()
}

// ============================================================================
// 起動
// ============================================================================

#[tokio::test]
async fn test_open_without_snapshot_starts_empty() {
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::new());

    let (library, report) = open_library(&deps, false).await.unwrap();
    assert_eq!(library, Library::new());
    assert!(report.is_clean());
}

#[tokio::test]
async fn test_open_without_snapshot_can_seed_sample_catalog() {
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::new());

    let (library, _) = open_library(&deps, true).await.unwrap();
    assert_eq!(library.list_items().len(), 4);
    assert_eq!(library.list_members().len(), 3);
    assert!(library.ledger().is_empty());
}

#[tokio::test]
async fn test_open_existing_snapshot_ignores_seed_flag() {
    let snapshot = "BOOK,PRINTED,B001,The Hobbit,J.R.R. Tolkien,5\nMEMBER,1,Alice\n";
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::with_snapshot(snapshot));

    let (library, _) = open_library(&deps, true).await.unwrap();
    assert_eq!(library.list_items().len(), 1);
    assert_eq!(library.list_members().len(), 1);
}

#[tokio::test]
async fn test_open_reports_skipped_lines() {
    let snapshot = "\
# Books
BOOK,PRINTED,B001,The Hobbit,J.R.R. Tolkien,5
BOOK,PRINTED,B002,Clean Code,Robert C. Martin,two

# Members
MEMBER,1,Alice

# BorrowRecords
RECORD,B001,1,2024-03-01,2024-03-15,false
RECORD,B002,1,2024-03-01,2024-03-15,false
";
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::with_snapshot(snapshot));

    let (library, report) = open_library(&deps, false).await.unwrap();
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.skipped[0].line_number, 3);
    assert_eq!(
        report.skipped[1].reason,
        RecordError::MissingItem(ItemId::new("B002"))
    );
    assert_eq!(library.ledger().len(), 1);
    assert_eq!(
        copies(&library, "B001"),
        Copies::Limited {
            available: 4,
            total: 5
        }
    );
}

// ============================================================================
// 業務シナリオ
// ============================================================================

#[tokio::test]
async fn test_full_session_round_trips_through_storage() {
    let (repository, deps) = in_memory_deps(InMemoryLibraryRepository::new());
    let (mut library, _) = open_library(&deps, true).await.unwrap();

    register_item(
        &mut library,
        RegisterItem {
            id: "b010".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            format: NewItemFormat::Printed { total_copies: 2 },
        },
    )
    .unwrap();
    register_member(
        &mut library,
        RegisterMember {
            id: MemberId::new(4),
            name: "Dana".to_string(),
        },
    )
    .unwrap();

    borrow_item(&mut library, borrow(4, "B010", 1)).unwrap();
    borrow_item(&mut library, borrow(1, "B010", 2)).unwrap();
    borrow_item(&mut library, borrow(1, "E100", 3)).unwrap();
    return_item(&mut library, give_back(4, "B010")).unwrap();

    save_library(&deps, &library).await.unwrap();
    assert!(repository.snapshot().await.unwrap().contains("BOOK,PRINTED,B010,Dune"));

    let (reloaded, report) = open_library(&deps, false).await.unwrap();
    assert!(report.is_clean());
    assert_eq!(reloaded, library);
    assert_eq!(
        copies(&reloaded, "B010"),
        Copies::Limited {
            available: 1,
            total: 2
        }
    );

    // 復元後も日付は元のまま
    let loans = member_loans(&reloaded, MemberId::new(1), march(4)).unwrap().loans;
    let dates: Vec<_> = loans.iter().map(|loan| (loan.borrow_date, loan.due_date)).collect();
    assert_eq!(dates, vec![(march(2), march(16)), (march(3), march(17))]);

    // 復元後も重複貸出の防止が効く
    let mut reloaded = reloaded;
    for item in ["B010", "E100"] {
        let err = borrow_item(&mut reloaded, borrow(1, item, 5)).unwrap_err();
        assert!(matches!(err, LibraryApplicationError::AlreadyBorrowed { .. }));
    }

    assert_eq!(search_items(&reloaded, "dune").items.len(), 1);

    let stats = library_statistics(&reloaded);
    assert_eq!(stats.most_active_borrower.unwrap().name, "Alice");
}

#[tokio::test]
async fn test_borrow_unknown_member_changes_nothing() {
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::new());
    let (mut library, _) = open_library(&deps, true).await.unwrap();
    let before = library.clone();

    let err = borrow_item(&mut library, borrow(99, "B001", 1)).unwrap_err();
    assert!(matches!(err, LibraryApplicationError::MemberNotFound(_)));
    assert_eq!(library, before);
}

#[tokio::test]
async fn test_borrow_return_borrow_restores_counts() {
    let (_, deps) = in_memory_deps(InMemoryLibraryRepository::new());
    let (mut library, _) = open_library(&deps, true).await.unwrap();

    let receipt = borrow_item(&mut library, borrow(1, "B001", 1)).unwrap();
    assert_eq!(
        receipt.event.copies,
        Copies::Limited {
            available: 4,
            total: 5
        }
    );
    return_item(&mut library, give_back(1, "B001")).unwrap();
    assert_eq!(
        copies(&library, "B001"),
        Copies::Limited {
            available: 5,
            total: 5
        }
    );
    borrow_item(&mut library, borrow(1, "B001", 2)).unwrap();
    assert_eq!(library.borrow_count_of(&ItemId::new("B001")), 2);
}

// ============================================================================
// 保存の失敗
// ============================================================================

#[tokio::test]
async fn test_failed_save_is_surfaced_and_library_stays_usable() {
    let (repository, deps) = in_memory_deps(InMemoryLibraryRepository::new());
    let (mut library, _) = open_library(&deps, true).await.unwrap();
    save_library(&deps, &library).await.unwrap();
    let saved = repository.snapshot().await;

    borrow_item(&mut library, borrow(2, "B002", 1)).unwrap();
    repository.fail_saves(true).await;

    let err = save_library(&deps, &library).await.unwrap_err();
    assert!(matches!(err, LibraryApplicationError::Persistence(_)));
    assert_eq!(repository.snapshot().await, saved);

    // 集約は引き続き利用できる
    return_item(&mut library, give_back(2, "B002")).unwrap();
    repository.fail_saves(false).await;
    save_library(&deps, &library).await.unwrap();

    let (reloaded, _) = open_library(&deps, false).await.unwrap();
    assert_eq!(reloaded.ledger().len(), 1);
    assert!(reloaded.ledger()[0].returned);
}
