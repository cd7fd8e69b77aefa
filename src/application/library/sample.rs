use crate::domain::{CatalogItem, ItemId, Library, Member, MemberId};

/// 見本データ入りの集約
///
/// 保存データがない初回起動時に使う。
pub fn sample_library() -> Library {
    let mut library = Library::new();

    library.add_item(CatalogItem::printed(
        ItemId::new("B001"),
        "The Hobbit",
        "J.R.R. Tolkien",
        5,
    ));
    library.add_item(CatalogItem::printed(
        ItemId::new("B002"),
        "Clean Code",
        "Robert C. Martin",
        2,
    ));
    library.add_item(CatalogItem::electronic(
        ItemId::new("E100"),
        "Java Basics",
        "Some Author",
    ));
    library.add_item(CatalogItem::printed(
        ItemId::new("B003"),
        "Algorithms Illustrated",
        "Jane Doe",
        1,
    ));

    library.add_member(Member::new(MemberId::new(1), "Alice"));
    library.add_member(Member::new(MemberId::new(2), "Bob"));
    library.add_member(Member::new(MemberId::new(3), "Charlie"));

    library
}
