use thiserror::Error;

use crate::domain::{ItemId, MemberId};

/// 蔵書管理アプリケーション層のエラー
///
/// `Display` はそのまま利用者に表示できる文言。
/// いずれも回復可能で、集約は引き続き利用できる。
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 会員が存在しない
    #[error("Error: Member with ID {0} does not exist.")]
    MemberNotFound(MemberId),

    /// 蔵書が存在しない
    #[error("Error: Book with ID {0} not found.")]
    ItemNotFound(ItemId),

    /// 貸出可能な在庫がない
    #[error("Failed: No available copies of \"{title}\". (Available:{available}/{total})")]
    NoCopiesAvailable {
        title: String,
        available: u32,
        total: u32,
    },

    /// 同じ蔵書を返却せずに借りている
    #[error("Failed: Member \"{member}\" already borrowed \"{title}\" and hasn't returned it.")]
    AlreadyBorrowed { member: String, title: String },

    /// 該当する未返却の貸出がない
    #[error("Failed: Member \"{member}\" has no active borrow record for book {item_id}.")]
    NoActiveBorrow { member: String, item_id: ItemId },

    /// 蔵書IDが登録済み
    #[error("Error: Book ID {0} already exists.")]
    DuplicateItem(ItemId),

    /// 会員IDが登録済み
    #[error("Error: Member ID {0} already exists.")]
    DuplicateMember(MemberId),

    /// 入力値が不正
    #[error("Error: {0}")]
    InvalidInput(String),

    /// 保存先の読み書きに失敗した
    #[error("Error: library storage failed: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            LibraryApplicationError::MemberNotFound(MemberId::new(99)).to_string(),
            "Error: Member with ID 99 does not exist."
        );
        assert_eq!(
            LibraryApplicationError::NoCopiesAvailable {
                title: "Clean Code".to_string(),
                available: 0,
                total: 2,
            }
            .to_string(),
            "Failed: No available copies of \"Clean Code\". (Available:0/2)"
        );
        assert_eq!(
            LibraryApplicationError::NoActiveBorrow {
                member: "Alice".to_string(),
                item_id: ItemId::new("B001"),
            }
            .to_string(),
            "Failed: Member \"Alice\" has no active borrow record for book B001."
        );
    }

    #[test]
    fn test_persistence_error_keeps_source() {
        let io = std::io::Error::other("disk full");
        let err = LibraryApplicationError::Persistence(Box::new(io));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Error: library storage failed: disk full");
    }
}
