use serde::Serialize;
use std::fmt;

use crate::domain::{ItemId, Library, Member};

/// 蔵書ごとの累計貸出回数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowCount {
    pub item_id: ItemId,
    pub title: String,
    pub count: usize,
}

impl fmt::Display for BorrowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} times borrowed", self.title, self.count)
    }
}

/// 統計情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryStatistics {
    /// 未返却の貸出が最も多い会員
    pub most_active_borrower: Option<Member>,
    /// 全蔵書の累計貸出回数（ID昇順）
    pub borrow_counts: Vec<BorrowCount>,
}

/// 統計情報を集計する
pub fn library_statistics(library: &Library) -> LibraryStatistics {
    let borrow_counts = library
        .list_items()
        .into_iter()
        .map(|item| BorrowCount {
            count: library.borrow_count_of(&item.id),
            item_id: item.id,
            title: item.title,
        })
        .collect();

    LibraryStatistics {
        most_active_borrower: library.most_active_borrower(),
        borrow_counts,
    }
}

impl fmt::Display for LibraryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.most_active_borrower {
            Some(member) => writeln!(f, "Most active borrower: {}", member.name)?,
            None => writeln!(f, "Most active borrower: none")?,
        }
        write!(f, "Book borrow counts:")?;
        for count in &self.borrow_counts {
            write!(f, "\n{}", count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::library::sample::sample_library;
    use crate::domain::MemberId;
    use chrono::NaiveDate;

    #[test]
    fn test_statistics_report() {
        let mut library = sample_library();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        library
            .borrow(MemberId::new(2), &ItemId::new("B001"), today)
            .unwrap();
        library
            .return_item(MemberId::new(2), &ItemId::new("B001"))
            .unwrap();
        library
            .borrow(MemberId::new(3), &ItemId::new("B001"), today)
            .unwrap();

        let stats = library_statistics(&library);
        assert_eq!(stats.most_active_borrower.as_ref().unwrap().name, "Charlie");
        assert_eq!(
            stats.to_string(),
            "Most active borrower: Charlie
Book borrow counts:
The Hobbit: 2 times borrowed
Clean Code: 0 times borrowed
Algorithms Illustrated: 0 times borrowed
Java Basics: 0 times borrowed"
        );
    }

    #[test]
    fn test_statistics_without_active_borrows() {
        let stats = library_statistics(&sample_library());
        assert_eq!(stats.most_active_borrower, None);
        assert_eq!(stats.borrow_counts.len(), 4);
        assert!(stats.borrow_counts.iter().all(|count| count.count == 0));
    }
}
