//! Library集約の行指向テキスト形式
//!
//! ```text
//! # Books
//! BOOK,PRINTED,<id>,<title>,<author>,<totalCopies>
//! BOOK,EBOOK,<id>,<title>,<author>,0
//!
//! # Members
//! MEMBER,<id>,<name>
//!
//! # BorrowRecords
//! RECORD,<itemId>,<memberId>,<borrowDate>,<dueDate>,<returned>
//! ```
//!
//! `#` で始まる行と空行は無視する。区切り文字のエスケープはない。

use chrono::NaiveDate;
use std::str::FromStr;

use super::{
    CatalogItem, EncodeError, ItemFormat, ItemId, Library, LoanEntry, Member, MemberId,
    RecordError,
};

const DELIMITER: char = ',';

/// 読み飛ばした行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1始まりの行番号
    pub line_number: usize,
    pub line: String,
    pub reason: RecordError,
}

/// 読み込み結果の診断情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// 集約全体をテキストに書き出す
///
/// 蔵書 → 会員 → 貸出台帳の順。台帳は挿入順のまま。
pub fn encode(library: &Library) -> Result<String, EncodeError> {
    let mut lines = vec!["# Books".to_string()];
    for item in library.list_items() {
        let id = checked("book id", item.id.value())?;
        let title = checked("title", &item.title)?;
        let author = checked("author", &item.author)?;
        lines.push(match item.format {
            ItemFormat::Printed { total_copies, .. } => {
                format!("BOOK,PRINTED,{},{},{},{}", id, title, author, total_copies)
            }
            ItemFormat::Electronic => format!("BOOK,EBOOK,{},{},{},0", id, title, author),
        });
    }

    lines.push(String::new());
    lines.push("# Members".to_string());
    for member in library.list_members() {
        let name = checked("member name", &member.name)?;
        lines.push(format!("MEMBER,{},{}", member.id, name));
    }

    lines.push(String::new());
    lines.push("# BorrowRecords".to_string());
    for entry in library.ledger() {
        lines.push(format!(
            "RECORD,{},{},{},{},{}",
            entry.item_id, entry.member_id, entry.borrow_date, entry.due_date, entry.returned
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}

/// テキストから集約を復元する
///
/// 蔵書と会員を先に復元し、その後で貸出台帳を復元する
/// （ファイル内で台帳の行が先に現れても参照を解決できる）。
/// 不正な行や参照先のない行は読み飛ばし、`LoadReport` に記録する。
pub fn decode(text: &str) -> (Library, LoadReport) {
    let mut library = Library::new();
    let mut report = LoadReport::default();
    let mut entries = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(ParsedLine::Item(item)) => {
                library.add_item(item);
            }
            Ok(ParsedLine::Member(member)) => {
                library.add_member(member);
            }
            Ok(ParsedLine::Entry(entry)) => entries.push((index + 1, line, entry)),
            Err(reason) => report.skipped.push(SkippedLine {
                line_number: index + 1,
                line: line.to_string(),
                reason,
            }),
        }
    }

    for (line_number, line, entry) in entries {
        if let Err(reason) = library.restore_entry(entry) {
            report.skipped.push(SkippedLine {
                line_number,
                line: line.to_string(),
                reason,
            });
        }
    }
    report.skipped.sort_by_key(|skipped| skipped.line_number);

    (library, report)
}

enum ParsedLine {
    Item(CatalogItem),
    Member(Member),
    Entry(LoanEntry),
}

fn parse_line(line: &str) -> Result<ParsedLine, RecordError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    match fields[0] {
        "BOOK" => parse_book(&fields).map(ParsedLine::Item),
        "MEMBER" => parse_member(&fields).map(ParsedLine::Member),
        "RECORD" => parse_record(&fields).map(ParsedLine::Entry),
        other => Err(RecordError::UnknownKind(other.to_string())),
    }
}

fn parse_book(fields: &[&str]) -> Result<CatalogItem, RecordError> {
    require_fields("BOOK", fields, 5)?;
    let id = ItemId::from_stored(fields[2].trim());
    let (title, author) = (fields[3], fields[4]);

    match fields[1] {
        "PRINTED" => {
            require_fields("BOOK,PRINTED", fields, 6)?;
            let total_copies = parse_number("total copies", fields[5])?;
            Ok(CatalogItem::printed(id, title, author, total_copies))
        }
        // 末尾の冊数フィールドは読み込み時に無視する
        "EBOOK" => Ok(CatalogItem::electronic(id, title, author)),
        other => Err(RecordError::UnknownBookKind(other.to_string())),
    }
}

fn parse_member(fields: &[&str]) -> Result<Member, RecordError> {
    require_fields("MEMBER", fields, 3)?;
    let id = parse_number("member id", fields[1])?;
    Ok(Member::new(MemberId::new(id), fields[2]))
}

fn parse_record(fields: &[&str]) -> Result<LoanEntry, RecordError> {
    require_fields("RECORD", fields, 6)?;
    let item_id = ItemId::from_stored(fields[1].trim());
    let member_id = MemberId::new(parse_number("member id", fields[2])?);
    let borrow_date = parse_date(fields[3])?;
    let due_date = parse_date(fields[4])?;
    let returned = parse_flag(fields[5])?;

    Ok(LoanEntry::restore(
        item_id,
        member_id,
        borrow_date,
        due_date,
        returned,
    ))
}

fn require_fields(kind: &str, fields: &[&str], expected: usize) -> Result<(), RecordError> {
    if fields.len() < expected {
        return Err(RecordError::MissingFields {
            kind: kind.to_string(),
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_date(value: &str) -> Result<NaiveDate, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidDate(value.to_string()))
}

fn parse_flag(value: &str) -> Result<bool, RecordError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(RecordError::InvalidFlag(value.to_string())),
    }
}

fn checked<'a>(field: &'static str, value: &'a str) -> Result<&'a str, EncodeError> {
    if value.contains([DELIMITER, '\n', '\r']) {
        return Err(EncodeError::DelimiterInField {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}
