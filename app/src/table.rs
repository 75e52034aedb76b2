//! Client-side table state: sorting, filtering and pagination
//!
//! Rows live in an immutable snapshot that is only ever replaced wholesale.
//! Filter, sort and paginator settings are view state applied on read.

use crate::models::{Edition, SurahReference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Appended after every cell when building a row's filter text
const FILTER_DELIMITER: char = '◬';

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

pub trait TableRow: Clone {
    /// Column names in display order
    const COLUMNS: &'static [&'static str];

    /// Field names in record order, walked by the text filter
    const FIELDS: &'static [&'static str] = Self::COLUMNS;

    fn cell(&self, column: &str) -> Option<CellValue>;

    /// Default stringification used by the text filter
    fn filter_text(&self) -> String {
        let mut text = String::new();
        for column in Self::FIELDS {
            if let Some(value) = self.cell(column) {
                text.push_str(&value.to_string());
            }
            text.push(FILTER_DELIMITER);
        }
        text.to_lowercase()
    }
}

impl TableRow for SurahReference {
    const COLUMNS: &'static [&'static str] = &[
        "number",
        "englishName",
        "englishNameTranslation",
        "numberOfAyahs",
        "revelationType",
        "name",
    ];

    const FIELDS: &'static [&'static str] = &[
        "number",
        "name",
        "englishName",
        "englishNameTranslation",
        "numberOfAyahs",
        "revelationType",
    ];

    fn cell(&self, column: &str) -> Option<CellValue> {
        match column {
            "number" => Some(self.number.into()),
            "name" => Some(self.name.as_str().into()),
            "englishName" => Some(self.english_name.as_str().into()),
            "englishNameTranslation" => Some(self.english_name_translation.as_str().into()),
            "numberOfAyahs" => Some(self.number_of_ayahs.into()),
            "revelationType" => Some(self.revelation_type.as_str().into()),
            _ => None,
        }
    }
}

impl TableRow for Edition {
    const COLUMNS: &'static [&'static str] =
        &["identifier", "language", "name", "englishName", "format", "type", "direction"];

    fn cell(&self, column: &str) -> Option<CellValue> {
        match column {
            "identifier" => Some(self.identifier.as_str().into()),
            "language" => Some(self.language.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "englishName" => Some(self.english_name.as_str().into()),
            "format" => Some(self.format.as_str().into()),
            "type" => Some(self.edition_type.as_str().into()),
            "direction" => self.direction.map(|d| d.as_str().into()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

/// One rendered page of a table
#[derive(Debug, Clone, Serialize)]
pub struct PageView<R> {
    pub rows: Vec<R>,
    pub page_index: usize,
    pub page_size: usize,
    /// Rows remaining after filtering
    pub length: usize,
    pub range_label: String,
}

impl<R> PageView<R> {
    pub fn page_count(&self) -> usize {
        page_count(self.length, self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct DataTable<R> {
    data: Arc<[R]>,
    loaded_at: Option<DateTime<Utc>>,
    filter: String,
    sort: Option<Sort>,
    page_index: usize,
    page_size: usize,
}

impl<R: TableRow> Default for DataTable<R> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<R: TableRow> DataTable<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            data: Arc::from(Vec::new()),
            loaded_at: None,
            filter: String::new(),
            sort: None,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Swap in a new snapshot; view settings carry over
    pub fn replace_data(&mut self, rows: Vec<R>) {
        self.data = Arc::from(rows);
        self.loaded_at = Some(Utc::now());
        self.page_index = self.page_index.min(self.last_page_index());
    }

    pub fn data(&self) -> Arc<[R]> {
        Arc::clone(&self.data)
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Trim and lower-case the filter, then go back to the first page
    pub fn set_filter(&mut self, raw: &str) {
        self.filter = raw.trim().to_lowercase();
        self.first_page();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort_by(&mut self, column: &str, direction: SortDirection) {
        self.sort = Some(Sort { column: column.to_string(), direction });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Keeps the first row of the current page visible
    pub fn set_page_size(&mut self, page_size: usize) {
        let start = self.page_index * self.page_size;
        self.page_size = page_size.max(1);
        self.page_index = start / self.page_size;
    }

    pub fn set_page(&mut self, index: usize) {
        self.page_index = index.min(self.last_page_index());
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn last_page(&mut self) {
        self.page_index = self.last_page_index();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Filtered rows in sort order
    pub fn filtered_rows(&self) -> Vec<R> {
        let mut rows: Vec<R> = if self.filter.is_empty() {
            self.data.to_vec()
        } else {
            self.data
                .iter()
                .filter(|row| row.filter_text().contains(&self.filter))
                .cloned()
                .collect()
        };

        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.cell(&sort.column), b.cell(&sort.column));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn page(&self) -> PageView<R> {
        let rows = self.filtered_rows();
        let length = rows.len();
        let page_index = self.page_index.min(last_page_index(length, self.page_size));
        let start = page_index * self.page_size;

        PageView {
            rows: rows.into_iter().skip(start).take(self.page_size).collect(),
            page_index,
            page_size: self.page_size,
            length,
            range_label: range_label(page_index, self.page_size, length),
        }
    }

    fn last_page_index(&self) -> usize {
        last_page_index(self.filtered_len(), self.page_size)
    }

    fn filtered_len(&self) -> usize {
        if self.filter.is_empty() {
            self.data.len()
        } else {
            self.data
                .iter()
                .filter(|row| row.filter_text().contains(&self.filter))
                .count()
        }
    }
}

fn page_count(length: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        length.div_ceil(page_size)
    }
}

fn last_page_index(length: usize, page_size: usize) -> usize {
    page_count(length, page_size).saturating_sub(1)
}

/// `"11 – 20 of 114"`, or `"0 of N"` for an empty table
pub fn range_label(page_index: usize, page_size: usize, length: usize) -> String {
    if length == 0 || page_size == 0 {
        return format!("0 of {}", length);
    }
    let start = page_index * page_size;
    let end = if start < length {
        (start + page_size).min(length)
    } else {
        start + page_size
    };
    format!("{} – {} of {}", start + 1, end, length)
}

/// Missing values first, numbers numerically, everything else as text
fn compare_cells(a: Option<CellValue>, b: Option<CellValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevelationType;

    fn surah(number: u32, english_name: &str) -> SurahReference {
        SurahReference {
            number,
            name: format!("سورة {}", number),
            english_name: english_name.to_string(),
            english_name_translation: format!("Translation {}", number),
            number_of_ayahs: 300 - number,
            revelation_type: if number % 2 == 0 { RevelationType::Medinan } else { RevelationType::Meccan },
        }
    }

    fn all_surahs() -> Vec<SurahReference> {
        (1..=114)
            .map(|n| match n {
                36 => surah(n, "Yaseen"),
                _ => surah(n, &format!("Surah-{}", n)),
            })
            .collect()
    }

    fn numbers(view: &PageView<SurahReference>) -> Vec<u32> {
        view.rows.iter().map(|r| r.number).collect()
    }

    #[test]
    fn test_pagination_over_114_surahs() {
        let mut table = DataTable::new(10);
        table.replace_data(all_surahs());

        let first = table.page();
        assert_eq!(numbers(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(first.range_label, "1 – 10 of 114");
        assert_eq!(first.page_count(), 12);

        table.last_page();
        let last = table.page();
        assert_eq!(last.page_index, 11);
        assert_eq!(numbers(&last), vec![111, 112, 113, 114]);
        assert_eq!(last.range_label, "111 – 114 of 114");
    }

    #[test]
    fn test_filter_is_trimmed_and_lowercased() {
        let mut padded = DataTable::new(10);
        padded.replace_data(all_surahs());
        padded.set_filter("  Yasin  ");

        let mut plain = DataTable::new(10);
        plain.replace_data(all_surahs());
        plain.set_filter("yasin");

        assert_eq!(padded.filter(), "yasin");
        assert_eq!(numbers(&padded.page()), numbers(&plain.page()));

        padded.set_filter("  YASEEN ");
        assert_eq!(numbers(&padded.page()), vec![36]);
    }

    #[test]
    fn test_filter_resets_to_first_page() {
        let mut table = DataTable::new(10);
        table.replace_data(all_surahs());
        table.set_page(5);
        assert_eq!(table.page_index(), 5);

        table.set_filter("surah-1");
        assert_eq!(table.page_index(), 0);
        // 1, 10-19, 100-114
        assert_eq!(table.page().length, 26);
    }

    #[test]
    fn test_filter_matches_any_column() {
        let mut table = DataTable::new(200);
        table.replace_data(all_surahs());
        table.set_filter("medinan");
        assert_eq!(table.page().length, 57);
    }

    #[test]
    fn test_filter_text_follows_field_order() {
        let row = surah(36, "Yaseen");
        assert_eq!(
            row.filter_text(),
            "36◬سورة 36◬yaseen◬translation 36◬264◬medinan◬"
        );

        let mut table = DataTable::new(10);
        table.replace_data(vec![surah(1, "Al-Faatiha")]);
        table.set_filter("1◬سورة");
        assert_eq!(table.page().length, 1);
        table.set_filter("meccan◬سورة");
        assert_eq!(table.page().length, 0);
    }

    #[test]
    fn test_sort_numeric_and_text() {
        let mut table = DataTable::new(3);
        table.replace_data(vec![surah(2, "b"), surah(10, "c"), surah(1, "a")]);

        table.sort_by("number", SortDirection::Asc);
        assert_eq!(numbers(&table.page()), vec![1, 2, 10]);

        table.sort_by("number", SortDirection::Desc);
        assert_eq!(numbers(&table.page()), vec![10, 2, 1]);

        table.sort_by("englishName", SortDirection::Desc);
        assert_eq!(numbers(&table.page()), vec![10, 2, 1]);

        table.clear_sort();
        assert_eq!(numbers(&table.page()), vec![2, 10, 1]);
    }

    #[test]
    fn test_replace_data_is_wholesale_and_clamps_page() {
        let mut table = DataTable::new(10);
        table.replace_data(all_surahs());
        let before = table.data();
        table.last_page();

        table.replace_data(all_surahs().into_iter().take(15).collect());
        assert_eq!(before.len(), 114);
        assert_eq!(table.data().len(), 15);
        assert_eq!(table.page_index(), 1);
        assert_eq!(numbers(&table.page()), vec![11, 12, 13, 14, 15]);
        assert!(table.loaded_at().is_some());
    }

    #[test]
    fn test_page_size_change_keeps_first_row() {
        let mut table = DataTable::new(10);
        table.replace_data(all_surahs());
        table.set_page(3);
        table.set_page_size(25);
        assert_eq!(table.page_index(), 1);
        assert_eq!(table.page().rows[0].number, 26);
    }

    #[test]
    fn test_range_label_edges() {
        assert_eq!(range_label(0, 10, 0), "0 of 0");
        assert_eq!(range_label(0, 10, 4), "1 – 4 of 4");
        assert_eq!(range_label(2, 10, 15), "21 – 30 of 15");
    }

    #[test]
    fn test_edition_filter_text() {
        let edition: Edition = serde_json::from_value(serde_json::json!({
            "identifier": "en.asad", "language": "en", "name": "Asad",
            "englishName": "Muhammad Asad", "format": "text", "type": "translation",
            "direction": "ltr"
        }))
        .unwrap();
        assert_eq!(
            edition.filter_text(),
            "en.asad◬en◬asad◬muhammad asad◬text◬translation◬ltr◬"
        );
    }
}
