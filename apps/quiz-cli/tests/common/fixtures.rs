//! Question bank files for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Spreadsheet bank with Chinese headers: two single-select questions and
/// one multi-select question.
pub fn spreadsheet_bank(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{name}.csv"));
    let content = "题干,选项A,选项B,选项C,选项D,答案,解析\n\
                   Which gas do plants absorb?,Oxygen,Carbon dioxide,Nitrogen,,B,Used in photosynthesis\n\
                   Which are primary colours?,Red,Green,Blue,Purple,\"A,B,C\",\n\
                   How many legs does a spider have?,Six,Eight,Ten,,B,\n";
    fs::write(&path, content).expect("write spreadsheet bank");
    path
}

/// Structured document bank with `num_questions` single-select questions.
///
/// Question N has four options and answer `B`.
pub fn document_bank(dir: &Path, name: &str, num_questions: usize) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    let questions: Vec<String> = (1..=num_questions)
        .map(|n| {
            format!(
                r#"{{"stem": "Question {n}", "option_a": "a{n}", "option_b": "b{n}", "option_c": "c{n}", "option_d": "d{n}", "answer": "B"}}"#
            )
        })
        .collect();
    fs::write(&path, format!("[{}]", questions.join(",\n"))).expect("write document bank");
    path
}

/// Bank lacking the answer column.
pub fn bank_without_answers(dir: &Path) -> PathBuf {
    let path = dir.join("broken.csv");
    fs::write(&path, "stem,option_a,option_b\nQ,a,b\n").expect("write broken bank");
    path
}

/// Workbook bank (first worksheet) with one single-select and one
/// multi-select question.
pub fn workbook_bank(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{name}.xlsx"));
    let rows: [[&str; 6]; 3] = [
        ["题干", "选项A", "选项B", "选项C", "答案", "类型"],
        ["Boiling point of water at sea level?", "90 °C", "100 °C", "110 °C", "B", "单选"],
        ["Which are noble gases?", "Helium", "Neon", "Oxygen", "AB", "多选"],
    ];

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet
                .write_string(r as u32, c as u16, *value)
                .expect("write workbook cell");
        }
    }
    workbook.save(&path).expect("save workbook bank");
    path
}
