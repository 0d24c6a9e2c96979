//! Plain-text tables for terminal output

use chrono::NaiveDateTime;

const EMPTY: &str = "-";

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();
        out.push_str(&line(&self.headers, &widths));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&line(&rule, &widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row, &widths));
        }
        out
    }
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    padded.join(" | ").trim_end().to_string()
}

/// `label: value` lines for a single entity
pub fn details(fields: &[(&str, String)]) -> String {
    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| {
            let pad = width - label.chars().count();
            format!("{}:{} {}", label, " ".repeat(pad), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Страница 2 из 3 (всего 25)"
pub fn page_footer(display_page: u32, total_pages: u32, total_elements: u64) -> String {
    format!(
        "Страница {} из {} (всего {})",
        display_page,
        total_pages.max(1),
        total_elements
    )
}

pub fn opt(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

pub fn datetime(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

pub fn yes_no(value: bool) -> String {
    let text = if value { "да" } else { "нет" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_table_aligns_multibyte_cells() {
        let mut table = Table::new(&["Модель", "Статус"]);
        table.push(vec!["HP 85A".into(), "На складе".into()]);
        table.push(vec!["Canon 725".into(), "-".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Модель    | Статус");
        assert_eq!(lines[1], "--------- | ---------");
        assert_eq!(lines[2], "HP 85A    | На складе");
        assert_eq!(lines[3], "Canon 725 | -");
    }

    #[test]
    fn test_details_block() {
        let text = details(&[("Имя", "Склад".into()), ("Адрес", "ул. Мира, 5".into())]);
        assert_eq!(text, "Имя:   Склад\nАдрес: ул. Мира, 5");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(opt(None), "-");
        assert_eq!(opt(Some("  ")), "-");
        assert_eq!(opt(Some("A4")), "A4");
        assert_eq!(page_footer(1, 0, 0), "Страница 1 из 1 (всего 0)");

        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(datetime(Some(dt)), "09.03.2024 14:05");
        assert_eq!(datetime(None), "-");
        assert_eq!(yes_no(true), "да");
    }
}
