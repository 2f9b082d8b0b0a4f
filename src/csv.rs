// src/csv.rs
use std::io::{self, Write};

use crate::data::SearchOutcome;

/// Column order for tabular exports.
pub const HEADERS: [&str; 14] = [
    "Поисковый запрос",
    "Название",
    "ИНН",
    "ОГРН",
    "КПП",
    "ОКВЭД",
    "Доп. ОКВЭД",
    "Адрес",
    "Телефон",
    "Email",
    "Руководитель",
    "Статус",
    "Дата регистрации",
    "Ошибка",
];

/// Name cell for queries nothing was resolved for.
pub const NOT_FOUND: &str = "Не найдено";

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Outcome rows ---------------- */

/// One export row, aligned with `HEADERS`.
pub fn outcome_row(outcome: &SearchOutcome) -> Vec<String> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();

    match &outcome.organization {
        Some(org) => vec![
            outcome.query.clone(),
            org.name.clone(),
            opt(&org.inn),
            opt(&org.ogrn),
            opt(&org.kpp),
            opt(&org.okved),
            org.okved_additional.join("; "),
            opt(&org.address),
            opt(&org.phone),
            opt(&org.email),
            opt(&org.director),
            opt(&org.status),
            org.reg_date_display().unwrap_or_default(),
            s!(),
        ],
        None => {
            let mut row = vec![s!(); HEADERS.len()];
            row[0] = outcome.query.clone();
            row[1] = s!(NOT_FOUND);
            row[HEADERS.len() - 1] = opt(&outcome.error);
            row
        }
    }
}

/// Header line plus one row per outcome.
pub fn outcomes_to_string(outcomes: &[SearchOutcome], sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    let _ = write_row(&mut buf, &HEADERS, sep);
    for o in outcomes {
        let _ = write_row(&mut buf, &outcome_row(o), sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
