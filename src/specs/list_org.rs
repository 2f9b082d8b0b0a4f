// src/specs/list_org.rs
//! Spec for list-org.com.
//!
//! Search: `/search?val=<name>&type=all`, candidates are `p.org_list`.
//! The company page has an `h1` name and a `table.table` of label/value rows.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use scraper::Html;

use super::{Provider, no_data_on_error};
use crate::core::html::{absolute, doc_first_text, first_href, mentions, selector, text_of};
use crate::core::sanitize::{first_token, non_empty};
use crate::core::{Accept, Fetch};
use crate::data::Organization;
use crate::error::Result;
use crate::log::Log;

pub const NAME: &str = "list_org";

pub struct ListOrg {
    fetch: Arc<dyn Fetch>,
    base: String,
    detail_delay: Duration,
    log: Log,
}

impl ListOrg {
    pub fn new(fetch: Arc<dyn Fetch>, base: impl Into<String>, detail_delay: Duration, log: Log) -> Self {
        Self { fetch, base: base.into(), detail_delay, log }
    }

    fn lookup(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        let url = join!(&self.base, "/search");
        let page = self.fetch.get(&url, &[("val", name), ("type", "all")], Accept::Html)?;

        let Some(href) = pick_link(&page, region)? else { return Ok(None) };

        thread::sleep(self.detail_delay);
        let url = absolute(&self.base, &href);
        logd!(self.log, url, "following result link");
        let doc = self.fetch.get(&url, &[], Accept::Html)?;
        parse_company_page(&doc)
    }
}

impl Provider for ListOrg {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        Ok(no_data_on_error(&self.log, name, self.lookup(name, region)))
    }
}

/// Link of the first region-matching candidate that has one.
pub fn pick_link(page: &str, region: &str) -> Result<Option<String>> {
    let doc = Html::parse_document(page);
    let items = selector("p.org_list")?;

    for item in doc.select(&items) {
        if !mentions(item, region) {
            continue;
        }
        if let Some(href) = first_href(item, "a")? {
            return Ok(Some(href));
        }
    }
    Ok(None)
}

pub fn parse_company_page(page: &str) -> Result<Option<Organization>> {
    let doc = Html::parse_document(page);
    let Some(name) = doc_first_text(&doc, "h1")? else { return Ok(None) };
    let mut org = Organization::new(name)?;

    let Some(table) = doc.select(&selector("table.table")?).next() else { return Ok(Some(org)) };
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    for row in table.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 2 {
            continue;
        }
        let label = text_of(cells[0]).to_lowercase();
        let Some(value) = non_empty(&text_of(cells[1])) else { continue };
        apply_row(&mut org, &label, value);
    }
    Ok(Some(org))
}

fn apply_row(org: &mut Organization, label: &str, value: String) {
    if label.contains("инн") {
        match value.split_once('/') {
            Some((inn, kpp)) if label.contains("кпп") => {
                org.inn = non_empty(inn);
                org.kpp = non_empty(kpp);
            }
            _ => org.inn = Some(value),
        }
    } else if label.contains("огрн") {
        org.ogrn = Some(value);
    } else if label.contains("кпп") {
        org.kpp = Some(value);
    } else if label.contains("адрес") {
        org.address = Some(value);
    } else if label.contains("телефон") {
        org.phone = Some(value);
    } else if label.contains("e-mail") || label.contains("почта") {
        org.email = Some(value);
    } else if label.contains("руководитель") || label.contains("директор") {
        org.director = Some(value);
    } else if label.contains("статус") {
        org.status = Some(value);
    } else if label.contains("оквэд") {
        let Some(code) = first_token(&value) else { return };
        if org.okved.is_none() {
            org.okved = Some(code);
        } else {
            org.okved_additional.push(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = include_str!("../../tests/fixtures/list_org_search.html");
    const COMPANY: &str = include_str!("../../tests/fixtures/list_org_company.html");

    #[test]
    fn picks_first_candidate_in_region() {
        assert_eq!(pick_link(SEARCH, "Тюменская область").unwrap(), Some(s!("/company/4242")));
        assert_eq!(pick_link(SEARCH, "Омская область").unwrap(), None);
    }

    #[test]
    fn table_rows_by_label() {
        let org = parse_company_page(COMPANY).unwrap().unwrap();
        assert_eq!(org.name, "ООО \"РОМАШКА\"");
        assert_eq!(org.inn.as_deref(), Some("7203000001"));
        assert_eq!(org.kpp.as_deref(), Some("720301001"));
        assert_eq!(org.ogrn.as_deref(), Some("1027200000001"));
        assert_eq!(org.director.as_deref(), Some("Иванов Иван Иванович"));
        assert_eq!(org.phone.as_deref(), Some("+7 (3452) 00-00-00"));
        assert_eq!(org.email.as_deref(), Some("info@romashka.example"));
        assert_eq!(org.status.as_deref(), Some("Действующая"));
        assert!(org.address.as_deref().unwrap().starts_with("625000"));
    }

    #[test]
    fn later_okved_rows_are_additional() {
        let org = parse_company_page(COMPANY).unwrap().unwrap();
        assert_eq!(org.okved.as_deref(), Some("47.11"));
        assert_eq!(org.okved_additional, vec![s!("52.10"), s!("49.41")]);
    }

    #[test]
    fn plain_inn_row_is_kept_whole() {
        let mut org = Organization::new("X").unwrap();
        apply_row(&mut org, "инн:", s!("7203000001"));
        assert_eq!(org.inn.as_deref(), Some("7203000001"));
        assert_eq!(org.kpp, None);
    }

    #[test]
    fn page_without_heading_is_no_data() {
        let page = "<table class=table><tr><td>ИНН</td><td>1</td></tr></table>";
        assert_eq!(parse_company_page(page).unwrap(), None);
    }
}
