// src/specs/rusprofile.rs
//! Spec for rusprofile.ru.
//!
//! Search: `/search?query=<name>&type=ul&region=72`, result cards are
//! `div.company-item`. The first card mentioning the region wins; its
//! `dt`/`dd` pairs usually carry enough for a record. Otherwise the card's
//! first link leads to the company page, parsed by [`parse_company_page`].

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use scraper::{ElementRef, Html};

use super::{Candidate, Provider, no_data_on_error};
use crate::config::consts::RUSPROFILE_REGION_CODE;
use crate::core::dates::parse_ru_long;
use crate::core::html::{absolute, doc_first_text, first_href, first_text, mentions, selector, span_after_label, text_of};
use crate::core::sanitize::{first_token, non_empty};
use crate::core::{Accept, Fetch};
use crate::data::Organization;
use crate::error::Result;
use crate::log::Log;

pub const NAME: &str = "rusprofile";

/// Search cards only list active companies.
const ACTIVE_STATUS: &str = "Действующая";

pub struct Rusprofile {
    fetch: Arc<dyn Fetch>,
    base: String,
    detail_delay: Duration,
    log: Log,
}

impl Rusprofile {
    pub fn new(fetch: Arc<dyn Fetch>, base: impl Into<String>, detail_delay: Duration, log: Log) -> Self {
        Self { fetch, base: base.into(), detail_delay, log }
    }

    fn lookup(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        let url = join!(&self.base, "/search");
        let page = self.fetch.get(
            &url,
            &[("query", name), ("type", "ul"), ("region", RUSPROFILE_REGION_CODE)],
            Accept::Html,
        )?;

        match pick_candidate(&page, region)? {
            None => Ok(None),
            Some(Candidate::Record(org)) => Ok(Some(org)),
            Some(Candidate::Detail(href)) => {
                thread::sleep(self.detail_delay);
                let url = absolute(&self.base, &href);
                logd!(self.log, url, "following result link");
                let doc = self.fetch.get(&url, &[], Accept::Html)?;
                parse_company_page(&doc)
            }
        }
    }
}

impl Provider for Rusprofile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(&self, name: &str, region: &str) -> Result<Option<Organization>> {
        Ok(no_data_on_error(&self.log, name, self.lookup(name, region)))
    }
}

/// First region-matching card: its own record if it has one, else its link.
/// Cards with neither are skipped.
pub fn pick_candidate(page: &str, region: &str) -> Result<Option<Candidate>> {
    let doc = Html::parse_document(page);
    let cards = selector("div.company-item")?;

    for card in doc.select(&cards) {
        if !mentions(card, region) {
            continue;
        }
        if let Some(org) = parse_search_card(card)? {
            return Ok(Some(Candidate::Record(org)));
        }
        if let Some(href) = first_href(card, "a[href]")? {
            return Ok(Some(Candidate::Detail(href)));
        }
    }
    Ok(None)
}

/// Record straight from a result card. `None` without a linked title.
pub fn parse_search_card(card: ElementRef<'_>) -> Result<Option<Organization>> {
    let title_sel = selector("div.company-item__title")?;
    let link_sel = selector("a")?;
    let name = card
        .select(&title_sel)
        .next()
        .filter(|t| t.select(&link_sel).next().is_some())
        .and_then(|t| non_empty(&text_of(t)));
    let Some(name) = name else { return Ok(None) };

    let mut org = Organization::new(name)?;

    let dl_sel = selector("div.company-item-info dl")?;
    let dt_sel = selector("dt")?;
    let dd_sel = selector("dd")?;
    for dl in card.select(&dl_sel) {
        let (Some(dt), Some(dd)) = (dl.select(&dt_sel).next(), dl.select(&dd_sel).next()) else {
            continue;
        };
        let label = text_of(dt);
        let value = text_of(dd);
        match label.as_str() {
            "ИНН" => org.inn = non_empty(&value),
            "ОГРН" => org.ogrn = non_empty(&value),
            "Дата регистрации" => org.registration_date = parse_ru_long(&value),
            "Основной вид деятельности" => org.okved = first_token(&value),
            "Директор" | "Генеральный директор" => org.director = non_empty(&value),
            _ => {}
        }
    }

    org.address = first_text(card, "address.company-item__text")?;
    org.status = Some(s!(ACTIVE_STATUS));
    Ok(Some(org))
}

/// Company page. `None` when the page has no `h1.company-name`.
pub fn parse_company_page(page: &str) -> Result<Option<Organization>> {
    let doc = Html::parse_document(page);
    let Some(name) = doc_first_text(&doc, "h1.company-name")? else { return Ok(None) };
    let mut org = Organization::new(name)?;

    if let Some(req) = doc.select(&selector("div#requisites")?).next() {
        org.inn = first_text(req, "span#clip_inn")?;
        org.ogrn = first_text(req, "span#clip_ogrn")?;
        org.kpp = span_after_label(req, "КПП");
    }

    org.okved = doc_first_text(&doc, "#okved2_main .okved-code")?;
    org.address = doc_first_text(&doc, "address")?;

    let row_sel = selector("div.company-row")?;
    org.director = doc
        .select(&row_sel)
        .filter(|row| mentions(*row, "Руководитель"))
        .find_map(|row| first_text(row, "a").ok().flatten());

    org.status = doc_first_text(&doc, "div.company-status")?;
    Ok(Some(org))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SEARCH: &str = include_str!("../../tests/fixtures/rusprofile_search.html");
    const SEARCH_NO_CARD: &str = include_str!("../../tests/fixtures/rusprofile_search_links.html");
    const COMPANY: &str = include_str!("../../tests/fixtures/rusprofile_company.html");

    #[test]
    fn first_card_in_region_is_used() {
        let Some(Candidate::Record(org)) = pick_candidate(SEARCH, "Тюменская область").unwrap() else {
            panic!("expected a record from the card");
        };
        assert_eq!(org.name, "ООО \"РОМАШКА\"");
        assert_eq!(org.inn.as_deref(), Some("7203000001"));
        assert_eq!(org.ogrn.as_deref(), Some("1027200000001"));
        assert_eq!(org.okved.as_deref(), Some("47.11"));
        assert_eq!(org.director.as_deref(), Some("Иванов Иван Иванович"));
        assert_eq!(org.status.as_deref(), Some("Действующая"));
        assert_eq!(
            org.registration_date,
            NaiveDate::from_ymd_opt(2010, 5, 12).unwrap().and_hms_opt(0, 0, 0)
        );
        assert!(org.address.unwrap().contains("Тюмень"));
    }

    #[test]
    fn region_check_is_case_insensitive_and_skips_other_regions() {
        let Some(Candidate::Record(org)) = pick_candidate(SEARCH, "тюменская ОБЛАСТЬ").unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(org.inn.as_deref(), Some("7203000001"));
        assert_eq!(pick_candidate(SEARCH, "Республика Коми").unwrap(), None);
    }

    #[test]
    fn card_without_title_falls_back_to_link() {
        let got = pick_candidate(SEARCH_NO_CARD, "Тюменская область").unwrap();
        assert_eq!(got, Some(Candidate::Detail(s!("/id/1234567"))));
    }

    #[test]
    fn company_page_fields() {
        let org = parse_company_page(COMPANY).unwrap().unwrap();
        assert_eq!(org.name, "ООО \"РОМАШКА\"");
        assert_eq!(org.inn.as_deref(), Some("7203000001"));
        assert_eq!(org.ogrn.as_deref(), Some("1027200000001"));
        assert_eq!(org.kpp.as_deref(), Some("720301001"));
        assert_eq!(org.okved.as_deref(), Some("47.11"));
        assert_eq!(org.director.as_deref(), Some("Иванов Иван Иванович"));
        assert_eq!(org.status.as_deref(), Some("Действующая организация"));
        assert_eq!(org.phone, None);
        assert_eq!(org.registration_date, None);
    }

    #[test]
    fn company_page_without_name_is_no_data() {
        assert_eq!(parse_company_page("<html><body><div id=requisites></div></body></html>").unwrap(), None);
    }
}
