// src/specs/moviemeter.rs
//! Scraping *spec* for the Most Popular Movies chart (`/chart/moviemeter/`).
//!
//! Purpose:
//! - Read the **rendered** chart and turn each `li.ipc-metadata-list-summary-item`
//!   into a `MovieRecord`, first `MAX_ITEMS` rows only, document order.
//!
//! Per row:
//! - `h3` → title (**required**; a row without one is skipped).
//! - `a.ipc-title-link-wrapper` → detail link. The anchor must exist; its `href`
//!   may not.
//! - `div.cli-title-metadata span` → year, duration, age rating (positional;
//!   missing spans are null).
//! - `img.ipc-image[src]` → poster (optional).
//! - `div.cli-ratings-container` → score + `(1.2M)`-style vote count. If either
//!   half is missing, both are null.
//!
//! Non-Responsibilities:
//! - **No browser driving, waiting, or persistence.** See `scrape::extract`.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::consts::MAX_ITEMS;
use crate::core::html::{absolutize, attr_of, first, selector, text_of};
use crate::core::normalize;
use crate::core::sanitize::strip_vote_decor;
use crate::error::{ExtractError, ItemError};
use crate::model::MovieRecord;

const ITEM: &str = "li.ipc-metadata-list-summary-item";
const TITLE: &str = "h3";
const LINK: &str = "a.ipc-title-link-wrapper";
const META: &str = "div.cli-title-metadata span";
const POSTER: &str = "img.ipc-image";
const RATINGS: &str = "div.cli-ratings-container";
const SCORE: &str = ".ipc-rating-star--rating";
const VOTES: &str = ".ipc-rating-star--voteCount";

/// Compiled selectors for one page parse.
pub struct Selectors {
    item: Selector,
    title: Selector,
    link: Selector,
    meta: Selector,
    poster: Selector,
    ratings: Selector,
    score: Selector,
    votes: Selector,
}

impl Selectors {
    pub fn compile() -> Result<Self, ExtractError> {
        Ok(Self {
            item: selector(ITEM)?,
            title: selector(TITLE)?,
            link: selector(LINK)?,
            meta: selector(META)?,
            poster: selector(POSTER)?,
            ratings: selector(RATINGS)?,
            score: selector(SCORE)?,
            votes: selector(VOTES)?,
        })
    }
}

/// Chart rows currently present in the document (uncapped).
pub fn count_items(html: &str) -> Result<usize, ExtractError> {
    let item = selector(ITEM)?;
    Ok(Html::parse_document(html).select(&item).count())
}

/// Parse the first `MAX_ITEMS` chart rows. Each row succeeds or fails on its own.
pub fn parse_page(html: &str, page_url: &str) -> Result<Vec<Result<MovieRecord, ItemError>>, ExtractError> {
    let sel = Selectors::compile()?;
    let base = Url::parse(page_url).ok();
    let doc = Html::parse_document(html);

    Ok(doc
        .select(&sel.item)
        .take(MAX_ITEMS)
        .map(|item| parse_item(item, &sel, base.as_ref()))
        .collect())
}

pub fn parse_item(item: ElementRef<'_>, sel: &Selectors, base: Option<&Url>) -> Result<MovieRecord, ItemError> {
    let title = first(item, &sel.title)
        .map(text_of)
        .and_then(|t| normalize::text(&t))
        .ok_or(ItemError::MissingTitle)?;

    let anchor = first(item, &sel.link)
        .ok_or_else(|| ItemError::Structure(format!("`{title}` has no title link")))?;
    let link = attr_of(anchor, "href")
        .and_then(|h| normalize::text(&h))
        .map(|h| absolutize(base, &h));

    let meta: Vec<String> = item.select(&sel.meta).map(text_of).collect();
    let meta_at = |i: usize| normalize::opt_text(meta.get(i).map(String::as_str));

    let poster_url = first(item, &sel.poster)
        .and_then(|img| attr_of(img, "src"))
        .and_then(|src| normalize::text(&src))
        .map(|src| absolutize(base, &src));

    let (score, vote_count) = rating_block(item, sel);

    Ok(MovieRecord {
        title,
        year: meta_at(0),
        duration: meta_at(1),
        age_rating: meta_at(2),
        score,
        vote_count,
        link,
        poster_url,
    })
}

fn rating_block(item: ElementRef<'_>, sel: &Selectors) -> (Option<f64>, Option<f64>) {
    let Some(block) = first(item, &sel.ratings) else { return (None, None) };
    match (first(block, &sel.score), first(block, &sel.votes)) {
        (Some(score), Some(votes)) => (
            normalize::score(&text_of(score)),
            normalize::vote_count(&strip_vote_decor(&text_of(votes))),
        ),
        _ => (None, None),
    }
}
