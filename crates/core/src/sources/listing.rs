//! HTML listing source using reqwest and scraper.
//!
//! Fetches a search/listing page and extracts one candidate event per card
//! element. Static HTML only; pages that render their cards with JavaScript
//! yield zero events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use er_protocol::Event;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use crate::events::EventDraft;
use crate::sources::base::{Source, SourceError};
use crate::sources::context::SourceContext;
use crate::sources::dates::DateStyle;

/// Where the fields of an event card live on a listing page.
#[derive(Debug, Clone)]
pub struct ListingLayout {
    /// Selector matching one element per event.
    pub card: String,
    /// Selectors evaluated inside the card.
    pub title: String,
    pub date: String,
    pub location: String,
    pub link: String,
    /// Prepended to relative `href`s.
    pub url_prefix: String,
    pub date_style: DateStyle,
    /// Description template; `{title}` is replaced by the card title.
    pub description: String,
    /// Location used when the card has none.
    pub default_location: String,
    /// Value written to `Event::source`.
    pub source_tag: String,
    pub tags: Vec<String>,
}

/// A source backed by one listing URL and a [`ListingLayout`].
pub struct HtmlListingSource {
    name: String,
    base_url: String,
    layout: ListingLayout,
    client: reqwest::Client,
    timeout: Duration,
}

impl HtmlListingSource {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        layout: ListingLayout,
        context: &SourceContext,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            layout,
            client: context.client.clone(),
            timeout: context.timeout,
        }
    }

    /// Fetch raw HTML from the listing URL.
    async fn fetch_html(&self) -> Result<String, SourceError> {
        let response = self.client.get(&self.base_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Extract events from a listing document.
    ///
    /// Cards without a title, a link or a parseable date are skipped.
    pub fn parse_listing(&self, html: &str, now: DateTime<Utc>) -> Result<Vec<Event>, SourceError> {
        let layout = &self.layout;
        let card = parse_selector(&layout.card)?;
        let title = parse_selector(&layout.title)?;
        let date = parse_selector(&layout.date)?;
        let location = parse_selector(&layout.location)?;
        let link = parse_selector(&layout.link)?;

        let document = Html::parse_document(html);
        let mut events = Vec::new();

        for element in document.select(&card) {
            let card_title = first_text(&element, &title);
            let href = element
                .select(&link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);

            let (Some(card_title), Some(href)) = (card_title, href) else {
                continue;
            };

            let date_text = first_text(&element, &date).unwrap_or_default();
            let Some(start) = layout.date_style.parse(&date_text, now) else {
                debug!(
                    source = %self.name,
                    date = %date_text,
                    "Skipping card with unparseable date"
                );
                continue;
            };

            let card_location = first_text(&element, &location)
                .unwrap_or_else(|| layout.default_location.clone());

            let draft = EventDraft::new(card_title.clone(), start, card_location)
                .description(layout.description.replace("{title}", &card_title))
                .url(absolute_url(&layout.url_prefix, &href))
                .source(layout.source_tag.clone())
                .tags(layout.tags.iter().cloned());

            match draft.build(now) {
                Ok(event) => events.push(event),
                Err(e) => warn!(source = %self.name, error = %e, "Skipping invalid card"),
            }
        }

        Ok(events)
    }
}

#[async_trait]
impl Source for HtmlListingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn search_events(&self) -> Result<Vec<Event>, SourceError> {
        let html = self.fetch_html().await?;
        self.parse_listing(&html, Utc::now())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector)
        .map_err(|e| SourceError::Parse(format!("invalid selector '{selector}': {e}")))
}

/// Trimmed text of the first match, if it is non-empty.
fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn absolute_url(prefix: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{prefix}{href}")
    }
}
