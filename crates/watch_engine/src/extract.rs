use scraper::{ElementRef, Html, Selector};
use watch_core::AvailableTier;

use crate::ParseError;

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<Vec<AvailableTier>, ParseError>;
}

/// CSS selectors describing where the campaign page lists its open tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    /// Must match for the page to count as a campaign page at all.
    pub container: String,
    /// Matches one element per purchasable tier.
    pub tier: String,
    /// Attribute on the tier element holding the tier id.
    pub id_attribute: String,
    /// Matched inside the tier element for its title.
    pub name: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            container: ".sticky-rewards".to_string(),
            tier: ".sticky-rewards .mobile-hide ol > .pledge--available".to_string(),
            id_attribute: "data-reward-id".to_string(),
            name: ".pledge__title".to_string(),
        }
    }
}

/// Pulls available pledge tiers out of a campaign page.
///
/// A page without the container marker is an error (usually a captcha or
/// maintenance page); a page with the marker but no open tiers is an empty list.
#[derive(Debug)]
pub struct PledgeExtractor {
    container: Selector,
    container_source: String,
    tier: Selector,
    id_attribute: String,
    name: Selector,
}

impl PledgeExtractor {
    pub fn new(selectors: PageSelectors) -> Result<Self, ParseError> {
        Ok(Self {
            container: compile(&selectors.container)?,
            tier: compile(&selectors.tier)?,
            name: compile(&selectors.name)?,
            container_source: selectors.container,
            id_attribute: selectors.id_attribute,
        })
    }

    fn tier_from(&self, element: ElementRef<'_>) -> Option<AvailableTier> {
        let id = element.value().attr(&self.id_attribute)?.trim();
        if id.is_empty() {
            return None;
        }
        let name = element
            .select(&self.name)
            .next()
            .map(|node| collapse_whitespace(node.text()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| id.to_string());
        Some(AvailableTier::new(id, name))
    }
}

impl Extractor for PledgeExtractor {
    fn extract(&self, html: &str) -> Result<Vec<AvailableTier>, ParseError> {
        let doc = Html::parse_document(html);
        if doc.select(&self.container).next().is_none() {
            return Err(ParseError::MissingMarker {
                selector: self.container_source.clone(),
            });
        }

        Ok(doc
            .select(&self.tier)
            .filter_map(|element| self.tier_from(element))
            .collect())
    }
}

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|err| ParseError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
