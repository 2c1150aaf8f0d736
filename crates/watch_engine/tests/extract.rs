use pretty_assertions::assert_eq;
use watch_core::AvailableTier;
use watch_engine::{Extractor, PageSelectors, ParseError, PledgeExtractor};

fn extractor() -> PledgeExtractor {
    PledgeExtractor::new(PageSelectors::default()).expect("default selectors compile")
}

fn campaign_page(items: &str) -> String {
    format!(
        r#"<html><body>
        <div class="sticky-rewards">
          <div class="mobile-hide">
            <ol>{items}</ol>
          </div>
        </div>
        </body></html>"#
    )
}

#[test]
fn available_tiers_are_extracted_with_titles() {
    let html = campaign_page(
        r#"
        <li class="pledge--available" data-reward-id="7792476">
          <h3 class="pledge__title">
            Signed   leatherbound
            only
          </h3>
        </li>
        <li class="pledge--all-gone" data-reward-id="7797498">
          <h3 class="pledge__title">Signed leatherbound w/ swag</h3>
        </li>
        <li class="pledge--available" data-reward-id="7807143">
          <h3 class="pledge__title">2021 Signed leatherbound plus</h3>
        </li>
        "#,
    );

    let tiers = extractor().extract(&html).unwrap();
    assert_eq!(
        tiers,
        vec![
            AvailableTier::new("7792476", "Signed leatherbound only"),
            AvailableTier::new("7807143", "2021 Signed leatherbound plus"),
        ]
    );
}

#[test]
fn tier_without_title_falls_back_to_id_and_without_id_is_skipped() {
    let html = campaign_page(
        r#"
        <li class="pledge--available" data-reward-id="42"><p>no title</p></li>
        <li class="pledge--available"><h3 class="pledge__title">Orphan</h3></li>
        "#,
    );

    let tiers = extractor().extract(&html).unwrap();
    assert_eq!(tiers, vec![AvailableTier::new("42", "42")]);
}

#[test]
fn campaign_page_without_open_tiers_is_empty_not_an_error() {
    let html = campaign_page(r#"<li class="pledge--all-gone" data-reward-id="1"></li>"#);
    assert_eq!(extractor().extract(&html).unwrap(), Vec::new());
}

#[test]
fn page_without_marker_is_a_parse_error() {
    let html = "<html><body><h1>Please verify you are a human</h1></body></html>";
    let err = extractor().extract(html).unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingMarker {
            selector: ".sticky-rewards".to_string()
        }
    );
}

#[test]
fn tiers_outside_the_sidebar_list_are_ignored() {
    let html = r#"<html><body>
        <div class="sticky-rewards"><div class="mobile-hide"><ol></ol></div></div>
        <ol><li class="pledge--available" data-reward-id="9">Elsewhere</li></ol>
        </body></html>"#;
    assert!(extractor().extract(html).unwrap().is_empty());
}

#[test]
fn bad_selector_is_rejected_up_front() {
    let selectors = PageSelectors {
        tier: "ol > > li".to_string(),
        ..PageSelectors::default()
    };
    let err = PledgeExtractor::new(selectors).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSelector { .. }));
}

#[test]
fn custom_selectors_are_honoured() {
    let selectors = PageSelectors {
        container: "#rewards".to_string(),
        tier: "#rewards .open".to_string(),
        id_attribute: "data-id".to_string(),
        name: "span".to_string(),
    };
    let html = r#"<div id="rewards"><div class="open" data-id="A"><span>Tier A</span></div></div>"#;
    let tiers = PledgeExtractor::new(selectors).unwrap().extract(html).unwrap();
    assert_eq!(tiers, vec![AvailableTier::new("A", "Tier A")]);
}
