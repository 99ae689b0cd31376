use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use vitrina_core::connector::{Connector, has_price_candidate, normalize_price};
use vitrina_core::snapshot::ProductSnapshot;
use vitrina_core::traits::Extract;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("static selector"));
static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:image"]"#).expect("static selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("static selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("static selector"));
static PRICE_EXACT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".price").expect("static selector"));
static PRICE_CLASS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"[class*="price"]"#).expect("static selector"));
static WB_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".j-card-img").expect("static selector"));
static OZON_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".j-product-image").expect("static selector"));

/// Selector-based extraction strategy over fetched HTML.
///
/// Site connectors try their own selectors first and fall back to the
/// generic heuristics; the generic connector is the lowest common
/// denominator (open-graph metadata, then structural guesses). Per-field
/// misses produce empty strings — a page without a price still completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorExtract;

impl SelectorExtract {
    pub fn new() -> Self {
        Self
    }
}

impl Extract for SelectorExtract {
    fn extract(&self, connector: Connector, html: &str, url: &str) -> ProductSnapshot {
        let doc = Html::parse_document(html);

        let title = meta_content(&doc, &OG_TITLE)
            .or_else(|| first_text(&doc, &H1))
            .or_else(|| first_text(&doc, &TITLE))
            .unwrap_or_default();

        let image = meta_content(&doc, &OG_IMAGE)
            .or_else(|| site_image(&doc, connector))
            .or_else(|| first_attr(&doc, &IMG, "src"))
            .unwrap_or_default();

        let price_text = site_price(&doc, connector)
            .or_else(|| first_element_price(&doc, &PRICE_CLASS))
            .or_else(|| first_numeric_text(&doc))
            .unwrap_or_default();

        ProductSnapshot {
            title,
            image,
            price: normalize_price(&price_text),
            source_url: url.to_string(),
        }
    }
}

fn site_image(doc: &Html, connector: Connector) -> Option<String> {
    let selector = match connector {
        Connector::Wildberries => &*WB_IMAGE,
        Connector::Ozon => &*OZON_IMAGE,
        // Lamoda ships no extra selectors; generic heuristics apply.
        Connector::Generic | Connector::Lamoda => return None,
    };
    first_attr(doc, selector, "src")
}

fn site_price(doc: &Html, connector: Connector) -> Option<String> {
    match connector {
        Connector::Wildberries | Connector::Ozon => first_element_price(doc, &PRICE_EXACT),
        Connector::Generic | Connector::Lamoda => None,
    }
}

/// `content` attribute of the first matching element, if non-empty.
fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Price candidate from an element: `content` attribute first (meta tags),
/// else its visible text.
fn first_element_price(doc: &Html, selector: &Selector) -> Option<String> {
    let el = doc.select(selector).next()?;
    if let Some(content) = el.value().attr("content") {
        return Some(content.to_string());
    }
    let text = element_text(el);
    (!text.is_empty()).then_some(text)
}

/// First text node in the document containing a leading digit run.
fn first_numeric_text(doc: &Html) -> Option<String> {
    doc.root_element()
        .text()
        .map(str::trim)
        .find(|chunk| has_price_candidate(chunk))
        .map(str::to_string)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
