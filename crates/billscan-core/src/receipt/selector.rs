//! Store detection and parser selection.

use tracing::debug;

use super::{DMartParser, GenericParser, ReceiptParser};

/// Decides whether a text belongs to a known store.
pub trait StoreDetector: Send + Sync {
    fn matches(&self, text: &str) -> bool;
}

impl<F> StoreDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, text: &str) -> bool {
        self(text)
    }
}

/// Case-insensitive substring detector.
#[derive(Debug, Clone)]
pub struct MarkerDetector {
    markers: Vec<String>,
}

impl MarkerDetector {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers.into_iter().map(|m| m.as_ref().to_uppercase()).collect(),
        }
    }
}

impl StoreDetector for MarkerDetector {
    fn matches(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        self.markers.iter().any(|marker| upper.contains(marker.as_str()))
    }
}

type ParserFactory = Box<dyn Fn() -> Box<dyn ReceiptParser> + Send + Sync>;

struct StoreEntry {
    name: &'static str,
    detector: Box<dyn StoreDetector>,
    factory: ParserFactory,
}

/// Ordered registry of store detectors.
///
/// Detectors run in registration order and the first match wins, so the
/// selection for a given text is always the same. Texts no detector claims
/// go to [`GenericParser`].
pub struct ParserSelector {
    stores: Vec<StoreEntry>,
}

impl ParserSelector {
    /// Selector with the built-in store detectors.
    pub fn new() -> Self {
        let mut selector = Self::empty();
        selector.register(
            "dmart",
            MarkerDetector::new(["AVENUE E-COMMERCE", "DMART", "ORDER NUMBER"]),
            || Box::new(DMartParser::new()),
        );
        selector
    }

    /// Selector without any store detectors; everything is generic.
    pub fn empty() -> Self {
        Self { stores: Vec::new() }
    }

    /// Append a store detector. Earlier registrations take priority.
    pub fn register<D, F>(&mut self, name: &'static str, detector: D, factory: F) -> &mut Self
    where
        D: StoreDetector + 'static,
        F: Fn() -> Box<dyn ReceiptParser> + Send + Sync + 'static,
    {
        self.stores.push(StoreEntry {
            name,
            detector: Box::new(detector),
            factory: Box::new(factory),
        });
        self
    }

    /// Names of the registered stores, in priority order.
    pub fn stores(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stores.iter().map(|s| s.name)
    }

    /// Name of the store the text belongs to, `None` for generic.
    pub fn detect(&self, text: &str) -> Option<&'static str> {
        self.find(text).map(|entry| entry.name)
    }

    /// Parser for the text.
    pub fn select(&self, text: &str) -> Box<dyn ReceiptParser> {
        match self.find(text) {
            Some(entry) => {
                debug!(store = entry.name, "store detected");
                (entry.factory)()
            }
            None => {
                debug!("no store detected, using generic parser");
                Box::new(GenericParser::new())
            }
        }
    }

    fn find(&self, text: &str) -> Option<&StoreEntry> {
        self.stores.iter().find(|entry| entry.detector.matches(text))
    }
}

impl Default for ParserSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dmart_markers() {
        let selector = ParserSelector::new();

        assert_eq!(selector.detect("Avenue E-Commerce Limited"), Some("dmart"));
        assert_eq!(selector.detect("welcome to dmart ready"), Some("dmart"));
        assert_eq!(selector.detect("Order Number: 77"), Some("dmart"));
        assert_eq!(selector.select("ORDER NUMBER: 77").name(), "dmart");
    }

    #[test]
    fn test_unknown_text_is_generic() {
        let selector = ParserSelector::new();

        assert_eq!(selector.detect("Corner Kirana Store\nTOTAL 50.00"), None);
        assert_eq!(selector.select("Corner Kirana Store").name(), "generic");
        assert_eq!(ParserSelector::empty().select("DMART").name(), "generic");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let selector = ParserSelector::new();
        let text = "DMART\nORDER NUMBER: 12345";

        let first = selector.select(text).name();
        for _ in 0..10 {
            assert_eq!(selector.select(text).name(), first);
        }
    }

    #[test]
    fn test_earlier_registration_wins() {
        let mut selector = ParserSelector::empty();
        selector
            .register("reliance", MarkerDetector::new(["reliance"]), || {
                Box::new(GenericParser::new())
            })
            .register("dmart", MarkerDetector::new(["order number"]), || {
                Box::new(DMartParser::new())
            });

        assert_eq!(selector.detect("RELIANCE SMART\nORDER NUMBER 1"), Some("reliance"));
        assert_eq!(selector.detect("ORDER NUMBER 1"), Some("dmart"));
        assert_eq!(selector.stores().collect::<Vec<_>>(), vec!["reliance", "dmart"]);
    }

    #[test]
    fn test_closure_detector() {
        let mut selector = ParserSelector::empty();
        selector.register("long", |text: &str| text.len() > 5, || {
            Box::new(DMartParser::new())
        });

        assert_eq!(selector.detect("abcdefg"), Some("long"));
        assert_eq!(selector.detect("abc"), None);
    }
}
