//! Typed classification of the raw XML feed
//!
//! The feed is a flat list of leaf elements: tag = field name, text = raw
//! value. Each value is classified as integer, float or opaque string and
//! collected into an ordered [`FieldSet`]; the `bardata` element is excluded
//! by tag name.

use crate::app::models::{FieldSet, TypedValue};
use crate::constants::EXCLUDED_FIELD;
use crate::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

/// Classifies raw feed tokens and parses the XML feed into a field set
pub struct FieldClassifier {
    int_re: Regex,
    float_re: Regex,
}

impl FieldClassifier {
    /// Create a classifier with the feed's unsigned number patterns
    pub fn new() -> Self {
        Self {
            int_re: Regex::new(r"^[0-9]+$").unwrap(),
            float_re: Regex::new(r"^[0-9]+\.[0-9]+$").unwrap(),
        }
    }

    /// Classify one raw token.
    ///
    /// A token matching the float pattern is a Float, one matching only the
    /// integer pattern is an Integer, anything else stays a String.
    /// Classification is total: every token yields exactly one variant.
    pub fn classify(&self, raw: &str) -> TypedValue {
        if self.int_re.is_match(raw) {
            if self.float_re.is_match(raw) {
                if let Ok(value) = raw.parse::<f64>() {
                    return TypedValue::Float(value);
                }
            } else if let Ok(value) = raw.parse::<i64>() {
                return TypedValue::Integer(value);
            }
        } else if self.float_re.is_match(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                return TypedValue::Float(value);
            }
        }

        TypedValue::Text(raw.to_string())
    }

    /// Parse the XML feed document into an ordered, classified field set.
    ///
    /// Only direct children of the document root are considered; nested
    /// content below them is ignored. Element order is preserved.
    pub fn parse_feed(&self, xml: &str) -> Result<FieldSet> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut fields = FieldSet::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut current_tag = String::new();
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    if depth == 2 {
                        current_tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        current_text.clear();
                    }
                }
                Ok(Event::Empty(e)) => {
                    if depth == 1 {
                        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        if tag != EXCLUDED_FIELD {
                            fields.insert(tag, self.classify(""));
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    if depth == 2 {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::xml_format(err.to_string()))?;
                        current_text.push_str(&text);
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2 && current_tag != EXCLUDED_FIELD {
                        let value = self.classify(current_text.trim());
                        fields.insert(std::mem::take(&mut current_tag), value);
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::xml_format(e.to_string())),
            }
            buf.clear();
        }

        Ok(fields)
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_integer() {
        let classifier = FieldClassifier::new();
        assert_eq!(classifier.classify("123"), TypedValue::Integer(123));
        assert_eq!(classifier.classify("0"), TypedValue::Integer(0));
    }

    #[test]
    fn test_classify_float() {
        let classifier = FieldClassifier::new();
        assert_eq!(classifier.classify("12.50"), TypedValue::Float(12.5));
        assert_eq!(classifier.classify("0.0"), TypedValue::Float(0.0));
    }

    #[test]
    fn test_classify_string() {
        let classifier = FieldClassifier::new();
        assert_eq!(classifier.classify("N"), TypedValue::Text("N".to_string()));
        assert_eq!(classifier.classify(""), TypedValue::Text(String::new()));
        // the feed patterns are unsigned, so signed numbers stay strings
        assert_eq!(
            classifier.classify("-5"),
            TypedValue::Text("-5".to_string())
        );
        assert_eq!(
            classifier.classify("12."),
            TypedValue::Text("12.".to_string())
        );
        assert_eq!(
            classifier.classify("18.07.2024 13:37:39"),
            TypedValue::Text("18.07.2024 13:37:39".to_string())
        );
    }

    #[test]
    fn test_parse_feed_classifies_and_orders() {
        let classifier = FieldClassifier::new();
        let xml = r#"<wx>
            <timestamp>18.07.2024 13:37:39</timestamp>
            <outtemp>29.1</outtemp>
            <humidity>63</humidity>
            <winddir>N</winddir>
        </wx>"#;

        let fields = classifier.parse_feed(xml).unwrap();
        assert_eq!(fields.len(), 4);

        let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["timestamp", "outtemp", "humidity", "winddir"]);

        assert_eq!(fields.get("outtemp"), Some(&TypedValue::Float(29.1)));
        assert_eq!(fields.get("humidity"), Some(&TypedValue::Integer(63)));
        assert_eq!(
            fields.get("winddir"),
            Some(&TypedValue::Text("N".to_string()))
        );
    }

    #[test]
    fn test_parse_feed_excludes_bardata() {
        let classifier = FieldClassifier::new();
        let xml = r#"<wx>
            <outtemp>29.1</outtemp>
            <bardata>1013 1014 1015</bardata>
            <humidity>63</humidity>
        </wx>"#;

        let fields = classifier.parse_feed(xml).unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.get("bardata").is_none());
    }

    #[test]
    fn test_parse_feed_malformed_xml_fails() {
        let classifier = FieldClassifier::new();
        let result = classifier.parse_feed("<wx><outtemp>29.1</wx>");
        assert!(matches!(result, Err(Error::XmlFormat { .. })));
    }
}
