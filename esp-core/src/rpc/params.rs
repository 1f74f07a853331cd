//! Parameter-Zugriff per Pfad (`$.app.blink_period_ms`, `$.list[0]`)
//!
//! Fehlende Felder oder falsche Typen liefern immer den übergebenen
//! Default, nie einen Fehler.

use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct Params<'a> {
    root: Option<&'a Value>,
}

impl<'a> Params<'a> {
    pub fn new(root: Option<&'a Value>) -> Self {
        Self { root }
    }

    /// Rohwert am Pfad, `None` wenn nicht vorhanden
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        let mut rest = path.strip_prefix('$')?;
        let mut node = self.root?;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                let end = after.find(|c: char| c == '.' || c == '[').unwrap_or(after.len());
                let (key, tail) = after.split_at(end);
                node = node.as_object()?.get(key)?;
                rest = tail;
            } else if let Some(after) = rest.strip_prefix('[') {
                let (index, tail) = after.split_once(']')?;
                node = node.as_array()?.get(index.parse::<usize>().ok()?)?;
                rest = tail;
            } else {
                return None;
            }
        }
        Some(node)
    }

    pub fn get_number(&self, path: &str, default: f64) -> f64 {
        self.lookup(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Ganzzahl am Pfad; Fließkommazahlen werden abgeschnitten
    pub fn get_int(&self, path: &str, default: i64) -> i64 {
        self.lookup(path)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .unwrap_or(default)
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.lookup(path).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_str<'d>(&self, path: &str, default: &'d str) -> &'d str
    where
        'a: 'd,
    {
        self.lookup(path).and_then(Value::as_str).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nested_number() {
        let v = value(r#"{"app":{"blink_period_ms":250}}"#);
        let params = Params::new(Some(&v));
        assert_eq!(params.get_int("$.app.blink_period_ms", -1), 250);
        assert_eq!(params.get_number("$.app.blink_period_ms", -1.0), 250.0);
    }

    #[test]
    fn test_missing_or_wrong_type_uses_default() {
        let v = value(r#"{"on":"yes","n":true}"#);
        let params = Params::new(Some(&v));
        assert!(!params.get_bool("$.on", false));
        assert_eq!(params.get_int("$.n", 7), 7);
        assert_eq!(params.get_int("$.missing.deeper", -1), -1);
        assert_eq!(params.get_str("$.n", "dflt"), "dflt");
    }

    #[test]
    fn test_array_index() {
        let v = value(r#"{"leds":[{"on":false},{"on":true}]}"#);
        let params = Params::new(Some(&v));
        assert!(params.get_bool("$.leds[1].on", false));
        assert!(!params.get_bool("$.leds[5].on", false));
    }

    #[test]
    fn test_float_truncates_for_int() {
        let v = value(r#"{"x":12.9}"#);
        assert_eq!(Params::new(Some(&v)).get_int("$.x", 0), 12);
    }

    #[test]
    fn test_no_params() {
        let params = Params::new(None);
        assert!(params.get_bool("$.on", true));
        assert!(params.lookup("$").is_none());
    }

    #[test]
    fn test_root_and_bad_path() {
        let v = value(r#"{"s":"hi"}"#);
        let params = Params::new(Some(&v));
        assert!(params.lookup("$").is_some());
        assert!(params.lookup("s").is_none());
        assert_eq!(params.get_str("$.s", ""), "hi");
    }
}
