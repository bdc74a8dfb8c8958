//! A single data row, addressed by header field name.

use indexmap::IndexMap;

/// Field-name to value mapping for one row, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Zip a header against a row of values.
    ///
    /// Callers check that both have the same length.
    #[must_use]
    pub fn from_row(header: &[String], values: Vec<String>) -> Self {
        Self {
            fields: header.iter().cloned().zip(values).collect(),
        }
    }

    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value at a header position.
    #[must_use]
    pub fn value_at(&self, position: usize) -> Option<&str> {
        self.fields.get_index(position).map(|(_, v)| v.as_str())
    }

    /// Iterate fields in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for a record with no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Year stored in `field`; missing, unparseable and zero years are `None`.
    #[must_use]
    pub fn year(&self, field: &str) -> Option<i32> {
        self.get(field)
            .and_then(|v| v.trim().parse::<i32>().ok())
            .filter(|year| *year != 0)
    }

    /// Numeric value stored in `field`.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(|v| v.trim().parse::<f64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["Country Name", "Country Code", "Year", "Value"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_record_from_row_keeps_header_order() {
        let record = Record::from_row(&header(), row(&["Chad", "TCD", "2016", "10.5"]));

        let names: Vec<&str> = record.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Country Name", "Country Code", "Year", "Value"]);
        assert_eq!(record.len(), 4);
        assert_eq!(record.get("Country Code"), Some("TCD"));
        assert_eq!(record.get("Region"), None);
        assert_eq!(record.value_at(2), Some("2016"));
        assert_eq!(record.value_at(4), None);
    }

    #[test]
    fn test_record_year_parsing() {
        let record = Record::from_row(&header(), row(&["Chad", "TCD", "2016", "10.5"]));
        assert_eq!(record.year("Year"), Some(2016));

        let zero = Record::from_row(&header(), row(&["Chad", "TCD", "0", "10.5"]));
        assert_eq!(zero.year("Year"), None);

        let junk = Record::from_row(&header(), row(&["Chad", "TCD", "n/a", "10.5"]));
        assert_eq!(junk.year("Year"), None);
    }

    #[test]
    fn test_record_number_parsing() {
        let record = Record::from_row(&header(), row(&["Chad", "TCD", "2016", "25760683041.0857"]));
        assert_eq!(record.number("Value"), Some(25_760_683_041.085_7));

        let empty = Record::from_row(&header(), row(&["Chad", "TCD", "2016", ""]));
        assert_eq!(empty.number("Value"), None);
    }

    #[test]
    fn test_default_record_is_empty() {
        assert!(Record::default().is_empty());
    }
}
