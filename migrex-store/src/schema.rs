use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDataType {
    Number,
    String,
    Boolean,
}

impl ColumnDataType {
    /// Whether a non-null JSON value can be stored in a column of this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ColumnDataType::Number => value.is_number(),
            ColumnDataType::String => value.is_string(),
            ColumnDataType::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnDataType::Number => "Number",
            ColumnDataType::String => "String",
            ColumnDataType::Boolean => "Boolean",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    #[serde(rename = "type")]
    pub data_type: ColumnDataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub primary_key: bool,
}

impl ColumnDefinition {
    pub fn new(data_type: ColumnDataType) -> Self {
        Self {
            data_type,
            required: false,
            primary_key: false,
        }
    }

    pub fn number() -> Self {
        Self::new(ColumnDataType::Number)
    }

    pub fn string() -> Self {
        Self::new(ColumnDataType::String)
    }

    pub fn boolean() -> Self {
        Self::new(ColumnDataType::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Ordered set of named columns plus an optional indexing hint.
///
/// `index_by` is a lookup hint only, engines never turn it into a uniqueness
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    #[serde(with = "ordered_columns")]
    pub columns: Vec<(String, ColumnDefinition)>,
    #[serde(default)]
    pub index_by: Vec<String>,
}

impl TableDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, name: impl Into<String>, definition: ColumnDefinition) -> Self {
        let name = name.into();

        match self.columns.iter_mut().find(|(n, _)| n == &name) {
            Some((_, existing)) => *existing = definition,
            _ => self.columns.push((name, definition)),
        }

        self
    }

    pub fn index_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_by = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, definition)| definition)
    }

    pub fn primary_key(&self) -> Option<(&str, &ColumnDefinition)> {
        self.columns
            .iter()
            .find(|(_, definition)| definition.primary_key)
            .map(|(name, definition)| (name.as_str(), definition))
    }
}

/// Columns travel as a JSON object whose key order is the column order.
mod ordered_columns {
    use serde::{
        de::{MapAccess, Visitor},
        ser::SerializeMap,
        Deserializer, Serializer,
    };
    use std::fmt;

    use super::ColumnDefinition;

    pub fn serialize<S: Serializer>(
        columns: &[(String, ColumnDefinition)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(columns.len()))?;

        for (name, definition) in columns {
            map.serialize_entry(name, definition)?;
        }

        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, ColumnDefinition)>, D::Error> {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = Vec<(String, ColumnDefinition)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut columns = Vec::new();

                while let Some((name, definition)) = access.next_entry()? {
                    columns.push((name, definition));
                }

                Ok(columns)
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}
