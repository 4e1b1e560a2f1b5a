//! Declarative filter expressions for list queries.
//!
//! A [`FilterBuilder`] accumulates comparison and boolean nodes and renders
//! them as the JSON document the API accepts in its `filter` query parameter.
//!
//! ```
//! use desk_client::FilterBuilder;
//!
//! let open = FilterBuilder::new().eq("status", "open");
//! let urgent = FilterBuilder::new().gte("priority", 3);
//!
//! let filter = FilterBuilder::new().and([&open, &urgent]);
//! assert_eq!(
//!     filter.build(),
//!     r#"{"$and":[{"status":{"$eq":"open"}},{"priority":{"$gte":3}}]}"#
//! );
//! ```

use std::fmt;

use serde_json::{Map, Value};

/// Operators understood by the filter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Nin,
    And,
    Or,
}

impl FilterOperator {
    /// The wire form of the operator, e.g. `$eq`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::In => "$in",
            Self::Nin => "$nin",
            Self::And => "$and",
            Self::Or => "$or",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fluent builder for a filter expression.
///
/// Every method consumes and returns the builder so calls chain. A field
/// that receives several distinct operators keeps one key per operator,
/// which is how ranges are expressed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterBuilder {
    expr: Map<String, Value>,
}

impl FilterBuilder {
    /// An empty expression. Builds to `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Eq, value.into())
    }

    pub fn ne(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Ne, value.into())
    }

    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Lt, value.into())
    }

    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Lte, value.into())
    }

    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Gt, value.into())
    }

    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.compare(field, FilterOperator::Gte, value.into())
    }

    /// Match any of `values`. Order and element types are kept as given;
    /// an empty sequence yields `[]`.
    pub fn r#in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.compare(field, FilterOperator::In, Value::Array(list))
    }

    /// Match none of `values`.
    pub fn nin<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list = values.into_iter().map(Into::into).collect();
        self.compare(field, FilterOperator::Nin, Value::Array(list))
    }

    /// All of `filters` must match.
    ///
    /// Each child's expression is copied at this point; later changes to a
    /// child builder are not reflected here.
    pub fn and<'a, I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = &'a FilterBuilder>,
    {
        self.combine(FilterOperator::And, filters)
    }

    /// Any of `filters` must match.
    pub fn or<'a, I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = &'a FilterBuilder>,
    {
        self.combine(FilterOperator::Or, filters)
    }

    /// True when no node has been added.
    pub fn is_empty(&self) -> bool {
        self.expr.is_empty()
    }

    /// The expression as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.expr.clone())
    }

    /// Render the expression as compact JSON text.
    pub fn build(&self) -> String {
        // Object keys are kept sorted, so equal expressions render equally.
        Value::Object(self.expr.clone()).to_string()
    }

    fn compare(mut self, field: &str, op: FilterOperator, value: Value) -> Self {
        let slot = self
            .expr
            .entry(field.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(ops) = slot {
            ops.insert(op.as_str().to_string(), value);
        }
        self
    }

    fn combine<'a, I>(mut self, op: FilterOperator, filters: I) -> Self
    where
        I: IntoIterator<Item = &'a FilterBuilder>,
    {
        let children = filters.into_iter().map(FilterBuilder::to_value).collect();
        self.expr
            .insert(op.as_str().to_string(), Value::Array(children));
        self
    }
}

impl fmt::Display for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
