//! Dynamic dropdown option resolution.
//!
//! Dropdown columns whose choices depend on other cells in the same row
//! cannot be precomputed at render time. The host registers resolver
//! callbacks; the widget queries them per edit-time request and takes the
//! first non-empty result.

use log::trace;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;
use crate::model::Value;

/// A single resolved dropdown choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    /// The value stored in the cell when this choice is picked.
    pub value: Value,
    /// The display label.
    pub label: String,
}

impl DropdownOption {
    /// Creates a new dropdown option.
    pub fn new(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Response payload of the dropdown-options endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownOptionsResponse {
    /// The resolved choices, possibly empty.
    pub options: Vec<DropdownOption>,
}

/// A host-registered callback resolving options for a (column, row) pair.
pub type OptionResolverFn = dyn Fn(&str, &Record) -> Vec<DropdownOption>;

/// An ordered chain of option resolver callbacks.
///
/// Resolvers run in registration order; the first non-empty result wins.
/// With no resolvers registered, or when every resolver returns an empty
/// list, resolution yields an empty list rather than an error.
#[derive(Default)]
pub struct OptionResolverChain {
    resolvers: Vec<Box<OptionResolverFn>>,
}

impl OptionResolverChain {
    /// Creates an empty resolver chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resolver callback at the end of the chain.
    pub fn register<F>(&mut self, resolver: F)
    where
        F: Fn(&str, &Record) -> Vec<DropdownOption> + 'static,
    {
        self.resolvers.push(Box::new(resolver));
    }

    /// Returns the number of registered resolvers.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns `true` if no resolvers are registered.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolves the options for a column/row pair.
    pub fn resolve(&self, column: &str, row_data: &Record) -> Vec<DropdownOption> {
        for (index, resolver) in self.resolvers.iter().enumerate() {
            let options = resolver(column, row_data);
            if !options.is_empty() {
                trace!("resolver {index} supplied {} options for column '{column}'", options.len());
                return options;
            }
        }
        trace!("no resolver supplied options for column '{column}'");
        Vec::new()
    }
}

impl std::fmt::Debug for OptionResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_resolves_to_empty_list() {
        let chain = OptionResolverChain::new();
        assert!(chain.resolve("status", &Record::new()).is_empty());
    }

    #[test]
    fn test_first_non_empty_result_wins() {
        let mut chain = OptionResolverChain::new();
        chain.register(|_, _| Vec::new());
        chain.register(|column, _| vec![DropdownOption::new(1i64, format!("{column}-first"))]);
        chain.register(|_, _| vec![DropdownOption::new(2i64, "second")]);

        let options = chain.resolve("status", &Record::new());
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "status-first");
    }

    #[test]
    fn test_resolver_sees_row_data() {
        let mut chain = OptionResolverChain::new();
        chain.register(|_, row| {
            let country = row.get_string("country").ok().flatten().unwrap_or("");
            if country == "AU" {
                vec![DropdownOption::new("syd", "Sydney")]
            } else {
                Vec::new()
            }
        });

        let row = Record::new().set("country", "AU");
        assert_eq!(chain.resolve("city", &row).len(), 1);
        assert!(chain.resolve("city", &Record::new()).is_empty());
    }
}
