use std::{collections::BTreeMap, sync::LazyLock};

/// Locale key of the fallback bundle.
pub const DEFAULT_LOCALE: &str = "";

static BUILTIN: LazyLock<MessageCatalog> = LazyLock::new(MessageCatalog::builtin_bundles);

///
/// MessageCatalog
///
/// Localized display text keyed by resource id. Lookup falls back from the
/// most specific locale (`de_CH`) to its language (`de`) and finally to the
/// default bundle; a key missing everywhere yields an empty string.
///

#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    bundles: BTreeMap<String, BTreeMap<String, String>>,
}

impl MessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared catalog with the display names of the built-in dictionary.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub fn insert(&mut self, locale: &str, key: impl Into<String>, text: impl Into<String>) {
        self.bundles
            .entry(locale.to_string())
            .or_default()
            .insert(key.into(), text.into());
    }

    #[must_use]
    pub fn message(&self, key: &str, locale: &str) -> String {
        if key.is_empty() {
            return String::new();
        }

        fallback_chain(locale)
            .into_iter()
            .find_map(|loc| self.bundles.get(loc).and_then(|b| b.get(key)))
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.bundles.values().any(|b| b.contains_key(key))
    }

    fn builtin_bundles() -> Self {
        let mut catalog = Self::new();

        for (key, text) in DEFAULT_MESSAGES {
            catalog.insert(DEFAULT_LOCALE, *key, *text);
        }
        for (key, text) in GERMAN_MESSAGES {
            catalog.insert("de", *key, *text);
        }

        catalog
    }
}

// "de_CH" -> ["de_CH", "de", ""]
fn fallback_chain(locale: &str) -> Vec<&str> {
    let mut chain = Vec::with_capacity(3);
    if !locale.is_empty() {
        chain.push(locale);
        if let Some((language, _)) = locale.split_once(['_', '-']) {
            chain.push(language);
        }
    }
    chain.push(DEFAULT_LOCALE);

    chain
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("Element.ReportDesign", "Report"),
    ("Element.Library", "Library"),
    ("Element.DataSource", "Data Source"),
    ("Element.OdaDataSource", "Data Source"),
    ("Element.ScriptDataSource", "Scripted Data Source"),
    ("Element.DataSet", "Data Set"),
    ("Element.OdaDataSet", "Data Set"),
    ("Element.ScriptDataSet", "Scripted Data Set"),
    ("Element.JointDataSet", "Joint Data Set"),
    ("Structure.JoinCondition", "Join Condition"),
    ("Structure.ComputedColumn", "Computed Column"),
    ("Structure.ColumnHint", "Column Hint"),
    ("Structure.FilterCondition", "Filter Condition"),
    ("Structure.ParamBinding", "Parameter Binding"),
    ("Structure.ResultSetColumn", "Result Set Column"),
    ("Structure.IncludedLibrary", "Included Library"),
    ("JoinCondition.joinType", "Join Type"),
    ("JoinCondition.joinOperator", "Join Operator"),
    ("JoinCondition.leftDataSet", "Left Data Set"),
    ("JoinCondition.rightDataSet", "Right Data Set"),
    ("JoinCondition.leftExpression", "Left Expression"),
    ("JoinCondition.rightExpression", "Right Expression"),
    ("DataSet.dataSource", "Data Source"),
    ("JointDataSet.dataSets", "Data Sets"),
    ("Method.beforeOpen", "Before Open"),
    ("Method.afterOpen", "After Open"),
    ("Method.onFetch", "On Fetch"),
    ("Method.beforeClose", "Before Close"),
    ("Method.afterClose", "After Close"),
    ("Method.open", "Open"),
    ("Method.fetch", "Fetch"),
    ("Method.close", "Close"),
    ("Argument.this", "Instance"),
    ("Argument.row", "Row"),
    ("Argument.reportContext", "Report Context"),
    ("Type.IDataSetInstance", "Data Set Instance"),
    ("Type.IDataSourceInstance", "Data Source Instance"),
    ("Type.IDataSetRow", "Data Set Row"),
    ("Type.IUpdatableDataSetRow", "Updatable Data Set Row"),
    ("Type.IReportContext", "Report Context"),
];

const GERMAN_MESSAGES: &[(&str, &str)] = &[
    ("Element.DataSet", "Datensatz"),
    ("Element.JointDataSet", "Verknüpfter Datensatz"),
    ("Structure.JoinCondition", "Verknüpfungsbedingung"),
    ("Method.beforeOpen", "Vor dem Öffnen"),
    ("Argument.row", "Zeile"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_from_region_to_language_to_default() {
        let catalog = MessageCatalog::builtin();

        assert_eq!(catalog.message("Element.DataSet", "de_CH"), "Datensatz");
        assert_eq!(catalog.message("Element.DataSet", "de"), "Datensatz");
        assert_eq!(catalog.message("Element.Library", "de_CH"), "Library");
        assert_eq!(catalog.message("Element.Library", "fr"), "Library");
    }

    #[test]
    fn missing_and_blank_keys_are_empty() {
        let catalog = MessageCatalog::builtin();

        assert_eq!(catalog.message("No.Such.Key", "en"), "");
        assert_eq!(catalog.message("", "en"), "");
    }

    #[test]
    fn inserted_messages_override_per_locale() {
        let mut catalog = MessageCatalog::new();
        catalog.insert(DEFAULT_LOCALE, "k", "default");
        catalog.insert("fr", "k", "défaut");

        assert_eq!(catalog.message("k", "fr_CA"), "défaut");
        assert_eq!(catalog.message("k", "en_US"), "default");
        assert!(catalog.contains("k"));
    }
}
