use crate::agents::manifest_loader::DependencyMap;

/// How a names list narrows a dependency map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep only the listed names.
    Include,
    /// Keep everything except the listed names.
    Exclude,
}

/// Returns the filtered copy of `mapping`. Neither argument is modified.
///
/// `Include` yields entries in the order of `names`; names missing from the
/// mapping are ignored. `Exclude` preserves the mapping's own order.
pub fn filter(mapping: &DependencyMap, names: &[String], mode: FilterMode) -> DependencyMap {
    match mode {
        FilterMode::Include => names
            .iter()
            .filter_map(|name| {
                mapping
                    .get(name)
                    .map(|version| (name.clone(), version.clone()))
            })
            .collect(),
        FilterMode::Exclude => mapping
            .iter()
            .filter(|(name, _)| !names.contains(*name))
            .map(|(name, version)| (name.clone(), version.clone()))
            .collect(),
    }
}

/// Applies the `--packages` list, then the `--exclude` list, to `mapping`.
pub fn select(
    mapping: DependencyMap,
    packages: Option<&[String]>,
    exclude: Option<&[String]>,
) -> DependencyMap {
    let mapping = match packages {
        Some(names) => filter(&mapping, names, FilterMode::Include),
        None => mapping,
    };

    match exclude {
        Some(names) => filter(&mapping, names, FilterMode::Exclude),
        None => mapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping() -> DependencyMap {
        json!({ "a": 1, "b": 2, "c": 3 })
            .as_object()
            .cloned()
            .unwrap()
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn include_keeps_listed_entries() {
        let result = filter(&mapping(), &names(&["a", "c"]), FilterMode::Include);
        assert_eq!(serde_json::Value::Object(result), json!({ "a": 1, "c": 3 }));
    }

    #[test]
    fn exclude_drops_listed_entries() {
        let result = filter(&mapping(), &names(&["a", "c"]), FilterMode::Exclude);
        assert_eq!(serde_json::Value::Object(result), json!({ "b": 2 }));
    }

    #[test]
    fn unknown_names_are_ignored() {
        let result = filter(&mapping(), &names(&["a", "zzz"]), FilterMode::Include);
        assert_eq!(result.keys().collect::<Vec<_>>(), ["a"]);

        let result = filter(&mapping(), &names(&["zzz"]), FilterMode::Exclude);
        assert_eq!(result, mapping());
    }

    #[test]
    fn include_follows_names_order() {
        let result = filter(&mapping(), &names(&["c", "a"]), FilterMode::Include);
        assert_eq!(result.keys().collect::<Vec<_>>(), ["c", "a"]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let source = mapping();
        let list = names(&["b"]);
        let _ = filter(&source, &list, FilterMode::Include);
        let _ = filter(&source, &list, FilterMode::Exclude);
        assert_eq!(source, mapping());
        assert_eq!(list, names(&["b"]));
    }

    #[test]
    fn select_without_lists_passes_through() {
        assert_eq!(select(mapping(), None, None), mapping());
    }

    #[test]
    fn select_applies_include_before_exclude() {
        let packages = names(&["a", "b"]);
        let exclude = names(&["b", "c"]);
        let result = select(mapping(), Some(&packages), Some(&exclude));
        assert_eq!(result.keys().collect::<Vec<_>>(), ["a"]);
    }
}
