/// Comma-join the trimmed, non-blank names, preserving order (no dedupe).
///
/// Used for the `include` (related resources) and `fields` (sparse fieldsets)
/// parameters. Returns `None` when nothing is left, so the parameter is omitted.
pub fn join_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Option<String> {
    let names: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    (!names.is_empty()).then(|| names.join(","))
}
