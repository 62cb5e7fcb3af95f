/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~` for the home directory. Unresolvable
/// input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Normalize a remote path for display and comparison input.
///
/// Backslashes become `/` and a trailing separator is dropped, except for
/// the bare server root `$/`.
pub fn normalize_branch_path(s: &str) -> String {
    let s = s.trim().replace('\\', "/");
    match s.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() && stripped != "$" => stripped.to_string(),
        _ => s,
    }
}
