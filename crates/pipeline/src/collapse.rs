//! Token collapsing: multi-word names become single tokens.

/// Remove every space from each name, keeping length and order.
///
/// "Stanley Kubrick" becomes "StanleyKubrick", so the name survives later
/// whitespace splitting as one token. Idempotent.
pub fn collapse_tokens(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| {
            if name.contains(' ') {
                name.replace(' ', "")
            } else {
                name
            }
        })
        .collect()
}
