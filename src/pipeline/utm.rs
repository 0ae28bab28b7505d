use std::collections::HashSet;
use url::form_urlencoded;

use crate::domain::UtmParams;

/// Append the present UTM parameters to `base_url`.
///
/// Keys already in the base query are left alone, so applying the same
/// parameters twice yields the same string. Any `#fragment` stays last.
pub fn build_url_with_utm(base_url: &str, utm: &UtmParams) -> String {
    let (head, fragment) = match base_url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (base_url, None),
    };

    let existing_query = head.split_once('?').map(|(_, query)| query);
    let existing_keys: HashSet<String> = existing_query
        .map(|query| {
            form_urlencoded::parse(query.as_bytes())
                .map(|(key, _)| key.into_owned())
                .collect()
        })
        .unwrap_or_default();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut appended = false;
    for (key, value) in utm.entries() {
        if !existing_keys.contains(key) {
            serializer.append_pair(key, value);
            appended = true;
        }
    }

    if !appended {
        return base_url.to_string();
    }

    let mut url = String::with_capacity(base_url.len() + 64);
    url.push_str(head);
    match existing_query {
        Some(query) if query.is_empty() || query.ends_with('&') => {}
        Some(_) => url.push('&'),
        None => url.push('?'),
    }
    url.push_str(&serializer.finish());
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}
