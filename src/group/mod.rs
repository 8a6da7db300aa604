use ahash::AHashMap;

use crate::types::GroupRow;

/// Group (cluster key, display name) pairs into output rows. Within a group
/// the distinct names are sorted lexicographically and joined with ", ";
/// the rows themselves are sorted by that joined string, with ties left in
/// first-appearance order. Every key produces a row, including failure-marker
/// keys from the geocode mode.
pub fn group_rows<'a, I>(keyed: I) -> Vec<GroupRow>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut index: AHashMap<String, usize> = AHashMap::new();

    for (key, name) in keyed {
        let idx = match index.get(key) {
            Some(&idx) => idx,
            None => {
                groups.push((key.to_string(), Vec::new()));
                index.insert(key.to_string(), groups.len() - 1);
                groups.len() - 1
            }
        };
        let names = &mut groups[idx].1;
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    let mut rows: Vec<GroupRow> = groups
        .into_iter()
        .map(|(key, mut names)| {
            names.sort();
            GroupRow {
                key,
                names: names.join(", "),
            }
        })
        .collect();

    // sort_by is stable, so equal joined-name rows keep insertion order
    rows.sort_by(|a, b| a.names.cmp(&b.names));
    rows
}
