/*
    This module reads symbols out of undelimited sentences
*/

// Returns the longest catalog symbol that is a prefix of `input`.
// Sentences concatenate symbols with no separator and a catalog may
// contain symbols that are prefixes of others (`T` and `T'`), so the
// longest candidate always wins; a shorter or first-registered match
// would misread `T'x` as starting with `T`.
pub fn read_symbol<'a>(input: &str, catalog: &'a [String]) -> Option<&'a str> {
    let mut best: Option<&'a str> = None;

    for symbol in catalog {
        if symbol.is_empty() || !input.starts_with(symbol.as_str()) {
            continue;
        }
        if best.is_none_or(|b| symbol.len() > b.len()) {
            best = Some(symbol);
        }
    }

    best
}
