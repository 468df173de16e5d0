// Symbol lookup in an exchange ticker list
use crate::models::{Asset, AssetDetails, Ticker};

/// Finds the tickers for `from` and `to` in a single pass over `tickers`.
///
/// Symbols are compared ASCII case-insensitively, and the returned map is
/// keyed by the symbols as they were requested. The scan stops at the second
/// match, counting a ticker once per symbol it matches. If those two matches
/// do not cover both symbols (a duplicated ticker, or the same symbol
/// requested twice) the pair is rejected with `None`, as it is when the list
/// runs out first.
pub fn find_assets(tickers: &[Ticker], from: &str, to: &str) -> Option<AssetDetails> {
    let mut found = AssetDetails::with_capacity(2);
    let mut matches = 0;

    for ticker in tickers {
        for wanted in [from, to] {
            if ticker.symbol.eq_ignore_ascii_case(wanted) {
                found.insert(wanted.to_string(), Asset::from(ticker));
                matches += 1;
            }
        }

        if matches >= 2 {
            return (found.len() == 2).then_some(found);
        }
    }

    None
}
