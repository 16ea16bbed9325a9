use std::collections::BTreeSet;

/// Resolves a 1-based page range expression such as `"1-3,5"` into sorted,
/// deduplicated zero-based page indices below `total_pages`.
///
/// An empty expression selects every page. If any comma-separated part is
/// malformed the whole expression is ignored and every page is selected.
pub fn select_pages(range_expr: Option<&str>, total_pages: usize) -> Vec<usize> {
    let all_pages = || (0..total_pages).collect::<Vec<_>>();

    let expr = match range_expr {
        Some(expr) if !expr.is_empty() => expr,
        _ => return all_pages(),
    };

    match parse_expression(expr, total_pages) {
        Some(pages) => pages.into_iter().collect(),
        None => {
            log::debug!("Ignoring malformed page range '{}', selecting all pages", expr);
            all_pages()
        }
    }
}

fn parse_expression(expr: &str, total_pages: usize) -> Option<BTreeSet<usize>> {
    let mut pages = BTreeSet::new();

    for part in expr.split(',') {
        let mut bounds = part.split('-');
        let (start, end) = match (bounds.next(), bounds.next(), bounds.next()) {
            (Some(page), None, None) => {
                let page = parse_page(page)?;
                (page, page)
            }
            (Some(start), Some(end), None) => (parse_page(start)?, parse_page(end)?),
            _ => return None,
        };

        // 1-based inclusive -> 0-based half-open, clamped to the document.
        let first = (start - 1).max(0);
        let last = end.min(total_pages as i64);
        if first < last {
            pages.extend(first as usize..last as usize);
        }
    }

    Some(pages)
}

fn parse_page(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
