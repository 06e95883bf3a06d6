use jobboard_core::types::PageToken;

/// Page counts up to this size are rendered in full.
const FULL_WINDOW: usize = 7;

/// Controls of the pagination bar for `current_page` out of `total_pages`.
///
/// The first page is always present. Above seven pages the bar collapses to
/// the first pages, the last pages, or the neighbours of `current_page`,
/// with an ellipsis standing for each hidden run.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageToken> {
    let mut pages = vec![PageToken::Page(1)];

    if total_pages <= FULL_WINDOW {
        pages.extend((2..=total_pages).map(PageToken::Page));
    } else if current_page <= 4 {
        pages.extend((2..=5).map(PageToken::Page));
        pages.push(PageToken::Ellipsis);
        pages.push(PageToken::Page(total_pages));
    } else if current_page >= total_pages - 3 {
        pages.push(PageToken::Ellipsis);
        pages.extend((total_pages - 4..=total_pages).map(PageToken::Page));
    } else {
        pages.push(PageToken::Ellipsis);
        pages.extend((current_page - 1..=current_page + 1).map(PageToken::Page));
        pages.push(PageToken::Ellipsis);
        pages.push(PageToken::Page(total_pages));
    }

    pages
}
