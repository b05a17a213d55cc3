//! This modules defines the common functionality for paging data.

use maud::{Markup, html};
use serde::Deserialize;

use crate::html::LINK_STYLE;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_pages: 5,
        }
    }
}

/// Controls paginations of a table.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    /// The page number to display. Starts from 1.
    pub page: Option<u64>,
    /// The maximum number of items to display per page.
    pub per_page: Option<u64>,
}

impl Pagination {
    /// Resolve the requested page and page size, falling back to the
    /// defaults in `config`. Both values are at least 1.
    pub fn resolve(&self, config: &PaginationConfig) -> (u64, u64) {
        let page = self.page.unwrap_or(config.default_page).max(1);
        let per_page = self.per_page.unwrap_or(config.default_page_size).max(1);

        (page, per_page)
    }
}

/// The number of pages needed to show `item_count` items, `per_page` at a time.
pub fn page_count(item_count: usize, per_page: u64) -> u64 {
    (item_count as u64).div_ceil(per_page.max(1))
}

/// Limit `page` to the last page, treating an empty list as one page.
pub fn clamp_page(page: u64, page_count: u64) -> u64 {
    page.clamp(1, page_count.max(1))
}

/// The items of `items` shown on `page`.
pub fn page_slice<T>(items: &[T], page: u64, per_page: u64) -> &[T] {
    let start = usize::try_from(page.saturating_sub(1).saturating_mul(per_page))
        .unwrap_or(usize::MAX);
    let end = start.saturating_add(per_page as usize).min(items.len());

    items.get(start..end).unwrap_or_default()
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render `indicators` as links to `page_url` with `page` and `per_page` query parameters.
pub fn pagination_view(page_url: &str, indicators: &[PaginationIndicator], per_page: u64) -> Markup {
    let page_link = |page: u64| format!("{page_url}?page={page}&per_page={per_page}");

    html! {
        nav class="pagination flex justify-center my-4" aria-label="Pagination"
        {
            ul class="pagination flex items-center gap-3"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                a href=(page_link(*page)) class=(LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class="font-bold" { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                p { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_link(*page)) class=(LINK_STYLE) { "Back" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_link(*page)) class=(LINK_STYLE) { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::pagination::{
        Pagination, PaginationConfig, PaginationIndicator, create_pagination_indicators,
        clamp_page, page_count, page_slice, pagination_view,
    };

    #[test]
    fn resolve_uses_defaults_and_clamps_zero() {
        let config = PaginationConfig::default();

        assert_eq!(Pagination::default().resolve(&config), (1, 20));
        assert_eq!(
            Pagination {
                page: Some(0),
                per_page: Some(0)
            }
            .resolve(&config),
            (1, 1)
        );
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
    }

    #[test]
    fn page_slice_handles_last_and_out_of_range_pages() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(page_slice(&items, 1, 2), [1, 2]);
        assert_eq!(page_slice(&items, 3, 2), [5]);
        assert!(page_slice(&items, 4, 2).is_empty());
        assert!(page_slice(&items, u64::MAX, u64::MAX).is_empty());
    }

    #[test]
    fn clamp_page_stays_within_existing_pages() {
        assert_eq!(clamp_page(u64::MAX, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(5, 0), 1);
        assert_eq!(clamp_page(0, 3), 1);
    }

    #[test]
    fn view_marks_current_page_without_link() {
        let indicators = create_pagination_indicators(2, 3, 5);

        let html = Html::parse_fragment(&pagination_view("/transactions", &indicators, 10).into_string());

        let links = html
            .select(&Selector::parse("nav.pagination > ul.pagination a").unwrap())
            .map(|link| link.value().attr("href").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            links,
            [
                "/transactions?page=1&per_page=10",
                "/transactions?page=1&per_page=10",
                "/transactions?page=3&per_page=10",
                "/transactions?page=3&per_page=10",
            ]
        );
        let current = html
            .select(&Selector::parse("p[aria-current=page]").unwrap())
            .next()
            .expect("No current page indicator");
        assert_eq!(current.text().collect::<String>(), "2");
    }

    #[test]
    fn shows_all_pages() {
        let max_pages = 5;
        let page_count = 5;
        let curr_page = 1;
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_left() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 1;
        let want = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(2),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_trailing_ellipsis() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 3;
        let want = [
            PaginationIndicator::BackButton(2),
            PaginationIndicator::Page(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::CurrPage(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::Page(5),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(4),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 10;
        let want = [
            PaginationIndicator::BackButton(9),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Page(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::CurrPage(10),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_leading_ellipsis() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 8;
        let want = [
            PaginationIndicator::BackButton(7),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::CurrPage(8),
            PaginationIndicator::Page(9),
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(9),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn pagination_indicator_shows_page_subset_in_center() {
        let max_pages = 5;
        let page_count = 10;
        let curr_page = 5;
        let want = [
            PaginationIndicator::BackButton(4),
            PaginationIndicator::Page(1),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(3),
            PaginationIndicator::Page(4),
            PaginationIndicator::CurrPage(5),
            PaginationIndicator::Page(6),
            PaginationIndicator::Page(7),
            PaginationIndicator::Ellipsis,
            PaginationIndicator::Page(10),
            PaginationIndicator::NextButton(6),
        ];

        let got = create_pagination_indicators(curr_page, page_count, max_pages);

        assert_eq!(want, got.as_slice());
    }
}
