//! The stat cards at the top of the dashboard.

use maud::{Markup, html};

/// A headline number with an optional month-over-month change.
pub(super) struct StatCard<'a> {
    pub title: &'a str,
    pub value: usize,
    /// The change in percent, if the number is tracked over time.
    pub change: Option<i64>,
}

/// Renders a grid of stat cards.
pub(super) fn stat_cards_view(cards: &[StatCard]) -> Markup {
    html! {
        section id="stat-cards" class="w-full grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-4 gap-4"
        {
            @for card in cards {
                (stat_card(card))
            }
        }
    }
}

fn stat_card(card: &StatCard) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-stat-card=(card.title)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (card.title) }

            div class="mt-2 text-3xl font-bold tabular-nums" data-stat-value { (card.value) }

            @if let Some(change) = card.change {
                div class={ "mt-1 text-sm " (change_color_class(change)) } data-stat-change
                {
                    (format_change(change)) " from last month"
                }
            }
        }
    }
}

fn change_color_class(change: i64) -> &'static str {
    if change >= 0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    }
}

/// Formats a percentage change with an explicit sign for increases.
fn format_change(change: i64) -> String {
    if change > 0 {
        format!("+{change}%")
    } else {
        format!("{change}%")
    }
}
