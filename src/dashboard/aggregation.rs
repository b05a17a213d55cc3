//! Transaction statistics for the dashboard.
//!
//! Everything here is computed in a single pass over the transactions already
//! loaded from the store. Malformed records never cause an error: a missing
//! amount counts as zero, a missing timestamp counts as "now" and a missing
//! payment method is reported as [UNKNOWN_PAYMENT_METHOD].

use std::collections::{HashMap, HashSet};

use time::{Date, Month, OffsetDateTime};

use crate::transaction::{Transaction, TransactionStatus};

/// The label used for successful transactions without a payment method.
pub(super) const UNKNOWN_PAYMENT_METHOD: &str = "unknown";

/// The number of calendar months in the sales chart, including the current one.
pub(super) const SALES_MONTHS: usize = 6;

/// The total of successful transactions in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MonthlySales {
    /// The first day of the month.
    pub month: Date,
    pub total: f64,
}

/// The statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardSummary {
    pub success_count: usize,
    pub pending_count: usize,
    /// Payment methods of successful transactions with their counts, most
    /// used first.
    pub payment_methods: Vec<(String, usize)>,
    /// Exactly [SALES_MONTHS] entries, oldest month first.
    pub monthly_sales: Vec<MonthlySales>,
    pub pending_change: i64,
    pub success_change: i64,
    pub customer_change: i64,
    /// The sum of [DashboardSummary::monthly_sales].
    pub total_sales: f64,
    /// The number of successful transactions within the sales months.
    pub sales_count: usize,
    pub average_order_value: f64,
}

/// Summarize `transactions` as of `now`.
///
/// Month buckets use the calendar of `now`'s UTC offset. The percentage
/// changes compare transactions dated before one month ago against all
/// transactions, see [percentage_change].
pub(super) fn summarize(transactions: &[Transaction], now: OffsetDateTime) -> DashboardSummary {
    let cutoff = one_month_before(now);
    let months = last_months(now.date(), SALES_MONTHS);
    let sales_window = months[0]..=months[SALES_MONTHS - 1];

    let mut success_count = 0;
    let mut pending_count = 0;
    let mut prior_success_count = 0;
    let mut prior_pending_count = 0;
    let mut sales_count = 0;
    let mut payment_methods: HashMap<&str, usize> = HashMap::new();
    let mut totals_by_month: HashMap<Date, f64> = HashMap::new();
    let mut customers = HashSet::new();
    let mut prior_customers = HashSet::new();

    for transaction in transactions {
        let created_at = transaction
            .created_at
            .map_or(now, |created_at| created_at.to_offset(now.offset()));
        let is_prior = created_at < cutoff;

        match transaction.status {
            TransactionStatus::Pending => {
                pending_count += 1;

                if is_prior {
                    prior_pending_count += 1;
                }
            }
            TransactionStatus::Success => {
                success_count += 1;

                if is_prior {
                    prior_success_count += 1;
                }

                let method = match transaction.payment_method.as_str() {
                    "" => UNKNOWN_PAYMENT_METHOD,
                    method => method,
                };
                *payment_methods.entry(method).or_insert(0) += 1;

                let month = first_of_month(created_at.date());
                *totals_by_month.entry(month).or_insert(0.0) += transaction.total_amount;

                if sales_window.contains(&month) {
                    sales_count += 1;
                }
            }
            TransactionStatus::Other(_) => {}
        }

        if !transaction.customer_id.is_empty() {
            customers.insert(transaction.customer_id.as_str());

            if is_prior {
                prior_customers.insert(transaction.customer_id.as_str());
            }
        }
    }

    let monthly_sales: Vec<MonthlySales> = months
        .into_iter()
        .map(|month| MonthlySales {
            month,
            total: totals_by_month.get(&month).copied().unwrap_or_default(),
        })
        .collect();
    let total_sales = monthly_sales.iter().map(|sales| sales.total).sum();

    let mut payment_methods: Vec<(String, usize)> = payment_methods
        .into_iter()
        .map(|(method, count)| (method.to_owned(), count))
        .collect();
    payment_methods.sort_by(|(a_method, a_count), (b_method, b_count)| {
        b_count.cmp(a_count).then_with(|| a_method.cmp(b_method))
    });

    DashboardSummary {
        success_count,
        pending_count,
        payment_methods,
        monthly_sales,
        pending_change: percentage_change(prior_pending_count, pending_count),
        success_change: percentage_change(prior_success_count, success_count),
        customer_change: percentage_change(prior_customers.len(), customers.len()),
        total_sales,
        sales_count,
        average_order_value: average(total_sales, sales_count),
    }
}

/// The change from `prior` to `current` as a whole percentage.
///
/// An empty prior period is reported as +100% by convention. Halves round up,
/// so -2.5% is shown as -2%.
pub(super) fn percentage_change(prior: usize, current: usize) -> i64 {
    if prior == 0 {
        return 100;
    }

    let change = (current as f64 - prior as f64) / prior as f64 * 100.0;

    round_half_up(change) as i64
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_half_up(total / count as f64)
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// The same day and time one calendar month earlier.
///
/// Days that do not exist in the earlier month are clamped to its last day,
/// e.g. 31 March becomes 28 or 29 February.
pub(super) fn one_month_before(now: OffsetDateTime) -> OffsetDateTime {
    let (year, month) = previous_month(now.year(), now.month());

    let date = (1..=now.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .unwrap_or(now.date());

    now.replace_date(date)
}

/// The first day of `count` calendar months ending with the month of `today`,
/// oldest first.
fn last_months(today: Date, count: usize) -> Vec<Date> {
    let mut months = Vec::with_capacity(count);
    let mut month = first_of_month(today);

    for _ in 0..count {
        months.push(month);

        let (year, previous) = previous_month(month.year(), month.month());
        month = Date::from_calendar_date(year, previous, 1).unwrap_or(month);
    }

    months.reverse();
    months
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use time::{
        Month, OffsetDateTime,
        macros::{date, datetime},
    };

    use crate::transaction::{Transaction, TransactionStatus};

    use super::{
        SALES_MONTHS, UNKNOWN_PAYMENT_METHOD, one_month_before, percentage_change, summarize,
    };

    const NOW: OffsetDateTime = datetime!(2025-06-15 12:00 +07:00);

    fn transaction(
        status: TransactionStatus,
        amount: f64,
        created_at: Option<OffsetDateTime>,
    ) -> Transaction {
        Transaction {
            status,
            total_amount: amount,
            created_at,
            ..Default::default()
        }
    }

    fn success(amount: f64, created_at: OffsetDateTime) -> Transaction {
        transaction(TransactionStatus::Success, amount, Some(created_at))
    }

    #[test]
    fn empty_input() {
        let summary = summarize(&[], NOW);

        assert_eq!(summary.monthly_sales.len(), SALES_MONTHS);
        assert!(summary.monthly_sales.iter().all(|sales| sales.total == 0.0));
        assert_eq!(summary.pending_change, 100);
        assert_eq!(summary.success_change, 100);
        assert_eq!(summary.customer_change, 100);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.payment_methods.is_empty());
    }

    #[test]
    fn single_success_this_month() {
        let transactions = [Transaction {
            payment_method: "A".to_owned(),
            ..success(1000.0, datetime!(2025-06-02 09:00 +07:00))
        }];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.pending_count, 0);
        assert_eq!(summary.payment_methods, [("A".to_owned(), 1)]);
        let this_month = summary.monthly_sales.last().unwrap();
        assert_eq!(this_month.month, date!(2025 - 06 - 01));
        assert_eq!(this_month.total, 1000.0);
        assert_eq!(summary.total_sales, 1000.0);
        assert_eq!(summary.average_order_value, 1000.0);
    }

    #[test]
    fn monthly_series_is_oldest_first_and_crosses_years() {
        let summary = summarize(&[], datetime!(2025-02-10 00:00 UTC));

        let months = summary
            .monthly_sales
            .iter()
            .map(|sales| sales.month)
            .collect::<Vec<_>>();
        assert_eq!(
            months,
            [
                date!(2024 - 09 - 01),
                date!(2024 - 10 - 01),
                date!(2024 - 11 - 01),
                date!(2024 - 12 - 01),
                date!(2025 - 01 - 01),
                date!(2025 - 02 - 01),
            ]
        );
    }

    #[test]
    fn buckets_use_local_calendar() {
        // 31 May 20:00 UTC is 1 June 03:00 in UTC+7.
        let transactions = [success(500.0, datetime!(2025-05-31 20:00 UTC))];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.monthly_sales[5].total, 500.0);
        assert_eq!(summary.monthly_sales[4].total, 0.0);
    }

    #[test]
    fn sales_outside_window_are_excluded_from_totals() {
        let transactions = [
            success(100.0, datetime!(2025-01-20 00:00 +07:00)),
            success(300.0, datetime!(2024-12-31 00:00 +07:00)),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.monthly_sales[0].month, date!(2025 - 01 - 01));
        assert_eq!(summary.monthly_sales[0].total, 100.0);
        assert_eq!(summary.total_sales, 100.0);
        assert_eq!(summary.sales_count, 1);
        assert_eq!(summary.success_count, 2);
    }

    #[test]
    fn later_this_month_counts_with_its_total() {
        let transactions = [
            success(1000.0, datetime!(2025-06-02 09:00 +07:00)),
            success(3000.0, datetime!(2025-06-28 09:00 +07:00)),
            success(5000.0, datetime!(2025-07-01 09:00 +07:00)),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.total_sales, 4000.0);
        assert_eq!(summary.sales_count, 2);
        assert_eq!(summary.average_order_value, 2000.0);
    }

    #[test]
    fn missing_amount_and_method_still_count() {
        let transactions = [
            transaction(TransactionStatus::Success, 0.0, None),
            transaction(TransactionStatus::Pending, 0.0, None),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(
            summary.payment_methods,
            [(UNKNOWN_PAYMENT_METHOD.to_owned(), 1)]
        );
        assert_eq!(summary.monthly_sales[5].total, 0.0);
    }

    #[test]
    fn other_statuses_are_ignored() {
        let transactions = [
            transaction(TransactionStatus::Other("failed".to_owned()), 50.0, None),
            transaction(TransactionStatus::Other(String::new()), 50.0, None),
            transaction(TransactionStatus::Pending, 10.0, None),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.success_count + summary.pending_count, 1);
        assert!(summary.success_count + summary.pending_count <= transactions.len());
    }

    #[test]
    fn status_changes_compare_prior_period_to_all() {
        let old = datetime!(2025-04-01 00:00 +07:00);
        let recent = datetime!(2025-06-10 00:00 +07:00);
        let transactions = [
            transaction(TransactionStatus::Pending, 0.0, Some(old)),
            transaction(TransactionStatus::Pending, 0.0, Some(old)),
            transaction(TransactionStatus::Pending, 0.0, Some(recent)),
            success(10.0, old),
            success(10.0, recent),
            success(10.0, recent),
            success(10.0, recent),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.pending_change, 50);
        assert_eq!(summary.success_change, 300);
    }

    #[test]
    fn customer_change_counts_distinct_customers() {
        let old = datetime!(2025-03-01 00:00 +07:00);
        let recent = datetime!(2025-06-01 00:00 +07:00);
        let with_customer = |customer_id: &str, created_at| Transaction {
            customer_id: customer_id.to_owned(),
            ..transaction(TransactionStatus::Pending, 0.0, Some(created_at))
        };
        let transactions = [
            with_customer("budi", old),
            with_customer("budi", old),
            with_customer("siti", old),
            with_customer("budi", recent),
            with_customer("ayu", recent),
            with_customer("", recent),
        ];

        let summary = summarize(&transactions, NOW);

        // 2 customers before the cutoff, 3 overall.
        assert_eq!(summary.customer_change, 50);
    }

    #[test]
    fn payment_methods_are_ordered_by_count_then_name() {
        let at = datetime!(2025-06-01 00:00 +07:00);
        let paid_with = |method: &str| Transaction {
            payment_method: method.to_owned(),
            ..success(1.0, at)
        };
        let transactions = [
            paid_with("qris"),
            paid_with("gopay"),
            paid_with("qris"),
            paid_with("bank_transfer"),
        ];

        let summary = summarize(&transactions, NOW);

        assert_eq!(
            summary.payment_methods,
            [
                ("qris".to_owned(), 2),
                ("bank_transfer".to_owned(), 1),
                ("gopay".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn average_order_value_is_rounded() {
        let at = datetime!(2025-06-01 00:00 +07:00);
        let transactions = [success(100.0, at), success(101.0, at)];

        let summary = summarize(&transactions, NOW);

        assert_eq!(summary.average_order_value, 101.0);
    }

    #[test]
    fn percentage_change_rounds_half_up() {
        assert_eq!(percentage_change(0, 7), 100);
        assert_eq!(percentage_change(4, 4), 0);
        assert_eq!(percentage_change(8, 7), -12);
        assert_eq!(percentage_change(40, 39), -2);
        assert_eq!(percentage_change(3, 1), -67);
    }

    #[test]
    fn one_month_before_clamps_to_month_end() {
        assert_eq!(
            one_month_before(datetime!(2025-03-31 10:30 UTC)),
            datetime!(2025-02-28 10:30 UTC)
        );
        assert_eq!(
            one_month_before(datetime!(2024-03-31 10:30 UTC)),
            datetime!(2024-02-29 10:30 UTC)
        );
        assert_eq!(
            one_month_before(datetime!(2025-01-15 00:00 +07:00)),
            datetime!(2024-12-15 00:00 +07:00)
        );
        assert_eq!(one_month_before(NOW).month(), Month::May);
    }
}
