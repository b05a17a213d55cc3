//! ECharts options for the dashboard, built with charming.
//!
//! Each chart is serialized to JSON and initialised by a script in the page
//! head, see [charts_script].

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Orient,
        Tooltip, Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use time::macros::format_description;

use crate::{dashboard::aggregation::MonthlySales, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders a container for each chart.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        @for chart in charts {
            div
                id=(chart.id)
                class="min-h-[360px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates the script that initialises `charts` once the page has loaded.
///
/// Charts follow the browser's colour scheme and resize with the window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// An area chart of successful sales per month.
pub(super) fn sales_chart(monthly_sales: &[MonthlySales]) -> Chart {
    let labels = month_labels(monthly_sales);
    let values: Vec<f64> = monthly_sales.iter().map(|sales| sales.total).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Sales")
                .subtext("Last six months, successful transactions only"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .boundary_gap(false)
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Sales")
                .smooth(true)
                .area_style(AreaStyle::new())
                .data(values),
        )
}

/// A pie chart of how successful transactions were paid.
///
/// `payment_methods` must not be empty, the dashboard shows a message
/// instead of an empty pie.
pub(super) fn payment_methods_chart(payment_methods: &[(String, usize)]) -> Chart {
    let data: Vec<(f64, &str)> = payment_methods
        .iter()
        .map(|(method, count)| (*count as f64, method.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Payment methods")
                .subtext("Successful transactions"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("20%"))
        .series(
            Pie::new()
                .name("Payment method")
                .radius(vec!["40%", "70%"])
                .center(vec!["60%", "55%"])
                .data(data),
        )
}

/// Short month names for the x-axis, e.g. "Jan 2025".
fn month_labels(monthly_sales: &[MonthlySales]) -> Vec<String> {
    let format = format_description!("[month repr:short] [year]");

    monthly_sales
        .iter()
        .map(|sales| {
            sales
                .month
                .format(format)
                .unwrap_or_else(|_| sales.month.to_string())
        })
        .collect()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('id-ID', {
              style: 'currency',
              currency: 'IDR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"Rp 0\";",
    )
}
