//! Form fields and input parsing shared by the product, customer and
//! transaction forms.

use maud::{Markup, html};

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// Parse a non-negative amount of money from a form field.
///
/// `field` names the field in error messages, e.g. "Price".
///
/// # Errors
///
/// Returns [Error::InvalidNumber] if `text` is not a finite number and
/// [Error::NegativeAmount] if it is below zero.
pub fn parse_amount(field: &'static str, text: &str) -> Result<f64, Error> {
    let text = text.trim();
    let amount: f64 = text
        .parse()
        .ok()
        .filter(|amount: &f64| amount.is_finite())
        .ok_or_else(|| Error::InvalidNumber(field, text.to_owned()))?;

    if amount < 0.0 {
        return Err(Error::NegativeAmount(field));
    }

    Ok(amount)
}

/// Parse a non-negative whole number from a form field. An empty field is zero.
///
/// # Errors
///
/// Returns [Error::NegativeAmount] for negative numbers and
/// [Error::InvalidNumber] for anything else that is not a whole number.
pub fn parse_count(field: &'static str, text: &str) -> Result<u32, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(0);
    }

    if let Ok(count) = text.parse::<u32>() {
        return Ok(count);
    }

    match text.parse::<i64>() {
        Ok(count) if count < 0 => Err(Error::NegativeAmount(field)),
        _ => Err(Error::InvalidNumber(field, text.to_owned())),
    }
}

/// The attributes of a labelled `<input>`.
pub struct InputField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub type_: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
}

impl<'a> InputField<'a> {
    /// An optional text input.
    pub fn text(name: &'a str, label: &'a str, value: &'a str) -> Self {
        Self {
            name,
            label,
            type_: "text",
            value,
            placeholder: "",
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn type_(mut self, type_: &'a str) -> Self {
        self.type_ = type_;
        self
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
            {
                label for=(self.name) class=(FORM_LABEL_STYLE) { (self.label) }

                @if self.type_ == "number" {
                    input
                        id=(self.name)
                        type="number"
                        name=(self.name)
                        value=(self.value)
                        placeholder=(self.placeholder)
                        min="0"
                        step="any"
                        required[self.required]
                        class=(FORM_TEXT_INPUT_STYLE);
                } @else {
                    input
                        id=(self.name)
                        type=(self.type_)
                        name=(self.name)
                        value=(self.value)
                        placeholder=(self.placeholder)
                        required[self.required]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }
        }
    }
}

/// A `<select>` with one option per `(value, label)` pair.
pub fn select_field(name: &str, label: &str, options: &[(&str, &str)], selected: &str) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (value, text) in options {
                    option value=(value) selected[*value == selected] { (text) }
                }
            }
        }
    }
}

/// Renders `message` as a form error if it is not empty.
pub fn form_error(message: &str) -> Markup {
    html! {
        @if !message.is_empty() {
            p class="text-red-600 dark:text-red-400" { (message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{parse_amount, parse_count};

    #[test]
    fn parse_amount_accepts_decimals_and_zero() {
        assert_eq!(parse_amount("Price", " 1500.5 "), Ok(1500.5));
        assert_eq!(parse_amount("Price", "0"), Ok(0.0));
    }

    #[test]
    fn parse_amount_rejects_negative_numbers() {
        assert_eq!(
            parse_amount("Price", "-1"),
            Err(Error::NegativeAmount("Price"))
        );
    }

    #[test]
    fn parse_amount_rejects_text_and_non_finite_numbers() {
        assert_eq!(
            parse_amount("Amount", "ten"),
            Err(Error::InvalidNumber("Amount", "ten".to_owned()))
        );
        assert_eq!(
            parse_amount("Amount", "inf"),
            Err(Error::InvalidNumber("Amount", "inf".to_owned()))
        );
    }

    #[test]
    fn parse_count_handles_empty_negative_and_fractional_input() {
        assert_eq!(parse_count("Stock", ""), Ok(0));
        assert_eq!(parse_count("Stock", "12"), Ok(12));
        assert_eq!(parse_count("Stock", "-2"), Err(Error::NegativeAmount("Stock")));
        assert_eq!(
            parse_count("Stock", "1.5"),
            Err(Error::InvalidNumber("Stock", "1.5".to_owned()))
        );
    }
}
