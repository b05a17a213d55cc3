#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod store;

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_alert, assert_valid_html, parse_html_document, parse_html_fragment, select_text,
};
pub(crate) use http::{assert_hx_redirect, assert_status_ok};
pub(crate) use store::{FailingStore, get_test_store, insert};
